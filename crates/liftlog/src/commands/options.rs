//! Options command implementation
//!
//! Prints the fixed choices for workout type, time of day and duration.

use anyhow::Result;
use liftlog_core::{Catalog, CatalogOption, Duration, TimeOfDay, WorkoutType};
use serde_json::json;

fn listing<C: Catalog>() -> (&'static str, &'static [CatalogOption]) {
    (C::TITLE, C::OPTIONS)
}

/// Print every catalog
///
/// # Errors
///
/// Returns an error if JSON output cannot be serialized
pub fn run(json: bool) -> Result<()> {
    let catalogs = [
        listing::<WorkoutType>(),
        listing::<TimeOfDay>(),
        listing::<Duration>(),
    ];

    if json {
        let value = json!({
            "workoutTypes": WorkoutType::OPTIONS,
            "timesOfDay": TimeOfDay::OPTIONS,
            "durations": Duration::OPTIONS,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for (title, options) in catalogs {
        println!("{title}:");
        for option in options {
            match option.id {
                Some(id) => println!("  {id}. {}", option.name),
                None => println!("  - {}", option.name),
            }
        }
    }
    Ok(())
}
