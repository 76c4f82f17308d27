//! Workouts command implementation
//!
//! Lists saved workouts of the configured user for one calendar month.

use anyhow::Result;
use chrono::{Datelike, Local, Months, NaiveDate};
use liftlog_core::{PersistedWorkout, WorkoutSource};

use super::Context;

/// First and last day of the month containing `day`
///
/// # Errors
///
/// Returns an error if the month is outside the supported date range
pub fn month_range(day: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let first = day
        .with_day(1)
        .ok_or_else(|| anyhow::anyhow!("No first day for {day}"))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| anyhow::anyhow!("Month of {day} is out of range"))?;
    Ok((first, last))
}

/// Parse `YYYY-MM` into the first day of that month
///
/// # Errors
///
/// Returns an error if `text` is not a valid month
pub fn parse_month(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", text.trim()), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid month '{text}' (expected YYYY-MM): {e}"))
}

/// List workouts for `month`, the current month when absent
///
/// # Errors
///
/// Returns an error if the store cannot be read
pub async fn run(ctx: &Context, month: Option<NaiveDate>, json: bool) -> Result<()> {
    let (from, to) = month_range(month.unwrap_or_else(|| Local::now().date_naive()))?;
    let db = ctx.open_db().await?;
    let workouts = db
        .workouts_between(&ctx.config.user_id, from, to)
        .await
        .map_err(liftlog_core::Error::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&workouts)?);
        return Ok(());
    }

    if workouts.is_empty() {
        println!("No workouts between {from} and {to}");
        return Ok(());
    }

    println!("Workouts {} ({}):", from.format("%B %Y"), workouts.len());
    for workout in &workouts {
        println!("  {}", summary_line(workout));
    }
    Ok(())
}

fn summary_line(workout: &PersistedWorkout) -> String {
    format!(
        "[{}] {} {} - {} exercise(s), {} set(s)",
        workout.id,
        workout.date,
        workout.name.as_deref().unwrap_or("(unnamed)"),
        workout.exercises.len(),
        workout.set_count()
    )
}
