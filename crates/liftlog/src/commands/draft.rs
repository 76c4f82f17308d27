//! Draft command implementation
//!
//! Opens, shows, edits the metadata of and discards the open draft.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use liftlog_core::{DraftOrigin, EditorMode, MetadataField, WorkoutDraft, WorkoutId, WorkoutSource};
use tracing::info;

use super::{edit_draft, Context};
use crate::Error;

/// Draft new options
#[derive(Debug, Clone, Default)]
pub struct NewOptions {
    /// Workout date; today when absent
    pub date: Option<NaiveDate>,
    /// Replace an open draft
    pub force: bool,
}

/// Draft edit options
#[derive(Debug, Clone)]
pub struct EditOptions {
    pub workout: WorkoutId,
    pub force: bool,
}

/// Start a draft for a new workout
///
/// # Errors
///
/// Returns an error if a draft is already open and `force` is not set, or
/// the draft cannot be saved
pub async fn run_new(ctx: &Context, options: &NewOptions) -> Result<()> {
    ensure_replaceable(ctx, options.force).await?;

    let date = options.date.unwrap_or_else(|| Local::now().date_naive());
    let mut draft = WorkoutDraft::with_defaults(date, &ctx.config.defaults);
    let exercise = draft.add_exercise();
    ctx.draft_file.save(&draft).await?;

    info!(%date, "new draft started");
    println!("✓ Started a workout draft for {date}");
    println!("  First exercise: {exercise}");
    Ok(())
}

/// Start a draft editing a saved workout
///
/// # Errors
///
/// Returns an error if a draft is already open and `force` is not set, the
/// workout cannot be loaded or it belongs to another user
pub async fn run_edit(ctx: &Context, options: &EditOptions) -> Result<()> {
    ensure_replaceable(ctx, options.force).await?;

    let db = ctx.open_db().await?;
    let workout = db
        .load_workout(options.workout)
        .await
        .map_err(liftlog_core::Error::from)?;
    if workout.user_id != ctx.config.user_id {
        return Err(Error::ForeignWorkout(options.workout).into());
    }
    let draft = WorkoutDraft::load(&workout).with_weight_unit(&ctx.config.defaults.weight_unit);
    ctx.draft_file.save(&draft).await?;

    info!(workout = %options.workout, "editing stored workout");
    println!(
        "✓ Editing workout {} ({} exercises, {} sets)",
        options.workout,
        workout.exercises.len(),
        workout.set_count()
    );
    Ok(())
}

async fn ensure_replaceable(ctx: &Context, force: bool) -> Result<()> {
    if !force && ctx.draft_file.exists().await {
        return Err(Error::DraftExists(ctx.draft_file.path().to_path_buf()).into());
    }
    Ok(())
}

/// Print the open draft
///
/// # Errors
///
/// Returns an error if there is no open draft
pub async fn run_show(ctx: &Context, json: bool) -> Result<()> {
    let draft = ctx.draft_file.load().await?;
    if json {
        println!("{}", draft.to_json()?);
    } else {
        print!("{}", render(&draft));
    }
    Ok(())
}

/// Change one metadata field
///
/// # Errors
///
/// Returns an error if the field or value is invalid or there is no open
/// draft
pub async fn run_set(ctx: &Context, field: &str, value: &str) -> Result<()> {
    let update = MetadataField::parse(field, value)?;
    edit_draft(ctx, |draft| {
        draft.set_metadata(update);
        Ok(())
    })
    .await?;
    println!("✓ Updated {field}");
    Ok(())
}

/// Throw the open draft away
///
/// # Errors
///
/// Returns an error if the draft file cannot be removed
pub async fn run_discard(ctx: &Context) -> Result<()> {
    if ctx.draft_file.remove().await? {
        println!("✓ Draft discarded");
    } else {
        println!("No open draft");
    }
    Ok(())
}

/// Human-readable view of a draft, one exercise per block
#[must_use]
pub fn render(draft: &WorkoutDraft) -> String {
    let meta = draft.meta();
    let mut out = String::new();

    let heading = match draft.origin() {
        DraftOrigin::New => "New workout".to_string(),
        DraftOrigin::Editing { workout_id } => format!("Editing workout {workout_id}"),
    };
    let name = if meta.name.trim().is_empty() {
        "(unnamed)"
    } else {
        meta.name.as_str()
    };
    let _ = writeln!(out, "{heading}: {name}");
    let _ = writeln!(
        out,
        "  {} | {} | {} | {}",
        meta.date, meta.workout_type, meta.time_of_day, meta.duration
    );
    if let Some(notes) = &meta.notes {
        let _ = writeln!(out, "  Notes: {notes}");
    }

    for exercise in draft.exercises().iter() {
        match exercise.mode() {
            EditorMode::PickExercise => {
                let _ = writeln!(
                    out,
                    "\n[{}] (pick an exercise, {} set(s) kept)",
                    exercise.id,
                    exercise.sets.len()
                );
            }
            EditorMode::EditSets => {
                let _ = writeln!(out, "\n[{}] {}", exercise.id, exercise.name);
                for (number, set) in exercise.sets.numbered() {
                    let _ = writeln!(
                        out,
                        "  {:>2}. [{}] {} {} x {}",
                        number + 1,
                        set.id,
                        blank_as_dash(&set.weight_amount),
                        set.weight_unit,
                        blank_as_dash(&set.rep_amount)
                    );
                }
            }
        }
    }
    out
}

fn blank_as_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
