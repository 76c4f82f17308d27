//! Exercise command implementation

use anyhow::Result;
use liftlog_core::ExerciseId;

use super::{check_edit, edit_draft, Context};

/// Append an exercise, optionally picking it right away
///
/// # Errors
///
/// Returns an error if there is no open draft
pub async fn run_add(ctx: &Context, name: Option<&str>) -> Result<()> {
    let id = edit_draft(ctx, |draft| {
        let id = draft.add_exercise();
        if let Some(name) = name {
            let _ = draft.rename_exercise(&id, name);
        }
        Ok(id)
    })
    .await?;
    println!("✓ Added exercise {id}");
    Ok(())
}

/// Remove an exercise; the last one is kept
///
/// # Errors
///
/// Returns an error if the exercise is not in the draft
pub async fn run_remove(ctx: &Context, exercise: ExerciseId) -> Result<()> {
    let target = format!("exercise {exercise}");
    if edit_draft(ctx, |draft| check_edit(draft.remove_exercise(&exercise), &target)).await? {
        println!("✓ Removed {target}");
    }
    Ok(())
}

/// Pick or change the exercise
///
/// # Errors
///
/// Returns an error if the exercise is not in the draft
pub async fn run_rename(ctx: &Context, exercise: ExerciseId, name: &str) -> Result<()> {
    let target = format!("exercise {exercise}");
    edit_draft(ctx, |draft| {
        check_edit(draft.rename_exercise(&exercise, name), &target)
    })
    .await?;
    println!("✓ Exercise {exercise} is now {name}");
    Ok(())
}

/// Clear the exercise choice, keeping its sets
///
/// # Errors
///
/// Returns an error if the exercise is not in the draft
pub async fn run_reset(ctx: &Context, exercise: ExerciseId) -> Result<()> {
    let target = format!("exercise {exercise}");
    edit_draft(ctx, |draft| check_edit(draft.reset_exercise(&exercise), &target)).await?;
    println!("✓ Exercise {exercise} cleared");
    Ok(())
}
