//! Set command implementation

use anyhow::Result;
use liftlog_core::{ExerciseId, SetField, SetId};

use super::{check_edit, edit_draft, Context};

/// Set add options
#[derive(Debug, Clone)]
pub struct AddOptions {
    pub exercise: ExerciseId,
    pub weight: Option<String>,
    pub reps: Option<String>,
    pub unit: Option<String>,
}

/// Append a set, filling any values given
///
/// # Errors
///
/// Returns an error if the exercise is not in the draft
pub async fn run_add(ctx: &Context, options: &AddOptions) -> Result<()> {
    let exercise = options.exercise;
    let id = edit_draft(ctx, |draft| {
        let id = draft
            .add_set(&exercise)
            .ok_or_else(|| anyhow::anyhow!("exercise {exercise} is not in the draft"))?;
        let values = [
            (SetField::WeightAmount, &options.weight),
            (SetField::RepAmount, &options.reps),
            (SetField::WeightUnit, &options.unit),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                let _ = draft.update_set(&exercise, &id, field, value.clone());
            }
        }
        Ok(id)
    })
    .await?;
    println!("✓ Added set {id} to exercise {exercise}");
    Ok(())
}

/// Remove a set; the last one of its exercise is kept
///
/// # Errors
///
/// Returns an error if the exercise or set is not in the draft
pub async fn run_remove(ctx: &Context, exercise: ExerciseId, set: SetId) -> Result<()> {
    let target = format!("set {set}");
    if edit_draft(ctx, |draft| {
        check_edit(draft.remove_set(&exercise, &set), &target)
    })
    .await?
    {
        println!("✓ Removed {target}");
    }
    Ok(())
}

/// Change one field of a set
///
/// # Errors
///
/// Returns an error if the exercise or set is not in the draft
pub async fn run_update(
    ctx: &Context,
    exercise: ExerciseId,
    set: SetId,
    field: SetField,
    value: &str,
) -> Result<()> {
    let target = format!("set {set}");
    edit_draft(ctx, |draft| {
        check_edit(draft.update_set(&exercise, &set, field, value), &target)
    })
    .await?;
    println!("✓ Set {set} {field} = {value}");
    Ok(())
}
