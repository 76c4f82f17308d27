//! Apply command implementation
//!
//! Replays a JSON array of draft commands against the open draft. Floor
//! refusals are reported and skipped; a command naming an unknown id aborts
//! the batch and nothing is saved.

use std::path::Path;

use anyhow::{Context as _, Result};
use liftlog_core::{DraftCommand, Edit, WorkoutDraft};

use super::{edit_draft, Context};

/// Counts of what a batch did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub applied: usize,
    pub refused: usize,
}

/// Apply every command in order
///
/// # Errors
///
/// Returns an error naming the first command that targets an unknown id
pub fn apply_batch(draft: &mut WorkoutDraft, commands: Vec<DraftCommand>) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    for (index, command) in commands.into_iter().enumerate() {
        let name = command.name();
        match draft.apply(command) {
            Edit::Applied => summary.applied += 1,
            Edit::AtMinimum => {
                println!("  #{index} {name}: refused, at least one must remain");
                summary.refused += 1;
            }
            edit @ (Edit::UnknownExercise | Edit::UnknownSet) => {
                anyhow::bail!("command #{index} ({name}) {edit}");
            }
        }
    }
    Ok(summary)
}

/// Read `path` and apply its commands to the open draft
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a command
/// targets an unknown id
pub async fn run(ctx: &Context, path: &Path) -> Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let commands: Vec<DraftCommand> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid command file {}", path.display()))?;

    let total = commands.len();
    let summary = edit_draft(ctx, |draft| apply_batch(draft, commands)).await?;
    println!(
        "✓ Applied {} of {total} command(s), {} refused",
        summary.applied, summary.refused
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use chrono::NaiveDate;
    use liftlog_core::{ExerciseId, SetId};

    use super::*;

    fn draft() -> WorkoutDraft {
        let mut draft = WorkoutDraft::new(NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"));
        let _ = draft.add_exercise();
        draft
    }

    #[test]
    fn test_batch_counts_refusals() {
        let mut draft = draft();
        let commands = vec![
            DraftCommand::AddSet {
                exercise: ExerciseId::local(1),
            },
            DraftCommand::RemoveSet {
                exercise: ExerciseId::local(1),
                set: SetId::local(2),
            },
            DraftCommand::RemoveExercise {
                exercise: ExerciseId::local(1),
            },
        ];

        let summary = apply_batch(&mut draft, commands).expect("batch applies");

        assert_eq!(summary, BatchSummary { applied: 2, refused: 1 });
        assert_eq!(draft.exercises().len(), 1);
    }

    #[test]
    fn test_batch_stops_at_unknown_id() {
        let mut draft = draft();
        let commands = vec![DraftCommand::AddSet {
            exercise: ExerciseId::stored(99),
        }];

        assert!(apply_batch(&mut draft, commands).is_err());
    }
}
