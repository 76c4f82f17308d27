//! Editor commands as data.
//!
//! Every mutating draft operation has a [`DraftCommand`] variant, so a batch
//! of edits can be read from JSON and replayed with [`WorkoutDraft::apply`].
//!
//! ```json
//! [
//!   { "command": "set_metadata", "field": "name", "value": "Leg Day" },
//!   { "command": "add_set", "exercise": "new-1" },
//!   { "command": "update_set", "exercise": "new-1", "set": "new-3",
//!     "field": "repAmount", "value": "5" }
//! ]
//! ```
//!
//! [`WorkoutDraft::apply`]: crate::draft::WorkoutDraft::apply

use serde::{Deserialize, Serialize};

use crate::{
    draft::MetadataField,
    identity::{ExerciseId, SetId},
    sets::SetField,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DraftCommand {
    SetMetadata(MetadataField),
    AddExercise,
    RemoveExercise {
        exercise: ExerciseId,
    },
    RenameExercise {
        exercise: ExerciseId,
        name: String,
    },
    ResetExercise {
        exercise: ExerciseId,
    },
    AddSet {
        exercise: ExerciseId,
    },
    RemoveSet {
        exercise: ExerciseId,
        set: SetId,
    },
    UpdateSet {
        exercise: ExerciseId,
        set: SetId,
        field: SetField,
        value: String,
    },
}

impl DraftCommand {
    /// Short name used in logs and CLI output
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetMetadata(_) => "set_metadata",
            Self::AddExercise => "add_exercise",
            Self::RemoveExercise { .. } => "remove_exercise",
            Self::RenameExercise { .. } => "rename_exercise",
            Self::ResetExercise { .. } => "reset_exercise",
            Self::AddSet { .. } => "add_set",
            Self::RemoveSet { .. } => "remove_set",
            Self::UpdateSet { .. } => "update_set",
        }
    }
}
