//! Pre-submission validation.
//!
//! Which fields are mandatory is a policy decision, so the rules live in a
//! configurable [`ValidationPolicy`]. A failed check reports every violation
//! at once.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    draft::WorkoutDraft,
    identity::{ExerciseId, SetId},
    sets::SetField,
};

/// Rules a draft must satisfy before it can be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Workout name must be non-blank
    pub require_name: bool,
    /// At least one exercise must be submitted
    pub require_exercise: bool,
    /// Exercises without a name are dropped instead of rejected
    pub allow_unnamed_exercises: bool,
    /// Non-blank weight and rep amounts must be non-negative integers
    pub numeric_set_values: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_name: true,
            require_exercise: true,
            allow_unnamed_exercises: false,
            numeric_set_values: true,
        }
    }
}

impl ValidationPolicy {
    /// Accepts any draft
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            require_name: false,
            require_exercise: false,
            allow_unnamed_exercises: true,
            numeric_set_values: false,
        }
    }

    /// Check a draft against this policy
    pub fn check(&self, draft: &WorkoutDraft) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if self.require_name && draft.meta().name.trim().is_empty() {
            violations.push(Violation::MissingName);
        }

        let mut submitted = 0_usize;
        for exercise in draft.exercises().iter() {
            if !exercise.is_named() {
                if !self.allow_unnamed_exercises {
                    violations.push(Violation::UnnamedExercise {
                        exercise: exercise.id,
                    });
                }
                continue;
            }
            submitted += 1;

            if self.numeric_set_values {
                for set in exercise.sets.iter() {
                    for field in [SetField::WeightAmount, SetField::RepAmount] {
                        let value = set.field(field).trim();
                        if !value.is_empty() && value.parse::<u32>().is_err() {
                            violations.push(Violation::NonNumericAmount {
                                exercise: exercise.id,
                                set: set.id,
                                field,
                                value: value.to_string(),
                            });
                        }
                    }
                }
            }
        }

        if self.require_exercise && submitted == 0 {
            violations.push(Violation::NoExercises);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

/// One broken rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingName,
    NoExercises,
    UnnamedExercise {
        exercise: ExerciseId,
    },
    NonNumericAmount {
        exercise: ExerciseId,
        set: SetId,
        field: SetField,
        value: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "workout name is required"),
            Self::NoExercises => write!(f, "at least one exercise is required"),
            Self::UnnamedExercise { exercise } => {
                write!(f, "exercise {exercise} has no name")
            }
            Self::NonNumericAmount {
                exercise,
                set,
                field,
                value,
            } => write!(
                f,
                "exercise {exercise} set {set}: {field} '{value}' is not a whole number"
            ),
        }
    }
}

/// Draft rejected before submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("draft is not ready to submit: {}", .violations.iter().join("; "))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    #[must_use]
    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }
}
