//! Workouts as the store returns them.
//!
//! Numeric columns are nullable integers, mirroring the relational schema.
//! Text metadata is kept as the stored string; the draft maps it back onto
//! the catalogs when loading.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::WorkoutId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWorkout {
    pub id: WorkoutId,
    pub user_id: String,
    pub name: Option<String>,
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
    pub exercises: Vec<PersistedExercise>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedExercise {
    pub id: i64,
    pub name: String,
    pub sets: Vec<PersistedSet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSet {
    pub id: i64,
    pub set_number: Option<i64>,
    pub weight_amount: Option<i64>,
    pub weight_unit: Option<String>,
    pub rep_amount: Option<i64>,
}

impl PersistedWorkout {
    /// Total number of sets across all exercises
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}
