//! Payloads handed to the submission gateway.
//!
//! A [`Submission`] says up front whether it inserts a new workout or
//! updates an existing one, so gateways branch on the variant rather than on
//! which ids happen to be present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::WorkoutId;

/// Normalised workout ready for persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPayload {
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub exercises: Vec<ExercisePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePayload {
    /// Present only for stored exercises in an update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub sets: Vec<SetPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPayload {
    /// Present only for stored sets in an update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Zero-based position within the exercise
    pub set_number: u32,
    pub weight_amount: String,
    pub weight_unit: String,
    pub rep_amount: String,
}

impl SetPayload {
    /// Weight as an integer; blank or non-numeric text yields `None`
    #[must_use]
    pub fn weight(&self) -> Option<i64> {
        parse_amount(&self.weight_amount)
    }

    /// Reps as an integer; blank or non-numeric text yields `None`
    #[must_use]
    pub fn reps(&self) -> Option<i64> {
        parse_amount(&self.rep_amount)
    }
}

fn parse_amount(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// What the gateway is asked to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Submission {
    /// Insert a new workout
    Create(WorkoutPayload),
    /// Replace an existing workout in place
    Update {
        workout_id: WorkoutId,
        payload: WorkoutPayload,
    },
}

impl Submission {
    #[must_use]
    pub const fn payload(&self) -> &WorkoutPayload {
        match self {
            Self::Create(payload) | Self::Update { payload, .. } => payload,
        }
    }

    /// The workout being updated, if this is an update
    #[must_use]
    pub const fn workout_id(&self) -> Option<WorkoutId> {
        match self {
            Self::Create(_) => None,
            Self::Update { workout_id, .. } => Some(*workout_id),
        }
    }

    #[must_use]
    pub const fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }
}
