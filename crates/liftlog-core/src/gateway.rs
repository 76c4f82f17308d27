//! Submission gateway boundary and single-flight submitter.
//!
//! The store that persists workouts sits behind two traits:
//! [`SubmissionGateway`] accepts normalised drafts and [`WorkoutSource`]
//! hands back stored workouts for editing. Implementations live outside
//! the core (SQLite in the `liftlog` binary, mocks in tests).
//!
//! [`Submitter`] wraps a gateway and allows one outstanding submission at a
//! time. A second call while one is in flight is answered with
//! [`SubmitOutcome::Busy`] and never reaches the gateway.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    draft::WorkoutDraft,
    identity::WorkoutId,
    persisted::PersistedWorkout,
    submission::Submission,
    validation::{ValidationError, ValidationPolicy},
};

/// Failure reported by a gateway or workout source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The workout to load or update does not exist
    #[error("workout not found: {0}")]
    NotFound(WorkoutId),

    /// The store refused the submission
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The store could not be reached or failed mid-operation
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Success,
}

/// Acknowledgement of a persisted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub status: SubmissionStatus,
    /// Id of the created or updated workout
    pub workout_id: WorkoutId,
}

impl SubmissionReceipt {
    #[must_use]
    pub const fn success(workout_id: WorkoutId) -> Self {
        Self {
            status: SubmissionStatus::Success,
            workout_id,
        }
    }
}

/// Persists normalised drafts.
///
/// Any `Err` is treated as recoverable by callers: the draft is kept and the
/// user may retry.
#[async_trait::async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Insert or update the workout described by `submission`
    async fn submit(&self, submission: &Submission) -> Result<SubmissionReceipt, GatewayError>;
}

/// Supplies stored workouts
#[async_trait::async_trait]
pub trait WorkoutSource: Send + Sync {
    /// Load one workout with its exercises and sets
    async fn load_workout(&self, workout_id: WorkoutId) -> Result<PersistedWorkout, GatewayError>;

    /// Workouts of `user_id` dated within `from..=to`, oldest first
    async fn workouts_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PersistedWorkout>, GatewayError>;
}

/// Result of [`Submitter::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The gateway persisted the draft
    Accepted(SubmissionReceipt),
    /// The draft breaks the validation policy; nothing was sent
    Invalid(ValidationError),
    /// The gateway failed; the draft can be submitted again
    Failed(GatewayError),
    /// Another submission is still outstanding; nothing was sent
    Busy,
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Gateway wrapper permitting one submission in flight
pub struct Submitter<G> {
    gateway: G,
    in_flight: AtomicBool,
}

impl<G: SubmissionGateway> Submitter<G> {
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Check if a submission is outstanding
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate, normalise and send `draft`.
    ///
    /// The draft is only borrowed, so whatever the outcome it is still
    /// available for another attempt. No retries are made here.
    pub async fn submit(
        &self,
        draft: &WorkoutDraft,
        user_id: &str,
        policy: &ValidationPolicy,
    ) -> SubmitOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            info!("submission ignored: another is in flight");
            return SubmitOutcome::Busy;
        };

        let submission = match draft.to_submission(user_id, policy) {
            Ok(submission) => submission,
            Err(err) => {
                info!(violations = err.violations.len(), "draft failed validation");
                return SubmitOutcome::Invalid(err);
            }
        };

        info!(
            update = submission.is_update(),
            exercises = submission.payload().exercises.len(),
            "submitting workout"
        );
        match self.gateway.submit(&submission).await {
            Ok(receipt) => {
                info!(workout = %receipt.workout_id, "workout saved");
                SubmitOutcome::Accepted(receipt)
            }
            Err(err) => {
                warn!(error = %err, "submission failed; draft kept for retry");
                SubmitOutcome::Failed(err)
            }
        }
    }
}

/// Holds the in-flight flag until dropped
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
