use std::path::PathBuf;

use liftlog_core::WorkoutId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("No open draft at {0} (start one with 'liftlog draft new')")]
    NoDraft(PathBuf),

    #[error("A draft is already open at {0} (use --force to replace it)")]
    DraftExists(PathBuf),

    #[error("Workout {0} belongs to another user")]
    ForeignWorkout(WorkoutId),

    #[error(transparent)]
    Core(#[from] liftlog_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
