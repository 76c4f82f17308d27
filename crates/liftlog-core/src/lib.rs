//! Liftlog-core - workout draft editing
//!
//! This crate provides:
//! - Identity generation for entities that are not yet persisted
//! - Set and exercise collection editors with floor-of-one invariants
//! - The workout draft aggregate and its normalisation into a submission
//! - Static option catalogs (workout type, time of day, duration)
//! - Gateway traits and a single-flight submitter
//! - Layered configuration

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod command;
pub mod config;
pub mod draft;
pub mod error;
pub mod exercises;
pub mod gateway;
pub mod identity;
pub mod persisted;
pub mod sets;
pub mod submission;
pub mod validation;

pub use catalog::{Catalog, CatalogOption, Duration, TimeOfDay, WorkoutType};
pub use command::DraftCommand;
pub use config::{load_config, Config, DraftDefaults};
pub use draft::{DraftOrigin, MetadataField, WorkoutDraft, WorkoutMeta};
pub use error::{Error, Result};
pub use exercises::{EditorMode, ExerciseDraft, ExerciseList};
pub use gateway::{
    GatewayError, SubmissionGateway, SubmissionReceipt, SubmissionStatus, SubmitOutcome,
    Submitter, WorkoutSource,
};
pub use identity::{Edit, EntityId, ExerciseId, IdGenerator, SetId, WorkoutId, MAX_LOCAL_ID};
pub use persisted::{PersistedExercise, PersistedSet, PersistedWorkout};
pub use sets::{SetDraft, SetField, SetList, DEFAULT_WEIGHT_UNIT};
pub use submission::{ExercisePayload, SetPayload, Submission, WorkoutPayload};
pub use validation::{ValidationError, ValidationPolicy, Violation};
