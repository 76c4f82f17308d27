//! SQLite-backed workout store.
//!
//! [`WorkoutDb`] is the gateway the CLI submits drafts to and the source it
//! loads saved workouts from. Every submission runs in one transaction, so a
//! failed update leaves the stored workout as it was.

mod query;
mod schema;

use std::path::Path;

use chrono::NaiveDate;
use liftlog_core::{
    GatewayError, PersistedWorkout, Submission, SubmissionGateway, SubmissionReceipt, WorkoutId,
    WorkoutSource,
};
use sqlx::SqlitePool;
use tracing::debug;

use crate::{Error, Result};

#[derive(Clone)]
pub struct WorkoutDb {
    pool: SqlitePool,
}

impl WorkoutDb {
    /// Open the database at `path`, creating it and its schema if needed
    ///
    /// # Errors
    ///
    /// Returns error if the parent directory cannot be created, the database
    /// cannot be opened or the schema cannot be applied
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(liftlog_core::Error::from)?;
        }

        let path_str = path.to_str().ok_or_else(|| {
            Error::DatabaseError(format!("Invalid UTF-8 in path: {}", path.display()))
        })?;
        let db_url = format!("sqlite:{path_str}?mode=rwc");

        let pool = schema::create_connection_pool(&db_url).await?;
        schema::init_schema(&pool).await?;
        debug!(path = %path.display(), "workout database ready");
        Ok(Self { pool })
    }

    async fn begin(&self) -> std::result::Result<sqlx::Transaction<'_, sqlx::Sqlite>, GatewayError> {
        self.pool
            .begin()
            .await
            .map_err(|e| GatewayError::Storage(format!("Failed to begin transaction: {e}")))
    }

    async fn acquire(
        &self,
    ) -> std::result::Result<sqlx::pool::PoolConnection<sqlx::Sqlite>, GatewayError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| GatewayError::Storage(format!("Failed to acquire connection: {e}")))
    }
}

fn commit_error(e: sqlx::Error) -> GatewayError {
    GatewayError::Storage(format!("Failed to commit: {e}"))
}

#[async_trait::async_trait]
impl SubmissionGateway for WorkoutDb {
    async fn submit(
        &self,
        submission: &Submission,
    ) -> std::result::Result<SubmissionReceipt, GatewayError> {
        let mut tx = self.begin().await?;
        let workout_id = match submission {
            Submission::Create(payload) => query::insert_workout(&mut tx, payload).await?,
            Submission::Update {
                workout_id,
                payload,
            } => {
                query::update_workout(&mut tx, *workout_id, payload).await?;
                *workout_id
            }
        };
        tx.commit().await.map_err(commit_error)?;

        debug!(workout = %workout_id, update = submission.is_update(), "workout stored");
        Ok(SubmissionReceipt::success(workout_id))
    }
}

#[async_trait::async_trait]
impl WorkoutSource for WorkoutDb {
    async fn load_workout(
        &self,
        workout_id: WorkoutId,
    ) -> std::result::Result<PersistedWorkout, GatewayError> {
        let mut conn = self.acquire().await?;
        query::fetch_workout(&mut conn, workout_id)
            .await?
            .ok_or(GatewayError::NotFound(workout_id))
    }

    async fn workouts_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> std::result::Result<Vec<PersistedWorkout>, GatewayError> {
        let mut conn = self.acquire().await?;
        query::fetch_workouts_between(&mut conn, user_id, from, to).await
    }
}
