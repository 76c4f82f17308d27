//! Submit command implementation
//!
//! Validates the open draft and hands it to the workout store. The draft
//! file is removed only once the store accepts it; on any other outcome it
//! stays so the user can fix it or retry.

use anyhow::Result;
use liftlog_core::{SubmissionGateway, SubmitOutcome, Submitter};

use super::Context;

/// Submit the open draft through `gateway`
///
/// # Errors
///
/// Returns an error if there is no open draft, the draft is invalid or the
/// store fails
pub async fn submit_with<G: SubmissionGateway>(ctx: &Context, gateway: G) -> Result<()> {
    let draft = ctx.draft_file.load().await?;
    let submitter = Submitter::new(gateway);

    match submitter
        .submit(&draft, &ctx.config.user_id, &ctx.config.validation)
        .await
    {
        SubmitOutcome::Accepted(receipt) => {
            ctx.draft_file.remove().await?;
            println!("✓ Saved workout {}", receipt.workout_id);
            Ok(())
        }
        SubmitOutcome::Invalid(err) => {
            for violation in &err.violations {
                println!("  ✗ {violation}");
            }
            Err(err.into())
        }
        SubmitOutcome::Failed(err) => {
            println!(
                "Draft kept at {}; run submit again to retry",
                ctx.draft_file.path().display()
            );
            Err(err.into())
        }
        SubmitOutcome::Busy => anyhow::bail!("A submission is already in progress"),
    }
}

/// Validate and save the draft, or print the payload with `dry_run`
///
/// # Errors
///
/// Returns an error if there is no open draft, the draft is invalid or the
/// store fails
pub async fn run(ctx: &Context, dry_run: bool) -> Result<()> {
    if dry_run {
        let draft = ctx.draft_file.load().await?;
        let submission = draft.to_submission(&ctx.config.user_id, &ctx.config.validation)?;
        println!("{}", serde_json::to_string_pretty(&submission)?);
        return Ok(());
    }

    let db = ctx.open_db().await?;
    submit_with(ctx, db).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;
    use liftlog_core::{
        Config, GatewayError, MetadataField, Submission, SubmissionReceipt, ValidationError,
        WorkoutDraft, WorkoutId,
    };

    use super::*;

    struct FixedGateway {
        result: std::result::Result<SubmissionReceipt, GatewayError>,
        seen: Arc<Mutex<Vec<Submission>>>,
    }

    #[async_trait::async_trait]
    impl SubmissionGateway for FixedGateway {
        async fn submit(
            &self,
            submission: &Submission,
        ) -> std::result::Result<SubmissionReceipt, GatewayError> {
            self.seen
                .lock()
                .expect("lock")
                .push(submission.clone());
            self.result.clone()
        }
    }

    async fn context_with_draft(dir: &tempfile::TempDir) -> Context {
        let config = Config {
            draft_path: dir.path().join("draft.json").display().to_string(),
            ..Config::default()
        };
        let ctx = Context::new(config);
        let mut draft = WorkoutDraft::new(NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"));
        draft.set_metadata(MetadataField::Name("Legs".to_string()));
        let squat = draft.add_exercise();
        let _ = draft.rename_exercise(&squat, "Squat");
        ctx.draft_file.save(&draft).await.expect("save draft");
        ctx
    }

    #[tokio::test]
    async fn test_accepted_submission_removes_draft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with_draft(&dir).await;
        let seen = Arc::new(Mutex::new(Vec::new()));
        let gateway = FixedGateway {
            result: Ok(SubmissionReceipt::success(WorkoutId::new(1))),
            seen: Arc::clone(&seen),
        };

        submit_with(&ctx, gateway).await.expect("submit succeeds");

        assert!(!ctx.draft_file.exists().await);
        assert_eq!(seen.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_draft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with_draft(&dir).await;
        let gateway = FixedGateway {
            result: Err(GatewayError::Storage("disk full".to_string())),
            seen: Arc::new(Mutex::new(Vec::new())),
        };

        assert!(submit_with(&ctx, gateway).await.is_err());
        assert!(ctx.draft_file.exists().await);
    }

    #[tokio::test]
    async fn test_invalid_draft_reports_violations_and_keeps_draft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with_draft(&dir).await;
        let mut draft = ctx.draft_file.load().await.expect("load draft");
        draft.set_metadata(MetadataField::Name("  ".to_string()));
        ctx.draft_file.save(&draft).await.expect("save draft");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let gateway = FixedGateway {
            result: Ok(SubmissionReceipt::success(WorkoutId::new(1))),
            seen: Arc::clone(&seen),
        };

        let err = submit_with(&ctx, gateway)
            .await
            .expect_err("blank name is invalid");

        let validation = err
            .downcast_ref::<ValidationError>()
            .expect("validation error reaches the caller");
        assert!(!validation.violations.is_empty());
        assert!(ctx.draft_file.exists().await);
        assert!(seen.lock().expect("lock").is_empty());
    }
}
