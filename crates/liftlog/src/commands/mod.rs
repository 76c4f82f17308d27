//! Commands module for liftlog CLI
//!
//! Each command loads the open draft, applies one editor operation and
//! writes it back, or talks to the workout store.

pub mod apply;
pub mod draft;
pub mod exercise;
pub mod options;
pub mod set;
pub mod submit;
pub mod workouts;

use std::path::PathBuf;

use anyhow::Result;
use liftlog_core::{Config, Edit, WorkoutDraft};

use crate::{db::WorkoutDb, draft_file::DraftFile};

/// Loaded configuration plus the resources commands share
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub draft_file: DraftFile,
}

impl Context {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let draft_file = DraftFile::new(&config.draft_path);
        Self { config, draft_file }
    }

    /// Open the workout store named in the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened
    pub async fn open_db(&self) -> Result<WorkoutDb> {
        Ok(WorkoutDb::open(&PathBuf::from(&self.config.database)).await?)
    }
}

/// Load the open draft, run `edit` on it and save the result.
///
/// The draft is only written back when `edit` succeeds.
///
/// # Errors
///
/// Returns an error if there is no open draft, `edit` fails or the draft
/// cannot be saved
pub async fn edit_draft<T, F>(ctx: &Context, edit: F) -> Result<T>
where
    F: FnOnce(&mut WorkoutDraft) -> Result<T>,
{
    let mut draft = ctx.draft_file.load().await?;
    let value = edit(&mut draft)?;
    ctx.draft_file.save(&draft).await?;
    Ok(value)
}

/// Turn an editor result into CLI feedback.
///
/// A floor refusal is reported but is not an error; an unknown id is.
///
/// # Errors
///
/// Returns an error if the edit targeted an id that is not in the draft
pub fn check_edit(edit: Edit, target: &str) -> Result<bool> {
    match edit {
        Edit::Applied => Ok(true),
        Edit::AtMinimum => {
            println!("Kept {target}: at least one must remain");
            Ok(false)
        }
        Edit::UnknownExercise | Edit::UnknownSet => {
            anyhow::bail!("{target} is not in the draft ({edit})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_edit_outcomes() {
        assert!(matches!(check_edit(Edit::Applied, "set new-2"), Ok(true)));
        assert!(matches!(check_edit(Edit::AtMinimum, "set new-2"), Ok(false)));
        assert!(check_edit(Edit::UnknownSet, "set new-9").is_err());
        assert!(check_edit(Edit::UnknownExercise, "exercise 4").is_err());
    }
}
