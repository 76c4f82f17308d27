//! The open draft, kept as a JSON file between invocations.

use std::path::{Path, PathBuf};

use liftlog_core::WorkoutDraft;
use tracing::debug;

use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct DraftFile {
    path: PathBuf,
}

impl DraftFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// # Errors
    ///
    /// Returns [`Error::NoDraft`] if no draft is open, or a parse error if
    /// the file is not a valid draft.
    pub async fn load(&self) -> Result<WorkoutDraft> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NoDraft(self.path.clone()));
            }
            Err(e) => return Err(liftlog_core::Error::from(e).into()),
        };
        Ok(WorkoutDraft::from_json(&text)?)
    }

    /// Write `draft`, replacing any previous contents.
    ///
    /// The file is written next to its final location and renamed into
    /// place, so a crash never leaves half a draft behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, draft: &WorkoutDraft) -> Result<()> {
        let json = draft.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(liftlog_core::Error::from)?;
        }
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, json)
            .await
            .map_err(liftlog_core::Error::from)?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(liftlog_core::Error::from)?;
        debug!(path = %self.path.display(), "draft saved");
        Ok(())
    }

    /// Delete the draft. Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub async fn remove(&self) -> Result<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(liftlog_core::Error::from(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use chrono::NaiveDate;
    use liftlog_core::MetadataField;

    use super::*;

    fn draft_file(dir: &tempfile::TempDir) -> DraftFile {
        DraftFile::new(dir.path().join("nested").join("draft.json"))
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = draft_file(&dir);
        let mut draft =
            WorkoutDraft::new(NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"));
        draft.set_metadata(MetadataField::Name("Legs".to_string()));
        let _ = draft.add_exercise();

        file.save(&draft).await.expect("save");
        let loaded = file.load().await.expect("load");

        assert_eq!(loaded, draft);
        assert!(file.exists().await);
    }

    #[tokio::test]
    async fn test_missing_draft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = draft_file(&dir);

        assert!(matches!(file.load().await, Err(Error::NoDraft(_))));
        assert!(!file.remove().await.expect("remove"));
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = draft_file(&dir);
        let draft = WorkoutDraft::new(NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"));
        file.save(&draft).await.expect("save");

        assert!(file.remove().await.expect("remove"));
        assert!(!file.exists().await);
    }
}
