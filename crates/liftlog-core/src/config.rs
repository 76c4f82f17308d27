//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/liftlog/config.toml
//! 3. Project config: .liftlog/config.toml
//! 4. Environment variables: `LIFTLOG_*`
//!
//! # Example Config
//!
//! ```toml
//! user_id = "alice"
//! database = "~/workouts.db"
//!
//! [defaults]
//! weight_unit = "kg"
//! time_of_day = "Evening"
//! duration = "45 min"
//!
//! [validation]
//! require_name = true
//! allow_unnamed_exercises = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    catalog::{Duration, TimeOfDay, WorkoutType},
    sets::DEFAULT_WEIGHT_UNIT,
    validation::ValidationPolicy,
    Error, Result,
};

const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

// ═══════════════════════════════════════════════════════════════════════════
// CONFIGURATION STRUCTURES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Owner recorded on submitted workouts
    pub user_id: String,
    /// SQLite database file
    pub database: String,
    /// Where the open draft is kept between invocations
    pub draft_path: String,
    pub defaults: DraftDefaults,
    pub validation: ValidationPolicy,
}

/// Initial values for new drafts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DraftDefaults {
    pub weight_unit: String,
    pub workout_type: WorkoutType,
    pub time_of_day: TimeOfDay,
    pub duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: "local".to_string(),
            database: ".liftlog/liftlog.db".to_string(),
            draft_path: ".liftlog/draft.json".to_string(),
            defaults: DraftDefaults::default(),
            validation: ValidationPolicy::default(),
        }
    }
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            weight_unit: DEFAULT_WEIGHT_UNIT.to_string(),
            workout_type: WorkoutType::default(),
            time_of_day: TimeOfDay::default(),
            duration: Duration::default(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PARTIAL CONFIG STRUCTURES (explicit-key merge semantics)
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration file contents; only keys present in the file are `Some`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub draft_path: Option<String>,
    #[serde(default)]
    pub defaults: Option<PartialDraftDefaults>,
    #[serde(default)]
    pub validation: Option<PartialValidationPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialDraftDefaults {
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default)]
    pub workout_type: Option<WorkoutType>,
    #[serde(default)]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(default)]
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialValidationPolicy {
    #[serde(default)]
    pub require_name: Option<bool>,
    #[serde(default)]
    pub require_exercise: Option<bool>,
    #[serde(default)]
    pub allow_unnamed_exercises: Option<bool>,
    #[serde(default)]
    pub numeric_set_values: Option<bool>,
}

// ═══════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration with hierarchy: defaults → global → project → env
///
/// # Errors
///
/// Returns error if a config file is malformed, contains unknown keys, or
/// the resulting values fail validation.
pub async fn load_config() -> Result<Config> {
    let global = global_config_path();
    let project = project_config_path().ok();
    load_config_from(global.as_deref(), project.as_deref()).await
}

/// Same as [`load_config`] with explicit file locations
///
/// # Errors
///
/// See [`load_config`].
pub async fn load_config_from(global: Option<&Path>, project: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    for path in [global, project].into_iter().flatten() {
        if let Some(partial) = load_partial_toml_file(path).await? {
            debug!(path = %path.display(), "merged config file");
            config.merge_partial(partial);
        }
    }

    config.apply_env_vars()?;
    config.validate()?;
    Ok(config)
}

/// Read a TOML file into a [`PartialConfig`].
///
/// A missing file yields `Ok(None)`.
///
/// # Errors
///
/// Returns error if the file cannot be read, is too large, or is not a
/// valid configuration.
pub async fn load_partial_toml_file(path: &Path) -> Result<Option<PartialConfig>> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(Error::invalid_config(format!(
            "config file {} exceeds maximum size of {MAX_CONFIG_FILE_SIZE} bytes",
            path.display()
        )));
    }

    let content = tokio::fs::read_to_string(path).await?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| Error::invalid_config(format!("{}: {e}", path.display())))
}

fn project_config_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(".liftlog/config.toml"))
}

fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "liftlog")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

// ═══════════════════════════════════════════════════════════════════════════
// MERGE AND OVERRIDES
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Overwrite only the fields set in `partial`
    pub fn merge_partial(&mut self, partial: PartialConfig) {
        if let Some(user_id) = partial.user_id {
            self.user_id = user_id;
        }
        if let Some(database) = partial.database {
            self.database = database;
        }
        if let Some(draft_path) = partial.draft_path {
            self.draft_path = draft_path;
        }
        if let Some(defaults) = partial.defaults {
            self.defaults.merge_partial(defaults);
        }
        if let Some(validation) = partial.validation {
            merge_policy(&mut self.validation, validation);
        }
    }

    fn apply_env_vars(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("LIFTLOG_USER_ID") {
            self.user_id = value;
        }
        if let Ok(value) = std::env::var("LIFTLOG_DATABASE") {
            self.database = value;
        }
        if let Ok(value) = std::env::var("LIFTLOG_DRAFT_PATH") {
            self.draft_path = value;
        }
        if let Ok(value) = std::env::var("LIFTLOG_WEIGHT_UNIT") {
            self.defaults.weight_unit = value;
        }
        if let Ok(value) = std::env::var("LIFTLOG_WORKOUT_TYPE") {
            self.defaults.workout_type = value.parse().map_err(|_| {
                Error::invalid_config(format!("Invalid LIFTLOG_WORKOUT_TYPE value: {value}"))
            })?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for blank required values.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("user_id", &self.user_id),
            ("database", &self.database),
            ("draft_path", &self.draft_path),
            ("defaults.weight_unit", &self.defaults.weight_unit),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((key, _)) => Err(Error::invalid_config(format!("{key} must not be empty"))),
            None => Ok(()),
        }
    }
}

impl DraftDefaults {
    fn merge_partial(&mut self, partial: PartialDraftDefaults) {
        if let Some(weight_unit) = partial.weight_unit {
            self.weight_unit = weight_unit;
        }
        if let Some(workout_type) = partial.workout_type {
            self.workout_type = workout_type;
        }
        if let Some(time_of_day) = partial.time_of_day {
            self.time_of_day = time_of_day;
        }
        if let Some(duration) = partial.duration {
            self.duration = duration;
        }
    }
}

fn merge_policy(policy: &mut ValidationPolicy, partial: PartialValidationPolicy) {
    if let Some(value) = partial.require_name {
        policy.require_name = value;
    }
    if let Some(value) = partial.require_exercise {
        policy.require_exercise = value;
    }
    if let Some(value) = partial.allow_unnamed_exercises {
        policy.allow_unnamed_exercises = value;
    }
    if let Some(value) = partial.numeric_set_values {
        policy.numeric_set_values = value;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use serial_test::serial;

    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).expect("write config");
        path
    }

    #[tokio::test]
    #[serial]
    async fn test_no_config_files_returns_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.toml");

        let config = load_config_from(Some(&missing), None)
            .await
            .expect("defaults");

        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    #[serial]
    async fn test_project_overrides_global_key_by_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let global = write(
            &dir,
            "global.toml",
            "user_id = \"alice\"\n[defaults]\nweight_unit = \"kg\"\n",
        );
        let project = write(
            &dir,
            "project.toml",
            "[defaults]\nduration = \"45 min\"\n[validation]\nallow_unnamed_exercises = true\n",
        );

        let config = load_config_from(Some(&global), Some(&project))
            .await
            .expect("load");

        assert_eq!(config.user_id, "alice");
        assert_eq!(config.defaults.weight_unit, "kg");
        assert_eq!(config.defaults.duration, Duration::Min45);
        assert!(config.validation.allow_unnamed_exercises);
        assert!(config.validation.require_name);
    }

    #[tokio::test]
    #[serial]
    async fn test_unknown_keys_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "config.toml", "usr_id = \"typo\"\n");

        let result = load_config_from(Some(&path), None).await;

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_unknown_catalog_value_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "config.toml", "[defaults]\ntime_of_day = \"Dawn\"\n");

        let result = load_config_from(Some(&path), None).await;

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_empty_weight_unit_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "config.toml", "[defaults]\nweight_unit = \" \"\n");

        let result = load_config_from(Some(&path), None).await;

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    #[serial]
    fn test_env_var_overrides_config() {
        std::env::set_var("LIFTLOG_USER_ID", "from-env");
        std::env::set_var("LIFTLOG_WEIGHT_UNIT", "kg");

        let mut config = Config::default();
        let result = config.apply_env_vars();

        std::env::remove_var("LIFTLOG_USER_ID");
        std::env::remove_var("LIFTLOG_WEIGHT_UNIT");

        assert!(result.is_ok());
        assert_eq!(config.user_id, "from-env");
        assert_eq!(config.defaults.weight_unit, "kg");
    }

    #[test]
    #[serial]
    fn test_invalid_env_workout_type_rejected() {
        std::env::set_var("LIFTLOG_WORKOUT_TYPE", "yoga");

        let mut config = Config::default();
        let result = config.apply_env_vars();

        std::env::remove_var("LIFTLOG_WORKOUT_TYPE");

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
