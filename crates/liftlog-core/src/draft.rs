//! Workout draft aggregate.
//!
//! A [`WorkoutDraft`] is the whole editable tree: metadata plus an
//! [`ExerciseList`] whose exercises each own a [`SetList`]. Every mutation
//! goes through the methods here and names its target by id. Refused edits
//! come back as an [`Edit`] and leave the tree untouched; stale ids are
//! logged at `warn`.
//!
//! [`WorkoutDraft::to_submission`] is the only way out. It validates against
//! a [`ValidationPolicy`], renumbers sets from zero within each exercise and
//! shapes the payload for insert or update depending on [`DraftOrigin`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    catalog::{Catalog, Duration, TimeOfDay, WorkoutType},
    command::DraftCommand,
    config::DraftDefaults,
    exercises::{ExerciseDraft, ExerciseList},
    identity::{Edit, ExerciseId, IdGenerator, SetId, WorkoutId},
    persisted::{PersistedExercise, PersistedSet, PersistedWorkout},
    sets::{SetDraft, SetField, SetList, DEFAULT_WEIGHT_UNIT},
    submission::{ExercisePayload, SetPayload, Submission, WorkoutPayload},
    validation::{ValidationError, ValidationPolicy},
    Error, Result,
};

/// Where a draft came from, deciding the submission shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum DraftOrigin {
    /// A workout that does not exist yet
    New,
    /// Changes to a stored workout
    Editing { workout_id: WorkoutId },
}

impl DraftOrigin {
    #[must_use]
    pub const fn workout_id(self) -> Option<WorkoutId> {
        match self {
            Self::New => None,
            Self::Editing { workout_id } => Some(workout_id),
        }
    }
}

/// Top-level scalar fields of a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub time_of_day: TimeOfDay,
    pub duration: Duration,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutMeta {
    /// Blank name and catalog defaults
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            name: String::new(),
            workout_type: WorkoutType::default(),
            time_of_day: TimeOfDay::default(),
            duration: Duration::default(),
            date,
            notes: None,
        }
    }
}

/// One metadata field together with its new value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum MetadataField {
    Name(String),
    WorkoutType(WorkoutType),
    TimeOfDay(TimeOfDay),
    Duration(Duration),
    Date(NaiveDate),
    Notes(Option<String>),
}

impl MetadataField {
    /// Build a field update from a field name and its text value.
    ///
    /// An empty value clears `notes`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for an unknown field name or a value that is
    /// not valid for the field.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let invalid = |what: &str| Error::parse(format!("invalid {what} '{value}'"));
        match field.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name(value.to_string())),
            "type" | "workout_type" | "workouttype" => value
                .trim()
                .parse()
                .map(Self::WorkoutType)
                .map_err(|_| invalid("workout type")),
            "time" | "time_of_day" | "timeofday" => value
                .trim()
                .parse()
                .map(Self::TimeOfDay)
                .map_err(|_| invalid("time of day")),
            "duration" => value
                .trim()
                .parse()
                .map(Self::Duration)
                .map_err(|_| invalid("duration")),
            "date" => value
                .trim()
                .parse()
                .map(Self::Date)
                .map_err(|_| invalid("date")),
            "notes" => {
                let notes = value.trim();
                Ok(Self::Notes((!notes.is_empty()).then(|| notes.to_string())))
            }
            other => Err(Error::parse(format!(
                "unknown field '{other}' (expected name, type, time, duration, date or notes)"
            ))),
        }
    }
}

/// The editable workout tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDraft {
    origin: DraftOrigin,
    meta: WorkoutMeta,
    exercises: ExerciseList,
    ids: IdGenerator,
    weight_unit: String,
}

impl WorkoutDraft {
    /// An empty draft for a new workout on `date`
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            origin: DraftOrigin::New,
            meta: WorkoutMeta::new(date),
            exercises: ExerciseList::new(),
            ids: IdGenerator::new(),
            weight_unit: DEFAULT_WEIGHT_UNIT.to_string(),
        }
    }

    /// An empty draft using configured catalog choices and weight unit
    #[must_use]
    pub fn with_defaults(date: NaiveDate, defaults: &DraftDefaults) -> Self {
        let mut draft = Self::new(date);
        draft.meta.workout_type = defaults.workout_type;
        draft.meta.time_of_day = defaults.time_of_day;
        draft.meta.duration = defaults.duration;
        draft.weight_unit.clone_from(&defaults.weight_unit);
        draft
    }

    /// A draft editing a stored workout.
    ///
    /// Stored exercise and set ids are kept so the submission updates rows in
    /// place. Text metadata not found in a catalog falls back to the
    /// catalog default. An exercise stored without sets gets one blank set.
    #[must_use]
    pub fn load(workout: &PersistedWorkout) -> Self {
        let mut draft = Self::new(workout.date);
        draft.origin = DraftOrigin::Editing {
            workout_id: workout.id,
        };
        draft.meta = WorkoutMeta {
            name: workout.name.clone().unwrap_or_default(),
            workout_type: WorkoutType::from_name_or_default(workout.workout_type.as_deref()),
            time_of_day: TimeOfDay::from_name_or_default(workout.time.as_deref()),
            duration: Duration::from_name_or_default(workout.duration.as_deref()),
            date: workout.date,
            notes: workout.notes.clone(),
        };

        for stored in &workout.exercises {
            let exercise = draft.load_exercise(stored);
            if !draft.exercises.push(exercise) {
                warn!(exercise = stored.id, "duplicate stored exercise skipped");
            }
        }
        debug!(
            workout = %workout.id,
            exercises = draft.exercises.len(),
            "loaded workout into draft"
        );
        draft
    }

    fn load_exercise(&mut self, stored: &PersistedExercise) -> ExerciseDraft {
        let loaded: Vec<SetDraft> = stored.sets.iter().map(|s| self.load_set(s)).collect();
        let mut sets = loaded.into_iter();
        let first = match sets.next() {
            Some(set) => set,
            None => SetDraft::blank(self.ids.set_id(), self.weight_unit.clone()),
        };
        let mut list = SetList::new(first);
        for set in sets {
            let id = set.id;
            if !list.push(set) {
                warn!(exercise = stored.id, set = %id, "duplicate stored set skipped");
            }
        }
        ExerciseDraft {
            id: ExerciseId::stored(stored.id),
            name: stored.name.clone(),
            sets: list,
        }
    }

    fn load_set(&self, stored: &PersistedSet) -> SetDraft {
        let amount = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();
        SetDraft {
            id: SetId::stored(stored.id),
            set_number: stored
                .set_number
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or_default(),
            weight_amount: amount(stored.weight_amount),
            weight_unit: stored
                .weight_unit
                .clone()
                .unwrap_or_else(|| self.weight_unit.clone()),
            rep_amount: amount(stored.rep_amount),
        }
    }

    /// Use `unit` for sets added from now on
    #[must_use]
    pub fn with_weight_unit(mut self, unit: impl Into<String>) -> Self {
        self.weight_unit = unit.into();
        self
    }

    /// Read a draft written by [`WorkoutDraft::to_json`].
    ///
    /// The id generator is moved past every local id in the tree, so a
    /// hand-edited file cannot cause a collision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not a valid draft or holds a
    /// local id above [`MAX_LOCAL_ID`](crate::identity::MAX_LOCAL_ID).
    pub fn from_json(text: &str) -> Result<Self> {
        let mut draft: Self =
            serde_json::from_str(text).map_err(|e| Error::parse(format!("invalid draft: {e}")))?;
        let highest = draft
            .exercises
            .iter()
            .flat_map(|exercise| {
                std::iter::once(exercise.id.local_number())
                    .chain(exercise.sets.ids().map(SetId::local_number))
            })
            .flatten()
            .max();
        if let Some(highest) = highest {
            draft.ids.advance_past(highest)?;
        }
        Ok(draft)
    }

    /// # Errors
    ///
    /// Returns [`Error::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::parse(format!("cannot serialize draft: {e}")))
    }

    #[must_use]
    pub const fn origin(&self) -> DraftOrigin {
        self.origin
    }

    #[must_use]
    pub const fn meta(&self) -> &WorkoutMeta {
        &self.meta
    }

    #[must_use]
    pub const fn exercises(&self) -> &ExerciseList {
        &self.exercises
    }

    #[must_use]
    pub fn exercise(&self, id: &ExerciseId) -> Option<&ExerciseDraft> {
        self.exercises.get(id)
    }

    #[must_use]
    pub fn weight_unit(&self) -> &str {
        &self.weight_unit
    }

    /// Replace one metadata field
    pub fn set_metadata(&mut self, field: MetadataField) {
        debug!(?field, "metadata updated");
        match field {
            MetadataField::Name(name) => self.meta.name = name,
            MetadataField::WorkoutType(workout_type) => self.meta.workout_type = workout_type,
            MetadataField::TimeOfDay(time_of_day) => self.meta.time_of_day = time_of_day,
            MetadataField::Duration(duration) => self.meta.duration = duration,
            MetadataField::Date(date) => self.meta.date = date,
            MetadataField::Notes(notes) => self.meta.notes = notes,
        }
    }

    /// Append an unnamed exercise holding one blank set
    pub fn add_exercise(&mut self) -> ExerciseId {
        let id = self.ids.exercise_id();
        let first_set = SetDraft::blank(self.ids.set_id(), self.weight_unit.clone());
        if self.exercises.push(ExerciseDraft::new(id, first_set)) {
            debug!(exercise = %id, "exercise added");
        } else {
            warn!(exercise = %id, "generated exercise id already in use");
        }
        id
    }

    /// Remove an exercise unless it is the last one
    pub fn remove_exercise(&mut self, exercise: &ExerciseId) -> Edit {
        let edit = self.exercises.remove(exercise);
        log_edit("remove_exercise", exercise, None, edit)
    }

    /// Set an exercise's name, keeping its sets
    pub fn rename_exercise(&mut self, exercise: &ExerciseId, name: impl Into<String>) -> Edit {
        let edit = self.exercises.rename(exercise, name);
        log_edit("rename_exercise", exercise, None, edit)
    }

    /// Clear an exercise's name so it goes back to picking; sets are kept
    pub fn reset_exercise(&mut self, exercise: &ExerciseId) -> Edit {
        let edit = self.exercises.rename(exercise, String::new());
        log_edit("reset_exercise", exercise, None, edit)
    }

    /// Append a blank set to an exercise.
    ///
    /// Returns the new set's id, or `None` if the exercise does not exist.
    pub fn add_set(&mut self, exercise: &ExerciseId) -> Option<SetId> {
        if !self.exercises.contains(exercise) {
            log_edit("add_set", exercise, None, Edit::UnknownExercise);
            return None;
        }
        let id = self.ids.set_id();
        let set = SetDraft::blank(id, self.weight_unit.clone());
        let edit = self.exercises.with_sets(exercise, |sets| {
            if sets.push(set) {
                Edit::Applied
            } else {
                Edit::UnknownSet
            }
        });
        log_edit("add_set", exercise, Some(&id), edit)
            .is_applied()
            .then_some(id)
    }

    /// Remove a set unless it is the last one of its exercise
    pub fn remove_set(&mut self, exercise: &ExerciseId, set: &SetId) -> Edit {
        let edit = self.exercises.with_sets(exercise, |sets| sets.remove(set));
        log_edit("remove_set", exercise, Some(set), edit)
    }

    /// Replace one field of one set
    pub fn update_set(
        &mut self,
        exercise: &ExerciseId,
        set: &SetId,
        field: SetField,
        value: impl Into<String>,
    ) -> Edit {
        let edit = self
            .exercises
            .with_sets(exercise, |sets| sets.update(set, field, value));
        log_edit("update_set", exercise, Some(set), edit)
    }

    /// Run one editor command
    pub fn apply(&mut self, command: DraftCommand) -> Edit {
        match command {
            DraftCommand::SetMetadata(field) => {
                self.set_metadata(field);
                Edit::Applied
            }
            DraftCommand::AddExercise => {
                self.add_exercise();
                Edit::Applied
            }
            DraftCommand::RemoveExercise { exercise } => self.remove_exercise(&exercise),
            DraftCommand::RenameExercise { exercise, name } => {
                self.rename_exercise(&exercise, name)
            }
            DraftCommand::ResetExercise { exercise } => self.reset_exercise(&exercise),
            DraftCommand::AddSet { exercise } => self
                .add_set(&exercise)
                .map_or(Edit::UnknownExercise, |_| Edit::Applied),
            DraftCommand::RemoveSet { exercise, set } => self.remove_set(&exercise, &set),
            DraftCommand::UpdateSet {
                exercise,
                set,
                field,
                value,
            } => self.update_set(&exercise, &set, field, value),
        }
    }

    /// Normalise the draft into the gateway payload.
    ///
    /// Set numbers are reassigned from each set's position, starting at
    /// zero per exercise. Unnamed exercises are never submitted. A new draft
    /// produces [`Submission::Create`] without ids; an edited workout
    /// produces [`Submission::Update`] keeping stored ids. The draft itself
    /// is not modified.
    ///
    /// # Errors
    ///
    /// Returns every rule of `policy` the draft breaks.
    pub fn to_submission(
        &self,
        user_id: &str,
        policy: &ValidationPolicy,
    ) -> std::result::Result<Submission, ValidationError> {
        policy.check(self)?;

        let keep_ids = matches!(self.origin, DraftOrigin::Editing { .. });
        let exercises = self
            .exercises
            .iter()
            .filter(|exercise| exercise.is_named())
            .map(|exercise| ExercisePayload {
                id: exercise.id.stored_id().filter(|_| keep_ids),
                name: exercise.name.trim().to_string(),
                sets: exercise
                    .sets
                    .numbered()
                    .map(|(position, set)| SetPayload {
                        id: set.id.stored_id().filter(|_| keep_ids),
                        set_number: position,
                        weight_amount: set.weight_amount.trim().to_string(),
                        weight_unit: set.weight_unit.clone(),
                        rep_amount: set.rep_amount.trim().to_string(),
                    })
                    .collect(),
            })
            .collect();

        let payload = WorkoutPayload {
            user_id: user_id.to_string(),
            name: self.meta.name.trim().to_string(),
            time: Some(self.meta.time_of_day.to_string()),
            workout_type: Some(self.meta.workout_type.to_string()),
            duration: Some(self.meta.duration.to_string()),
            notes: self.meta.notes.clone(),
            date: self.meta.date,
            exercises,
        };

        Ok(match self.origin {
            DraftOrigin::New => Submission::Create(payload),
            DraftOrigin::Editing { workout_id } => Submission::Update {
                workout_id,
                payload,
            },
        })
    }
}

fn log_edit(op: &'static str, exercise: &ExerciseId, set: Option<&SetId>, edit: Edit) -> Edit {
    let set = set.map(ToString::to_string);
    match edit {
        Edit::Applied => debug!(op, %exercise, ?set, "edit applied"),
        Edit::AtMinimum => debug!(op, %exercise, ?set, "edit refused: at minimum"),
        Edit::UnknownExercise | Edit::UnknownSet => {
            warn!(op, %exercise, ?set, %edit, "edit targets an unknown id");
        }
    }
    edit
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    }

    fn first_set(draft: &WorkoutDraft, exercise: &ExerciseId) -> SetId {
        draft
            .exercise(exercise)
            .and_then(|e| e.sets.ids().next())
            .expect("exercise has a set")
    }

    fn stored_workout() -> PersistedWorkout {
        PersistedWorkout {
            id: WorkoutId::new(7),
            user_id: "user-1".to_string(),
            name: Some("Push".to_string()),
            time: Some("Evening".to_string()),
            workout_type: Some("Strength Training".to_string()),
            duration: Some("> 90 min".to_string()),
            notes: None,
            date: date(),
            created_at: None,
            exercises: vec![
                PersistedExercise {
                    id: 3,
                    name: "Bench".to_string(),
                    sets: vec![
                        PersistedSet {
                            id: 30,
                            set_number: Some(4),
                            weight_amount: Some(185),
                            weight_unit: Some("lbs".to_string()),
                            rep_amount: Some(5),
                        },
                        PersistedSet {
                            id: 31,
                            set_number: Some(9),
                            weight_amount: None,
                            weight_unit: None,
                            rep_amount: Some(8),
                        },
                    ],
                },
                PersistedExercise {
                    id: 4,
                    name: "Dips".to_string(),
                    sets: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn test_new_draft_is_empty_with_defaults() {
        let draft = WorkoutDraft::new(date());

        assert_eq!(draft.origin(), DraftOrigin::New);
        assert!(draft.exercises().is_empty());
        assert_eq!(draft.meta().duration, Duration::Min60);
        assert_eq!(draft.weight_unit(), "lbs");
    }

    #[test]
    fn test_with_defaults_uses_configured_unit() {
        let defaults = DraftDefaults {
            weight_unit: "kg".to_string(),
            time_of_day: TimeOfDay::Night,
            ..DraftDefaults::default()
        };
        let mut draft = WorkoutDraft::with_defaults(date(), &defaults);
        let exercise = draft.add_exercise();

        assert_eq!(draft.meta().time_of_day, TimeOfDay::Night);
        let set = first_set(&draft, &exercise);
        assert_eq!(
            draft.exercise(&exercise).and_then(|e| e.sets.get(&set)).map(|s| s.weight_unit.as_str()),
            Some("kg")
        );
    }

    #[test]
    fn test_add_set_to_unknown_exercise_is_ignored() {
        let mut draft = WorkoutDraft::new(date());
        let before = draft.clone();

        assert_eq!(draft.add_set(&ExerciseId::stored(99)), None);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_update_set_unknown_ids() {
        let mut draft = WorkoutDraft::new(date());
        let exercise = draft.add_exercise();

        assert_eq!(
            draft.update_set(&exercise, &SetId::local(999), SetField::RepAmount, "5"),
            Edit::UnknownSet
        );
        assert_eq!(
            draft.update_set(&ExerciseId::local(999), &SetId::local(999), SetField::RepAmount, "5"),
            Edit::UnknownExercise
        );
    }

    #[test]
    fn test_reset_exercise_keeps_sets() {
        let mut draft = WorkoutDraft::new(date());
        let exercise = draft.add_exercise();
        let _ = draft.rename_exercise(&exercise, "Squat");
        let set = first_set(&draft, &exercise);
        let _ = draft.update_set(&exercise, &set, SetField::WeightAmount, "225");

        assert_eq!(draft.reset_exercise(&exercise), Edit::Applied);

        let ex = draft.exercise(&exercise).expect("exists");
        assert!(!ex.is_named());
        assert_eq!(ex.sets.get(&set).map(|s| s.weight_amount.as_str()), Some("225"));
    }

    #[test]
    fn test_load_preserves_stored_ids_and_maps_catalogs() {
        let draft = WorkoutDraft::load(&stored_workout());

        assert_eq!(
            draft.origin(),
            DraftOrigin::Editing {
                workout_id: WorkoutId::new(7)
            }
        );
        assert_eq!(draft.meta().time_of_day, TimeOfDay::Evening);
        assert_eq!(draft.meta().duration, Duration::Over90);

        let ids: Vec<ExerciseId> = draft.exercises().ids().collect();
        assert_eq!(ids, vec![ExerciseId::stored(3), ExerciseId::stored(4)]);

        let bench = draft.exercise(&ExerciseId::stored(3)).expect("bench");
        let sets: Vec<&SetDraft> = bench.sets.iter().collect();
        assert_eq!(sets[0].id, SetId::stored(30));
        assert_eq!(sets[0].weight_amount, "185");
        assert_eq!(sets[1].weight_amount, "");
        assert_eq!(sets[1].weight_unit, "lbs");
    }

    #[test]
    fn test_load_fills_empty_exercise_with_local_set() {
        let draft = WorkoutDraft::load(&stored_workout());
        let dips = draft.exercise(&ExerciseId::stored(4)).expect("dips");

        assert_eq!(dips.sets.len(), 1);
        assert!(dips.sets.ids().all(SetId::is_local));
    }

    #[test]
    fn test_create_submission_strips_ids_and_renumbers() {
        let mut draft = WorkoutDraft::new(date());
        draft.set_metadata(MetadataField::Name(" Legs ".to_string()));
        let exercise = draft.add_exercise();
        let _ = draft.rename_exercise(&exercise, "Squat");
        let _ = draft.add_set(&exercise);
        let _ = draft.add_set(&exercise);

        let submission = draft
            .to_submission("user-1", &ValidationPolicy::default())
            .expect("valid");

        assert!(!submission.is_update());
        let payload = submission.payload();
        assert_eq!(payload.name, "Legs");
        assert_eq!(payload.exercises[0].id, None);
        let numbers: Vec<u32> = payload.exercises[0].sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert!(payload.exercises[0].sets.iter().all(|s| s.id.is_none()));
    }

    #[test]
    fn test_update_submission_keeps_stored_ids_only() {
        let mut draft = WorkoutDraft::load(&stored_workout());
        let bench = ExerciseId::stored(3);
        let _ = draft.add_set(&bench);

        let submission = draft
            .to_submission("user-1", &ValidationPolicy::default())
            .expect("valid");

        assert_eq!(submission.workout_id(), Some(WorkoutId::new(7)));
        let sets = &submission.payload().exercises[0].sets;
        let ids: Vec<Option<i64>> = sets.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![Some(30), Some(31), None]);
        let numbers: Vec<u32> = sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
    }

    #[test]
    fn test_unnamed_exercises_are_dropped_when_allowed() {
        let mut draft = WorkoutDraft::new(date());
        draft.set_metadata(MetadataField::Name("Legs".to_string()));
        let squat = draft.add_exercise();
        let _ = draft.rename_exercise(&squat, "Squat");
        let _ = draft.add_exercise();
        let policy = ValidationPolicy {
            allow_unnamed_exercises: true,
            ..ValidationPolicy::default()
        };

        let submission = draft.to_submission("user-1", &policy).expect("valid");

        assert_eq!(submission.payload().exercises.len(), 1);
    }

    #[test]
    fn test_invalid_draft_is_left_untouched() {
        let draft = WorkoutDraft::new(date());
        let before = draft.clone();

        assert!(draft
            .to_submission("user-1", &ValidationPolicy::default())
            .is_err());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_metadata_field_parsing() {
        assert_eq!(
            MetadataField::parse("type", "cardio").ok(),
            Some(MetadataField::WorkoutType(WorkoutType::Cardio))
        );
        assert_eq!(
            MetadataField::parse("date", "2024-02-29").ok(),
            NaiveDate::from_ymd_opt(2024, 2, 29).map(MetadataField::Date)
        );
        assert_eq!(
            MetadataField::parse("notes", "  ").ok(),
            Some(MetadataField::Notes(None))
        );
        assert!(MetadataField::parse("duration", "forever").is_err());
        assert!(MetadataField::parse("colour", "red").is_err());
    }

    #[test]
    fn test_json_round_trip_resyncs_generator() {
        let mut draft = WorkoutDraft::new(date());
        let first = draft.add_exercise();
        let json = draft.to_json().expect("serialize");

        // Simulate a file whose generator fell behind its contents
        let mut value: serde_json::Value = serde_json::from_str(&json).expect("json");
        value["ids"]["next"] = serde_json::json!(1);
        let mut restored =
            WorkoutDraft::from_json(&value.to_string()).expect("deserialize");

        let second = restored.add_exercise();
        assert_ne!(first, second);
        assert_eq!(restored.exercises().len(), 2);
    }

    #[test]
    fn test_json_with_oversized_local_id_is_refused() {
        let mut draft = WorkoutDraft::new(date());
        let _ = draft.add_exercise();
        let json = draft.to_json().expect("serialize");
        let tampered = json.replace("\"new-1\"", &format!("\"new-{}\"", u64::MAX));
        assert_ne!(tampered, json);

        assert!(matches!(
            WorkoutDraft::from_json(&tampered),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_json_at_id_limit_still_adds_unique_exercises() {
        let mut draft = WorkoutDraft::new(date());
        let _ = draft.add_exercise();
        let json = draft.to_json().expect("serialize");
        let at_limit = json.replace(
            "\"new-1\"",
            &format!("\"new-{}\"", crate::identity::MAX_LOCAL_ID),
        );
        let mut restored = WorkoutDraft::from_json(&at_limit).expect("deserialize");

        let first = restored.add_exercise();
        let second = restored.add_exercise();

        assert_ne!(first, second);
        assert_eq!(restored.exercises().len(), 3);
    }
}
