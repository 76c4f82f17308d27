//! Exercise collection editor.
//!
//! [`ExerciseList`] holds the exercises of one draft in insertion order and
//! routes set-level edits to the owning exercise's [`SetList`] by
//! [`ExerciseId`].

use im::{HashMap, Vector};
use serde::{Deserialize, Serialize};

use crate::{
    identity::{Edit, ExerciseId},
    sets::{SetDraft, SetList},
    Error,
};

/// A named movement owning an ordered list of sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDraft {
    pub id: ExerciseId,
    /// Empty until an exercise has been picked
    pub name: String,
    pub sets: SetList,
}

impl ExerciseDraft {
    /// An unnamed exercise with a single blank set
    #[must_use]
    pub fn new(id: ExerciseId, first_set: SetDraft) -> Self {
        Self {
            id,
            name: String::new(),
            sets: SetList::new(first_set),
        }
    }

    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Which editor surface this exercise should present
    #[must_use]
    pub fn mode(&self) -> EditorMode {
        if self.is_named() {
            EditorMode::EditSets
        } else {
            EditorMode::PickExercise
        }
    }
}

/// Presentation state of one exercise editor, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// No exercise chosen yet; show the picker
    PickExercise,
    /// Exercise chosen; show its sets
    EditSets,
}

/// Ordered collection of exercises keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<ExerciseDraft>", try_from = "Vec<ExerciseDraft>")]
pub struct ExerciseList {
    order: Vector<ExerciseId>,
    entries: HashMap<ExerciseId, ExerciseDraft>,
}

impl ExerciseList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ExerciseId) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &ExerciseId) -> Option<&ExerciseDraft> {
        self.entries.get(id)
    }

    /// Exercises in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseDraft> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = ExerciseId> + '_ {
        self.order.iter().copied()
    }

    /// Append an exercise.
    ///
    /// Returns `false` and leaves the list unchanged if the id is taken.
    pub fn push(&mut self, exercise: ExerciseDraft) -> bool {
        if self.entries.contains_key(&exercise.id) {
            return false;
        }
        self.order.push_back(exercise.id);
        self.entries.insert(exercise.id, exercise);
        true
    }

    /// Remove an exercise, unless it is the only one
    pub fn remove(&mut self, id: &ExerciseId) -> Edit {
        if !self.entries.contains_key(id) {
            return Edit::UnknownExercise;
        }
        if self.order.len() <= 1 {
            return Edit::AtMinimum;
        }
        if let Some(position) = self.order.index_of(id) {
            self.order.remove(position);
        }
        self.entries.remove(id);
        Edit::Applied
    }

    /// Set the exercise name. Renaming an already named exercise is allowed;
    /// its sets are left as they are.
    pub fn rename(&mut self, id: &ExerciseId, name: impl Into<String>) -> Edit {
        match self.entries.get_mut(id) {
            Some(exercise) => {
                exercise.name = name.into();
                Edit::Applied
            }
            None => Edit::UnknownExercise,
        }
    }

    /// Run a set-level edit against the sets of one exercise
    pub fn with_sets<F>(&mut self, id: &ExerciseId, edit: F) -> Edit
    where
        F: FnOnce(&mut SetList) -> Edit,
    {
        self.entries
            .get_mut(id)
            .map_or(Edit::UnknownExercise, |exercise| edit(&mut exercise.sets))
    }
}

impl From<ExerciseList> for Vec<ExerciseDraft> {
    fn from(list: ExerciseList) -> Self {
        list.iter().cloned().collect()
    }
}

impl TryFrom<Vec<ExerciseDraft>> for ExerciseList {
    type Error = Error;

    fn try_from(exercises: Vec<ExerciseDraft>) -> Result<Self, Error> {
        let mut list = Self::new();
        for exercise in exercises {
            let id = exercise.id;
            if !list.push(exercise) {
                return Err(Error::parse(format!("duplicate exercise id {id}")));
            }
        }
        Ok(list)
    }
}
