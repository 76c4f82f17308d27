//! Identifiers for draft entities.
//!
//! Entities loaded from the store keep their server-assigned id
//! ([`EntityId::Stored`]). Entities created while editing get a
//! [`EntityId::Local`] id from the draft's [`IdGenerator`], a strictly
//! monotonic counter, so two calls in the same instant never collide.
//! The two variants never compare equal, so a local id cannot shadow a
//! stored one.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const LOCAL_PREFIX: &str = "new-";

/// Largest local id a draft may carry; larger ones are refused on load
pub const MAX_LOCAL_ID: u64 = 1 << 53;

/// Identity of an exercise or set inside a draft.
///
/// Text form: stored ids print as the bare number (`12`), local ids as
/// `new-<n>` (`new-3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EntityId {
    /// Assigned by the store
    Stored(i64),
    /// Assigned in-session, not yet persisted
    Local(u64),
}

impl EntityId {
    /// The server-assigned id, if any
    #[must_use]
    pub const fn stored_id(self) -> Option<i64> {
        match self {
            Self::Stored(id) => Some(id),
            Self::Local(_) => None,
        }
    }

    /// The in-session counter value, if any
    #[must_use]
    pub const fn local_number(self) -> Option<u64> {
        match self {
            Self::Local(n) => Some(n),
            Self::Stored(_) => None,
        }
    }

    /// Check if this id was generated in-session
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored(id) => write!(f, "{id}"),
            Self::Local(n) => write!(f, "{LOCAL_PREFIX}{n}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.strip_prefix(LOCAL_PREFIX) {
            Some(n) => n
                .parse()
                .map(Self::Local)
                .map_err(|e| Error::parse(format!("invalid local id '{s}': {e}"))),
            None => s
                .parse()
                .map(Self::Stored)
                .map_err(|e| Error::parse(format!("invalid id '{s}': {e}"))),
        }
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EntityId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(EntityId);

        impl $name {
            /// Id generated in-session
            #[must_use]
            pub const fn local(n: u64) -> Self {
                Self(EntityId::Local(n))
            }

            /// Id assigned by the store
            #[must_use]
            pub const fn stored(id: i64) -> Self {
                Self(EntityId::Stored(id))
            }

            #[must_use]
            pub const fn entity(self) -> EntityId {
                self.0
            }

            /// The server-assigned id, if any
            #[must_use]
            pub const fn stored_id(self) -> Option<i64> {
                self.0.stored_id()
            }

            #[must_use]
            pub const fn local_number(self) -> Option<u64> {
                self.0.local_number()
            }

            #[must_use]
            pub const fn is_local(self) -> bool {
                self.0.is_local()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                s.parse().map(Self)
            }
        }
    };
}

entity_id!(
    /// Identity of an exercise within a draft
    ExerciseId
);

entity_id!(
    /// Identity of a set within a draft
    SetId
);

/// Server-assigned workout identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(i64);

impl WorkoutId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkoutId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|e| Error::parse(format!("invalid workout id '{s}': {e}")))
    }
}

/// Monotonic source of local identifiers.
///
/// One generator belongs to one draft; it is persisted with the draft so a
/// resumed editing session keeps counting from where it stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    #[serde(deserialize_with = "bounded_next")]
    next: u64,
}

fn bounded_next<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let next = u64::deserialize(deserializer)?;
    if (1..=MAX_LOCAL_ID + 1).contains(&next) {
        Ok(next)
    } else {
        Err(serde::de::Error::custom(format!(
            "id counter {next} is outside 1..={}",
            MAX_LOCAL_ID + 1
        )))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an id never returned before by this generator.
    ///
    /// The counter starts at or below `MAX_LOCAL_ID + 1`, so it cannot run
    /// out within any editing session.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = id.saturating_add(1);
        id
    }

    pub fn exercise_id(&mut self) -> ExerciseId {
        ExerciseId::local(self.next_id())
    }

    pub fn set_id(&mut self) -> SetId {
        SetId::local(self.next_id())
    }

    /// Make sure no future id is less than or equal to `seen`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `seen` is above [`MAX_LOCAL_ID`].
    pub fn advance_past(&mut self, seen: u64) -> Result<()> {
        if seen > MAX_LOCAL_ID {
            return Err(Error::parse(format!(
                "local id {LOCAL_PREFIX}{seen} exceeds {LOCAL_PREFIX}{MAX_LOCAL_ID}"
            )));
        }
        self.next = self.next.max(seen + 1);
        Ok(())
    }
}

/// Result of a mutating editor call.
///
/// Refused edits leave the draft untouched. Callers that only care about
/// UI simplicity can ignore the value; the unknown-id variants are there to
/// surface stale references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// The draft changed
    Applied,
    /// Refused: the collection is at its floor of one element
    AtMinimum,
    /// Refused: no exercise with that id
    UnknownExercise,
    /// Refused: no set with that id in the exercise
    UnknownSet,
}

impl Edit {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => write!(f, "applied"),
            Self::AtMinimum => write!(f, "refused: at least one must remain"),
            Self::UnknownExercise => write!(f, "ignored: unknown exercise"),
            Self::UnknownSet => write!(f, "ignored: unknown set"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn test_generator_is_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();

        assert!(first < second && second < third);
    }

    #[test]
    fn test_local_and_stored_never_equal() {
        assert_ne!(ExerciseId::local(7), ExerciseId::stored(7));
    }

    #[test]
    fn test_entity_id_text_form() {
        assert_eq!(SetId::local(3).to_string(), "new-3");
        assert_eq!(SetId::stored(12).to_string(), "12");

        assert_eq!("new-3".parse::<SetId>().ok(), Some(SetId::local(3)));
        assert_eq!(" 12 ".parse::<SetId>().ok(), Some(SetId::stored(12)));
        assert!("new-".parse::<SetId>().is_err());
        assert!("abc".parse::<ExerciseId>().is_err());
    }

    #[test]
    fn test_entity_id_serializes_as_string() {
        let json = serde_json::to_string(&ExerciseId::local(4)).expect("serialize");
        assert_eq!(json, "\"new-4\"");

        let back: ExerciseId = serde_json::from_str("\"42\"").expect("deserialize");
        assert_eq!(back, ExerciseId::stored(42));
        assert_eq!(back.stored_id(), Some(42));
    }

    #[test]
    fn test_generator_survives_serialization() {
        let mut ids = IdGenerator::new();
        let _ = ids.next_id();
        let _ = ids.next_id();

        let json = serde_json::to_string(&ids).expect("serialize");
        let mut restored: IdGenerator = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(restored.next_id(), 3);
    }

    #[test]
    fn test_advance_past_never_moves_backwards() {
        let mut ids = IdGenerator::new();
        ids.advance_past(10).expect("in range");
        assert_eq!(ids.next_id(), 11);

        ids.advance_past(3).expect("in range");
        assert_eq!(ids.next_id(), 12);
    }

    #[test]
    fn test_advance_past_refuses_ids_beyond_limit() {
        let mut ids = IdGenerator::new();

        assert!(ids.advance_past(u64::MAX).is_err());
        assert!(ids.advance_past(MAX_LOCAL_ID + 1).is_err());
        assert_eq!(ids.next_id(), 1);

        ids.advance_past(MAX_LOCAL_ID).expect("limit itself is allowed");
        assert_eq!(ids.next_id(), MAX_LOCAL_ID + 1);
    }

    #[test]
    fn test_generator_state_out_of_range_is_rejected() {
        let exhausted = format!("{{\"next\":{}}}", u64::MAX);

        assert!(serde_json::from_str::<IdGenerator>(&exhausted).is_err());
        assert!(serde_json::from_str::<IdGenerator>("{\"next\":0}").is_err());
    }
}
