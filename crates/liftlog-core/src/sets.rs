//! Set collection editor.
//!
//! A [`SetList`] is the ordered sequence of sets owned by one exercise. Sets
//! are located by [`SetId`] only, never by position. The list is never empty:
//! it is constructed with a first set and [`SetList::remove`] refuses to drop
//! the last one.
//!
//! Storage is an id-keyed persistent map plus a persistent order vector
//! (`im`), so an update touches one entry and clones of the list share the
//! rest of their structure.

use im::{HashMap, Vector};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    identity::{Edit, SetId},
    Error,
};

/// Weight unit given to new sets unless configured otherwise
pub const DEFAULT_WEIGHT_UNIT: &str = "lbs";

/// One performed unit of an exercise.
///
/// `set_number` is a display hint while editing; the authoritative number is
/// the set's position, assigned when the draft is turned into a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDraft {
    pub id: SetId,
    pub set_number: u32,
    pub weight_amount: String,
    pub weight_unit: String,
    pub rep_amount: String,
}

impl SetDraft {
    /// A set with blank amounts
    #[must_use]
    pub fn blank(id: SetId, weight_unit: impl Into<String>) -> Self {
        Self {
            id,
            set_number: 0,
            weight_amount: String::new(),
            weight_unit: weight_unit.into(),
            rep_amount: String::new(),
        }
    }

    /// Read one editable field
    #[must_use]
    pub fn field(&self, field: SetField) -> &str {
        match field {
            SetField::WeightAmount => &self.weight_amount,
            SetField::RepAmount => &self.rep_amount,
            SetField::WeightUnit => &self.weight_unit,
        }
    }

    fn set_field(&mut self, field: SetField, value: String) {
        match field {
            SetField::WeightAmount => self.weight_amount = value,
            SetField::RepAmount => self.rep_amount = value,
            SetField::WeightUnit => self.weight_unit = value,
        }
    }
}

/// Editable fields of a set
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
pub enum SetField {
    #[strum(to_string = "weightAmount", serialize = "weight")]
    WeightAmount,
    #[strum(to_string = "repAmount", serialize = "reps")]
    RepAmount,
    #[strum(to_string = "weightUnit", serialize = "unit")]
    WeightUnit,
}

/// Ordered, never-empty collection of sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<SetDraft>", try_from = "Vec<SetDraft>")]
pub struct SetList {
    order: Vector<SetId>,
    entries: HashMap<SetId, SetDraft>,
}

impl SetList {
    /// Create a list holding `first`
    #[must_use]
    pub fn new(first: SetDraft) -> Self {
        let mut order = Vector::new();
        order.push_back(first.id);
        let mut entries = HashMap::new();
        entries.insert(first.id, first);
        Self { order, entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &SetId) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &SetId) -> Option<&SetDraft> {
        self.entries.get(id)
    }

    /// Sets in editing order
    pub fn iter(&self) -> impl Iterator<Item = &SetDraft> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Set ids in editing order
    pub fn ids(&self) -> impl Iterator<Item = SetId> + '_ {
        self.order.iter().copied()
    }

    /// Sets paired with their zero-based position
    pub fn numbered(&self) -> impl Iterator<Item = (u32, &SetDraft)> + '_ {
        (0_u32..).zip(self.iter())
    }

    /// Append a set.
    ///
    /// Returns `false` and leaves the list unchanged if a set with the same id
    /// is already present.
    pub fn push(&mut self, set: SetDraft) -> bool {
        if self.entries.contains_key(&set.id) {
            return false;
        }
        self.order.push_back(set.id);
        self.entries.insert(set.id, set);
        true
    }

    /// Remove a set, unless it is the last one
    pub fn remove(&mut self, id: &SetId) -> Edit {
        if !self.entries.contains_key(id) {
            return Edit::UnknownSet;
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

    /// Replace one field of one set
    pub fn update(&mut self, id: &SetId, field: SetField, value: impl Into<String>) -> Edit {
        match self.entries.get_mut(id) {
            Some(set) => {
                set.set_field(field, value.into());
                Edit::Applied
            }
            None => Edit::UnknownSet,
        }
    }
}

impl From<SetList> for Vec<SetDraft> {
    fn from(list: SetList) -> Self {
        list.iter().cloned().collect()
    }
}

impl TryFrom<Vec<SetDraft>> for SetList {
    type Error = Error;

    fn try_from(sets: Vec<SetDraft>) -> Result<Self, Error> {
        let mut sets = sets.into_iter();
        let first = sets
            .next()
            .ok_or_else(|| Error::parse("an exercise needs at least one set"))?;
        let mut list = Self::new(first);
        for set in sets {
            let id = set.id;
            if !list.push(set) {
                return Err(Error::parse(format!("duplicate set id {id}")));
            }
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn list_of(ids: &[u64]) -> SetList {
        let sets: Vec<SetDraft> = ids
            .iter()
            .map(|n| SetDraft::blank(SetId::local(*n), DEFAULT_WEIGHT_UNIT))
            .collect();
        SetList::try_from(sets).expect("non-empty list")
    }

    fn ids(list: &SetList) -> Vec<SetId> {
        list.ids().collect()
    }

    #[test]
    fn test_blank_set_defaults() {
        let set = SetDraft::blank(SetId::local(1), DEFAULT_WEIGHT_UNIT);

        assert_eq!(set.weight_amount, "");
        assert_eq!(set.rep_amount, "");
        assert_eq!(set.weight_unit, "lbs");
        assert_eq!(set.set_number, 0);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut list = list_of(&[1]);
        assert!(list.push(SetDraft::blank(SetId::local(5), "kg")));
        assert!(list.push(SetDraft::blank(SetId::local(2), "kg")));

        assert_eq!(
            ids(&list),
            vec![SetId::local(1), SetId::local(5), SetId::local(2)]
        );
    }

    #[test]
    fn test_push_rejects_duplicate_id() {
        let mut list = list_of(&[1, 2]);

        assert!(!list.push(SetDraft::blank(SetId::local(2), "kg")));
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.get(&SetId::local(2)).map(|s| s.weight_unit.as_str()),
            Some("lbs")
        );
    }

    #[test]
    fn test_remove_targets_only_that_set() {
        let mut list = list_of(&[1, 2, 3]);

        assert_eq!(list.remove(&SetId::local(2)), Edit::Applied);
        assert_eq!(ids(&list), vec![SetId::local(1), SetId::local(3)]);
    }

    #[test]
    fn test_remove_last_set_is_refused() {
        let mut list = list_of(&[1]);

        assert_eq!(list.remove(&SetId::local(1)), Edit::AtMinimum);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_unknown_set() {
        let mut list = list_of(&[1, 2]);

        assert_eq!(list.remove(&SetId::local(9)), Edit::UnknownSet);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_update_changes_one_field() {
        let mut list = list_of(&[1, 2]);
        let before_other = list.get(&SetId::local(2)).cloned();

        let edit = list.update(&SetId::local(1), SetField::WeightAmount, "135");

        assert_eq!(edit, Edit::Applied);
        let updated = list.get(&SetId::local(1)).expect("set exists");
        assert_eq!(updated.weight_amount, "135");
        assert_eq!(updated.rep_amount, "");
        assert_eq!(updated.weight_unit, "lbs");
        assert_eq!(list.get(&SetId::local(2)).cloned(), before_other);
        assert_eq!(ids(&list), vec![SetId::local(1), SetId::local(2)]);
    }

    #[test]
    fn test_update_unknown_set() {
        let mut list = list_of(&[1]);
        let before = list.clone();

        assert_eq!(
            list.update(&SetId::local(4), SetField::RepAmount, "5"),
            Edit::UnknownSet
        );
        assert_eq!(list, before);
    }

    #[test]
    fn test_numbered_is_positional() {
        let mut list = list_of(&[7, 3, 9]);
        let _ = list.remove(&SetId::local(3));

        let numbers: Vec<(u32, SetId)> = list.numbered().map(|(n, s)| (n, s.id)).collect();
        assert_eq!(
            numbers,
            vec![(0, SetId::local(7)), (1, SetId::local(9))]
        );
    }

    #[test]
    fn test_set_field_parsing() {
        assert_eq!("weightAmount".parse::<SetField>().ok(), Some(SetField::WeightAmount));
        assert_eq!("reps".parse::<SetField>().ok(), Some(SetField::RepAmount));
        assert_eq!("unit".parse::<SetField>().ok(), Some(SetField::WeightUnit));
        assert_eq!(SetField::RepAmount.to_string(), "repAmount");
        assert!("setNumber".parse::<SetField>().is_err());
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(SetList::try_from(Vec::new()).is_err());
    }

    #[test]
    fn test_serializes_as_ordered_array() {
        let list = list_of(&[4, 2]);

        let json = serde_json::to_value(&list).expect("serialize");
        let ids: Vec<&str> = json
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|s| s["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["new-4", "new-2"]);

        let back: SetList = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, list);
    }
}
