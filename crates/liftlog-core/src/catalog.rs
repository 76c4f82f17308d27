//! Static option catalogs for workout metadata.
//!
//! Each catalog is a fixed enumeration whose text form is the display name
//! stored with a workout (`"Strength Training"`, `"Morning"`, `"60 min"`).
//! The `{ name, id? }` listings are compile-time constants.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// One selectable entry of a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
}

impl CatalogOption {
    const fn new(name: &'static str, id: Option<u32>) -> Self {
        Self { name, id }
    }
}

/// A fixed enumerated choice list
pub trait Catalog: Copy + Default + std::str::FromStr + Into<&'static str> {
    /// Heading used when listing the catalog
    const TITLE: &'static str;

    /// Every option in display order
    const OPTIONS: &'static [CatalogOption];

    /// Display name of this choice
    fn name(self) -> &'static str {
        self.into()
    }

    /// Catalog entry for this choice
    fn option(self) -> CatalogOption {
        let name = self.name();
        Self::OPTIONS
            .iter()
            .copied()
            .find(|o| o.name == name)
            .unwrap_or(CatalogOption::new(name, None))
    }

    /// Parse a stored name, falling back to the default for unknown or
    /// missing values
    fn from_name_or_default(name: Option<&str>) -> Self {
        name.and_then(|n| n.trim().parse().ok()).unwrap_or_default()
    }
}

/// Kind of workout
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum WorkoutType {
    #[default]
    #[strum(to_string = "Strength Training", serialize = "strength")]
    #[serde(rename = "Strength Training")]
    StrengthTraining,
    #[strum(to_string = "Cardio")]
    Cardio,
}

impl Catalog for WorkoutType {
    const TITLE: &'static str = "Type";
    const OPTIONS: &'static [CatalogOption] = &[
        CatalogOption::new("Strength Training", Some(0)),
        CatalogOption::new("Cardio", Some(1)),
    ];
}

/// When in the day the workout happened
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Catalog for TimeOfDay {
    const TITLE: &'static str = "Time of Day";
    const OPTIONS: &'static [CatalogOption] = &[
        CatalogOption::new("Morning", Some(0)),
        CatalogOption::new("Afternoon", Some(1)),
        CatalogOption::new("Evening", Some(2)),
        CatalogOption::new("Night", Some(3)),
    ];
}

/// Rough length of the workout
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Duration {
    #[strum(to_string = "15 min", serialize = "15")]
    #[serde(rename = "15 min")]
    Min15,
    #[strum(to_string = "30 min", serialize = "30")]
    #[serde(rename = "30 min")]
    Min30,
    #[strum(to_string = "45 min", serialize = "45")]
    #[serde(rename = "45 min")]
    Min45,
    #[default]
    #[strum(to_string = "60 min", serialize = "60")]
    #[serde(rename = "60 min")]
    Min60,
    #[strum(to_string = "75 min", serialize = "75")]
    #[serde(rename = "75 min")]
    Min75,
    #[strum(to_string = "90 min", serialize = "90")]
    #[serde(rename = "90 min")]
    Min90,
    #[strum(to_string = ">90 min", serialize = "> 90 min")]
    #[serde(rename = ">90 min", alias = "> 90 min")]
    Over90,
}

impl Catalog for Duration {
    const TITLE: &'static str = "Duration";
    const OPTIONS: &'static [CatalogOption] = &[
        CatalogOption::new("15 min", None),
        CatalogOption::new("30 min", None),
        CatalogOption::new("45 min", None),
        CatalogOption::new("60 min", None),
        CatalogOption::new("75 min", None),
        CatalogOption::new("90 min", None),
        CatalogOption::new(">90 min", None),
    ];
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use strum::IntoEnumIterator;

    use super::*;

    fn assert_options_match_variants<C>()
    where
        C: Catalog + IntoEnumIterator,
    {
        let names: Vec<&str> = C::iter().map(Catalog::name).collect();
        let listed: Vec<&str> = C::OPTIONS.iter().map(|o| o.name).collect();
        assert_eq!(names, listed, "{} catalog out of sync", C::TITLE);
    }

    #[test]
    fn test_catalogs_list_every_variant_in_order() {
        assert_options_match_variants::<WorkoutType>();
        assert_options_match_variants::<TimeOfDay>();
        assert_options_match_variants::<Duration>();
    }

    #[test]
    fn test_defaults() {
        assert_eq!(WorkoutType::default(), WorkoutType::StrengthTraining);
        assert_eq!(TimeOfDay::default(), TimeOfDay::Morning);
        assert_eq!(Duration::default(), Duration::Min60);
    }

    #[test]
    fn test_names_round_trip() {
        assert_eq!(WorkoutType::StrengthTraining.to_string(), "Strength Training");
        assert_eq!(
            "strength training".parse::<WorkoutType>().ok(),
            Some(WorkoutType::StrengthTraining)
        );
        assert_eq!("> 90 min".parse::<Duration>().ok(), Some(Duration::Over90));
        assert_eq!(Duration::Over90.name(), ">90 min");
    }

    #[test]
    fn test_option_ids() {
        assert_eq!(TimeOfDay::Evening.option().id, Some(2));
        assert_eq!(Duration::Min45.option().id, None);
    }

    #[test]
    fn test_unknown_stored_names_fall_back_to_default() {
        assert_eq!(TimeOfDay::from_name_or_default(Some("Dawn")), TimeOfDay::Morning);
        assert_eq!(Duration::from_name_or_default(None), Duration::Min60);
        assert_eq!(
            WorkoutType::from_name_or_default(Some("Cardio")),
            WorkoutType::Cardio
        );
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Duration::Over90).expect("serialize");
        assert_eq!(json, "\">90 min\"");

        let parsed: Duration = serde_json::from_str("\"> 90 min\"").expect("deserialize");
        assert_eq!(parsed, Duration::Over90);
    }
}
