use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Character,
    Shared,
    Monster,
    Forbidden,
}

impl CardType {
    /// Shared and monster cards are the only ones whose hirameki costs points.
    pub fn counts_hirameki(self) -> bool {
        matches!(self, CardType::Shared | CardType::Monster)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardCategory {
    Attack,
    Skill,
    Upgrade,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Opening,
    Exhaust,
    Retain,
    Recovery,
    Celestial,
    Coordination,
    Ultimate,
    Initiative,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Striker,
    Vanguard,
    Ranger,
    Hunter,
    Controller,
    Psionic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GodType {
    Kilken,
    Seclaid,
    Dialos,
    Nihilum,
    Vitol,
}

/// Card cost: a fixed number of points or the variable `X` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cost {
    Fixed(i32),
    Variable,
}

impl Cost {
    pub const VARIABLE_MARKER: &'static str = "X";

    pub fn fixed(&self) -> Option<i32> {
        match self {
            Cost::Fixed(value) => Some(*value),
            Cost::Variable => None,
        }
    }

    /// Adds a signed delta to a fixed cost. The variable marker is left alone.
    pub fn shifted(self, delta: i32) -> Self {
        match self {
            Cost::Fixed(value) => Cost::Fixed(value.saturating_add(delta)),
            Cost::Variable => Cost::Variable,
        }
    }

    pub fn floored(self) -> Self {
        match self {
            Cost::Fixed(value) if value < 0 => Cost::Fixed(0),
            other => other,
        }
    }
}

impl Default for Cost {
    fn default() -> Self {
        Cost::Fixed(0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Fixed(value) => write!(f, "{value}"),
            Cost::Variable => f.write_str(Self::VARIABLE_MARKER),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCost {
    Fixed(i32),
    Marker(String),
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cost::Fixed(value) => serializer.serialize_i32(*value),
            Cost::Variable => serializer.serialize_str(Self::VARIABLE_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawCost::deserialize(deserializer)? {
            RawCost::Fixed(value) => Ok(Cost::Fixed(value)),
            RawCost::Marker(marker) if marker == Self::VARIABLE_MARKER => Ok(Cost::Variable),
            RawCost::Marker(other) => Err(de::Error::custom(format!(
                "unknown cost marker `{other}`"
            ))),
        }
    }
}

/// Either every member of `T` or an explicit list. Serialized as `"all"` or an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope<T> {
    All,
    Only(Vec<T>),
}

impl<T: PartialEq> Scope<T> {
    pub fn contains(&self, item: &T) -> bool {
        match self {
            Scope::All => true,
            Scope::Only(items) => items.contains(item),
        }
    }
}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Scope::Only(Vec::new())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScope<T> {
    Tag(String),
    List(Vec<T>),
}

impl<T: Serialize> Serialize for Scope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scope::All => serializer.serialize_str("all"),
            Scope::Only(items) => items.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Scope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawScope::<T>::deserialize(deserializer)? {
            RawScope::Tag(tag) if tag == "all" => Ok(Scope::All),
            RawScope::Tag(other) => Err(de::Error::custom(format!("unknown scope `{other}`"))),
            RawScope::List(items) => Ok(Scope::Only(items)),
        }
    }
}

/// Replacement text (and optionally cost) applied on top of a variation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextOverride {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
}

/// One hirameki level of a card. Level 0 is the base card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variation {
    pub cost: Cost,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CardCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<CardStatus>,
    /// Keyed by ego manifestation level (0..=6).
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "ego_levels"
    )]
    pub ego_variations: BTreeMap<u8, TextOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_variation: Option<TextOverride>,
}

// JSON keys are strings, and `#[serde(flatten)]` buffering will not coerce them
// to integers, so levels are parsed by hand.
fn ego_levels<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<u8, TextOverride>, D::Error> {
    BTreeMap::<String, TextOverride>::deserialize(deserializer)?
        .into_iter()
        .map(|(level, text)| {
            level
                .parse::<u8>()
                .map(|level| (level, text))
                .map_err(|_| de::Error::custom(format!("invalid ego level `{level}`")))
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDef {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CardType,
    pub category: CardCategory,
    #[serde(default)]
    pub statuses: Vec<CardStatus>,
    #[serde(default)]
    pub is_basic_card: bool,
    #[serde(default)]
    pub is_starting_card: bool,
    #[serde(default)]
    pub allowed_jobs: Scope<JobType>,
    pub hirameki_variations: Vec<Variation>,
}

impl CardDef {
    pub fn max_hirameki_level(&self) -> usize {
        self.hirameki_variations.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_accepts_numbers_and_variable_marker() {
        let fixed: Cost = serde_json::from_str("3").expect("fixed");
        let variable: Cost = serde_json::from_str("\"X\"").expect("variable");
        assert_eq!(fixed, Cost::Fixed(3));
        assert_eq!(variable, Cost::Variable);
        assert!(serde_json::from_str::<Cost>("\"Y\"").is_err());
        assert_eq!(serde_json::to_string(&Cost::Variable).expect("ser"), "\"X\"");
    }

    #[test]
    fn variable_cost_ignores_shift_and_floor() {
        assert_eq!(Cost::Variable.shifted(-4).floored(), Cost::Variable);
        assert_eq!(Cost::Fixed(1).shifted(-4).floored(), Cost::Fixed(0));
    }

    #[test]
    fn scope_parses_all_and_lists() {
        let all: Scope<JobType> = serde_json::from_str("\"all\"").expect("all");
        let only: Scope<JobType> = serde_json::from_str("[\"ranger\"]").expect("list");
        assert!(all.contains(&JobType::Psionic));
        assert!(only.contains(&JobType::Ranger));
        assert!(!only.contains(&JobType::Psionic));
        assert!(!Scope::<JobType>::default().contains(&JobType::Ranger));
    }

    #[test]
    fn ego_variation_keys_parse_from_json_strings() {
        let raw = r#"{"cost":1,"description":"base","ego_variations":{"3":{"description":"ego","cost":7}}}"#;
        let variation: Variation = serde_json::from_str(raw).expect("variation");
        assert_eq!(variation.ego_variations[&3].cost, Some(Cost::Fixed(7)));
    }
}
