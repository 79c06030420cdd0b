use crate::rubric::{ElementKey, MslRating, StandardId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Performance level assigned to an element, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ElementLevel(u8);

impl ElementLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(Self(level))
    }

    /// Reads a level from form text; anything that is not a whole level is unset.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = parse_number(raw);
        if value.fract() != 0.0 || value < f64::from(Self::MIN) || value > f64::from(Self::MAX) {
            return None;
        }
        Self::new(value as u8)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Level 1 earns nothing, level 5 earns four points.
    pub const fn points(self) -> u32 {
        self.0 as u32 - 1
    }
}

impl TryFrom<u8> for ElementLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("element level {value} is outside 1..=5"))
    }
}

impl From<ElementLevel> for u8 {
    fn from(level: ElementLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ElementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}", self.0)
    }
}

/// Parses a numeric form value, degrading malformed or non-finite text to zero.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Weights are non-negative percentages; negative or non-finite values count as zero.
pub fn clamp_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

fn deserialize_weight<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_weight)
}

fn deserialize_weights<'de, D>(deserializer: D) -> Result<[f64; 4], D::Error>
where
    D: serde::Deserializer<'de>,
{
    <[f64; 4]>::deserialize(deserializer).map(|weights| weights.map(clamp_weight))
}

/// One Measure of Student Learning row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasureEntry {
    #[serde(default, deserialize_with = "deserialize_weight")]
    pub weight: f64,
    #[serde(default)]
    pub rating: Option<MslRating>,
}

impl MeasureEntry {
    pub fn new(weight: f64, rating: Option<MslRating>) -> Self {
        Self { weight, rating }
    }
}

/// Everything the engine reads for one evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringInput {
    /// Percentage weights for standards 1 through 4.
    #[serde(default, deserialize_with = "deserialize_weights")]
    pub pp_weights: [f64; 4],
    /// Levels for rated elements; absent keys are unset.
    #[serde(default)]
    pub element_levels: BTreeMap<ElementKey, ElementLevel>,
    #[serde(default)]
    pub measures: Vec<MeasureEntry>,
}

impl ScoringInput {
    pub fn weight(&self, standard: StandardId) -> f64 {
        self.pp_weights[standard.index()]
    }

    pub fn level(&self, key: ElementKey) -> Option<ElementLevel> {
        self.element_levels.get(&key).copied()
    }

    /// Points earned per element of a standard, unset elements counting zero.
    pub fn element_points(&self, standard: StandardId) -> Vec<u32> {
        standard
            .elements()
            .map(|key| self.level(key).map(ElementLevel::points).unwrap_or(0))
            .collect()
    }

    pub fn measure_weights(&self) -> Vec<f64> {
        self.measures.iter().map(|measure| measure.weight).collect()
    }

    pub fn rated_elements(&self) -> usize {
        ElementKey::all()
            .filter(|key| self.element_levels.contains_key(key))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_points() {
        let points: Vec<u32> = (1..=5)
            .filter_map(ElementLevel::new)
            .map(ElementLevel::points)
            .collect();
        assert_eq!(points, [0, 1, 2, 3, 4]);
        assert!(ElementLevel::new(0).is_none());
        assert!(ElementLevel::new(6).is_none());
    }

    #[test]
    fn malformed_text_degrades_to_defaults() {
        assert_eq!(parse_number("12.5"), 12.5);
        assert_eq!(parse_number(" 25 "), 25.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);

        assert_eq!(ElementLevel::parse("4"), ElementLevel::new(4));
        assert_eq!(ElementLevel::parse(""), None);
        assert_eq!(ElementLevel::parse("3.5"), None);
        assert_eq!(ElementLevel::parse("9"), None);
        assert_eq!(ElementLevel::parse("level"), None);
    }

    #[test]
    fn input_deserializes_from_element_key_map() {
        let payload = serde_json::json!({
            "pp_weights": [25.0, 25.0, 25.0, 25.0],
            "element_levels": { "s1a": 4, "s3f": 2 },
            "measures": [{ "weight": 15.0, "rating": "expected" }, { "weight": 15.0 }]
        });

        let input: ScoringInput = serde_json::from_value(payload).expect("input parses");
        let s1a: ElementKey = "s1a".parse().expect("key");
        assert_eq!(input.level(s1a), ElementLevel::new(4));
        assert_eq!(input.rated_elements(), 2);
        assert_eq!(input.measures[0].rating, Some(MslRating::Expected));
        assert_eq!(input.measures[1].rating, None);
        assert_eq!(input.element_points(StandardId::S1), [3, 0, 0]);
    }

    #[test]
    fn negative_weights_deserialize_as_zero() {
        let payload = serde_json::json!({
            "pp_weights": [150.0, -50.0, 0.0, 0.0],
            "measures": [{ "weight": 45.0 }, { "weight": -15.0 }]
        });

        let input: ScoringInput = serde_json::from_value(payload).expect("input parses");
        assert_eq!(input.pp_weights, [150.0, 0.0, 0.0, 0.0]);
        assert_eq!(input.measure_weights(), [45.0, 0.0]);
        assert_eq!(clamp_weight(f64::NAN), 0.0);
        assert_eq!(clamp_weight(f64::INFINITY), 0.0);
    }

    #[test]
    fn input_rejects_levels_outside_scale() {
        let payload = serde_json::json!({ "element_levels": { "s1a": 7 } });
        assert!(serde_json::from_value::<ScoringInput>(payload).is_err());
    }
}
