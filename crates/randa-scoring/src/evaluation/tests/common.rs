use crate::evaluation::{ElementLevel, MeasureEntry, ScoringInput};
use crate::rubric::{ElementKey, MslRating};

pub(super) const EQUAL_WEIGHTS: [f64; 4] = [25.0, 25.0, 25.0, 25.0];

pub(super) fn level(value: u8) -> ElementLevel {
    ElementLevel::new(value).expect("valid level")
}

pub(super) fn key(raw: &str) -> ElementKey {
    raw.parse().expect("valid element key")
}

pub(super) fn measure(weight: f64, rating: MslRating) -> MeasureEntry {
    MeasureEntry::new(weight, Some(rating))
}

pub(super) fn sample_measures() -> Vec<MeasureEntry> {
    vec![
        measure(15.0, MslRating::Expected),
        measure(15.0, MslRating::MoreThanExpected),
    ]
}

/// Every element at the same level.
pub(super) fn uniform_input(
    value: u8,
    pp_weights: [f64; 4],
    measures: Vec<MeasureEntry>,
) -> ScoringInput {
    ScoringInput {
        pp_weights,
        element_levels: ElementKey::all().map(|key| (key, level(value))).collect(),
        measures,
    }
}

pub(super) fn sample_input() -> ScoringInput {
    uniform_input(4, EQUAL_WEIGHTS, sample_measures())
}
