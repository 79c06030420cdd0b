//! Static rubric definition: standards, elements, breakpoints, and rating tables.

mod ranges;
mod standards;

pub use ranges::{
    EffectivenessRating, MslRating, PracticeRating, RatingBand, RatingRangeTable,
    FINAL_RATING_RANGES, MSL_RATING_RANGES, PP_RATING_RANGES, STANDARD_RATING_RANGES,
};
pub use standards::{CeilingExceeded, ElementKey, ElementKeyError, StandardId};

pub const POINTS_PER_ELEMENT: u32 = 4;
pub const PP_BASE_MAX: f64 = 20.0;
pub const PP_MAX_SCORE: f64 = 700.0;
pub const MSL_MULTIPLIER: f64 = 100.0;
pub const MSL_MAX_SCORE: f64 = 300.0;
pub const TOTAL_MAX_SCORE: f64 = 1000.0;
pub const PP_WEIGHT_TARGET: f64 = 100.0;
pub const MSL_WEIGHT_TARGET: f64 = 30.0;
pub const WEIGHT_EPSILON: f64 = 0.01;
pub const MIN_MEASURES: usize = 2;
pub const MAX_MEASURES: usize = 5;
pub const ELEMENT_COUNT: usize = 17;

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a 0..1 fraction into a one-decimal percentage.
pub fn pct(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(131.245_1), 131.25);
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(-2.345_000_1), -2.35);
        assert_eq!(round2(525.0), 525.0);
    }

    #[test]
    fn pct_keeps_one_decimal() {
        assert_eq!(pct(525.0 / 700.0), 75.0);
        assert_eq!(pct(225.0 / 300.0), 75.0);
        assert_eq!(pct(750.0 / 1000.0), 75.0);
        assert_eq!(pct(0.123_45), 12.3);
    }

    #[test]
    fn element_total_matches_standards() {
        let total: usize = StandardId::ordered()
            .iter()
            .map(|standard| standard.element_count())
            .sum();
        assert_eq!(total, ELEMENT_COUNT);
        assert_eq!(ElementKey::all().count(), ELEMENT_COUNT);
    }
}
