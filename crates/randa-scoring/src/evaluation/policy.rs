use crate::rubric::{
    pct, round2, EffectivenessRating, MslRating, FINAL_RATING_RANGES, TOTAL_MAX_SCORE,
};
use serde::Serialize;

/// Combined effectiveness outcome on the 1000-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalResult {
    pub total: f64,
    pub percentage: f64,
    pub rating: Option<EffectivenessRating>,
    /// Set when a Less Than Expected MSL rating capped the result at Effective.
    pub msl_constraint_applied: bool,
}

pub fn decide_final(
    pp_score_700: f64,
    msl_score_300: f64,
    msl_rating: Option<MslRating>,
) -> FinalResult {
    let total = round2(pp_score_700 + msl_score_300);
    let looked_up = FINAL_RATING_RANGES.lookup(total);

    let capped = msl_rating == Some(MslRating::LessThanExpected)
        && looked_up == Some(EffectivenessRating::HighlyEffective);
    let rating = if capped {
        Some(EffectivenessRating::Effective)
    } else {
        looked_up
    };

    FinalResult {
        total,
        percentage: pct(total / TOTAL_MAX_SCORE),
        rating,
        msl_constraint_applied: capped,
    }
}
