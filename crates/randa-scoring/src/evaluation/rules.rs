use super::domain::{MeasureEntry, ScoringInput};
use crate::rubric::{
    pct, round2, MslRating, PracticeRating, StandardId, MSL_MAX_SCORE, MSL_MULTIPLIER,
    MSL_RATING_RANGES, MSL_WEIGHT_TARGET, POINTS_PER_ELEMENT, PP_BASE_MAX, PP_MAX_SCORE,
    PP_RATING_RANGES,
};
use serde::Serialize;

/// Rating derived from a standard's earned points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StandardRating {
    Rated { rating: PracticeRating },
    CeilingExceeded { earned: u32, ceiling: u32 },
}

impl StandardRating {
    pub fn rating(&self) -> Option<PracticeRating> {
        match self {
            Self::Rated { rating } => Some(*rating),
            Self::CeilingExceeded { .. } => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rated { rating } => rating.label(),
            Self::CeilingExceeded { .. } => "Ceiling Exceeded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardScore {
    pub standard: StandardId,
    pub weight: f64,
    pub earned: u32,
    pub possible: u32,
    pub ratio: f64,
    pub weighted_score_700: f64,
    /// Contribution on the 0-20 scale, equal to the weighted score divided by 35.
    pub base_contribution: f64,
    pub rating: StandardRating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeResult {
    pub base: f64,
    pub score: f64,
    pub percentage: f64,
    pub rating: Option<PracticeRating>,
    pub standards: Vec<StandardScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasureScore {
    pub weight: f64,
    pub rating: MslRating,
    pub value: f64,
    pub weighted_score_300: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningResult {
    pub base: f64,
    pub score: f64,
    pub percentage: f64,
    pub rating: Option<MslRating>,
    pub measures: Vec<MeasureScore>,
}

pub fn score_standard(points: &[u32], weight: f64, standard: StandardId) -> StandardScore {
    let earned = points.iter().copied().fold(0u32, u32::saturating_add);
    let possible = u32::try_from(points.len())
        .unwrap_or(u32::MAX)
        .saturating_mul(POINTS_PER_ELEMENT);
    let ratio = if possible > 0 {
        (f64::from(earned) / f64::from(possible)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let share = ratio * (weight / 100.0);
    let rating = match standard.classify(earned) {
        Ok(rating) => StandardRating::Rated { rating },
        Err(overflow) => {
            tracing::error!(%overflow, "standard rating breakpoints exhausted");
            StandardRating::CeilingExceeded {
                earned: overflow.earned,
                ceiling: overflow.ceiling,
            }
        }
    };

    StandardScore {
        standard,
        weight,
        earned,
        possible,
        ratio,
        weighted_score_700: round2(share * PP_MAX_SCORE),
        base_contribution: round2(share * PP_BASE_MAX),
        rating,
    }
}

pub fn score_practices(input: &ScoringInput) -> PracticeResult {
    let standards: Vec<StandardScore> = StandardId::ordered()
        .into_iter()
        .map(|standard| {
            score_standard(
                &input.element_points(standard),
                input.weight(standard),
                standard,
            )
        })
        .collect();

    // Summed from the rounded per-standard scores so the total matches what is displayed.
    let score = round2(standards.iter().map(|s| s.weighted_score_700).sum());
    let base = round2(standards.iter().map(|s| s.base_contribution).sum());

    PracticeResult {
        base,
        score,
        percentage: pct(score / PP_MAX_SCORE),
        rating: PP_RATING_RANGES.lookup(score),
        standards,
    }
}

pub fn score_measure(measure: &MeasureEntry) -> Option<MeasureScore> {
    let rating = measure.rating?;
    let value = rating.value();

    Some(MeasureScore {
        weight: measure.weight,
        rating,
        value,
        weighted_score_300: round2(raw_measure_score(measure.weight, value)),
    })
}

fn raw_measure_score(weight: f64, value: f64) -> f64 {
    (weight / MSL_WEIGHT_TARGET) * value * MSL_MULTIPLIER
}

pub fn score_learning(measures: &[MeasureEntry]) -> LearningResult {
    let scored: Vec<MeasureScore> = measures.iter().filter_map(score_measure).collect();
    let raw_total: f64 = scored
        .iter()
        .map(|measure| raw_measure_score(measure.weight, measure.value))
        .sum();
    let score = round2(raw_total);

    LearningResult {
        base: round2(raw_total / MSL_MULTIPLIER),
        score,
        percentage: pct(raw_total / MSL_MAX_SCORE),
        rating: MSL_RATING_RANGES.lookup(score),
        measures: scored,
    }
}
