//! Scoring engine: input validation gates, per-standard and aggregate scores, and the
//! final effectiveness rating.

pub mod domain;
mod policy;
mod rules;
mod validation;
pub mod worksheet;

#[cfg(test)]
mod tests;

pub use domain::{clamp_weight, parse_number, ElementLevel, MeasureEntry, ScoringInput};
pub use policy::{decide_final, FinalResult};
pub use rules::{
    score_learning, score_measure, score_practices, score_standard, LearningResult,
    MeasureScore, PracticeResult, StandardRating, StandardScore,
};
pub use validation::{
    elements_complete, measures_valid, weights_valid, ValidationStatus, WeightCheck,
};
pub use worksheet::{MeasureId, Worksheet, WorksheetError};

use serde::Serialize;

/// Stateless evaluator; every call recomputes from the supplied input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn evaluate(&self, input: &ScoringInput) -> Evaluation {
        let validation = ValidationStatus::check(input);
        let practices = score_practices(input);
        let learning = score_learning(&input.measures);

        let final_result = validation
            .ready
            .then(|| decide_final(practices.score, learning.score, learning.rating));

        tracing::debug!(
            ready = validation.ready,
            pp_score = practices.score,
            msl_score = learning.score,
            total = ?final_result.map(|result| result.total),
            "evaluation recomputed"
        );

        Evaluation {
            validation,
            practices,
            learning,
            final_result,
        }
    }
}

/// Full engine output for one input snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub validation: ValidationStatus,
    pub practices: PracticeResult,
    pub learning: LearningResult,
    /// Present only when every validation gate passes.
    #[serde(rename = "final")]
    pub final_result: Option<FinalResult>,
}

impl Evaluation {
    pub fn is_ready(&self) -> bool {
        self.validation.ready
    }
}
