use super::domain::{ElementLevel, MeasureEntry, ScoringInput};
use crate::rubric::{
    ElementKey, MAX_MEASURES, MIN_MEASURES, MSL_WEIGHT_TARGET, PP_WEIGHT_TARGET, WEIGHT_EPSILON,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of checking a weight group against its target total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightCheck {
    pub valid: bool,
    pub sum: f64,
    pub delta: f64,
}

/// A negative or non-finite weight fails the check whatever the total.
pub fn weights_valid(weights: &[f64], target: f64) -> WeightCheck {
    let sum: f64 = weights.iter().sum();
    let delta = (sum - target).abs();
    let in_range = weights
        .iter()
        .all(|weight| weight.is_finite() && *weight >= 0.0);
    WeightCheck {
        valid: in_range && delta < WEIGHT_EPSILON,
        sum,
        delta,
    }
}

/// True when every rubric element has a level selected.
pub fn elements_complete(levels: &BTreeMap<ElementKey, ElementLevel>) -> bool {
    ElementKey::all().all(|key| levels.contains_key(&key))
}

pub fn measures_valid(measures: &[MeasureEntry]) -> bool {
    if !(MIN_MEASURES..=MAX_MEASURES).contains(&measures.len()) {
        return false;
    }

    let all_rated = measures.iter().all(|measure| measure.rating.is_some());
    let weights: Vec<f64> = measures.iter().map(|measure| measure.weight).collect();

    all_rated && weights_valid(&weights, MSL_WEIGHT_TARGET).valid
}

/// Gates deciding which result sections are authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidationStatus {
    pub pp_weights_valid: bool,
    pub elements_complete: bool,
    pub measures_valid: bool,
    pub msl_weights_valid: bool,
    pub pp_weight_sum: f64,
    pub msl_weight_sum: f64,
    pub ready: bool,
}

impl ValidationStatus {
    pub fn check(input: &ScoringInput) -> Self {
        let pp = weights_valid(&input.pp_weights, PP_WEIGHT_TARGET);
        let msl = weights_valid(&input.measure_weights(), MSL_WEIGHT_TARGET);
        let elements_complete = elements_complete(&input.element_levels);
        let measures_valid = measures_valid(&input.measures);

        Self {
            pp_weights_valid: pp.valid,
            elements_complete,
            measures_valid,
            msl_weights_valid: msl.valid,
            pp_weight_sum: pp.sum,
            msl_weight_sum: msl.sum,
            ready: pp.valid && elements_complete && measures_valid,
        }
    }

    /// Professional Practices results are shown once weights and levels are in place.
    pub fn practices_ready(&self) -> bool {
        self.pp_weights_valid && self.elements_complete
    }

    pub fn learning_ready(&self) -> bool {
        self.measures_valid
    }
}
