use super::domain::{clamp_weight, parse_number, ElementLevel, MeasureEntry, ScoringInput};
use super::{Evaluation, ScoringEngine};
use crate::rubric::{ElementKey, MslRating, StandardId, MAX_MEASURES, MIN_MEASURES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for a measure row; numbering restarts on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasureId(pub u32);

impl fmt::Display for MeasureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Measure {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorksheetError {
    #[error("no more than {} measures may be entered", MAX_MEASURES)]
    MeasureLimit,
    #[error("at least {} measures are required", MIN_MEASURES)]
    MeasureMinimum,
    #[error("{0} does not exist")]
    UnknownMeasure(MeasureId),
}

/// Mutable input record driven by form edits; every edit is followed by `evaluate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    input: ScoringInput,
    measure_ids: Vec<MeasureId>,
    next_measure: u32,
}

impl Default for Worksheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Worksheet {
    pub fn new() -> Self {
        let mut worksheet = Self {
            input: ScoringInput::default(),
            measure_ids: Vec::with_capacity(MAX_MEASURES),
            next_measure: 0,
        };
        for _ in 0..MIN_MEASURES {
            worksheet.push_measure(MeasureEntry::default());
        }
        worksheet
    }

    /// Equal weights, every element at level 4, and two rated measures.
    pub fn sample() -> Self {
        let mut worksheet = Self::new();
        worksheet.load_sample();
        worksheet
    }

    pub fn input(&self) -> &ScoringInput {
        &self.input
    }

    pub fn evaluate(&self) -> Evaluation {
        ScoringEngine.evaluate(&self.input)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn set_standard_weight(&mut self, standard: StandardId, weight: f64) {
        self.input.pp_weights[standard.index()] = clamp_weight(weight);
    }

    pub fn set_standard_weight_text(&mut self, standard: StandardId, raw: &str) {
        self.set_standard_weight(standard, parse_number(raw));
    }

    pub fn apply_equal_weights(&mut self) {
        for standard in StandardId::ordered() {
            self.set_standard_weight(standard, 25.0);
        }
    }

    pub fn set_level(&mut self, key: ElementKey, level: Option<ElementLevel>) {
        match level {
            Some(level) => {
                self.input.element_levels.insert(key, level);
            }
            None => {
                self.input.element_levels.remove(&key);
            }
        }
    }

    pub fn set_level_text(&mut self, key: ElementKey, raw: &str) {
        self.set_level(key, ElementLevel::parse(raw));
    }

    pub fn measures(&self) -> impl Iterator<Item = (MeasureId, &MeasureEntry)> {
        self.measure_ids
            .iter()
            .copied()
            .zip(self.input.measures.iter())
    }

    pub fn add_measure(&mut self) -> Result<MeasureId, WorksheetError> {
        if self.input.measures.len() >= MAX_MEASURES {
            return Err(WorksheetError::MeasureLimit);
        }
        Ok(self.push_measure(MeasureEntry::default()))
    }

    pub fn remove_measure(&mut self, id: MeasureId) -> Result<(), WorksheetError> {
        let position = self.position(id)?;
        if self.input.measures.len() <= MIN_MEASURES {
            return Err(WorksheetError::MeasureMinimum);
        }
        self.measure_ids.remove(position);
        self.input.measures.remove(position);
        Ok(())
    }

    pub fn set_measure_weight(&mut self, id: MeasureId, weight: f64) -> Result<(), WorksheetError> {
        let position = self.position(id)?;
        self.input.measures[position].weight = clamp_weight(weight);
        Ok(())
    }

    pub fn set_measure_weight_text(
        &mut self,
        id: MeasureId,
        raw: &str,
    ) -> Result<(), WorksheetError> {
        self.set_measure_weight(id, parse_number(raw))
    }

    pub fn set_measure_rating(
        &mut self,
        id: MeasureId,
        rating: Option<MslRating>,
    ) -> Result<(), WorksheetError> {
        let position = self.position(id)?;
        self.input.measures[position].rating = rating;
        Ok(())
    }

    pub fn load_sample(&mut self) {
        self.reset();
        self.apply_equal_weights();

        let level = ElementLevel::new(4);
        for key in ElementKey::all() {
            self.set_level(key, level);
        }

        let ratings = [MslRating::Expected, MslRating::MoreThanExpected];
        for (entry, rating) in self.input.measures.iter_mut().zip(ratings) {
            *entry = MeasureEntry::new(15.0, Some(rating));
        }
    }

    fn push_measure(&mut self, entry: MeasureEntry) -> MeasureId {
        self.next_measure += 1;
        let id = MeasureId(self.next_measure);
        self.measure_ids.push(id);
        self.input.measures.push(entry);
        id
    }

    fn position(&self, id: MeasureId) -> Result<usize, WorksheetError> {
        self.measure_ids
            .iter()
            .position(|candidate| *candidate == id)
            .ok_or(WorksheetError::UnknownMeasure(id))
    }
}
