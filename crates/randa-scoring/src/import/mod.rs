//! CSV batch scoring: one evaluation per row.

mod parser;

use crate::evaluation::{Evaluation, ScoringEngine, ScoringInput};
use crate::rubric::StandardId;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum BatchImportError {
    #[error("failed to read batch file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid batch CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("batch CSV is missing required column '{0}'")]
    MissingColumn(String),
}

/// A scored row from a batch file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEvaluation {
    pub evaluation_id: String,
    pub input: ScoringInput,
    pub evaluation: Evaluation,
}

pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<BatchEvaluation>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<BatchEvaluation>, BatchImportError> {
        let (headers, records) = parser::parse_records(reader)?;

        for standard in StandardId::ordered() {
            let column = parser::weight_column(standard);
            if !headers.contains(&column) {
                return Err(BatchImportError::MissingColumn(column));
            }
        }

        let engine = ScoringEngine;
        let evaluations: Vec<BatchEvaluation> = records
            .into_iter()
            .map(|record| {
                let evaluation = engine.evaluate(&record.input);
                BatchEvaluation {
                    evaluation_id: record.evaluation_id,
                    input: record.input,
                    evaluation,
                }
            })
            .collect();

        tracing::info!(rows = evaluations.len(), "batch evaluations scored");
        Ok(evaluations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::{EffectivenessRating, ElementKey, MslRating};
    use std::io::Cursor;

    fn header() -> String {
        let mut columns = vec!["evaluation_id".to_string()];
        columns.extend(StandardId::ordered().map(parser::weight_column));
        columns.extend(ElementKey::all().map(|key| key.to_string()));
        for slot in 1..=5 {
            columns.push(format!("msl_weight_{slot}"));
            columns.push(format!("msl_rating_{slot}"));
        }
        columns.join(",")
    }

    fn row(id: &str, level: &str, measures: &[(&str, &str)]) -> String {
        let mut cells = vec![id.to_string()];
        cells.extend(["25"; 4].map(|weight| weight.to_string()));
        cells.extend(ElementKey::all().map(|_| level.to_string()));
        for slot in 0..5 {
            let (weight, rating) = measures.get(slot).copied().unwrap_or(("", ""));
            cells.push(weight.to_string());
            cells.push(rating.to_string());
        }
        cells.join(",")
    }

    #[test]
    fn scores_each_row_independently() {
        let csv = format!(
            "{}\n{}\n{}\n",
            header(),
            row("T-100", "4", &[("15", "Expected"), ("15", "More Than Expected")]),
            row("T-101", "5", &[("10", "more_than_expected"), ("10", "expected"), ("10", "expected")]),
        );

        let results = BatchImporter::from_reader(Cursor::new(csv)).expect("batch parses");

        assert_eq!(results.len(), 2);
        let first = &results[0];
        assert_eq!(first.evaluation_id, "T-100");
        let final_result = first.evaluation.final_result.expect("ready");
        assert_eq!(final_result.total, 750.0);
        assert_eq!(final_result.rating, Some(EffectivenessRating::Effective));

        let second = &results[1];
        assert_eq!(second.input.measures.len(), 3);
        assert_eq!(second.evaluation.learning.score, 200.0);
        assert_eq!(second.evaluation.learning.rating, Some(MslRating::Expected));
        let final_result = second.evaluation.final_result.expect("ready");
        assert_eq!(final_result.total, 900.0);
        assert_eq!(final_result.rating, Some(EffectivenessRating::HighlyEffective));
    }

    #[test]
    fn malformed_cells_degrade_instead_of_failing() {
        let csv = format!(
            "{}\n{}\n",
            header(),
            row("", "high", &[("fifteen", "Outstanding")]),
        );

        let results = BatchImporter::from_reader(Cursor::new(csv)).expect("batch parses");

        let result = &results[0];
        assert_eq!(result.evaluation_id, "row-1");
        assert_eq!(result.input.rated_elements(), 0);
        assert_eq!(result.input.measures.len(), 2);
        assert_eq!(result.input.measures[0].weight, 0.0);
        assert_eq!(result.input.measures[0].rating, None);
        assert!(!result.evaluation.validation.elements_complete);
        assert!(result.evaluation.final_result.is_none());
    }

    #[test]
    fn missing_weight_columns_are_rejected() {
        let csv = "evaluation_id,s1a\nT-1,4\n";

        let err = BatchImporter::from_reader(Cursor::new(csv)).expect_err("missing columns");

        assert!(matches!(err, BatchImportError::MissingColumn(column) if column == "pp_weight_s1"));
    }
}
