use super::breakdown::calculation_breakdown;
use super::insights::range_insight;
use super::views::{
    CalculationBreakdown, RangeInsight, StepProgressEntry, ValidationMessage, ValidationMessages,
};
use crate::evaluation::{Evaluation, ScoringInput, ValidationStatus};
use crate::rubric::{MSL_WEIGHT_TARGET, PP_WEIGHT_TARGET};
use serde::Serialize;

/// Evaluation plus the derived views a host renders next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub evaluation: Evaluation,
    pub messages: ValidationMessages,
    pub progress: Vec<StepProgressEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<RangeInsight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<CalculationBreakdown>,
}

impl EvaluationReport {
    pub fn build(input: &ScoringInput, evaluation: Evaluation) -> Self {
        let messages = validation_messages(&evaluation.validation);
        let progress = step_progress(&evaluation.validation);
        let insight = evaluation.final_result.as_ref().map(range_insight);
        let breakdown = calculation_breakdown(input, &evaluation);

        Self {
            evaluation,
            messages,
            progress,
            insight,
            breakdown,
        }
    }
}

pub fn validation_messages(status: &ValidationStatus) -> ValidationMessages {
    ValidationMessages {
        pp_weights: weight_message(status.pp_weights_valid, status.pp_weight_sum, PP_WEIGHT_TARGET),
        msl_weights: weight_message(
            status.msl_weights_valid,
            status.msl_weight_sum,
            MSL_WEIGHT_TARGET,
        ),
    }
}

fn weight_message(valid: bool, sum: f64, target: f64) -> ValidationMessage {
    let message = if valid {
        format!("Total equals {target}%")
    } else {
        format!("Total must equal {target}% (currently {sum:.1}%)")
    };
    ValidationMessage { valid, message }
}

pub fn step_progress(status: &ValidationStatus) -> Vec<StepProgressEntry> {
    let weights = status.pp_weights_valid;
    let elements = status.elements_complete;
    let measures = status.measures_valid;
    let all = status.ready;

    vec![
        StepProgressEntry {
            step: 1,
            title: "Professional Practice weights",
            complete: weights,
            current: !weights,
        },
        StepProgressEntry {
            step: 2,
            title: "Element ratings",
            complete: elements,
            current: weights && !elements,
        },
        StepProgressEntry {
            step: 3,
            title: "Measures of Student Learning",
            complete: measures,
            current: weights && elements && !measures,
        },
        StepProgressEntry {
            step: 4,
            title: "Final effectiveness rating",
            complete: all,
            current: weights && elements && measures && !all,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{MeasureId, Worksheet};
    use crate::rubric::{MslRating, StandardId};

    fn report_for(worksheet: &Worksheet) -> EvaluationReport {
        EvaluationReport::build(worksheet.input(), worksheet.evaluate())
    }

    #[test]
    fn blank_worksheet_points_at_step_one() {
        let report = report_for(&Worksheet::new());

        assert_eq!(
            report.messages.pp_weights.message,
            "Total must equal 100% (currently 0.0%)"
        );
        assert!(!report.messages.msl_weights.valid);
        let current: Vec<u8> = report
            .progress
            .iter()
            .filter(|entry| entry.current)
            .map(|entry| entry.step)
            .collect();
        assert_eq!(current, [1]);
        assert!(report.insight.is_none());
        assert!(report.breakdown.is_none());
    }

    #[test]
    fn progress_advances_as_gates_pass() {
        let mut worksheet = Worksheet::sample();
        worksheet
            .set_measure_rating(MeasureId(2), None)
            .expect("known measure");

        let report = report_for(&worksheet);

        assert!(report.progress[0].complete);
        assert!(report.progress[1].complete);
        assert!(report.progress[2].current);
        assert!(!report.progress[3].complete);
        assert_eq!(report.messages.msl_weights.message, "Total equals 30%");
    }

    #[test]
    fn weight_message_reports_current_total() {
        let mut worksheet = Worksheet::sample();
        worksheet.set_standard_weight(StandardId::S4, 12.5);

        let report = report_for(&worksheet);

        assert_eq!(
            report.messages.pp_weights.message,
            "Total must equal 100% (currently 87.5%)"
        );
    }

    #[test]
    fn complete_worksheet_includes_breakdown_and_insight() {
        let report = report_for(&Worksheet::sample());

        assert!(report.progress.iter().all(|entry| entry.complete));
        let insight = report.insight.as_ref().expect("insight");
        assert_eq!(insight.rating_label, "Effective");

        let breakdown = report.breakdown.as_ref().expect("breakdown");
        assert_eq!(breakdown.sections.len(), 3);
        let rendered = breakdown.render();
        assert!(rendered.contains("Earned Points: 9 / 12"));
        assert!(rendered.contains("Ratio: 9 ÷ 12 = 0.7500"));
        assert!(rendered.contains("0.7500 × (25% ÷ 100) × 700 = 131.25"));
        assert!(rendered.contains("Total Professional Practices Score: 525 / 700"));
        assert!(rendered.contains("Rating: Expected = 1.5 points"));
        assert!(rendered.contains("(15% ÷ 30%) × 3 × 100 = 150"));
        assert!(rendered.contains("Total Score: 525 + 225 = 750 / 1000"));
        assert!(rendered.contains("Percentage: 75.0%"));
        assert!(rendered.contains("Final Effectiveness Rating: Effective"));
        assert!(!rendered.contains("MSL Constraint Applied"));
    }

    #[test]
    fn report_serializes_final_section() {
        let mut worksheet = Worksheet::sample();
        worksheet
            .set_measure_rating(MeasureId(1), Some(MslRating::MoreThanExpected))
            .expect("known measure");

        let report = report_for(&worksheet);
        let json = serde_json::to_value(&report).expect("serializes");

        assert_eq!(json["evaluation"]["final"]["total"], 825.0);
        assert_eq!(json["evaluation"]["final"]["rating"], "highly_effective");
        assert_eq!(json["evaluation"]["learning"]["rating"], "more_than_expected");
        assert_eq!(
            json["evaluation"]["practices"]["standards"][0]["rating"]["status"],
            "rated"
        );
    }
}
