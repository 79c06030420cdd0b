use super::views::{BreakdownSection, CalculationBreakdown};
use crate::evaluation::{Evaluation, ScoringInput};
use crate::rubric::MslRating;

/// Formula walkthrough, available only once every validation gate passes.
pub fn calculation_breakdown(
    input: &ScoringInput,
    evaluation: &Evaluation,
) -> Option<CalculationBreakdown> {
    let final_result = evaluation.final_result.as_ref()?;
    let practices = &evaluation.practices;
    let learning = &evaluation.learning;

    let mut pp_lines = Vec::new();
    for standard in &practices.standards {
        let weight = input.weight(standard.standard);
        pp_lines.push(format!("{}:", standard.standard.label()));
        pp_lines.push(format!(
            "Earned Points: {} / {}",
            standard.earned, standard.possible
        ));
        pp_lines.push(format!(
            "Ratio: {} ÷ {} = {:.4}",
            standard.earned, standard.possible, standard.ratio
        ));
        pp_lines.push(format!(
            "Weighted Score (700-scale): {:.4} × ({}% ÷ 100) × 700 = {}",
            standard.ratio, weight, standard.weighted_score_700
        ));
        pp_lines.push(format!("Standard Rating: {}", standard.rating.label()));
    }
    pp_lines.push(format!(
        "Total Professional Practices Score: {} / 700",
        practices.score
    ));
    pp_lines.push(format!("Rating: {}", label_or_na(practices.rating)));

    let mut msl_lines = Vec::new();
    for (index, measure) in learning.measures.iter().enumerate() {
        msl_lines.push(format!("Measure {}:", index + 1));
        msl_lines.push(format!(
            "Rating: {} = {} points",
            measure.rating, measure.value
        ));
        msl_lines.push(format!(
            "Weighted Score: ({}% ÷ 30%) × {} × 100 = {}",
            measure.weight, measure.value, measure.weighted_score_300
        ));
    }
    msl_lines.push(format!("Total MSL Score: {} / 300", learning.score));
    msl_lines.push(format!("Rating: {}", label_or_na(learning.rating)));

    let mut final_lines = vec![
        format!(
            "Total Score: {} + {} = {} / 1000",
            practices.score, learning.score, final_result.total
        ),
        format!("Percentage: {:.1}%", final_result.percentage),
    ];
    if learning.rating == Some(MslRating::LessThanExpected) && final_result.total > 800.0 {
        final_lines.push(
            "MSL Constraint Applied: Since MSL rating is \"Less Than Expected\", \
             final rating is capped at \"Effective\""
                .to_string(),
        );
    }
    final_lines.push(format!(
        "Final Effectiveness Rating: {}",
        label_or_na(final_result.rating)
    ));

    Some(CalculationBreakdown {
        sections: vec![
            BreakdownSection {
                title: "Professional Practices Calculation (70% of Final Score)".to_string(),
                lines: pp_lines,
            },
            BreakdownSection {
                title: "Measures of Student Learning Calculation (30% of Final Score)"
                    .to_string(),
                lines: msl_lines,
            },
            BreakdownSection {
                title: "Final Effectiveness Rating".to_string(),
                lines: final_lines,
            },
        ],
    })
}

fn label_or_na<L: std::fmt::Display>(label: Option<L>) -> String {
    label
        .map(|label| label.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
