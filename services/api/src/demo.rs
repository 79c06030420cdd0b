use crate::infra::load_scoring_input;
use chrono::{DateTime, Local};
use clap::Args;
use randa_scoring::error::AppError;
use randa_scoring::evaluation::{ElementLevel, MeasureId, ScoringEngine, Worksheet};
use randa_scoring::import::{BatchEvaluation, BatchImporter};
use randa_scoring::report::EvaluationReport;
use randa_scoring::rubric::{ElementKey, MslRating, ELEMENT_COUNT};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding weights, element levels, and measures
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Leave the calculation breakdown out of the text report
    #[arg(long)]
    pub(crate) no_breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one evaluation per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print every scored row as JSON instead of a summary table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the calculation breakdown at the end of the walkthrough
    #[arg(long)]
    pub(crate) skip_breakdown: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let input = load_scoring_input(&args.input)?;
    let evaluation = ScoringEngine.evaluate(&input);
    let report = EvaluationReport::build(&input, evaluation);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report, Local::now(), !args.no_breakdown);
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let results = BatchImporter::from_path(&args.csv)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        render_batch(&results);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("RANDA 70:30 scoring walkthrough");
    let mut worksheet = Worksheet::new();
    print_progress("Blank worksheet", &worksheet);

    worksheet.apply_equal_weights();
    print_progress("Equal Professional Practice weights applied", &worksheet);

    for key in ElementKey::all() {
        worksheet.set_level(key, ElementLevel::new(4));
    }
    print_progress("All 17 elements rated at Level 4", &worksheet);

    let extra = worksheet.add_measure()?;
    println!("\nAdded {extra}; removing it again to keep two measures");
    worksheet.remove_measure(extra)?;

    let ids: Vec<MeasureId> = worksheet.measures().map(|(id, _)| id).collect();
    let ratings = [MslRating::Expected, MslRating::MoreThanExpected];
    for (id, rating) in ids.into_iter().zip(ratings) {
        worksheet.set_measure_weight(id, 15.0)?;
        worksheet.set_measure_rating(id, Some(rating))?;
    }
    print_progress("Two measures weighted 15% each and rated", &worksheet);

    let report = EvaluationReport::build(worksheet.input(), worksheet.evaluate());
    println!();
    render_report(&report, Local::now(), !args.skip_breakdown);
    Ok(())
}

fn print_progress(stage: &str, worksheet: &Worksheet) {
    let evaluation = worksheet.evaluate();
    let report = EvaluationReport::build(worksheet.input(), evaluation);

    println!("\n{stage}");
    for entry in &report.progress {
        let marker = match (entry.complete, entry.current) {
            (true, _) => "x",
            (false, true) => ">",
            (false, false) => " ",
        };
        println!("  [{marker}] {}. {}", entry.step, entry.title);
    }
    println!(
        "  Rated elements: {}/{}",
        worksheet.input().rated_elements(),
        ELEMENT_COUNT
    );
}

pub(crate) fn render_report(
    report: &EvaluationReport,
    evaluated_at: DateTime<Local>,
    show_breakdown: bool,
) {
    let evaluation = &report.evaluation;
    let validation = &evaluation.validation;

    println!("Evaluation scored {}", evaluated_at.format("%Y-%m-%d %H:%M"));
    println!(
        "Professional Practice weights: {}",
        report.messages.pp_weights.message
    );
    println!("Measure weights: {}", report.messages.msl_weights.message);

    println!("\nProfessional Practices (70%)");
    if validation.practices_ready() {
        let practices = &evaluation.practices;
        for standard in &practices.standards {
            println!(
                "- {}: {}/{} points | weight {}% | {} / 700 | {}",
                standard.standard.label(),
                standard.earned,
                standard.possible,
                standard.weight,
                standard.weighted_score_700,
                standard.rating.label()
            );
        }
        println!(
            "Score {} / 700 ({:.1}%) | {}",
            practices.score,
            practices.percentage,
            practices.rating.map(|rating| rating.label()).unwrap_or("N/A")
        );
    } else {
        println!(
            "- Pending: weights must total 100% and all {} elements need a level",
            ELEMENT_COUNT
        );
    }

    println!("\nMeasures of Student Learning (30%)");
    if validation.learning_ready() {
        let learning = &evaluation.learning;
        for (index, measure) in learning.measures.iter().enumerate() {
            println!(
                "- Measure {}: weight {}% | {} ({}) | {} / 300",
                index + 1,
                measure.weight,
                measure.rating.label(),
                measure.value,
                measure.weighted_score_300
            );
        }
        println!(
            "Score {} / 300 ({:.1}%) | {}",
            learning.score,
            learning.percentage,
            learning.rating.map(|rating| rating.label()).unwrap_or("N/A")
        );
    } else {
        println!("- Pending: 2 to 5 rated measures whose weights total 30%");
    }

    println!("\nFinal effectiveness rating");
    match &evaluation.final_result {
        Some(final_result) => {
            println!(
                "- {} / 1000 ({:.1}%) | {}",
                final_result.total,
                final_result.percentage,
                final_result
                    .rating
                    .map(|rating| rating.label())
                    .unwrap_or("N/A")
            );
            if final_result.msl_constraint_applied {
                println!(
                    "- Capped at Effective: Measures of Student Learning rated Less Than Expected"
                );
            }
        }
        None => println!("- Complete every step to see the final rating"),
    }

    if let Some(insight) = &report.insight {
        println!("- {}", insight.message);
    }

    if show_breakdown {
        if let Some(breakdown) = &report.breakdown {
            println!("\nCalculation breakdown");
            print!("{}", breakdown.render());
        }
    }
}

pub(crate) fn render_batch(results: &[BatchEvaluation]) {
    println!("Batch scoring: {} evaluations", results.len());
    for result in results {
        let evaluation = &result.evaluation;
        match &evaluation.final_result {
            Some(final_result) => println!(
                "- {}: PP {} + MSL {} = {} / 1000 | {}{}",
                result.evaluation_id,
                evaluation.practices.score,
                evaluation.learning.score,
                final_result.total,
                final_result
                    .rating
                    .map(|rating| rating.label())
                    .unwrap_or("N/A"),
                if final_result.msl_constraint_applied {
                    " (capped)"
                } else {
                    ""
                }
            ),
            None => println!(
                "- {}: incomplete ({})",
                result.evaluation_id,
                missing_steps(result).join(", ")
            ),
        }
    }
}

fn missing_steps(result: &BatchEvaluation) -> Vec<String> {
    let validation = &result.evaluation.validation;
    let mut missing = Vec::new();
    if !validation.pp_weights_valid {
        missing.push(format!("PP weights total {}%", validation.pp_weight_sum));
    }
    if !validation.elements_complete {
        let unrated: Vec<String> = ElementKey::all()
            .filter(|key| result.input.level(*key).is_none())
            .map(|key| key.to_string())
            .collect();
        missing.push(format!("unrated {}", unrated.join(" ")));
    }
    if !validation.measures_valid {
        missing.push(format!(
            "{} measures totalling {}%",
            result.input.measures.len(),
            validation.msl_weight_sum
        ));
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn batch(csv: &str) -> Vec<BatchEvaluation> {
        BatchImporter::from_reader(Cursor::new(csv.as_bytes().to_vec())).expect("batch parses")
    }

    #[test]
    fn missing_steps_name_each_failed_gate() {
        let results = batch(
            "evaluation_id,pp_weight_s1,pp_weight_s2,pp_weight_s3,pp_weight_s4,s1a\n\
             T-9,50,20,20,20,4\n",
        );

        let missing = missing_steps(&results[0]);
        assert_eq!(missing.len(), 3);
        assert_eq!(missing[0], "PP weights total 110%");
        assert!(missing[1].starts_with("unrated s1b s1c s2a"));
        assert_eq!(missing[2], "2 measures totalling 0%");
    }

    #[test]
    fn demo_args_default_to_breakdown() {
        assert!(!DemoArgs::default().skip_breakdown);
    }
}
