use crate::rubric::EffectivenessRating;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationMessage {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationMessages {
    pub pp_weights: ValidationMessage,
    pub msl_weights: ValidationMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepProgressEntry {
    pub step: u8,
    pub title: &'static str,
    pub complete: bool,
    pub current: bool,
}

/// Where the final total sits on the 1000-point scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeInsight {
    pub total: f64,
    /// Marker offset along the scale, 0 to 100.
    pub marker_position: f64,
    pub rating: Option<EffectivenessRating>,
    pub rating_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_above_minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_to_next: Option<i64>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSection {
    pub title: String,
    pub lines: Vec<String>,
}

/// Step-by-step arithmetic behind a complete evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationBreakdown {
    pub sections: Vec<BreakdownSection>,
}

impl CalculationBreakdown {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&section.title);
            out.push('\n');
            for line in &section.lines {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}
