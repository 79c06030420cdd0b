//! Presentation-neutral views derived from an evaluation.

mod breakdown;
mod insights;
mod summary;
pub mod views;

pub use breakdown::calculation_breakdown;
pub use insights::range_insight;
pub use summary::{step_progress, validation_messages, EvaluationReport};
