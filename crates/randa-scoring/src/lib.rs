//! Scoring engine for 70:30 educator effectiveness evaluations.
//!
//! Professional Practices (70%, scored out of 700) and Measures of Student Learning
//! (30%, scored out of 300) are combined into a final 1000-point effectiveness score.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod import;
pub mod report;
pub mod router;
pub mod rubric;
pub mod telemetry;
