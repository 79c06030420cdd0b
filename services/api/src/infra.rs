use metrics_exporter_prometheus::PrometheusHandle;
use randa_scoring::error::AppError;
use randa_scoring::evaluation::ScoringInput;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reads a JSON evaluation input from disk.
pub(crate) fn load_scoring_input(path: &Path) -> Result<ScoringInput, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_scoring_input(&raw)
}

pub(crate) fn parse_scoring_input(raw: &str) -> Result<ScoringInput, AppError> {
    Ok(serde_json::from_str(raw)?)
}
