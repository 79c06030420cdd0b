use std::io::Cursor;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::error::AppError;
use crate::evaluation::{ScoringInput, Worksheet};
use crate::import::BatchImporter;
use crate::report::EvaluationReport;
use crate::rubric::{
    EffectivenessRating, MslRating, PracticeRating, RatingRangeTable, StandardId,
    FINAL_RATING_RANGES, MSL_RATING_RANGES, PP_RATING_RANGES, STANDARD_RATING_RANGES,
};

/// Router builder exposing the scoring endpoints.
pub fn evaluation_router(config: ReportConfig) -> Router {
    Router::new()
        .route("/api/v1/rubric", get(rubric_handler))
        .route("/api/v1/evaluations/score", post(score_handler))
        .route("/api/v1/evaluations/sample", get(sample_handler))
        .route("/api/v1/evaluations/batch", post(batch_handler))
        .with_state(config)
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(flatten)]
    pub input: ScoringInput,
    #[serde(default)]
    pub include_breakdown: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: EvaluationReport,
}

impl ScoreResponse {
    fn new(input: &ScoringInput, include_breakdown: bool) -> Self {
        let evaluation = crate::evaluation::ScoringEngine.evaluate(input);
        let mut report = EvaluationReport::build(input, evaluation);
        if !include_breakdown {
            report.breakdown = None;
        }

        Self {
            evaluated_at: Utc::now(),
            report,
        }
    }
}

pub(crate) async fn score_handler(
    State(config): State<ReportConfig>,
    Json(request): Json<ScoreRequest>,
) -> Json<ScoreResponse> {
    let include_breakdown = request
        .include_breakdown
        .unwrap_or(config.include_breakdown);
    Json(ScoreResponse::new(&request.input, include_breakdown))
}

pub(crate) async fn sample_handler(State(config): State<ReportConfig>) -> Json<ScoreResponse> {
    let worksheet = Worksheet::sample();
    Json(ScoreResponse::new(worksheet.input(), config.include_breakdown))
}

#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub evaluation_id: String,
    pub ready: bool,
    pub pp_score: f64,
    pub msl_score: f64,
    pub total: Option<f64>,
    pub rating: Option<EffectivenessRating>,
}

pub(crate) async fn batch_handler(body: String) -> Result<Json<Vec<BatchSummary>>, AppError> {
    let results = BatchImporter::from_reader(Cursor::new(body.into_bytes()))?;

    let summaries = results
        .into_iter()
        .map(|result| {
            let final_result = result.evaluation.final_result;
            BatchSummary {
                evaluation_id: result.evaluation_id,
                ready: result.evaluation.validation.ready,
                pp_score: result.evaluation.practices.score,
                msl_score: result.evaluation.learning.score,
                total: final_result.map(|result| result.total),
                rating: final_result.and_then(|result| result.rating),
            }
        })
        .collect();

    Ok(Json(summaries))
}

#[derive(Debug, Serialize)]
pub struct StandardView {
    pub id: StandardId,
    pub name: &'static str,
    pub elements: Vec<String>,
    pub possible_points: u32,
    pub breakpoints: [u32; 5],
}

#[derive(Debug, Serialize)]
pub struct BandView<L> {
    pub min: f64,
    pub max: f64,
    pub rating: L,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MslValueView {
    pub rating: MslRating,
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct RubricView {
    pub standards: Vec<StandardView>,
    pub standard_ranges: Vec<BandView<PracticeRating>>,
    pub professional_practices_ranges: Vec<BandView<PracticeRating>>,
    pub learning_ranges: Vec<BandView<MslRating>>,
    pub final_ranges: Vec<BandView<EffectivenessRating>>,
    pub msl_values: Vec<MslValueView>,
}

fn band_views<L: Copy>(
    table: &RatingRangeTable<L>,
    label: fn(L) -> &'static str,
) -> Vec<BandView<L>> {
    table
        .bands()
        .iter()
        .map(|band| BandView {
            min: band.min,
            max: band.max,
            rating: band.label,
            label: label(band.label),
        })
        .collect()
}

pub fn rubric_view() -> RubricView {
    let standards = StandardId::ordered()
        .into_iter()
        .map(|standard| StandardView {
            id: standard,
            name: standard.label(),
            elements: standard.elements().map(|key| key.to_string()).collect(),
            possible_points: standard.possible_points(),
            breakpoints: standard.breakpoints(),
        })
        .collect();

    RubricView {
        standards,
        standard_ranges: band_views(&STANDARD_RATING_RANGES, PracticeRating::label),
        professional_practices_ranges: band_views(&PP_RATING_RANGES, PracticeRating::label),
        learning_ranges: band_views(&MSL_RATING_RANGES, MslRating::label),
        final_ranges: band_views(&FINAL_RATING_RANGES, EffectivenessRating::label),
        msl_values: MslRating::ordered()
            .into_iter()
            .map(|rating| MslValueView {
                rating,
                label: rating.label(),
                value: rating.value(),
            })
            .collect(),
    }
}

pub(crate) async fn rubric_handler() -> Json<RubricView> {
    Json(rubric_view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn json_request(uri: &str, payload: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
            .expect("request builds")
    }

    fn complete_payload() -> Value {
        let levels: serde_json::Map<String, Value> = crate::rubric::ElementKey::all()
            .map(|key| (key.to_string(), json!(4)))
            .collect();
        json!({
            "pp_weights": [25, 25, 25, 25],
            "element_levels": levels,
            "measures": [
                { "weight": 15, "rating": "expected" },
                { "weight": 15, "rating": "more_than_expected" }
            ]
        })
    }

    #[tokio::test]
    async fn score_route_returns_final_rating_for_complete_input() {
        let router = evaluation_router(ReportConfig::default());

        let response = router
            .oneshot(json_request("/api/v1/evaluations/score", &complete_payload()))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["evaluation"]["final"]["total"], 750.0);
        assert_eq!(body["evaluation"]["final"]["rating"], "effective");
        assert_eq!(body["insight"]["points_to_next"], 51);
        assert!(body.get("breakdown").is_some());
        assert!(body.get("evaluated_at").is_some());
    }

    #[tokio::test]
    async fn score_route_masks_final_until_ready() {
        let router = evaluation_router(ReportConfig::default());
        let payload = json!({ "pp_weights": [50, 25, 0, 0] });

        let response = router
            .oneshot(json_request("/api/v1/evaluations/score", &payload))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["evaluation"]["final"], Value::Null);
        assert_eq!(body["evaluation"]["validation"]["pp_weight_sum"], 75.0);
        assert_eq!(
            body["messages"]["pp_weights"]["message"],
            "Total must equal 100% (currently 75.0%)"
        );
        assert!(body.get("breakdown").is_none());
    }

    #[tokio::test]
    async fn score_route_treats_negative_weights_as_zero() {
        let router = evaluation_router(ReportConfig::default());
        let levels: serde_json::Map<String, Value> = crate::rubric::ElementKey::all()
            .map(|key| (key.to_string(), json!(5)))
            .collect();
        let payload = json!({
            "pp_weights": [150, -50, 0, 0],
            "element_levels": levels,
            "measures": [
                { "weight": 45, "rating": "more_than_expected" },
                { "weight": -15, "rating": "expected" }
            ]
        });

        let response = router
            .oneshot(json_request("/api/v1/evaluations/score", &payload))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        let validation = &body["evaluation"]["validation"];
        assert_eq!(validation["pp_weight_sum"], 150.0);
        assert_eq!(validation["msl_weight_sum"], 45.0);
        assert_eq!(validation["ready"], false);
        assert_eq!(body["evaluation"]["final"], Value::Null);
    }

    #[tokio::test]
    async fn breakdown_can_be_switched_off() {
        let router = evaluation_router(ReportConfig {
            include_breakdown: false,
        });

        let response = router
            .oneshot(json_request("/api/v1/evaluations/score", &complete_payload()))
            .await
            .expect("route executes");

        let body = read_json_body(response).await;
        assert!(body.get("breakdown").is_none());
        assert!(body.get("insight").is_some());
    }

    #[tokio::test]
    async fn score_route_rejects_out_of_scale_levels() {
        let router = evaluation_router(ReportConfig::default());
        let payload = json!({ "element_levels": { "s1a": 9 } });

        let response = router
            .oneshot(json_request("/api/v1/evaluations/score", &payload))
            .await
            .expect("route executes");

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn sample_route_scores_sample_worksheet() {
        let Json(body) = sample_handler(State(ReportConfig::default())).await;

        let final_result = body.report.evaluation.final_result.expect("ready");
        assert_eq!(final_result.total, 750.0);
    }

    #[tokio::test]
    async fn rubric_route_lists_standards_and_tables() {
        let router = evaluation_router(ReportConfig::default());

        let response = router
            .oneshot(
                Request::get("/api/v1/rubric")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        let body = read_json_body(response).await;
        assert_eq!(body["standards"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["standards"][2]["breakpoints"], json!([3, 9, 15, 21, 24]));
        assert_eq!(body["professional_practices_ranges"][0]["min"], 657.0);
        assert_eq!(body["final_ranges"][0]["label"], "Highly Effective");
        assert_eq!(body["msl_values"][1]["value"], 1.5);
    }

    #[tokio::test]
    async fn batch_route_summarizes_rows() {
        let header = "evaluation_id,pp_weight_s1,pp_weight_s2,pp_weight_s3,pp_weight_s4,msl_weight_1,msl_rating_1";
        let csv = format!("{header}\nT-1,25,25,25,25,30,expected\n");

        let Json(rows) = batch_handler(csv).await.expect("batch parses");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].evaluation_id, "T-1");
        assert!(!rows[0].ready);
        assert_eq!(rows[0].msl_score, 150.0);
        assert!(rows[0].total.is_none());
    }

    #[tokio::test]
    async fn batch_route_rejects_missing_columns() {
        let err = batch_handler("evaluation_id\nT-1\n".to_string())
            .await
            .expect_err("missing weight columns");

        let response = axum::response::IntoResponse::into_response(err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
