use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use validator::{Validate, ValidationError};

use crate::error::PipelineError;
use crate::pipeline::assessment::{extract_pros_cons, leading_score};
use crate::pipeline::Pipeline;
use crate::records::{AnalysisOutcome, CanonicalRecord, PipelineResult, RecordKind};

/// Upper bound on requests in flight; each one can hold up to six outbound calls.
const MAX_CONCURRENT_REQUESTS: usize = 32;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    model: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MainRequest {
    #[serde(alias = "code")]
    #[validate(length(min = 1, max = 64), custom = "not_blank")]
    input: String,
}

fn not_blank(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct MainResponse {
    pub product_title: String,
    pub record_kind: RecordKind,
    /// Canonical record text, whichever source produced it.
    pub nutrition_info: String,
    pub record: CanonicalRecord,
    pub analysis: Option<String>,
    pub rating: Option<String>,
    pub rating_score: Option<f32>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub analysis_failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
}

impl From<PipelineResult> for MainResponse {
    fn from(result: PipelineResult) -> Self {
        let record_kind = result.record.kind();
        let (analysis, rating, analysis_error) = match result.analysis {
            AnalysisOutcome::Completed(done) => (Some(done.assessment_text), Some(done.rating_text), None),
            AnalysisOutcome::Failed { reason } => (None, None, Some(reason)),
        };
        let pros_cons = analysis.as_deref().map(extract_pros_cons).unwrap_or_default();

        Self {
            product_title: result.product_title,
            record_kind,
            nutrition_info: result.canonical_record_text,
            record: result.record,
            rating_score: rating.as_deref().and_then(leading_score),
            analysis_failed: analysis_error.is_some(),
            analysis,
            rating,
            pros: pros_cons.pros,
            cons: pros_cons.cons,
            analysis_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lookup: Option<&'static str>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ErrorBody {
                error: "invalid_request",
                message: message.into(),
                lookup: None,
            },
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let (status, lookup) = match &err {
            PipelineError::NotFound(lookup) => (StatusCode::NOT_FOUND, Some(lookup.as_str())),
            PipelineError::Upstream { .. } | PipelineError::Analysis(_) => (StatusCode::BAD_GATEWAY, None),
        };
        Self {
            status,
            body: ErrorBody {
                error: err.kind(),
                message: err.to_string(),
                lookup,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Create and configure the API router
pub fn create_api(pipeline: Arc<Pipeline>, model: String) -> Router {
    let state = AppState { pipeline, model };

    // The mobile client calls from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/main", post(main_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .with_state(state)
}

async fn main_handler(
    State(state): State<AppState>,
    payload: Result<Json<MainRequest>, JsonRejection>,
) -> Result<Json<MainResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::invalid(e.body_text()))?;
    request.validate().map_err(|e| ApiError::invalid(e.to_string()))?;

    info!(code = %request.input, "looking up product code");
    match state.pipeline.run(&request.input).await {
        Ok(result) => Ok(Json(MainResponse::from(result))),
        Err(err) => {
            if !matches!(err, PipelineError::NotFound(_)) {
                error!(error = %err, "lookup failed");
            }
            Err(ApiError::from(err))
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model: String,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.model.clone(),
    })
}
