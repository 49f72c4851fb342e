use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    Json,
};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use vital_flow_domain::entities::{ExerciseSuggestion, HealthAnalysis};
use vital_flow_domain::services::exercise::DEFAULT_CONTEXT;

use crate::api::error::ApiError;
use crate::api::routes::WellnessState;
use crate::entities::wellness::READINGS_REQUIRED_MESSAGE;
use crate::entities::{
    BpAnalysisRequest, ExerciseRequest, HealthTipResponse, PublicErrorResponse,
};

/// Resolve the audience for an exercise request.
///
/// A missing body, a body that is not JSON, or a body without a string
/// `context` all mean the default audience.
pub fn exercise_context(body: &[u8]) -> String {
    if body.iter().all(u8::is_ascii_whitespace) {
        return DEFAULT_CONTEXT.to_string();
    }

    match serde_json::from_slice::<ExerciseRequest>(body) {
        Ok(request) => request
            .context
            .unwrap_or_else(|| DEFAULT_CONTEXT.to_string()),
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable exercise request body");
            DEFAULT_CONTEXT.to_string()
        }
    }
}

/// Suggest a desk-friendly micro-exercise
#[utoipa::path(
    post,
    path = "/api/exercise",
    request_body(content = ExerciseRequest, description = "Optional audience for the exercise"),
    responses(
        (status = 200, description = "Exercise suggestion, possibly the built-in fallback", body = ExerciseSuggestion),
        (status = 413, description = "Request body too large", body = PublicErrorResponse)
    ),
    tag = "wellness"
)]
#[instrument(skip_all)]
pub async fn suggest_exercise(
    State(service): State<WellnessState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ExerciseSuggestion>, ApiError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(ApiError::PayloadTooLarge);
        }
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Unreadable exercise request body");
            Bytes::new()
        }
    };

    let context = exercise_context(&body);
    info!(context = %context, "Exercise suggestion requested");

    Ok(Json(service.suggest_exercise(&context).await))
}

/// One short tip about blood pressure or sitting less
#[utoipa::path(
    get,
    path = "/api/health-tip",
    responses(
        (status = 200, description = "Health tip, possibly the built-in fallback", body = HealthTipResponse)
    ),
    tag = "wellness"
)]
#[instrument(skip_all)]
pub async fn get_health_tip(State(service): State<WellnessState>) -> Json<HealthTipResponse> {
    info!("Health tip requested");

    Json(HealthTipResponse {
        tip: service.tip_for_healthy_habits().await,
    })
}

/// Trend and advice for a series of blood pressure readings
#[utoipa::path(
    post,
    path = "/api/bp-analysis",
    request_body = BpAnalysisRequest,
    responses(
        (status = 200, description = "Trend analysis, possibly the built-in fallback", body = HealthAnalysis),
        (status = 400, description = "readings is missing, empty or not an array", body = PublicErrorResponse),
        (status = 413, description = "Request body too large", body = PublicErrorResponse)
    ),
    tag = "wellness"
)]
#[instrument(skip_all)]
pub async fn analyze_blood_pressure(
    State(service): State<WellnessState>,
    payload: Result<Json<BpAnalysisRequest>, JsonRejection>,
) -> Result<Json<HealthAnalysis>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        warn!(error = %rejection.body_text(), "Rejected blood pressure analysis body");
        ApiError::validation(READINGS_REQUIRED_MESSAGE)
    })?;

    if let Err(errors) = request.validate() {
        warn!(error = %errors, "Blood pressure analysis request failed validation");
        return Err(ApiError::validation(READINGS_REQUIRED_MESSAGE));
    }

    info!(count = request.readings.len(), "Blood pressure analysis requested");
    Ok(Json(service.analyze_trend(&request.readings).await))
}
