use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use vital_flow_domain::entities::BloodPressureReading;

/// Message returned when `readings` is missing, empty or not an array
pub const READINGS_REQUIRED_MESSAGE: &str = "readings 字段必须是非空数组";

/// Body accepted by `POST /api/exercise`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ExerciseRequest {
    /// Who the exercise is for, e.g. "office worker"
    #[serde(default)]
    pub context: Option<String>,
}

/// Response of `GET /api/health-tip`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthTipResponse {
    /// One short tip, never empty
    pub tip: String,
}

/// Body accepted by `POST /api/bp-analysis`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BpAnalysisRequest {
    /// Readings to analyze, in any order
    #[serde(default)]
    #[validate(length(min = 1, message = "readings 字段必须是非空数组"))]
    pub readings: Vec<BloodPressureReading>,
}

/// Response of `GET /api/health`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatusResponse {
    /// Always "ok" while the process is serving
    pub status: String,

    /// Application version from the Cargo manifest
    pub version: String,
}

impl HealthStatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
