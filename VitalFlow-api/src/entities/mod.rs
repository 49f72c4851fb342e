// Public entities for the VitalFlow API
// Request and response bodies that cross the HTTP boundary

// Common entities for error handling
pub mod common;

// Coaching request/response bodies
pub mod wellness;

pub use common::PublicErrorResponse;
pub use wellness::{BpAnalysisRequest, ExerciseRequest, HealthStatusResponse, HealthTipResponse};
