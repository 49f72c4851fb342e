pub mod error;
pub mod handlers;
pub mod routes;

#[cfg(test)]
mod routes_tests;

use std::sync::Arc;

use axum::Router;
use vital_flow_domain::llm::UpstreamError;
use vital_flow_domain::services::create_default_wellness_service;

use crate::config::AppConfig;

pub use error::ApiError;
pub use routes::{create_app, WellnessState};

/// Create the application router backed by the DashScope provider
pub fn create_application(config: &AppConfig) -> Result<Router, UpstreamError> {
    let service = create_default_wellness_service(config.llm.clone())?;
    Ok(create_app(Arc::new(service), &config.allowed_origins))
}
