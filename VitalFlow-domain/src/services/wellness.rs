use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::entities::{BloodPressureReading, ExerciseSuggestion, HealthAnalysis};
use crate::llm::{DashScopeClient, LlmClient, UpstreamError};
use crate::services::{exercise, health_tip, trend};

/// Trait for the coaching capabilities exposed to the HTTP layer.
///
/// Every method returns a fully populated value; upstream failures are
/// replaced by static fallbacks inside the service.
#[async_trait]
pub trait WellnessServiceTrait {
    /// Suggest a desk-friendly micro-exercise for the given audience
    async fn suggest_exercise(&self, context: &str) -> ExerciseSuggestion;

    /// One short tip about blood pressure or sedentary behaviour
    async fn tip_for_healthy_habits(&self) -> String;

    /// Trend and advice for a series of blood pressure readings
    async fn analyze_trend(&self, readings: &[BloodPressureReading]) -> HealthAnalysis;
}

/// Wellness service for domain logic
pub struct WellnessService<L: LlmClient> {
    llm: L,
}

impl<L: LlmClient> WellnessService<L> {
    /// Create a new wellness service
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    pub fn llm(&self) -> &L {
        &self.llm
    }
}

#[async_trait]
impl<L: LlmClient> WellnessServiceTrait for WellnessService<L> {
    async fn suggest_exercise(&self, context: &str) -> ExerciseSuggestion {
        exercise::suggest_exercise(&self.llm, context).await
    }

    async fn tip_for_healthy_habits(&self) -> String {
        health_tip::tip_for_healthy_habits(&self.llm).await
    }

    async fn analyze_trend(&self, readings: &[BloodPressureReading]) -> HealthAnalysis {
        trend::analyze_trend(&self.llm, readings).await
    }
}

/// Create the production wellness service backed by DashScope
pub fn create_default_wellness_service(
    config: LlmConfig,
) -> Result<impl WellnessServiceTrait + Send + Sync, UpstreamError> {
    let client = DashScopeClient::new(config)?;
    Ok(WellnessService::new(client))
}

/// Create a wellness service over the scripted mock client
#[cfg(any(test, feature = "mock"))]
pub fn create_mock_wellness_service(
    llm: crate::testing::MockLlmClient,
) -> WellnessService<crate::testing::MockLlmClient> {
    WellnessService::new(llm)
}
