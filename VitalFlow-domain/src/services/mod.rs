pub mod exercise;
pub mod health_tip;
pub mod trend;
pub mod wellness;

// Domain services
// Each capability builds its prompt, calls the provider, parses the reply
// and substitutes a static fallback on any failure.

// Re-export service traits and factory functions
pub use exercise::suggest_exercise;
pub use health_tip::tip_for_healthy_habits;
pub use trend::analyze_trend;
pub use wellness::{create_default_wellness_service, WellnessService, WellnessServiceTrait};

// Re-export mock service factory functions when the mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use wellness::create_mock_wellness_service;
