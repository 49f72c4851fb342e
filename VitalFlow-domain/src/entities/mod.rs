// Domain entities and value objects
pub mod analysis;
pub mod blood_pressure;
pub mod exercise;

// Coercion of loosely typed model fields
mod lenient;

// Re-export common types for easier imports
pub use analysis::{AnalysisDraft, HealthAnalysis};
pub use blood_pressure::BloodPressureReading;
pub use exercise::{Difficulty, ExerciseSuggestion, DEFAULT_DURATION_SECONDS};
