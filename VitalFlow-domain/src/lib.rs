// VitalFlow Domain
// This crate contains the business logic for the VitalFlow wellness gateway

// Provider configuration
pub mod config;

// Domain entities
pub mod entities;

// Upstream LLM provider access
pub mod llm;

// Model output parsing
pub mod parser;

// Services that implement business logic
pub mod services;

// Testing utilities - only available with mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;

pub use config::{ConfigError, LlmConfig};
