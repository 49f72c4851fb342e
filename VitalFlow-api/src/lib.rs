// VitalFlow-api lib.rs
//
// HTTP surface of the VitalFlow wellness gateway.
// Exposes the router factory, request/response entities and OpenAPI docs.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;

pub use config::AppConfig;
