use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, warn};

use vital_flow_domain::services::WellnessServiceTrait;

use crate::api::error::ApiError;
use crate::api::handlers::{health, wellness};
use crate::openapi::configure_swagger_routes;

/// Shared coaching service handed to every handler
pub type WellnessState = Arc<dyn WellnessServiceTrait + Send + Sync>;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the application router
pub fn create_app(service: WellnessState, allowed_origins: &[String]) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route("/exercise", post(wellness::suggest_exercise))
        .route("/health-tip", get(wellness::get_health_tip))
        .route("/bp-analysis", post(wellness::analyze_blood_pressure))
        .route("/health", get(health::health_check));

    let app = Router::new().nest("/api", api_routes).with_state(service);
    debug!("API routes nested");

    let app = add_swagger_ui(app);
    debug!("Swagger UI merged");

    apply_middleware(app, allowed_origins)
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}

/// Wrap a router with body limit, panic recovery, tracing and CORS
pub fn apply_middleware(app: Router, allowed_origins: &[String]) -> Router {
    app.layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}

/// Build the CORS policy.
///
/// With no configured origins the request origin is reflected back; otherwise
/// only listed origins receive CORS headers. An unlisted origin is not answered
/// with a 500 `{message}` error: the request is served without CORS headers
/// and the browser withholds the response from the page.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Skipping invalid CORS origin {:?}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "Request handler panicked");

    ApiError::Internal.into_response()
}
