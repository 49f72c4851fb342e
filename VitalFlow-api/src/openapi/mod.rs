use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Coaching endpoints
        crate::api::handlers::wellness::suggest_exercise,
        crate::api::handlers::wellness::get_health_tip,
        crate::api::handlers::wellness::analyze_blood_pressure
    ),
    components(
        schemas(
            // Entities
            crate::entities::common::PublicErrorResponse,
            crate::entities::wellness::ExerciseRequest,
            crate::entities::wellness::HealthTipResponse,
            crate::entities::wellness::BpAnalysisRequest,
            crate::entities::wellness::HealthStatusResponse,

            // Domain entities
            vital_flow_domain::entities::ExerciseSuggestion,
            vital_flow_domain::entities::Difficulty,
            vital_flow_domain::entities::HealthAnalysis,
            vital_flow_domain::entities::BloodPressureReading
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "wellness", description = "LLM-backed exercise, tip and blood pressure coaching")
    ),
    info(
        title = "VitalFlow API",
        version = "0.1.0",
        description = "Wellness coaching gateway in front of the Qwen models",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "VitalFlow API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "health"));
        assert!(tags.iter().any(|tag| tag.name == "wellness"));

        for path in ["/api/health", "/api/exercise", "/api/health-tip", "/api/bp-analysis"] {
            assert!(openapi.paths.paths.contains_key(path), "missing path {}", path);
        }
    }

    #[test]
    fn test_schemas_registered() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().unwrap().schemas;

        for name in ["ExerciseSuggestion", "Difficulty", "HealthAnalysis", "BpAnalysisRequest"] {
            assert!(schemas.contains_key(name), "missing schema {}", name);
        }
    }
}
