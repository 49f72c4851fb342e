#[cfg(test)]
mod api_routes_tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use vital_flow_domain::entities::{BloodPressureReading, ExerciseSuggestion, HealthAnalysis};
    use vital_flow_domain::services::{create_mock_wellness_service, WellnessServiceTrait};
    use vital_flow_domain::testing::MockLlmClient;

    use crate::api::routes::{create_app, MAX_BODY_BYTES};

    struct PanickingService;

    #[async_trait]
    impl WellnessServiceTrait for PanickingService {
        async fn suggest_exercise(&self, _context: &str) -> ExerciseSuggestion {
            panic!("exercise exploded")
        }

        async fn tip_for_healthy_habits(&self) -> String {
            panic!("tip exploded")
        }

        async fn analyze_trend(&self, _readings: &[BloodPressureReading]) -> HealthAnalysis {
            panic!("analysis exploded")
        }
    }

    fn mock_app(allowed_origins: &[String]) -> Router {
        create_app(
            Arc::new(create_mock_wellness_service(MockLlmClient::new())),
            allowed_origins,
        )
    }

    fn get(uri: &str, origin: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = mock_app(&[]).oneshot(get("/api/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = mock_app(&[]).oneshot(get("/api/unknown", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = mock_app(&[])
            .oneshot(get("/api-docs/openapi.json", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let doc: Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"]["/api/bp-analysis"].is_object());
    }

    #[tokio::test]
    async fn test_cors_reflects_any_origin_when_unconfigured() {
        let response = mock_app(&[])
            .oneshot(get("/api/health", Some("https://anywhere.example")))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://anywhere.example"
        );
    }

    #[tokio::test]
    async fn test_cors_allow_list() {
        let allowed = vec!["https://app.example".to_string()];

        let response = mock_app(&allowed)
            .oneshot(get("/api/health", Some("https://app.example")))
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example"
        );

        let response = mock_app(&allowed)
            .oneshot(get("/api/health", Some("https://evil.example")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/bp-analysis")
            .header(header::ORIGIN, "https://app.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = mock_app(&[]).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let methods = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_internal_error() {
        let app = create_app(Arc::new(PanickingService), &[]);

        let response = app.oneshot(get("/api/health-tip", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "message": "服务器内部错误" }));
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let padding = "x".repeat(MAX_BODY_BYTES + 1);
        let body = json!({ "readings": [], "padding": padding }).to_string();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/bp-analysis")
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(body))
            .unwrap();

        let response = mock_app(&[]).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "message": "请求体过大" }));
    }

    #[tokio::test]
    async fn test_oversized_exercise_body_is_json_error() {
        let body = json!({ "context": "x".repeat(MAX_BODY_BYTES + 1) }).to_string();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/exercise")
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(body))
            .unwrap();

        let response = mock_app(&[]).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "message": "请求体过大" }));
    }
}
