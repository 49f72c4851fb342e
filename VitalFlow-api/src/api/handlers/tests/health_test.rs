#[cfg(test)]
mod health_tests {
    use axum::response::IntoResponse;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    use crate::api::handlers::health::health_check;
    use crate::entities::HealthStatusResponse;

    #[tokio::test]
    async fn test_health_check_response() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let health: HealthStatusResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
