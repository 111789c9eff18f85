//! Health probe for load balancers and uptime checks.

use axum::Json;
use serde::Serialize;

/// Liveness report.
#[derive(Serialize)]
pub struct Health {
    status: &'static str,
}

/// Public server health.
pub async fn status() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;

    use crate::{app, make_request, testing};

    #[tokio::test]
    async fn test_health_is_public() {
        let app = app(testing::state());

        let response = make_request(
            app,
            Method::GET,
            "/api/v1/health",
            None,
            String::default(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
    }
}
