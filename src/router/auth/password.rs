//! Change the password of the connected employee.

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::Result;
use crate::middleware::AuthContext;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Change confirmation.
#[derive(Serialize)]
pub struct Response {
    status: &'static str,
}

pub async fn handler(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Valid(body): Valid<Body>,
) -> Result<Json<Response>> {
    state
        .session
        .change_password(
            &context.employee_id,
            &body.old_password,
            &body.new_password,
        )
        .await?;

    Ok(Json(Response { status: "ok" }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    use super::*;
    use crate::{app, make_request, testing};

    const EMPLOYEE: &str = "1f0f5b0a-937f-4b43-b9a1-6e2f5f3a9c11";

    #[tokio::test]
    async fn test_change_password_requires_fields() {
        let app = app(testing::state());
        let bearer = testing::bearer_for(EMPLOYEE, 1);

        let response = make_request(
            app,
            Method::POST,
            "/api/v1/auth/password",
            Some(&bearer),
            json!({}).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["details"]["old_password"], "required");
        assert_eq!(body["error"]["details"]["new_password"], "required");
    }

    #[tokio::test]
    async fn test_change_password_rejects_weak_password() {
        let app = app(testing::state());
        let bearer = testing::bearer_for(EMPLOYEE, 1);

        let req_body = Body {
            old_password: "Old@12345".into(),
            new_password: "password1".into(),
        };
        let response = make_request(
            app,
            Method::POST,
            "/api/v1/auth/password",
            Some(&bearer),
            json!(req_body).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["details"]["new_password"], "weak_password");
    }

    #[tokio::test]
    async fn test_change_password_requires_bearer() {
        let app = app(testing::state());

        let response = make_request(
            app,
            Method::POST,
            "/api/v1/auth/password",
            None,
            json!({}).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}
