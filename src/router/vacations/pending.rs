//! List every pending vacation request.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::Result;
use crate::vacation::VacationRequestResource;

pub async fn handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<VacationRequestResource>>> {
    let requests = state.vacations.pending().await?;

    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    use crate::{app, make_request, testing};

    const EMPLOYEE: &str = "1f0f5b0a-937f-4b43-b9a1-6e2f5f3a9c11";

    #[tokio::test]
    async fn test_pending_is_manager_only() {
        let app = app(testing::state());
        let bearer = testing::bearer_for(EMPLOYEE, 1);

        let response = make_request(
            app,
            Method::GET,
            "/api/v1/vacations/pending",
            Some(&bearer),
            String::default(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["allowed"], json!([100]));
    }
}
