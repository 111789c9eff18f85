//! Get an employee.

use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::employee::EmployeeResource;
use crate::error::Result;

pub async fn handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeResource>> {
    crate::router::ensure_uuid("id", &id)?;

    let employee = state.employees.find(&id).await?;

    Ok(Json(employee.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;

    use crate::{app, make_request, testing};

    const MANAGER: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

    #[tokio::test]
    async fn test_get_rejects_malformed_id() {
        let app = app(testing::state());
        let bearer = testing::bearer_for(MANAGER, 100);

        let response = make_request(
            app,
            Method::GET,
            "/api/v1/employees/not-a-uuid",
            Some(&bearer),
            String::default(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["details"]["id"], "invalid_uuid");
    }
}
