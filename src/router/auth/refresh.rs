//! Rotate a refresh token into a new session.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::Result;
use crate::router::Valid;
use crate::session::Session;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[serde(alias = "refreshId")]
    #[validate(length(min = 1, message = "Refresh token is required."))]
    pub refresh_id: String,
}

pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<Json<Session>> {
    let session = state.session.refresh(&body.refresh_id).await?;

    Ok(Json(session))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_body_accepts_camel_case_alias() {
        let body: Body =
            serde_json::from_value(json!({ "refreshId": "abc" })).unwrap();
        assert_eq!(body.refresh_id, "abc");

        let body: Body =
            serde_json::from_value(json!({ "refresh_id": "def" })).unwrap();
        assert_eq!(body.refresh_id, "def");
    }
}
