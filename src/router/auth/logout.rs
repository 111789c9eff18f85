//! Revoke a refresh token.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::Result;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[serde(alias = "refreshId")]
    #[validate(length(min = 1, message = "Refresh token is required."))]
    pub refresh_id: String,
}

/// Logout confirmation.
#[derive(Serialize)]
pub struct Response {
    status: &'static str,
}

pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<Json<Response>> {
    state.session.logout(&body.refresh_id).await?;

    Ok(Json(Response {
        status: "logged_out",
    }))
}
