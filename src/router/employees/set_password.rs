//! Set the password of an employee without knowing the previous one.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::Result;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[serde(default)]
    pub password: String,
}

/// Change confirmation.
#[derive(Serialize)]
pub struct Response {
    status: &'static str,
}

pub async fn handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Valid(body): Valid<Body>,
) -> Result<Json<Response>> {
    crate::router::ensure_uuid("id", &id)?;

    state.session.set_password(&id, &body.password).await?;

    Ok(Json(Response { status: "ok" }))
}
