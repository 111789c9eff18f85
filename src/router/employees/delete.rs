//! Remove an employee and every request they submitted.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use crate::AppState;
use crate::error::Result;

/// Deletion confirmation.
#[derive(Serialize)]
pub struct Response {
    status: &'static str,
}

pub async fn handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Response>> {
    crate::router::ensure_uuid("id", &id)?;

    state.employees.delete(&id).await?;

    Ok(Json(Response { status: "ok" }))
}
