//! Withdraw an own pending vacation request.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Serialize;

use crate::AppState;
use crate::error::Result;
use crate::middleware::AuthContext;

/// Deletion confirmation.
#[derive(Serialize)]
pub struct Response {
    status: &'static str,
}

pub async fn handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<Response>> {
    crate::router::ensure_uuid("id", &id)?;

    state.vacations.delete_own(&id, &context.employee_id).await?;

    Ok(Json(Response { status: "ok" }))
}
