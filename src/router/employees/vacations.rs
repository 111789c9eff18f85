//! List the vacation requests of one employee.

use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Result;
use crate::vacation::VacationRequestResource;

pub async fn handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<VacationRequestResource>>> {
    crate::router::ensure_uuid("employee_id", &id)?;

    let requests = state.vacations.for_employee(&id).await?;

    Ok(Json(requests.into_iter().map(Into::into).collect()))
}
