//! List every registered employee.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::employee::EmployeeResource;
use crate::error::Result;

pub async fn handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeResource>>> {
    let employees = state.employees.all().await?;

    Ok(Json(employees.into_iter().map(Into::into).collect()))
}
