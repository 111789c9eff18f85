//! Replace the profile of an employee.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::employee::{Employee, EmployeeResource};
use crate::error::Result;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(length(min = 1, max = 100, message = "Name is required."))]
    pub name: String,
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    #[validate(custom(
        function = "crate::router::validate_employee_code",
        message = "Employee code must be 7 digits."
    ))]
    pub employee_code: String,
    #[validate(custom(
        function = "crate::router::validate_role",
        message = "Role must be a known role."
    ))]
    pub role: i32,
}

pub async fn handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Valid(body): Valid<Body>,
) -> Result<Json<EmployeeResource>> {
    crate::router::ensure_uuid("id", &id)?;

    let employee = state
        .employees
        .update(Employee {
            id,
            name: body.name,
            email: body.email,
            employee_code: body.employee_code,
            role: body.role,
        })
        .await?;

    Ok(Json(employee.into()))
}
