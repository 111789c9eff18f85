//! Register an employee.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::employee::{EmployeeResource, Role};
use crate::error::Result;
use crate::router::Valid;

fn default_role() -> i32 {
    Role::Employee.value()
}

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
    #[serde(default = "default_role")]
    #[validate(custom(
        function = "crate::router::validate_role",
        message = "Role must be a known role."
    ))]
    pub role: i32,
}

pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<(StatusCode, Json<EmployeeResource>)> {
    let employee = state
        .employees
        .create(body.name, body.email, body.employee_code, body.role)
        .await?;

    Ok((StatusCode::CREATED, Json(employee.into())))
}
