//! Submit a vacation request.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::AppState;
use crate::error::Result;
use crate::router::Valid;
use crate::vacation::VacationRequestResource;

fn dates_out_of_order() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(
        "to",
        ValidationError::new("date_order")
            .with_message("from must be <= to".into()),
    );
    errors
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(custom(
        function = "crate::router::validate_uuid",
        message = "Employee must be a valid UUID."
    ))]
    pub employee_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "reason required"))]
    pub reason: String,
}

pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<(StatusCode, Json<VacationRequestResource>)> {
    if body.from > body.to {
        return Err(dates_out_of_order().into());
    }

    let request = state
        .vacations
        .submit(body.employee_id, body.from, body.to, body.reason)
        .await?;

    Ok((StatusCode::CREATED, Json(request.into())))
}
