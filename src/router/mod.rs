//! HTTP API surface.

pub mod auth;
pub mod employees;
mod status;
pub mod vacations;

use std::sync::LazyLock;

use axum::extract::{FromRequest, Request};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use regex_lite::Regex;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::employee::Role;
use crate::{AppState, ServerError};

static EMPLOYEE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7}$").unwrap());

/// JSON body checked with `validator` before it reaches the handler.
pub struct Valid<T>(pub T);

impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ServerError;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;

        Ok(Self(value))
    }
}

fn validate_employee_code(code: &str) -> Result<(), ValidationError> {
    if !EMPLOYEE_CODE.is_match(code) {
        return Err(ValidationError::new("invalid_employee_code"));
    }

    Ok(())
}

fn validate_uuid(id: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(id).is_err() {
        return Err(ValidationError::new("invalid_uuid"));
    }

    Ok(())
}

fn validate_role(role: i32) -> Result<(), ValidationError> {
    if Role::from_value(role).is_none() {
        return Err(ValidationError::new("invalid_role"));
    }

    Ok(())
}

/// Reject malformed UUIDs taken from path parameters.
fn ensure_uuid(field: &'static str, id: &str) -> Result<(), ServerError> {
    if Uuid::parse_str(id).is_ok() {
        return Ok(());
    }

    let mut errors = ValidationErrors::new();
    errors.add(
        field,
        ValidationError::new("invalid_uuid")
            .with_message("Identifier must be a valid UUID.".into()),
    );

    Err(errors.into())
}

pub fn router() -> Router<AppState> {
    Router::new()
        // `GET /health` goes to `status`.
        .route("/health", get(status::status))
        // `POST /auth/login` goes to `login`.
        .route("/auth/login", post(auth::login::handler))
        // `POST /auth/refresh` goes to `refresh`. Authorization required.
        .route("/auth/refresh", post(auth::refresh::handler))
        // `POST /auth/logout` goes to `logout`. Authorization required.
        .route("/auth/logout", post(auth::logout::handler))
        // `POST /auth/password` goes to `password`. Authorization required.
        .route("/auth/password", post(auth::password::handler))
        // Employee directory. Managers only.
        .route(
            "/employees",
            get(employees::list::handler).post(employees::create::handler),
        )
        .route(
            "/employees/{id}",
            get(employees::get::handler)
                .put(employees::update::handler)
                .delete(employees::delete::handler),
        )
        .route(
            "/employees/{id}/password",
            post(employees::set_password::handler),
        )
        .route(
            "/employees/{id}/vacations",
            get(employees::vacations::handler),
        )
        // Vacation requests.
        .route("/vacations", post(vacations::submit::handler))
        .route("/vacations/pending", get(vacations::pending::handler))
        .route("/vacations/{id}/approve", post(vacations::approve::handler))
        .route("/vacations/{id}/reject", post(vacations::reject::handler))
        .route("/vacations/{id}", delete(vacations::delete::handler))
}
