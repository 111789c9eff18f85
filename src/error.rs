//! Error handler for the API.
//!
//! Every failure leaving a handler is rendered as the same envelope:
//! `{"error": {"code", "message", "details"?, "allowed"?}}`.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sqlx::Error as SQLxError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::employee::Role;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Enum representing server-side errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("validation error occurred")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Axum(#[from] JsonRejection),

    #[error("SQL request failed: {0}")]
    Sql(#[from] SQLxError),

    #[error("JWT key or signature failure: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing failed: {0}")]
    Crypto(#[from] crate::crypto::CryptoError),

    /// Wrong email, wrong password or inactive credential. Always the
    /// same answer so accounts cannot be enumerated.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(&'static str),

    /// Authenticated role is not in the route's allow-list.
    #[error("access denied for role {role}")]
    AccessDenied {
        role: i32,
        allowed: &'static [Role],
    },

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("internal server error, {details}")]
    Internal {
        details: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Builder for the error envelope.
#[derive(Debug, Serialize)]
pub struct ResponseError {
    #[serde(skip)]
    status: StatusCode,
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed: Option<Vec<i32>>,
}

impl ResponseError {
    /// Update error status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Update `code` field.
    pub fn code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    /// Update `message` field.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Flatten validation errors into the `details` map.
    pub fn details(mut self, errors: &ValidationErrors) -> Self {
        self.details = Some(parse_validation_errors(errors));
        self
    }

    /// Add the permitted role ordinals to the payload.
    pub fn allowed(mut self, roles: &[Role]) -> Self {
        self.allowed = Some(roles.iter().map(|role| role.value()).collect());
        self
    }

    /// Transform [`ResponseError`] into axum [`Response`].
    pub fn into_response(
        self,
    ) -> std::result::Result<Response, axum::http::Error> {
        if let Ok(body) =
            serde_json::to_string(&serde_json::json!({ "error": self }))
        {
            Response::builder()
                .status(self.status)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
        } else {
            Ok(internal_server_error())
        }
    }
}

impl Default for ResponseError {
    fn default() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL",
            message: "Unexpected server error".to_owned(),
            details: None,
            allowed: None,
        }
    }
}

fn parse_validation_errors(
    errors: &ValidationErrors,
) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, issues)| {
            issues
                .first()
                .map(|issue| (field.to_string(), issue.code.to_string()))
        })
        .collect()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let response = match &self {
            ServerError::Validation(errors) => ResponseError::default()
                .status(StatusCode::UNPROCESSABLE_ENTITY)
                .code("VALIDATION_ERROR")
                .message("Validation failed")
                .details(errors),

            ServerError::Axum(_) => ResponseError::default()
                .status(StatusCode::UNPROCESSABLE_ENTITY)
                .code("VALIDATION_ERROR")
                .message("Invalid JSON payload"),

            ServerError::InvalidCredentials => ResponseError::default()
                .status(StatusCode::UNAUTHORIZED)
                .code("UNAUTHORIZED")
                .message("Invalid credentials"),

            ServerError::Unauthorized(message) => ResponseError::default()
                .status(StatusCode::UNAUTHORIZED)
                .code("UNAUTHORIZED")
                .message(*message),

            ServerError::AccessDenied { role, allowed } => {
                ResponseError::default()
                    .status(StatusCode::FORBIDDEN)
                    .code("FORBIDDEN")
                    .message(format!("Access denied for role {role}"))
                    .allowed(allowed)
            },

            ServerError::Forbidden(message) => ResponseError::default()
                .status(StatusCode::FORBIDDEN)
                .code("FORBIDDEN")
                .message(*message),

            ServerError::NotFound(message) => ResponseError::default()
                .status(StatusCode::NOT_FOUND)
                .code("NOT_FOUND")
                .message(*message),

            ServerError::Conflict(message) => ResponseError::default()
                .status(StatusCode::CONFLICT)
                .code("CONFLICT")
                .message(*message),

            ServerError::Sql(err) => {
                tracing::error!(error = %err, "database request failed");
                ResponseError::default()
            },

            ServerError::Jwt(err) => {
                tracing::error!(error = %err, "token signing failed");
                ResponseError::default()
            },

            ServerError::Crypto(err) => {
                tracing::error!(error = %err, "password hashing failed");
                ResponseError::default()
            },

            ServerError::Internal { details, source } => {
                tracing::error!(
                    source = ?source,
                    %details,
                    "server returned 500 status"
                );
                ResponseError::default()
            },
        };

        response
            .into_response()
            .unwrap_or_else(|_| internal_server_error())
    }
}

fn internal_server_error() -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(
            serde_json::json!({
                "error": {
                    "code": "INTERNAL",
                    "message": "Unexpected server error",
                },
            })
            .to_string()
            .into(),
        )
        .unwrap_or_else(|_| Response::new("Internal server error".into()))
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use validator::ValidationError;

    use super::*;

    async fn body_json(error: ServerError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_envelope() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "new_password",
            ValidationError::new("weak_password")
                .with_message("Password is too weak.".into()),
        );

        let (status, body) = body_json(errors.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["details"]["new_password"],
            "weak_password"
        );
    }

    #[tokio::test]
    async fn test_access_denied_envelope() {
        let (status, body) = body_json(ServerError::AccessDenied {
            role: 1,
            allowed: &[Role::Manager],
        })
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");
        assert_eq!(body["error"]["message"], "Access denied for role 1");
        assert_eq!(body["error"]["allowed"], serde_json::json!([100]));
    }

    #[tokio::test]
    async fn test_invalid_credentials_matches_unauthorized_shape() {
        let (status, body) = body_json(ServerError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(body["error"]["message"], "Invalid credentials");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let (status, body) = body_json(ServerError::Internal {
            details: "refresh id collided twice".into(),
            source: None,
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL");
        assert_eq!(body["error"]["message"], "Unexpected server error");
    }
}
