//! Login, refresh rotation and password management flows.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use super::{
    AccountDirectory, Credential, CredentialStore, REFRESH_TOKEN_TTL,
    RefreshToken, RefreshTokenStore, STATUS_ACTIVE,
};
use crate::clock::Clock;
use crate::crypto::PasswordManager;
use crate::employee::Employee;
use crate::error::{Result, ServerError};
use crate::token::{ACCESS_TOKEN_TTL, TokenManager};

const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";
const PASSWORD_ALGO: &str = "argon2id";
const WEAK_PASSWORD_MESSAGE: &str =
    "Password must be at least 8 characters with a letter, a digit and a \
     symbol";

/// Credentials returned to a client after a login or a refresh.
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_id: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication flows on top of the account, credential and refresh
/// token stores.
pub struct SessionService {
    accounts: Box<dyn AccountDirectory>,
    credentials: Box<dyn CredentialStore>,
    refresh_tokens: Box<dyn RefreshTokenStore>,
    hasher: Arc<PasswordManager>,
    tokens: TokenManager,
    clock: Box<dyn Clock>,
}

impl SessionService {
    /// Create a new [`SessionService`].
    pub fn new(
        accounts: Box<dyn AccountDirectory>,
        credentials: Box<dyn CredentialStore>,
        refresh_tokens: Box<dyn RefreshTokenStore>,
        hasher: Arc<PasswordManager>,
        tokens: TokenManager,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            credentials,
            refresh_tokens,
            hasher,
            tokens,
            clock,
        }
    }

    /// Check a password and open a session.
    ///
    /// Unknown email, missing credential, locked credential and wrong
    /// password all answer [`ServerError::InvalidCredentials`] so the
    /// response never tells which one it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let employee = self
            .accounts
            .account_by_email(email)
            .await?
            .ok_or(ServerError::InvalidCredentials)?;

        let credential = self
            .credentials
            .find(&employee.id)
            .await?
            .filter(Credential::is_active)
            .ok_or(ServerError::InvalidCredentials)?;

        if !self.hasher.verify(password, &credential.password_hash)? {
            return Err(ServerError::InvalidCredentials);
        }

        if self.hasher.needs_rehash(&credential.password_hash) {
            self.upgrade_hash(&employee.id, password).await;
        }

        let now = self.clock.now_utc();
        let refresh = self.issue_refresh_token(&employee.id, now).await?;

        tracing::info!(employee_id = %employee.id, "login succeeded");

        self.open_session(&employee, refresh.id, now)
    }

    /// Exchange an active refresh token for a new session.
    ///
    /// The fresh row is written before the old one is revoked. Losing
    /// the compare-and-set means a concurrent refresh already rotated
    /// this token, so the extra row is revoked and the caller has to
    /// authenticate again.
    pub async fn refresh(&self, refresh_id: &str) -> Result<Session> {
        let now = self.clock.now_utc();

        let current = self
            .refresh_tokens
            .find(refresh_id)
            .await?
            .filter(|token| token.is_active(now))
            .ok_or(ServerError::Unauthorized(INVALID_REFRESH_TOKEN))?;

        let employee = self
            .accounts
            .account_by_id(&current.employee_id)
            .await?
            .ok_or(ServerError::Unauthorized(INVALID_REFRESH_TOKEN))?;

        let fresh = self.issue_refresh_token(&employee.id, now).await?;

        if !self.refresh_tokens.rotate(&current.id, &fresh.id, now).await? {
            tracing::warn!(
                employee_id = %employee.id,
                "lost refresh rotation race, revoking replacement"
            );
            self.refresh_tokens.revoke(&fresh.id, now).await?;
            return Err(ServerError::Unauthorized(INVALID_REFRESH_TOKEN));
        }

        self.open_session(&employee, fresh.id, now)
    }

    /// Revoke a refresh token. Repeating a logout keeps answering `Ok`,
    /// only an id that never existed is an error.
    pub async fn logout(&self, refresh_id: &str) -> Result<()> {
        if self.refresh_tokens.find(refresh_id).await?.is_none() {
            return Err(ServerError::NotFound("Refresh token not found"));
        }

        self.refresh_tokens
            .revoke(refresh_id, self.clock.now_utc())
            .await?;

        Ok(())
    }

    /// Replace the caller's own password after checking the old one.
    pub async fn change_password(
        &self,
        employee_id: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if old_password.is_empty() {
            errors.add(
                "old_password",
                ValidationError::new("required")
                    .with_message("Old password is required".into()),
            );
        }
        if new_password.is_empty() {
            errors.add(
                "new_password",
                ValidationError::new("required")
                    .with_message("New password is required".into()),
            );
        } else if !strong_password(new_password) {
            errors.add(
                "new_password",
                ValidationError::new("weak_password")
                    .with_message(WEAK_PASSWORD_MESSAGE.into()),
            );
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let Some(credential) = self.credentials.find(employee_id).await?
        else {
            return Err(field_error(
                "old_password",
                "credentials_missing",
                "No password is set for this account",
            )
            .into());
        };

        if !self.hasher.verify(old_password, &credential.password_hash)? {
            return Err(field_error(
                "old_password",
                "invalid_old_password",
                "Old password does not match",
            )
            .into());
        }

        if self.hasher.verify(new_password, &credential.password_hash)? {
            return Err(field_error(
                "new_password",
                "same_as_old",
                "New password must differ from the old one",
            )
            .into());
        }

        self.write_password(employee_id, new_password).await
    }

    /// Set an employee's password without knowing the old one. The
    /// credential comes out active, which also unlocks the account.
    pub async fn set_password(
        &self,
        employee_id: &str,
        password: &str,
    ) -> Result<()> {
        if password.is_empty() {
            return Err(field_error(
                "password",
                "required",
                "Password is required",
            )
            .into());
        }
        if !strong_password(password) {
            return Err(field_error(
                "password",
                "weak_password",
                WEAK_PASSWORD_MESSAGE,
            )
            .into());
        }

        if self.accounts.account_by_id(employee_id).await?.is_none() {
            return Err(ServerError::NotFound("Employee not found"));
        }

        self.write_password(employee_id, password).await
    }

    fn open_session(
        &self,
        employee: &Employee,
        refresh_id: String,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        let access_token =
            self.tokens.create(&employee.id, employee.role, unix(now))?;

        Ok(Session {
            access_token,
            refresh_id,
            expires_in: ACCESS_TOKEN_TTL,
        })
    }

    /// Insert a refresh token row under a random id. Ids are v4 uuids,
    /// a duplicate is retried once.
    async fn issue_refresh_token(
        &self,
        employee_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RefreshToken> {
        for _ in 0..2 {
            let token = RefreshToken {
                id: Uuid::new_v4().to_string(),
                employee_id: employee_id.to_owned(),
                issued_at: now,
                expires_at: now + Duration::seconds(REFRESH_TOKEN_TTL),
                revoked_at: None,
                rotated_to: None,
            };

            match self.refresh_tokens.create(&token).await {
                Ok(()) => return Ok(token),
                Err(ServerError::Conflict(_)) => continue,
                Err(err) => return Err(err),
            }
        }

        Err(ServerError::Internal {
            details: "refresh token id collided twice".to_owned(),
            source: None,
        })
    }

    async fn write_password(
        &self,
        employee_id: &str,
        password: &str,
    ) -> Result<()> {
        let credential = Credential {
            employee_id: employee_id.to_owned(),
            password_hash: self.hasher.hash_password(password)?,
            password_algo: PASSWORD_ALGO.to_owned(),
            status: STATUS_ACTIVE,
            updated_at: self.clock.now_utc(),
        };

        self.credentials.upsert(&credential).await
    }

    /// Recompute a stored hash under the current cost parameters. The
    /// login already succeeded, a failure here only logs.
    async fn upgrade_hash(&self, employee_id: &str, password: &str) {
        if let Err(err) = self.write_password(employee_id, password).await {
            tracing::warn!(employee_id, "password rehash failed: {err}");
        }
    }
}

/// A password needs 8+ bytes, an ascii letter, a digit and a symbol.
fn strong_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

fn field_error(
    field: &'static str,
    code: &'static str,
    message: &'static str,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code).with_message(message.into()));
    errors
}

fn unix(now: DateTime<Utc>) -> u64 {
    now.timestamp().max(0) as u64
}
