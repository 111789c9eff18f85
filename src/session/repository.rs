//! Handle database requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::error::{Result, ServerError};
use crate::session::{
    Credential, CredentialStore, RefreshToken, RefreshTokenStore,
};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct CredentialRepository {
    pool: Pool<Postgres>,
}

impl CredentialRepository {
    /// Create a new [`CredentialRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for CredentialRepository {
    async fn find(&self, employee_id: &str) -> Result<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"SELECT employee_id, password_hash, password_algo, status, updated_at
                FROM employee_credentials WHERE employee_id = $1"#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn upsert(&self, credential: &Credential) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO employee_credentials
                (employee_id, password_hash, password_algo, status, updated_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (employee_id) DO UPDATE SET
                    password_hash = EXCLUDED.password_hash,
                    password_algo = EXCLUDED.password_algo,
                    status = EXCLUDED.status,
                    updated_at = EXCLUDED.updated_at"#,
        )
        .bind(&credential.employee_id)
        .bind(&credential.password_hash)
        .bind(&credential.password_algo)
        .bind(credential.status)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(Clone)]
pub struct RefreshTokenRepository {
    pool: Pool<Postgres>,
}

impl RefreshTokenRepository {
    /// Create a new [`RefreshTokenRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn find(&self, id: &str) -> Result<Option<RefreshToken>> {
        // No activity filter here. Logout needs to see revoked rows to
        // distinguish "never existed" from "already revoked".
        let token = sqlx::query_as::<_, RefreshToken>(
            r#"SELECT id, employee_id, issued_at, expires_at, revoked_at, rotated_to
                FROM refresh_tokens WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }

    async fn create(&self, token: &RefreshToken) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO refresh_tokens
                (id, employee_id, issued_at, expires_at, revoked_at, rotated_to)
                VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(&token.id)
        .bind(&token.employee_id)
        .bind(token.issued_at)
        .bind(token.expires_at)
        .bind(token.revoked_at)
        .bind(&token.rotated_to)
        .execute(&self.pool)
        .await
        .map_err(conflict_on_duplicate)?;

        Ok(())
    }

    async fn rotate(
        &self,
        old_id: &str,
        new_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        // Compare-and-set on `revoked_at IS NULL`. Two racing rotations
        // of the same token leave exactly one winner.
        let result = sqlx::query(
            r#"UPDATE refresh_tokens SET revoked_at = $3, rotated_to = $2
                WHERE id = $1 AND revoked_at IS NULL"#,
        )
        .bind(old_id)
        .bind(new_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke(&self, id: &str, now: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query(
            r#"UPDATE refresh_tokens SET revoked_at = $2
                WHERE id = $1 AND revoked_at IS NULL"#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

fn conflict_on_duplicate(err: sqlx::Error) -> ServerError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => {
            ServerError::Conflict("Refresh token id already exists")
        },
        _ => err.into(),
    }
}
