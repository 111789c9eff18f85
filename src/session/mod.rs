mod repository;
mod service;

pub use repository::*;
pub use service::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::employee::Employee;
use crate::error::Result;

/// Credential row state allowing logins.
pub const STATUS_ACTIVE: i32 = 1;

/// Refresh token lifetime in seconds, 30 days.
pub const REFRESH_TOKEN_TTL: i64 = 2_592_000;

/// Password credential attached to an employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Credential {
    pub employee_id: String,
    #[serde(skip)]
    pub password_hash: String,
    pub password_algo: String,
    pub status: i32,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

/// Refresh token as saved on database.
///
/// Rows never change `issued_at`, `expires_at` or `employee_id` after
/// creation. `revoked_at` and `rotated_to` transition from null to set
/// exactly once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: String,
    pub employee_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub rotated_to: Option<String>,
}

impl RefreshToken {
    /// A token is active while unrevoked and unexpired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// Lookup of employee accounts during authentication flows.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn account_by_email(&self, email: &str) -> Result<Option<Employee>>;
    async fn account_by_id(&self, id: &str) -> Result<Option<Employee>>;
}

/// Storage of password credentials, one row per employee.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find(&self, employee_id: &str) -> Result<Option<Credential>>;
    async fn upsert(&self, credential: &Credential) -> Result<()>;
}

/// Append-mostly ledger of refresh tokens.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<RefreshToken>>;

    /// Insert a new row. Fails with `Conflict` when the id is taken.
    async fn create(&self, token: &RefreshToken) -> Result<()>;

    /// Revoke `old_id` and link it to `new_id` in a single conditional
    /// update. Returns `false` when the row was already revoked, which
    /// means a concurrent rotation won.
    async fn rotate(
        &self,
        old_id: &str,
        new_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool>;

    /// Revoke a token. Returns `false` when it was already revoked.
    async fn revoke(&self, id: &str, now: DateTime<Utc>) -> Result<bool>;
}
