//! database (db) union structure.
use axum::extract::FromRef;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::AppState;
use crate::config;

pub const DEFAULT_CREDENTIALS: &str = "postgres";
pub const DEFAULT_DATABASE_NAME: &str = "timeoff";
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Custom db structure to pass to Axum.
#[derive(Clone)]
pub struct Database {
    pub postgres: PgPool,
}

impl Database {
    /// Open the pool described by the `postgres` configuration section.
    pub async fn connect(
        config: &config::Postgres,
    ) -> Result<Self, sqlx::Error> {
        let username =
            config.username.as_deref().unwrap_or(DEFAULT_CREDENTIALS);
        let password =
            config.password.as_deref().unwrap_or(DEFAULT_CREDENTIALS);
        let database =
            config.database.as_deref().unwrap_or(DEFAULT_DATABASE_NAME);
        let pool_size = config.pool_size.unwrap_or(DEFAULT_POOL_SIZE);

        let addr = format!(
            "postgres://{username}:{password}@{}/{database}",
            config.address
        );
        let postgres = PgPoolOptions::new()
            .max_connections(pool_size)
            .connect(&addr)
            .await?;

        tracing::info!(hostname = %config.address, %database, "postgres connected");

        Ok(Self { postgres })
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Database {
        app_state.db.clone()
    }
}
