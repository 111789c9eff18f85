//! Handle database requests.

use sqlx::{Pool, Postgres};

use crate::error::{Result, ServerError};
use crate::vacation::{VacationRequest, VacationStatus};

const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Clone)]
pub struct VacationRepository {
    pool: Pool<Postgres>,
}

impl VacationRepository {
    /// Create a new [`VacationRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert [`VacationRequest`] into database.
    pub async fn insert(&self, request: &VacationRequest) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO vacation_requests
                (id, employee_id, submitted_at, from_date, to_date, reason,
                status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(&request.id)
        .bind(&request.employee_id)
        .bind(request.submitted_at)
        .bind(request.from_date)
        .bind(request.to_date)
        .bind(&request.reason)
        .bind(request.status)
        .execute(&self.pool)
        .await
        .map_err(missing_employee)?;

        Ok(())
    }

    /// Find a vacation request using `id` field.
    pub async fn find(&self, id: &str) -> Result<Option<VacationRequest>> {
        let request = sqlx::query_as::<_, VacationRequest>(
            r#"SELECT id, employee_id, submitted_at, from_date, to_date,
                reason, status
                FROM vacation_requests WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// List requests still waiting for a decision, newest first.
    pub async fn list_pending(&self) -> Result<Vec<VacationRequest>> {
        let requests = sqlx::query_as::<_, VacationRequest>(
            r#"SELECT id, employee_id, submitted_at, from_date, to_date,
                reason, status
                FROM vacation_requests WHERE status = $1
                ORDER BY submitted_at DESC"#,
        )
        .bind(VacationStatus::Pending.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// List every request of one employee, newest first.
    pub async fn list_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<VacationRequest>> {
        let requests = sqlx::query_as::<_, VacationRequest>(
            r#"SELECT id, employee_id, submitted_at, from_date, to_date,
                reason, status
                FROM vacation_requests WHERE employee_id = $1
                ORDER BY submitted_at DESC"#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Move a request to a new status.
    pub async fn set_status(&self, id: &str, status: i32) -> Result<()> {
        let result = sqlx::query(
            r#"UPDATE vacation_requests SET status = $2 WHERE id = $1"#,
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServerError::NotFound("Vacation request not found"));
        }

        Ok(())
    }

    /// Delete a request.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result =
            sqlx::query(r#"DELETE FROM vacation_requests WHERE id = $1"#)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(ServerError::NotFound("Vacation request not found"));
        }

        Ok(())
    }
}

fn missing_employee(err: sqlx::Error) -> ServerError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(FOREIGN_KEY_VIOLATION) => {
            ServerError::NotFound("Employee not found")
        },
        _ => err.into(),
    }
}
