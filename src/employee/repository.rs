//! Handle database requests.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::employee::Employee;
use crate::error::{Result, ServerError};
use crate::session::AccountDirectory;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: Pool<Postgres>,
}

impl EmployeeRepository {
    /// Create a new [`EmployeeRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert [`Employee`] into database.
    pub async fn insert(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO employees (id, name, email, employee_code, role)
                VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.employee_code)
        .bind(employee.role)
        .execute(&self.pool)
        .await
        .map_err(conflict_on_duplicate)?;

        Ok(())
    }

    /// List every employee, ordered by name.
    pub async fn all(&self) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"SELECT id, name, email, employee_code, role
                FROM employees ORDER BY name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// Find an employee using `id` field.
    pub async fn find_by_id(
        &self,
        employee_id: &str,
    ) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"SELECT id, name, email, employee_code, role
                FROM employees WHERE id = $1"#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Find an employee using `email` field.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"SELECT id, name, email, employee_code, role
                FROM employees WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Replace every profile field of an employee row.
    pub async fn update(&self, employee: &Employee) -> Result<()> {
        let result = sqlx::query(
            r#"UPDATE employees
                SET name = $1, email = $2, employee_code = $3, role = $4
                WHERE id = $5"#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.employee_code)
        .bind(employee.role)
        .bind(&employee.id)
        .execute(&self.pool)
        .await
        .map_err(conflict_on_duplicate)?;

        if result.rows_affected() == 0 {
            return Err(ServerError::NotFound("Employee not found"));
        }

        Ok(())
    }

    /// Delete an employee together with their vacation requests.
    ///
    /// Credentials and refresh tokens are removed by `ON DELETE CASCADE`;
    /// vacation requests hold a `RESTRICT` reference and go first.
    pub async fn delete(&self, employee_id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(r#"DELETE FROM vacation_requests WHERE employee_id = $1"#)
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(r#"DELETE FROM employees WHERE id = $1"#)
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(ServerError::NotFound("Employee not found"));
        }

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl AccountDirectory for EmployeeRepository {
    async fn account_by_email(&self, email: &str) -> Result<Option<Employee>> {
        self.find_by_email(email).await
    }

    async fn account_by_id(&self, id: &str) -> Result<Option<Employee>> {
        self.find_by_id(id).await
    }
}

fn conflict_on_duplicate(err: sqlx::Error) -> ServerError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => {
            ServerError::Conflict("Email or employee_code already exists")
        },
        _ => err.into(),
    }
}
