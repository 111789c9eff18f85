use uuid::Uuid;

use crate::employee::{Employee, EmployeeRepository};
use crate::error::{Result, ServerError};

/// Employee manager.
#[derive(Clone)]
pub struct EmployeeService {
    pub repo: EmployeeRepository,
}

impl EmployeeService {
    /// Create a new [`EmployeeService`].
    pub fn new(repo: EmployeeRepository) -> Self {
        Self { repo }
    }

    /// Create an employee under a fresh identifier.
    pub async fn create(
        &self,
        name: String,
        email: String,
        employee_code: String,
        role: i32,
    ) -> Result<Employee> {
        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            employee_code,
            role,
        };

        self.repo.insert(&employee).await?;

        Ok(employee)
    }

    /// Find an employee or fail with 404.
    pub async fn find(&self, employee_id: &str) -> Result<Employee> {
        self.repo
            .find_by_id(employee_id)
            .await?
            .ok_or(ServerError::NotFound("Employee not found"))
    }

    /// List every employee.
    pub async fn all(&self) -> Result<Vec<Employee>> {
        self.repo.all().await
    }

    /// Replace every profile field of an existing employee.
    pub async fn update(&self, employee: Employee) -> Result<Employee> {
        self.repo.update(&employee).await?;

        Ok(employee)
    }

    /// Delete an employee and everything attached to them.
    pub async fn delete(&self, employee_id: &str) -> Result<()> {
        self.repo.delete(employee_id).await
    }
}
