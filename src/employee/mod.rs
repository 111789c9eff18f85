mod repository;
mod service;

pub use repository::*;
pub use service::*;

use serde::{Deserialize, Serialize};

/// Closed set of roles an employee can hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Employee,
    Manager,
}

impl Role {
    /// Ordinal stored in database rows and `role` claims.
    pub const fn value(self) -> i32 {
        match self {
            Role::Employee => 1,
            Role::Manager => 100,
        }
    }

    /// Map a stored ordinal back to a role.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(Role::Employee),
            100 => Some(Role::Manager),
            _ => None,
        }
    }

    /// Human readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }
}

/// Employee as saved on database.
#[derive(
    Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow,
)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub employee_code: String,
    pub role: i32,
}

/// Employee shape returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmployeeResource {
    pub id: String,
    pub name: String,
    pub email: String,
    pub employee_code: String,
    pub role: i32,
    pub role_label: &'static str,
}

impl From<Employee> for EmployeeResource {
    fn from(employee: Employee) -> Self {
        Self {
            role_label: Role::from_value(employee.role)
                .map_or("unknown", Role::label),
            id: employee.id,
            name: employee.name,
            email: employee.email,
            employee_code: employee.employee_code,
            role: employee.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordinals_round_trip() {
        assert_eq!(Role::from_value(1), Some(Role::Employee));
        assert_eq!(Role::from_value(100), Some(Role::Manager));
        assert_eq!(Role::from_value(0), None);
        assert_eq!(Role::from_value(-1), None);
        assert_eq!(Role::Manager.value(), 100);
    }

    #[test]
    fn test_resource_labels_role() {
        let resource: EmployeeResource = Employee {
            id: "2c9c78d1-0000-4000-8000-6f9f23dd0e86".into(),
            name: "Ada".into(),
            email: "ada@corp.test".into(),
            employee_code: "0000001".into(),
            role: 100,
        }
        .into();

        assert_eq!(resource.role_label, "manager");
        assert_eq!(resource.role, 100);
    }
}
