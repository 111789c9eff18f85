mod repository;
mod service;

pub use repository::*;
pub use service::*;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle states of a vacation request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VacationStatus {
    /// Ordinal stored in database rows.
    pub const fn value(self) -> i32 {
        match self {
            VacationStatus::Pending => 0,
            VacationStatus::Approved => 1,
            VacationStatus::Rejected => 2,
        }
    }

    /// Map a stored ordinal back to a status.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(VacationStatus::Pending),
            1 => Some(VacationStatus::Approved),
            2 => Some(VacationStatus::Rejected),
            _ => None,
        }
    }

    /// Human readable name.
    pub const fn label(self) -> &'static str {
        match self {
            VacationStatus::Pending => "pending",
            VacationStatus::Approved => "approved",
            VacationStatus::Rejected => "rejected",
        }
    }
}

/// Vacation request as saved on database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VacationRequest {
    pub id: String,
    pub employee_id: String,
    pub submitted_at: DateTime<Utc>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub reason: String,
    pub status: i32,
}

impl VacationRequest {
    /// Whether the request still waits for a decision.
    pub fn is_pending(&self) -> bool {
        self.status == VacationStatus::Pending.value()
    }
}

/// Vacation request shape returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VacationRequestResource {
    pub id: String,
    pub employee_id: String,
    pub submitted_at: DateTime<Utc>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub reason: String,
    pub status: &'static str,
}

impl From<VacationRequest> for VacationRequestResource {
    fn from(request: VacationRequest) -> Self {
        Self {
            status: VacationStatus::from_value(request.status)
                .map_or("unknown", VacationStatus::label),
            id: request.id,
            employee_id: request.employee_id,
            submitted_at: request.submitted_at,
            from_date: request.from_date,
            to_date: request.to_date,
            reason: request.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordinals_round_trip() {
        assert_eq!(VacationStatus::from_value(0), Some(VacationStatus::Pending));
        assert_eq!(
            VacationStatus::from_value(1),
            Some(VacationStatus::Approved)
        );
        assert_eq!(
            VacationStatus::from_value(2),
            Some(VacationStatus::Rejected)
        );
        assert_eq!(VacationStatus::from_value(3), None);
        assert_eq!(VacationStatus::Rejected.value(), 2);
    }

    #[test]
    fn test_resource_serializes_labels_and_dates() {
        let resource: VacationRequestResource = VacationRequest {
            id: "7b0b4a99-0000-4000-8000-2af7d5f1ce50".into(),
            employee_id: "2c9c78d1-0000-4000-8000-6f9f23dd0e86".into(),
            submitted_at: DateTime::from_timestamp(1_735_689_600, 0).unwrap(),
            from_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            reason: "Summer break".into(),
            status: 0,
        }
        .into();

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["from_date"], "2025-07-01");
        assert_eq!(value["to_date"], "2025-07-10");
        assert_eq!(value["submitted_at"], "2025-01-01T00:00:00Z");
    }

    #[test]
    fn test_only_status_zero_is_pending() {
        let mut request = VacationRequest {
            id: "7b0b4a99-0000-4000-8000-2af7d5f1ce50".into(),
            employee_id: "2c9c78d1-0000-4000-8000-6f9f23dd0e86".into(),
            submitted_at: DateTime::from_timestamp(1_735_689_600, 0).unwrap(),
            from_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            reason: "Summer break".into(),
            status: 0,
        };
        assert!(request.is_pending());

        request.status = 1;
        assert!(!request.is_pending());
    }
}
