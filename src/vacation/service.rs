use chrono::NaiveDate;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{Result, ServerError};
use crate::vacation::{VacationRepository, VacationRequest, VacationStatus};

/// Vacation request manager.
pub struct VacationService {
    pub repo: VacationRepository,
    clock: Box<dyn Clock>,
}

impl VacationService {
    /// Create a new [`VacationService`].
    pub fn new(repo: VacationRepository, clock: Box<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// File a new request under a fresh identifier. It starts out
    /// pending.
    pub async fn submit(
        &self,
        employee_id: String,
        from_date: NaiveDate,
        to_date: NaiveDate,
        reason: String,
    ) -> Result<VacationRequest> {
        let request = VacationRequest {
            id: Uuid::new_v4().to_string(),
            employee_id,
            submitted_at: self.clock.now_utc(),
            from_date,
            to_date,
            reason,
            status: VacationStatus::Pending.value(),
        };

        self.repo.insert(&request).await?;

        Ok(request)
    }

    /// Find a request or fail with 404.
    pub async fn find(&self, id: &str) -> Result<VacationRequest> {
        self.repo
            .find(id)
            .await?
            .ok_or(ServerError::NotFound("Vacation request not found"))
    }

    /// List requests waiting for a decision.
    pub async fn pending(&self) -> Result<Vec<VacationRequest>> {
        self.repo.list_pending().await
    }

    /// List every request of one employee.
    pub async fn for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<VacationRequest>> {
        self.repo.list_for_employee(employee_id).await
    }

    /// Approve a pending request.
    pub async fn approve(&self, id: &str) -> Result<()> {
        let request = self.find(id).await?;
        if !request.is_pending() {
            return Err(ServerError::Conflict(
                "Only pending requests can be approved",
            ));
        }

        self.repo
            .set_status(id, VacationStatus::Approved.value())
            .await
    }

    /// Reject a pending request.
    pub async fn reject(&self, id: &str) -> Result<()> {
        let request = self.find(id).await?;
        if !request.is_pending() {
            return Err(ServerError::Conflict(
                "Only pending requests can be rejected",
            ));
        }

        self.repo
            .set_status(id, VacationStatus::Rejected.value())
            .await
    }

    /// Delete a request on behalf of its owner.
    ///
    /// The owner check comes first, a stranger gets `403` even when the
    /// request was already decided.
    pub async fn delete_own(&self, id: &str, actor_id: &str) -> Result<()> {
        let request = self.find(id).await?;

        if request.employee_id != actor_id {
            return Err(ServerError::Forbidden(
                "You cannot delete this request",
            ));
        }
        if !request.is_pending() {
            return Err(ServerError::Conflict(
                "Only pending requests can be deleted",
            ));
        }

        self.repo.delete(id).await
    }
}
