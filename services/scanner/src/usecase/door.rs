use exitgate_domain::door::DoorStatus;
use exitgate_domain::id::DoorId;
use exitgate_domain::operator::OperatorRole;

use crate::domain::repository::DoorRepository;
use crate::domain::types::Door;
use crate::error::ScannerServiceError;

// ── ListOpenDoors ────────────────────────────────────────────────────────────

/// Doors a station may offer for selection. Advisory only: registration re-checks.
pub struct ListOpenDoorsUseCase<R: DoorRepository> {
    pub repo: R,
}

impl<R: DoorRepository> ListOpenDoorsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Door>, ScannerServiceError> {
        self.repo.list_by_status(DoorStatus::Open).await
    }
}

// ── SetDoorStatus ────────────────────────────────────────────────────────────

pub struct SetDoorStatusUseCase<R: DoorRepository> {
    pub repo: R,
}

impl<R: DoorRepository> SetDoorStatusUseCase<R> {
    pub async fn execute(
        &self,
        actor_role: OperatorRole,
        door_id: DoorId,
        status: DoorStatus,
    ) -> Result<(), ScannerServiceError> {
        if !actor_role.can_manage_doors() {
            return Err(ScannerServiceError::Forbidden);
        }
        let updated = self.repo.set_status(door_id, status).await?;
        if !updated {
            return Err(ScannerServiceError::DoorNotFound);
        }
        tracing::info!(door_id = %door_id, status = %status, "door status changed");
        Ok(())
    }
}
