use exitgate_domain::id::DoorId;

use crate::domain::repository::ExitRegistrationTx;
use crate::domain::types::Door;
use crate::error::ScannerServiceError;

/// Re-read the door inside the registration's unit of work and require it to be open.
///
/// Callers must not rely on an earlier door listing; the status may have changed since.
pub async fn check_gate<T: ExitRegistrationTx>(
    tx: &mut T,
    door_id: DoorId,
) -> Result<Door, ScannerServiceError> {
    let door = tx
        .find_door(door_id)
        .await?
        .ok_or(ScannerServiceError::DoorNotFound)?;
    ensure_open(door)
}

pub fn ensure_open(door: Door) -> Result<Door, ScannerServiceError> {
    if door.status.is_open() {
        Ok(door)
    } else {
        Err(ScannerServiceError::GateClosed { door: door.name })
    }
}
