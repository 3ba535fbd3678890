use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

use exitgate_auth_types::identity::OperatorIdentity;
use exitgate_domain::door::DoorStatus;
use exitgate_domain::id::DoorId;

use crate::error::ScannerServiceError;
use crate::handlers::json_rejection;
use crate::state::AppState;
use crate::usecase::door::SetDoorStatusUseCase;

#[derive(Deserialize)]
pub struct SetDoorStatusRequest {
    pub status: DoorStatus,
}

// ── PATCH /doors/{door_id}/status ────────────────────────────────────────────

pub async fn set_door_status(
    identity: OperatorIdentity,
    State(state): State<AppState>,
    door_id: Result<Path<i32>, PathRejection>,
    body: Result<Json<SetDoorStatusRequest>, JsonRejection>,
) -> Result<StatusCode, ScannerServiceError> {
    let Path(door_id) = door_id
        .map_err(|_| ScannerServiceError::Validation("door_id must be an integer".to_owned()))?;
    let Json(body) = body.map_err(json_rejection)?;

    let uc = SetDoorStatusUseCase {
        repo: state.door_repo(),
    };
    uc.execute(identity.role, DoorId(door_id), body.status)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
