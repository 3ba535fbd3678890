use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use exitgate_auth_types::identity::OperatorIdentity;
use exitgate_domain::door::DoorStatus;
use exitgate_domain::id::{DoorId, ExitLogId, StudentId};

use crate::domain::types::{Door, StudentCard};
use crate::error::ScannerServiceError;
use crate::handlers::json_rejection;
use crate::state::AppState;
use crate::usecase::door::ListOpenDoorsUseCase;
use crate::usecase::register_exit::{RegisterExitInput, RegisterExitUseCase};
use crate::usecase::verify::VerifyScanUseCase;

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub qr_data: Option<String>,
}

#[derive(Serialize)]
pub struct StudentResponse {
    pub id: StudentId,
    pub name: String,
    pub course: String,
    pub photo_url: String,
    pub authorized: bool,
}

impl From<StudentCard> for StudentResponse {
    fn from(card: StudentCard) -> Self {
        Self {
            id: card.id,
            name: card.name,
            course: card.course,
            photo_url: card.photo_url,
            authorized: card.authorized,
        }
    }
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub found: bool,
    pub student: StudentResponse,
}

/// Student ids are strings but scanner stations send card numbers as JSON numbers too.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum ScalarId {
    Number(i64),
    Text(String),
}

impl ScalarId {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
pub struct LogExitRequest {
    pub student_id: Option<ScalarId>,
    pub door_id: Option<ScalarId>,
}

#[derive(Serialize)]
pub struct LogExitResponse {
    pub success: bool,
    pub message: String,
    pub exit_log_id: ExitLogId,
    #[serde(serialize_with = "exitgate_core::serde::to_rfc3339_ms")]
    pub recorded_at: DateTime<Tz>,
}

#[derive(Serialize)]
pub struct DoorResponse {
    pub id: DoorId,
    pub name: String,
    pub status: DoorStatus,
}

impl From<Door> for DoorResponse {
    fn from(door: Door) -> Self {
        Self {
            id: door.id,
            name: door.name,
            status: door.status,
        }
    }
}

/// Verify errors carry `found: false` instead of `success: false`.
pub struct VerifyError(ScannerServiceError);

impl From<ScannerServiceError> for VerifyError {
    fn from(e: ScannerServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        self.0.into_response_flagged("found")
    }
}

// ── POST /scan/verify ────────────────────────────────────────────────────────

pub async fn verify(
    _identity: OperatorIdentity,
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, VerifyError> {
    let Json(body) = body.map_err(json_rejection)?;
    let qr_data = body.qr_data.unwrap_or_default();

    let uc = VerifyScanUseCase {
        repo: state.student_repo(),
        photos: state.photos.clone(),
    };
    let card = uc.execute(&qr_data).await?;
    Ok(Json(VerifyResponse {
        found: true,
        student: card.into(),
    }))
}

// ── POST /scan/log ───────────────────────────────────────────────────────────

pub async fn log_exit(
    identity: OperatorIdentity,
    State(state): State<AppState>,
    body: Result<Json<LogExitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LogExitResponse>), ScannerServiceError> {
    let Json(body) = body.map_err(json_rejection)?;
    let input = RegisterExitInput {
        student_id: parse_student_id(body.student_id)?,
        door_id: parse_door_id(body.door_id)?,
        operator_id: identity.operator_id,
        role: identity.role,
    };

    let uc = RegisterExitUseCase {
        store: state.exit_registration_store(),
        clock: state.clock.clone(),
        cooldown: state.cooldown,
    };
    let registered = uc.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(LogExitResponse {
            success: true,
            message: format!("exit registered for {}", registered.student_name),
            exit_log_id: registered.exit_log.id,
            recorded_at: registered.exit_log.recorded_at.with_timezone(&state.zone),
        }),
    ))
}

fn parse_student_id(raw: Option<ScalarId>) -> Result<StudentId, ScannerServiceError> {
    let raw = raw
        .ok_or_else(|| ScannerServiceError::Validation("student_id is required".to_owned()))?
        .into_text();
    StudentId::parse(&raw).map_err(|e| ScannerServiceError::Validation(e.to_string()))
}

fn parse_door_id(raw: Option<ScalarId>) -> Result<DoorId, ScannerServiceError> {
    let invalid = || ScannerServiceError::Validation("door_id must be an integer".to_owned());
    match raw.ok_or_else(|| ScannerServiceError::Validation("door_id is required".to_owned()))? {
        ScalarId::Number(n) => i32::try_from(n).map(DoorId).map_err(|_| invalid()),
        ScalarId::Text(s) => s.trim().parse::<DoorId>().map_err(|_| invalid()),
    }
}

// ── GET /scan/doors ──────────────────────────────────────────────────────────

pub async fn list_open_doors(
    _identity: OperatorIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<DoorResponse>>, ScannerServiceError> {
    let uc = ListOpenDoorsUseCase {
        repo: state.door_repo(),
    };
    let doors = uc.execute().await?;
    Ok(Json(doors.into_iter().map(Into::into).collect()))
}
