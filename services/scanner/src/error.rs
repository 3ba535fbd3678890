use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Scanner service error variants.
///
/// Everything except `Internal` is an expected outcome the operator can act on.
#[derive(Debug, thiserror::Error)]
pub enum ScannerServiceError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("scan code not found")]
    ScanCodeNotFound,
    #[error("student not found")]
    StudentNotFound,
    #[error("door not found")]
    DoorNotFound,
    #[error("door {door} is not open")]
    GateClosed { door: String },
    #[error("exit already registered for {student_name} less than {cooldown_minutes} minutes ago")]
    CooldownViolation {
        student_name: String,
        cooldown_minutes: i64,
    },
    /// A concurrent registration for the same student won. Reads the same as a
    /// cooldown violation.
    #[error("exit already registered for {student_name} less than {cooldown_minutes} minutes ago")]
    Conflict {
        student_name: String,
        cooldown_minutes: i64,
    },
    /// Storage-level signal that a transaction lost to a concurrent one. Registration
    /// turns it into `Conflict` once the student is known.
    #[error("concurrent update")]
    LostRace,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ScannerServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::ScanCodeNotFound => "SCAN_CODE_NOT_FOUND",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::DoorNotFound => "DOOR_NOT_FOUND",
            Self::GateClosed { .. } => "GATE_CLOSED",
            Self::CooldownViolation { .. } => "COOLDOWN_VIOLATION",
            Self::Conflict { .. } | Self::LostRace => "CONFLICT",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ScanCodeNotFound | Self::StudentNotFound | Self::DoorNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::GateClosed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CooldownViolation { .. } | Self::Conflict { .. } | Self::LostRace => {
                StatusCode::CONFLICT
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as `{<flag>: false, kind, error}`.
    pub fn into_response_flagged(self, flag: &'static str) -> Response {
        let status = self.status();
        // Log 500s only. TraceLayer already records method/uri/status for every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            flag: false,
            "kind": self.kind(),
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

impl IntoResponse for ScannerServiceError {
    fn into_response(self) -> Response {
        self.into_response_flagged("success")
    }
}
