pub mod door;
pub mod exits;
pub mod health;
pub mod scan;

use axum::extract::rejection::JsonRejection;

use crate::error::ScannerServiceError;

pub(crate) fn json_rejection(rejection: JsonRejection) -> ScannerServiceError {
    ScannerServiceError::Validation(rejection.body_text())
}
