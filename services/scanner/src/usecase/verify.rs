use crate::domain::repository::StudentRepository;
use crate::domain::types::{PhotoUrls, StudentCard};
use crate::error::ScannerServiceError;

// ── VerifyScan ───────────────────────────────────────────────────────────────

/// Resolve a scanned payload to a student. Read-only: never writes or logs an exit.
pub struct VerifyScanUseCase<R: StudentRepository> {
    pub repo: R,
    pub photos: PhotoUrls,
}

impl<R: StudentRepository> VerifyScanUseCase<R> {
    pub async fn execute(&self, scan_code: &str) -> Result<StudentCard, ScannerServiceError> {
        if scan_code.trim().is_empty() {
            return Err(ScannerServiceError::Validation(
                "qr_data is required".to_owned(),
            ));
        }
        let student = self
            .repo
            .find_by_scan_code(scan_code)
            .await?
            .ok_or(ScannerServiceError::ScanCodeNotFound)?;
        Ok(student.card(&self.photos))
    }
}
