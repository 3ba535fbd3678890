#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use exitgate_domain::door::DoorStatus;
use exitgate_domain::id::{DoorId, StudentId};

use crate::domain::types::{Door, ExitEntry, ExitLog, Student};
use crate::error::ScannerServiceError;

/// Read access to enrolled students.
pub trait StudentRepository: Send + Sync {
    /// Exact match on the scan code. Pure lookup.
    async fn find_by_scan_code(
        &self,
        scan_code: &str,
    ) -> Result<Option<Student>, ScannerServiceError>;

    /// Number of enrolled students.
    async fn count(&self) -> Result<u64, ScannerServiceError>;
}

/// Door listing and status changes.
pub trait DoorRepository: Send + Sync {
    /// Doors in `status`, ordered by name.
    async fn list_by_status(&self, status: DoorStatus) -> Result<Vec<Door>, ScannerServiceError>;

    /// Returns `false` if the door does not exist.
    async fn set_status(&self, id: DoorId, status: DoorStatus)
    -> Result<bool, ScannerServiceError>;
}

/// Read-only access to the exit audit trail.
pub trait ExitLogRepository: Send + Sync {
    /// Entries with `start <= recorded_at < end`, newest first.
    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExitEntry>, ScannerServiceError>;

    /// Number of entries with `start <= recorded_at < end`.
    async fn count_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, ScannerServiceError>;
}

/// Opens the unit of work in which an exit is registered.
pub trait ExitRegistrationStore: Send + Sync {
    type Tx: ExitRegistrationTx;

    async fn begin(&self) -> Result<Self::Tx, ScannerServiceError>;
}

/// One registration attempt. Dropping it without `commit` discards every write.
pub trait ExitRegistrationTx: Send + Sized {
    /// Load the student and hold an exclusive per-student lock until commit or drop.
    /// Attempts for other students are not blocked.
    async fn lock_student(
        &mut self,
        id: &StudentId,
    ) -> Result<Option<Student>, ScannerServiceError>;

    /// Read the door's current status within this unit of work.
    async fn find_door(&mut self, id: DoorId) -> Result<Option<Door>, ScannerServiceError>;

    /// Timestamp of the student's most recent exit.
    async fn latest_exit_at(
        &mut self,
        id: &StudentId,
    ) -> Result<Option<DateTime<Utc>>, ScannerServiceError>;

    async fn insert_exit_log(&mut self, log: &ExitLog) -> Result<(), ScannerServiceError>;

    async fn commit(self) -> Result<(), ScannerServiceError>;
}
