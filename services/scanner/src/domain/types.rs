use chrono::{DateTime, NaiveDate, Utc};

use exitgate_domain::door::DoorStatus;
use exitgate_domain::id::{DoorId, ExitLogId, OperatorId, StudentId};

/// Enrolled student as stored.
#[derive(Debug, Clone)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub course: String,
    pub authorized_to_leave: bool,
    pub photo: Option<String>,
    pub scan_code: String,
}

/// Read-only identity projection returned by scan verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentCard {
    pub id: StudentId,
    pub name: String,
    pub course: String,
    pub photo_url: String,
    pub authorized: bool,
}

/// A monitored door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    pub id: DoorId,
    pub name: String,
    pub status: DoorStatus,
}

/// Immutable audit record of one exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitLog {
    pub id: ExitLogId,
    pub recorded_at: DateTime<Utc>,
    pub student_id: StudentId,
    pub door_id: DoorId,
    pub operator_id: OperatorId,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisteredExit {
    pub exit_log: ExitLog,
    pub student_name: String,
}

/// Exit log joined with the student and door it references.
#[derive(Debug, Clone)]
pub struct ExitEntry {
    pub id: ExitLogId,
    pub recorded_at: DateTime<Utc>,
    pub student_name: String,
    pub student_course: String,
    pub student_photo: Option<String>,
    pub door_id: DoorId,
    pub door_name: String,
}

/// Exits through one door within a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorExitCount {
    pub door_id: DoorId,
    pub door_name: String,
    pub count: u64,
}

/// Exits by students of one course within a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseExitCount {
    pub course: String,
    pub count: u64,
}

/// Exits recorded on one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayExitCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Dashboard view of the current local day.
#[derive(Debug, Clone)]
pub struct DailyExits {
    /// Local calendar day the summary covers.
    pub date: NaiveDate,
    pub total: u64,
    pub by_door: Vec<DoorExitCount>,
    pub by_course: Vec<CourseExitCount>,
    /// The last seven local days, oldest first, ending with `date`. Days without exits
    /// count zero.
    pub last_days: Vec<DayExitCount>,
    pub total_students: u64,
    /// Newest first.
    pub entries: Vec<ExitEntry>,
}

/// Maps stored photo references to URLs served by the file collaborator.
#[derive(Debug, Clone)]
pub struct PhotoUrls {
    pub base_url: String,
    pub default_avatar_url: String,
}

impl PhotoUrls {
    pub fn url_for(&self, photo: Option<&str>) -> String {
        match photo.filter(|p| !p.is_empty()) {
            Some(photo) => format!("{}/{}", self.base_url.trim_end_matches('/'), photo),
            None => self.default_avatar_url.clone(),
        }
    }
}

impl Student {
    pub fn card(&self, photos: &PhotoUrls) -> StudentCard {
        StudentCard {
            id: self.id.clone(),
            name: self.name.clone(),
            course: self.course.clone(),
            photo_url: photos.url_for(self.photo.as_deref()),
            authorized: self.authorized_to_leave,
        }
    }
}
