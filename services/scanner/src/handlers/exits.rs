use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::Serialize;

use exitgate_auth_types::identity::OperatorIdentity;
use exitgate_domain::id::{DoorId, ExitLogId};

use crate::domain::types::{
    CourseExitCount, DailyExits, DayExitCount, DoorExitCount, ExitEntry, PhotoUrls,
};
use crate::error::ScannerServiceError;
use crate::state::AppState;
use crate::usecase::summary::TodayExitsUseCase;

const TIME_OF_DAY_FORMAT: &str = "%I:%M %p";

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DoorCountResponse {
    pub door_id: DoorId,
    pub door_name: String,
    pub count: u64,
}

impl From<DoorExitCount> for DoorCountResponse {
    fn from(c: DoorExitCount) -> Self {
        Self {
            door_id: c.door_id,
            door_name: c.door_name,
            count: c.count,
        }
    }
}

#[derive(Serialize)]
pub struct CourseCountResponse {
    pub course: String,
    pub count: u64,
}

impl From<CourseExitCount> for CourseCountResponse {
    fn from(c: CourseExitCount) -> Self {
        Self {
            course: c.course,
            count: c.count,
        }
    }
}

#[derive(Serialize)]
pub struct DayCountResponse {
    pub date: NaiveDate,
    pub count: u64,
}

impl From<DayExitCount> for DayCountResponse {
    fn from(d: DayExitCount) -> Self {
        Self {
            date: d.date,
            count: d.count,
        }
    }
}

#[derive(Serialize)]
pub struct ExitEntryResponse {
    pub id: ExitLogId,
    pub student_name: String,
    pub student_course: String,
    pub photo_url: String,
    pub door_id: DoorId,
    pub door_name: String,
    /// Local time of day, e.g. `01:05 PM`.
    pub time: String,
}

#[derive(Serialize)]
pub struct TodayExitsResponse {
    pub date: NaiveDate,
    pub total: u64,
    pub by_door: Vec<DoorCountResponse>,
    pub by_course: Vec<CourseCountResponse>,
    /// Oldest first, ending today.
    pub last_days: Vec<DayCountResponse>,
    pub total_students: u64,
    pub entries: Vec<ExitEntryResponse>,
}

impl TodayExitsResponse {
    fn build(today: DailyExits, zone: chrono_tz::Tz, photos: &PhotoUrls) -> Self {
        let entry = |e: ExitEntry| ExitEntryResponse {
            id: e.id,
            photo_url: photos.url_for(e.student_photo.as_deref()),
            student_name: e.student_name,
            student_course: e.student_course,
            door_id: e.door_id,
            door_name: e.door_name,
            time: e
                .recorded_at
                .with_timezone(&zone)
                .format(TIME_OF_DAY_FORMAT)
                .to_string(),
        };
        Self {
            date: today.date,
            total: today.total,
            by_door: today.by_door.into_iter().map(Into::into).collect(),
            by_course: today.by_course.into_iter().map(Into::into).collect(),
            last_days: today.last_days.into_iter().map(Into::into).collect(),
            total_students: today.total_students,
            entries: today.entries.into_iter().map(entry).collect(),
        }
    }
}

// ── GET /exits/today ─────────────────────────────────────────────────────────

pub async fn today(
    _identity: OperatorIdentity,
    State(state): State<AppState>,
) -> Result<Json<TodayExitsResponse>, ScannerServiceError> {
    let uc = TodayExitsUseCase {
        repo: state.exit_log_repo(),
        students: state.student_repo(),
        clock: state.clock.clone(),
        zone: state.zone,
    };
    let today = uc.execute().await?;
    Ok(Json(TodayExitsResponse::build(today, state.zone, &state.photos)))
}
