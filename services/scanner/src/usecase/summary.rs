use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use chrono_tz::Tz;

use exitgate_domain::id::DoorId;

use crate::domain::clock::{Clock, local_date_bounds};
use crate::domain::repository::{ExitLogRepository, StudentRepository};
use crate::domain::types::{CourseExitCount, DailyExits, DayExitCount, DoorExitCount, ExitEntry};
use crate::error::ScannerServiceError;

/// Length of the daily exit series, today included.
pub const TREND_DAYS: u64 = 7;

// ── TodayExits ───────────────────────────────────────────────────────────────

/// Dashboard for the current calendar day of the configured zone.
pub struct TodayExitsUseCase<R: ExitLogRepository, S: StudentRepository, C: Clock> {
    pub repo: R,
    pub students: S,
    pub clock: C,
    pub zone: Tz,
}

impl<R, S, C> TodayExitsUseCase<R, S, C>
where
    R: ExitLogRepository,
    S: StudentRepository,
    C: Clock,
{
    pub async fn execute(&self) -> Result<DailyExits, ScannerServiceError> {
        let today = self.clock.now().with_timezone(&self.zone).date_naive();
        let (start, end) = local_date_bounds(today, self.zone);
        let mut entries = self.repo.list_between(start, end).await?;
        entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        let last_days = self.last_days(today).await?;
        let total_students = self.students.count().await?;

        let mut summary = summarize(today, entries);
        summary.last_days = last_days;
        summary.total_students = total_students;
        Ok(summary)
    }

    async fn last_days(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<DayExitCount>, ScannerServiceError> {
        let mut days = Vec::with_capacity(TREND_DAYS as usize);
        for back in (0..TREND_DAYS).rev() {
            let Some(date) = today.checked_sub_days(Days::new(back)) else {
                continue;
            };
            let (start, end) = local_date_bounds(date, self.zone);
            let count = self.repo.count_between(start, end).await?;
            days.push(DayExitCount { date, count });
        }
        Ok(days)
    }
}

fn summarize(date: NaiveDate, entries: Vec<ExitEntry>) -> DailyExits {
    // Keyed by (name, id) so the output is ordered by door name.
    let mut doors: BTreeMap<(String, i32), u64> = BTreeMap::new();
    let mut courses: BTreeMap<String, u64> = BTreeMap::new();
    for entry in &entries {
        *doors
            .entry((entry.door_name.clone(), entry.door_id.0))
            .or_default() += 1;
        *courses.entry(entry.student_course.clone()).or_default() += 1;
    }
    let by_door = doors
        .into_iter()
        .map(|((door_name, door_id), count)| DoorExitCount {
            door_id: DoorId(door_id),
            door_name,
            count,
        })
        .collect();
    let by_course = courses
        .into_iter()
        .map(|(course, count)| CourseExitCount { course, count })
        .collect();
    DailyExits {
        date,
        total: entries.len() as u64,
        by_door,
        by_course,
        last_days: vec![],
        total_students: 0,
        entries,
    }
}
