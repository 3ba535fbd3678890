use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::OwnedMutexGuard;

use exitgate_domain::door::DoorStatus;
use exitgate_domain::id::{DoorId, OperatorId, StudentId};
use exitgate_domain::operator::OperatorRole;
use exitgate_scanner::domain::clock::Clock;
use exitgate_scanner::domain::cooldown::CooldownPolicy;
use exitgate_scanner::domain::repository::{
    DoorRepository, ExitLogRepository, ExitRegistrationStore, ExitRegistrationTx,
    StudentRepository,
};
use exitgate_scanner::domain::types::{Door, ExitEntry, ExitLog, PhotoUrls, Student};
use exitgate_scanner::error::ScannerServiceError;
use exitgate_scanner::usecase::register_exit::{RegisterExitInput, RegisterExitUseCase};
use uuid::Uuid;

// ── TestClock ────────────────────────────────────────────────────────────────

/// Clock that only moves when told to.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ── MemoryStore ──────────────────────────────────────────────────────────────

/// In-memory stand-in for the database: per-student locks, staged writes applied on
/// commit, and the `(student_id, recorded_at)` uniqueness rule.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    students: Vec<Student>,
    doors: Mutex<Vec<Door>>,
    logs: Mutex<Vec<ExitLog>>,
    locks: Mutex<HashMap<StudentId, Arc<tokio::sync::Mutex<()>>>>,
}

impl MemoryStore {
    pub fn new(students: Vec<Student>, doors: Vec<Door>) -> Self {
        Self {
            inner: Arc::new(Inner {
                students,
                doors: Mutex::new(doors),
                logs: Mutex::new(vec![]),
                locks: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Committed exit logs, oldest first.
    pub fn logs(&self) -> Vec<ExitLog> {
        self.inner.logs.lock().unwrap().clone()
    }

    fn student_lock(&self, id: &StudentId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.inner.locks.lock().unwrap();
        Arc::clone(locks.entry(id.clone()).or_default())
    }
}

pub struct MemoryTx {
    store: MemoryStore,
    _guard: Option<OwnedMutexGuard<()>>,
    pending: Vec<ExitLog>,
}

impl ExitRegistrationStore for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, ScannerServiceError> {
        Ok(MemoryTx {
            store: self.clone(),
            _guard: None,
            pending: vec![],
        })
    }
}

impl ExitRegistrationTx for MemoryTx {
    async fn lock_student(
        &mut self,
        id: &StudentId,
    ) -> Result<Option<Student>, ScannerServiceError> {
        let lock = self.store.student_lock(id);
        self._guard = Some(lock.lock_owned().await);
        Ok(self
            .store
            .inner
            .students
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn find_door(&mut self, id: DoorId) -> Result<Option<Door>, ScannerServiceError> {
        Ok(self
            .store
            .inner
            .doors
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn latest_exit_at(
        &mut self,
        id: &StudentId,
    ) -> Result<Option<DateTime<Utc>>, ScannerServiceError> {
        let latest = self
            .store
            .inner
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| &l.student_id == id)
            .map(|l| l.recorded_at)
            .max();
        // Give concurrent attempts a chance to interleave between read and write.
        tokio::task::yield_now().await;
        Ok(latest)
    }

    async fn insert_exit_log(&mut self, log: &ExitLog) -> Result<(), ScannerServiceError> {
        self.pending.push(log.clone());
        Ok(())
    }

    async fn commit(self) -> Result<(), ScannerServiceError> {
        let mut logs = self.store.inner.logs.lock().unwrap();
        for log in &self.pending {
            let duplicate = logs
                .iter()
                .any(|l| l.student_id == log.student_id && l.recorded_at == log.recorded_at);
            if duplicate {
                return Err(ScannerServiceError::LostRace);
            }
        }
        logs.extend(self.pending.iter().cloned());
        Ok(())
    }
}

impl StudentRepository for MemoryStore {
    async fn find_by_scan_code(
        &self,
        scan_code: &str,
    ) -> Result<Option<Student>, ScannerServiceError> {
        Ok(self
            .inner
            .students
            .iter()
            .find(|s| s.scan_code == scan_code)
            .cloned())
    }

    async fn count(&self) -> Result<u64, ScannerServiceError> {
        Ok(self.inner.students.len() as u64)
    }
}

impl DoorRepository for MemoryStore {
    async fn list_by_status(&self, status: DoorStatus) -> Result<Vec<Door>, ScannerServiceError> {
        let mut doors: Vec<Door> = self
            .inner
            .doors
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.status == status)
            .cloned()
            .collect();
        doors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(doors)
    }

    async fn set_status(
        &self,
        id: DoorId,
        status: DoorStatus,
    ) -> Result<bool, ScannerServiceError> {
        let mut doors = self.inner.doors.lock().unwrap();
        match doors.iter_mut().find(|d| d.id == id) {
            Some(door) => {
                door.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ExitLogRepository for MemoryStore {
    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExitEntry>, ScannerServiceError> {
        let doors = self.inner.doors.lock().unwrap().clone();
        let mut entries: Vec<ExitEntry> = self
            .logs()
            .into_iter()
            .filter(|l| l.recorded_at >= start && l.recorded_at < end)
            .filter_map(|l| {
                let student = self.inner.students.iter().find(|s| s.id == l.student_id)?;
                let door = doors.iter().find(|d| d.id == l.door_id)?;
                Some(ExitEntry {
                    id: l.id,
                    recorded_at: l.recorded_at,
                    student_name: student.name.clone(),
                    student_course: student.course.clone(),
                    student_photo: student.photo.clone(),
                    door_id: door.id,
                    door_name: door.name.clone(),
                })
            })
            .collect();
        entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(entries)
    }

    async fn count_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, ScannerServiceError> {
        Ok(self
            .logs()
            .iter()
            .filter(|l| l.recorded_at >= start && l.recorded_at < end)
            .count() as u64)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub const ANA_SCAN_CODE: &str = "5f0c2b8e-3d8a-4b53-9a51-8c7e4b1f2a10";
pub const LUIS_SCAN_CODE: &str = "a1d4e7b2-6c3f-4e8a-b9d0-2f5c8e1a7b34";

pub fn ana() -> Student {
    Student {
        id: StudentId::parse("1001").unwrap(),
        name: "Ana Rojas".to_owned(),
        course: "9B".to_owned(),
        authorized_to_leave: true,
        photo: Some("1001.jpg".to_owned()),
        scan_code: ANA_SCAN_CODE.to_owned(),
    }
}

pub fn luis() -> Student {
    Student {
        id: StudentId::parse("1002").unwrap(),
        name: "Luis Pardo".to_owned(),
        course: "7A".to_owned(),
        authorized_to_leave: false,
        photo: None,
        scan_code: LUIS_SCAN_CODE.to_owned(),
    }
}

pub fn main_door() -> Door {
    Door {
        id: DoorId(1),
        name: "Principal".to_owned(),
        status: DoorStatus::Open,
    }
}

pub fn cafeteria_door() -> Door {
    Door {
        id: DoorId(2),
        name: "Cafeteria".to_owned(),
        status: DoorStatus::Closed,
    }
}

pub fn school_store() -> MemoryStore {
    MemoryStore::new(vec![ana(), luis()], vec![main_door(), cafeteria_door()])
}

/// 2025-05-02 15:00 UTC, 10:00 in Bogota.
pub fn school_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 2, 15, 0, 0).unwrap()
}

pub fn photos() -> PhotoUrls {
    PhotoUrls {
        base_url: "/static/uploads/photos".to_owned(),
        default_avatar_url: "/static/img/avatar.png".to_owned(),
    }
}

pub fn register_usecase(
    store: &MemoryStore,
    clock: &Arc<TestClock>,
    minutes: i64,
) -> RegisterExitUseCase<MemoryStore, Arc<TestClock>> {
    RegisterExitUseCase {
        store: store.clone(),
        clock: Arc::clone(clock),
        cooldown: CooldownPolicy::from_minutes(minutes),
    }
}

pub fn exit_of(student: &Student, door: DoorId) -> RegisterExitInput {
    RegisterExitInput {
        student_id: student.id.clone(),
        door_id: door,
        operator_id: OperatorId(Uuid::new_v4()),
        role: OperatorRole::Operator,
    }
}
