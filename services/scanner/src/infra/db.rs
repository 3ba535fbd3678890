use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RuntimeErr, Statement, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use exitgate_domain::door::DoorStatus;
use exitgate_domain::id::{DoorId, ExitLogId, StudentId};
use exitgate_scanner_schema::{doors, exit_logs, students};

use crate::domain::repository::{
    DoorRepository, ExitLogRepository, ExitRegistrationStore, ExitRegistrationTx,
    StudentRepository,
};
use crate::domain::types::{Door, ExitEntry, ExitLog, Student};
use crate::error::ScannerServiceError;

// ── Student repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStudentRepository {
    pub db: DatabaseConnection,
}

impl StudentRepository for DbStudentRepository {
    async fn find_by_scan_code(
        &self,
        scan_code: &str,
    ) -> Result<Option<Student>, ScannerServiceError> {
        let model = students::Entity::find()
            .filter(students::Column::ScanCode.eq(scan_code))
            .one(&self.db)
            .await
            .context("find student by scan code")?;
        Ok(model.map(student_from_model).transpose()?)
    }

    async fn count(&self) -> Result<u64, ScannerServiceError> {
        let total = students::Entity::find()
            .count(&self.db)
            .await
            .context("count students")?;
        Ok(total)
    }
}

// ── Door repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDoorRepository {
    pub db: DatabaseConnection,
}

impl DoorRepository for DbDoorRepository {
    async fn list_by_status(&self, status: DoorStatus) -> Result<Vec<Door>, ScannerServiceError> {
        let models = doors::Entity::find()
            .filter(doors::Column::Status.eq(status.as_str()))
            .order_by_asc(doors::Column::Name)
            .all(&self.db)
            .await
            .context("list doors by status")?;
        models
            .into_iter()
            .map(|m| door_from_model(m).map_err(Into::into))
            .collect()
    }

    async fn set_status(
        &self,
        id: DoorId,
        status: DoorStatus,
    ) -> Result<bool, ScannerServiceError> {
        let result = doors::Entity::update_many()
            .col_expr(doors::Column::Status, Expr::value(status.as_str()))
            .filter(doors::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update door status")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Exit log repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbExitLogRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct ExitEntryRow {
    id: Uuid,
    recorded_at: DateTime<Utc>,
    student_name: String,
    student_course: String,
    student_photo: Option<String>,
    door_id: i32,
    door_name: String,
}

impl ExitLogRepository for DbExitLogRepository {
    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExitEntry>, ScannerServiceError> {
        let sql = r#"
            SELECT e.id, e.recorded_at,
                   s.name AS student_name, s.course AS student_course, s.photo AS student_photo,
                   d.id AS door_id, d.name AS door_name
              FROM exit_logs e
              JOIN students s ON s.id = e.student_id
              JOIN doors d ON d.id = e.door_id
             WHERE e.recorded_at >= $1 AND e.recorded_at < $2
             ORDER BY e.recorded_at DESC
        "#;

        let rows = ExitEntryRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [start.into(), end.into()],
        ))
        .all(&self.db)
        .await
        .context("list exit logs between")?;

        Ok(rows
            .into_iter()
            .map(|row| ExitEntry {
                id: ExitLogId(row.id),
                recorded_at: row.recorded_at,
                student_name: row.student_name,
                student_course: row.student_course,
                student_photo: row.student_photo,
                door_id: DoorId(row.door_id),
                door_name: row.door_name,
            })
            .collect())
    }

    async fn count_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, ScannerServiceError> {
        let total = exit_logs::Entity::find()
            .filter(exit_logs::Column::RecordedAt.gte(start))
            .filter(exit_logs::Column::RecordedAt.lt(end))
            .count(&self.db)
            .await
            .context("count exit logs between")?;
        Ok(total)
    }
}

// ── Exit registration (unit of work) ─────────────────────────────────────────

#[derive(Clone)]
pub struct DbExitRegistrationStore {
    pub db: DatabaseConnection,
}

impl ExitRegistrationStore for DbExitRegistrationStore {
    type Tx = DbExitRegistrationTx;

    async fn begin(&self) -> Result<Self::Tx, ScannerServiceError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| storage_error(e, "begin exit registration"))?;
        Ok(DbExitRegistrationTx { txn })
    }
}

/// Wraps a database transaction. Rolled back on drop unless committed.
pub struct DbExitRegistrationTx {
    txn: DatabaseTransaction,
}

impl ExitRegistrationTx for DbExitRegistrationTx {
    async fn lock_student(
        &mut self,
        id: &StudentId,
    ) -> Result<Option<Student>, ScannerServiceError> {
        // SELECT ... FOR UPDATE: serializes registrations for this student only.
        let model = students::Entity::find_by_id(id.as_str())
            .lock_exclusive()
            .one(&self.txn)
            .await
            .map_err(|e| storage_error(e, "lock student"))?;
        Ok(model.map(student_from_model).transpose()?)
    }

    async fn find_door(&mut self, id: DoorId) -> Result<Option<Door>, ScannerServiceError> {
        // FOR SHARE keeps the status from changing until commit.
        let model = doors::Entity::find_by_id(id.0)
            .lock_shared()
            .one(&self.txn)
            .await
            .map_err(|e| storage_error(e, "find door"))?;
        Ok(model.map(door_from_model).transpose()?)
    }

    async fn latest_exit_at(
        &mut self,
        id: &StudentId,
    ) -> Result<Option<DateTime<Utc>>, ScannerServiceError> {
        let model = exit_logs::Entity::find()
            .filter(exit_logs::Column::StudentId.eq(id.as_str()))
            .order_by_desc(exit_logs::Column::RecordedAt)
            .one(&self.txn)
            .await
            .map_err(|e| storage_error(e, "find latest exit"))?;
        Ok(model.map(|m| m.recorded_at))
    }

    async fn insert_exit_log(&mut self, log: &ExitLog) -> Result<(), ScannerServiceError> {
        let am = exit_logs::ActiveModel {
            id: Set(log.id.0),
            recorded_at: Set(log.recorded_at),
            student_id: Set(log.student_id.as_str().to_owned()),
            door_id: Set(log.door_id.0),
            operator_id: Set(log.operator_id.0),
        };
        exit_logs::Entity::insert(am)
            .exec_without_returning(&self.txn)
            .await
            .map_err(|e| storage_error(e, "insert exit log"))?;
        Ok(())
    }

    async fn commit(self) -> Result<(), ScannerServiceError> {
        self.txn
            .commit()
            .await
            .map_err(|e| storage_error(e, "commit exit registration"))
    }
}

// ── Error mapping ────────────────────────────────────────────────────────────

/// Unique violation, serialization failure, deadlock, lock timeout.
const LOST_RACE_SQLSTATES: [&str; 4] = ["23505", "40001", "40P01", "55P03"];

fn storage_error(err: DbErr, action: &'static str) -> ScannerServiceError {
    let code = sqlstate(&err);
    classify(err, code.as_deref(), action)
}

fn classify(err: DbErr, sqlstate: Option<&str>, action: &'static str) -> ScannerServiceError {
    if sqlstate.is_some_and(|code| LOST_RACE_SQLSTATES.contains(&code)) {
        tracing::debug!(error = %err, sqlstate, action, "exit registration lost a race");
        return ScannerServiceError::LostRace;
    }
    ScannerServiceError::Internal(anyhow::Error::new(err).context(action))
}

fn sqlstate(err: &DbErr) -> Option<String> {
    let runtime = match err {
        DbErr::Query(r) | DbErr::Exec(r) | DbErr::Conn(r) => r,
        _ => return None,
    };
    match runtime {
        RuntimeErr::SqlxError(e) => e
            .as_database_error()
            .and_then(|d| d.code())
            .map(|code| code.into_owned()),
        _ => None,
    }
}

// ── Model mapping ────────────────────────────────────────────────────────────

fn student_from_model(model: students::Model) -> Result<Student, anyhow::Error> {
    let id = StudentId::parse(&model.id)
        .with_context(|| format!("stored student id {:?}", model.id))?;
    Ok(Student {
        id,
        name: model.name,
        course: model.course,
        authorized_to_leave: model.authorized_to_leave,
        photo: model.photo,
        scan_code: model.scan_code,
    })
}

fn door_from_model(model: doors::Model) -> Result<Door, anyhow::Error> {
    let status = model
        .status
        .parse::<DoorStatus>()
        .with_context(|| format!("stored status of door {}", model.id))?;
    Ok(Door {
        id: DoorId(model.id),
        name: model.name,
        status,
    })
}
