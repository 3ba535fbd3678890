use chrono::SubsecRound;

use exitgate_domain::id::{DoorId, ExitLogId, OperatorId, StudentId};
use exitgate_domain::operator::OperatorRole;

use crate::domain::clock::Clock;
use crate::domain::cooldown::{CooldownDecision, CooldownPolicy};
use crate::domain::repository::{ExitRegistrationStore, ExitRegistrationTx};
use crate::domain::types::{ExitLog, RegisteredExit};
use crate::error::ScannerServiceError;
use crate::usecase::gate::check_gate;

// ── RegisterExit ─────────────────────────────────────────────────────────────

pub struct RegisterExitInput {
    pub student_id: StudentId,
    pub door_id: DoorId,
    pub operator_id: OperatorId,
    pub role: OperatorRole,
}

/// Check student, door and cooldown, then write exactly one exit log, all in one unit
/// of work. Any early return drops the transaction and leaves no row behind.
pub struct RegisterExitUseCase<S: ExitRegistrationStore, C: Clock> {
    pub store: S,
    pub clock: C,
    pub cooldown: CooldownPolicy,
}

impl<S: ExitRegistrationStore, C: Clock> RegisterExitUseCase<S, C> {
    pub async fn execute(
        &self,
        input: RegisterExitInput,
    ) -> Result<RegisteredExit, ScannerServiceError> {
        if !input.role.can_register_exits() {
            return Err(ScannerServiceError::Forbidden);
        }

        let mut tx = self
            .store
            .begin()
            .await
            .map_err(|e| self.lost_race(e, input.student_id.as_str()))?;

        // 1. Student, locked until commit so same-student attempts serialize here.
        let student = tx
            .lock_student(&input.student_id)
            .await
            .map_err(|e| self.lost_race(e, input.student_id.as_str()))?
            .ok_or(ScannerServiceError::StudentNotFound)?;

        // 2. Door, re-read inside the transaction.
        let door = check_gate(&mut tx, input.door_id)
            .await
            .map_err(|e| self.lost_race(e, &student.name))?;

        // 3. Cooldown. "Now" is taken after the lock, at storage precision (microseconds).
        let now = self.clock.now().trunc_subsecs(6);
        let last_exit = tx
            .latest_exit_at(&student.id)
            .await
            .map_err(|e| self.lost_race(e, &student.name))?;
        if let CooldownDecision::Deny { remaining } = self.cooldown.check(last_exit, now) {
            tracing::debug!(
                student_id = %student.id,
                remaining_secs = remaining.num_seconds(),
                "exit rejected by cooldown"
            );
            return Err(ScannerServiceError::CooldownViolation {
                student_name: student.name,
                cooldown_minutes: self.cooldown.minutes(),
            });
        }

        // 4. Write and commit.
        let exit_log = ExitLog {
            id: ExitLogId::new(),
            recorded_at: now,
            student_id: student.id,
            door_id: door.id,
            operator_id: input.operator_id,
        };
        tx.insert_exit_log(&exit_log)
            .await
            .map_err(|e| self.lost_race(e, &student.name))?;
        tx.commit()
            .await
            .map_err(|e| self.lost_race(e, &student.name))?;

        tracing::info!(
            exit_log_id = %exit_log.id,
            student_id = %exit_log.student_id,
            door_id = %exit_log.door_id,
            operator_id = %exit_log.operator_id,
            "exit registered"
        );

        Ok(RegisteredExit {
            exit_log,
            student_name: student.name,
        })
    }

    /// A lost race means another registration for this student got there first.
    fn lost_race(&self, err: ScannerServiceError, student: &str) -> ScannerServiceError {
        match err {
            ScannerServiceError::LostRace => ScannerServiceError::Conflict {
                student_name: student.to_owned(),
                cooldown_minutes: self.cooldown.minutes(),
            },
            other => other,
        }
    }
}
