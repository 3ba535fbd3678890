use std::sync::Arc;

use chrono_tz::Tz;
use sea_orm::DatabaseConnection;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::cooldown::CooldownPolicy;
use crate::domain::types::PhotoUrls;
use crate::infra::db::{
    DbDoorRepository, DbExitLogRepository, DbExitRegistrationStore, DbStudentRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub clock: Arc<dyn Clock>,
    pub cooldown: CooldownPolicy,
    pub zone: Tz,
    pub photos: PhotoUrls,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        cooldown: CooldownPolicy,
        zone: Tz,
        photos: PhotoUrls,
    ) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
            cooldown,
            zone,
            photos,
        }
    }

    pub fn student_repo(&self) -> DbStudentRepository {
        DbStudentRepository {
            db: self.db.clone(),
        }
    }

    pub fn door_repo(&self) -> DbDoorRepository {
        DbDoorRepository {
            db: self.db.clone(),
        }
    }

    pub fn exit_log_repo(&self) -> DbExitLogRepository {
        DbExitLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn exit_registration_store(&self) -> DbExitRegistrationStore {
        DbExitRegistrationStore {
            db: self.db.clone(),
        }
    }
}
