use sea_orm_migration::prelude::*;

mod m20251020_000001_create_students;
mod m20251020_000002_create_doors;
mod m20251020_000003_create_operators;
mod m20251020_000004_create_exit_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_create_students::Migration),
            Box::new(m20251020_000002_create_doors::Migration),
            Box::new(m20251020_000003_create_operators::Migration),
            Box::new(m20251020_000004_create_exit_logs::Migration),
        ]
    }
}
