use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(exit_logs_table()).await?;
        manager
            .create_index(
                Index::create()
                    .table(ExitLogs::Table)
                    .name("idx_exit_logs_student_id_recorded_at")
                    .col(ExitLogs::StudentId)
                    .col(ExitLogs::RecordedAt)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ExitLogs::Table)
                    .name("idx_exit_logs_recorded_at")
                    .col(ExitLogs::RecordedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExitLogs::Table).to_owned())
            .await
    }
}

/// Audit rows reference their student, door and operator; none of those references may be
/// rewritten or removed underneath them.
fn exit_logs_table() -> TableCreateStatement {
    Table::create()
        .table(ExitLogs::Table)
        .if_not_exists()
        .col(ColumnDef::new(ExitLogs::Id).uuid().not_null().primary_key())
        .col(
            ColumnDef::new(ExitLogs::RecordedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(ExitLogs::StudentId).string_len(10).not_null())
        .col(ColumnDef::new(ExitLogs::DoorId).integer().not_null())
        .col(ColumnDef::new(ExitLogs::OperatorId).uuid().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(ExitLogs::Table, ExitLogs::StudentId)
                .to(Students::Table, Students::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .on_update(ForeignKeyAction::Restrict),
        )
        .foreign_key(
            ForeignKey::create()
                .from(ExitLogs::Table, ExitLogs::DoorId)
                .to(Doors::Table, Doors::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .on_update(ForeignKeyAction::Restrict),
        )
        .foreign_key(
            ForeignKey::create()
                .from(ExitLogs::Table, ExitLogs::OperatorId)
                .to(Operators::Table, Operators::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .on_update(ForeignKeyAction::Restrict),
        )
        .to_owned()
}

#[derive(Iden)]
enum ExitLogs {
    Table,
    Id,
    RecordedAt,
    StudentId,
    DoorId,
    OperatorId,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
}

#[derive(Iden)]
enum Doors {
    Table,
    Id,
}

#[derive(Iden)]
enum Operators {
    Table,
    Id,
}
