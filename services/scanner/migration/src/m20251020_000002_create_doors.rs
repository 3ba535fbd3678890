use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Doors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Doors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Doors::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Doors::Status)
                            .string_len(16)
                            .not_null()
                            .default("closed")
                            .check(Expr::col(Doors::Status).is_in(["open", "closed"])),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Doors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Doors {
    Table,
    Id,
    Name,
    Status,
}
