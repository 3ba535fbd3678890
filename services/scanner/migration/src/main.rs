use sea_orm_migration::prelude::*;

use exitgate_scanner_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
