use sea_orm::Database;
use tracing::{error, info};

use exitgate_scanner::config::ScannerConfig;
use exitgate_scanner::router::build_router;
use exitgate_scanner::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    exitgate_core::tracing::init_tracing("exitgate_scanner=info,tower_http=info");

    let config = match ScannerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };

    let db = Database::connect(&config.database_url).await?;

    let state = AppState::new(
        db,
        config.cooldown_policy(),
        config.timezone,
        config.photo_urls(),
    );

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.scanner_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;

    info!(
        cooldown_minutes = config.cooldown_minutes,
        timezone = %config.timezone,
        "scanner service listening on {http_addr}"
    );
    axum::serve(listener, router).await?;
    Ok(())
}
