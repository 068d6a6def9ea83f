use anyhow::Context;
use tracing::info;

use crate::app::app;
use crate::state::AppState;

pub async fn handle() -> anyhow::Result<()> {
    let (config, db) = super::connect().await?;
    info!("Starting netinv in {:?} mode", config.environment);

    db.migrate().await.context("schema bootstrap failed")?;
    if config.seed.seed_test_data {
        super::db::seed_all(&db).await?;
    }

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("netinv listening on http://{}", bind_addr);

    let state = AppState::new(config, db.clone());
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
