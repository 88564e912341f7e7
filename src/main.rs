use anyhow::Result;
use clustercost_core::app_state::build_app_state;
use clustercost_core::config::AppConfig;
use clustercost_core::logging::init_tracing;
use clustercost_core::routes;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(config.log_dir.as_deref())?;

    info!(
        "Using metrics backend {} (default cluster '{}')",
        config.prometheus_url, config.default_cluster_id
    );

    let state = build_app_state(&config)?;
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    info!("Listening on http://{}", config.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await?;

    Ok(())
}
