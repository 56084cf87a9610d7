//! Habit tracker HTTP server entry point.

use anyhow::Context;
use habit_server::{build_router, AppState, ServerConfig};
use log::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = ServerConfig::from_env()?;
    habit_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(anyhow::Error::msg)?;
    match dotenv {
        Ok(path) => info!("event=config_load module=server status=ok env_file={}", path.display()),
        Err(err) => debug!("event=config_load module=server status=skipped reason={err}"),
    }

    let state = AppState::from_config(&config).context("failed to build suggestion provider")?;
    let remote = state.suggestions.has_remote();
    let app = build_router(state, Some(&config.static_dir));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        "event=server_start module=server status=ok addr={} data_file={} remote_suggestions={} version={}",
        addr,
        config.data_file.display(),
        remote,
        habit_core::core_version()
    );

    axum::serve(listener, app).await?;
    Ok(())
}
