use anyhow::Context;
use cp_core::AppConfig;
use cp_server::{app_with_state, state::AppState};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Optional JSON config file; `CP_*` variables still override it.
const CONFIG_PATH_VAR: &str = "CP_CONFIG";

fn load_config() -> anyhow::Result<AppConfig> {
    let Ok(path) = std::env::var(CONFIG_PATH_VAR) else {
        return Ok(AppConfig::from_env()?);
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading config file {path}"))?;
    let config = AppConfig::from_json_str(&text)
        .with_context(|| format!("parsing config file {path}"))?
        .apply_env(|key| std::env::var(key).ok())?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let config = load_config()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = app_with_state(AppState::with_config(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "connections plus server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
