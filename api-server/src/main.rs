use api_server::{config::ServerConfig, error::ServerError, telemetry};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    api_server::init_env();
    let cfg = ServerConfig::from_env()?;
    telemetry::init_tracing(cfg.json_logs);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, github_api_url = %cfg.github_api_url, "listening");

    let state = api_server::AppState::from_config(&cfg);
    if let Err(e) = api_server::run(listener, state, shutdown_signal()).await {
        error!(error = %e, "server stopped with an error");
        return Err(e.into());
    }
    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received CTRL+C, shutting down"),
        Err(e) => {
            error!(error = %e, "failed to listen for CTRL+C");
            std::future::pending::<()>().await
        }
    }
}
