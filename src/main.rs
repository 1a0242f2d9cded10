use log::{error, info};
use sitewatch::{Config, Monitor};
use std::process::ExitCode;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut monitor = match Monitor::from_config(&config) {
        Ok(monitor) => monitor,
        Err(e) => {
            error!("Failed to initialize monitor: {e}");
            return ExitCode::FAILURE;
        }
    };

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    match monitor.run(token).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Monitoring error: {e}");
            ExitCode::FAILURE
        }
    }
}
