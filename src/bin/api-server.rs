//! TA Fortress API Server
//!
//! Serves `/health`, `/` and `/full-analysis`. Every analysis request is
//! computed from scratch, so the service is stateless and can be
//! horizontally scaled.

use dotenvy::dotenv;
use ta_fortress::config::AppConfig;
use ta_fortress::core::http::start_server;
use ta_fortress::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env();
    let port = config.port;
    info!("Starting TA Fortress API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
