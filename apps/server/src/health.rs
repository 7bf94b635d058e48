//! Liveness endpoint for external uptime checks.

use axum::{routing::get, Router};
use tracing::info;

const ALIVE: &str = "Bot is alive";

/// Serve the single liveness route on the given port.
pub async fn start_health_server(port: u16) -> Result<(), std::io::Error> {
    let app = Router::new().route("/", get(home));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Liveness endpoint listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn home() -> &'static str {
    ALIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_home_body() {
        assert_eq!(home().await, "Bot is alive");
    }
}
