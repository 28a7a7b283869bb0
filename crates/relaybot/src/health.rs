//! Liveness endpoint for the hosting platform.

use std::net::SocketAddr;

use axum::{
    http::{Method, StatusCode},
    Router,
};
use tokio::net::TcpListener;
use tracing::info;

pub const BODY: &str = "Bot is alive!";

/// Answer any GET on any path with `200 Bot is alive!`.
pub async fn serve(port: u16) -> relaybot_core::Result<()> {
    let app = Router::new().fallback(respond);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "health endpoint listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn respond(method: Method) -> (StatusCode, &'static str) {
    if method == Method::GET {
        (StatusCode::OK, BODY)
    } else {
        (StatusCode::METHOD_NOT_ALLOWED, "")
    }
}
