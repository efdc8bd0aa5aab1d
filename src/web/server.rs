use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use super::api;
use super::AppState;

pub async fn start_server(state: Arc<AppState>, port: u16) -> Result<()> {
    let app = api::routes(state).layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("promise-tracker dashboard running at http://{}", addr);

    // Try to open the browser
    let url = format!("http://127.0.0.1:{}", port);
    let _ = std::process::Command::new("open").arg(&url).spawn();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
