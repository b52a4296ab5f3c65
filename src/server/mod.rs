use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;

use self::state::AppState;
use handlers::{app_js, get_earthquakes, get_legend, index_html, style_css};

// Create the main application router
fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/style.css", get(style_css))
        .route("/app.js", get(app_js))
        .route("/api/earthquakes", get(get_earthquakes))
        .route("/api/legend", get(get_legend))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<()> {
    let app = create_app(state);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;

    info!("HTTP server started at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
