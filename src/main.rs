use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod constants;
mod feed;
mod markers;
mod server;
mod settings;

use feed::FeedClient;
use server::{start_server, state::AppState};
use settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load().context("Failed to load settings")?;
    info!(feed_url = %settings.feed_url, port = settings.port, "Starting quakemap");

    let feed = FeedClient::new(
        &settings.feed_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("Failed to create feed client")?;

    let state = AppState {
        feed: Arc::new(feed),
    };

    start_server(state, settings.port).await
}
