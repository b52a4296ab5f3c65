use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, Json, Response},
};
use rust_embed::RustEmbed;
use tracing::error;

use crate::markers::{legend_entries, markers_from_feed, LegendEntry, Marker};

use super::state::AppState;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

fn serve_asset(path: &str, content_type: &'static str) -> Result<Response, StatusCode> {
    let asset = Asset::get(path).ok_or(StatusCode::NOT_FOUND)?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(asset.data.into_owned().into())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

pub async fn index_html() -> Result<Html<String>, StatusCode> {
    let asset = Asset::get("index.html").ok_or(StatusCode::NOT_FOUND)?;
    let html =
        String::from_utf8(asset.data.into_owned()).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Html(html))
}

pub async fn style_css() -> Result<Response, StatusCode> {
    serve_asset("style.css", "text/css")
}

pub async fn app_js() -> Result<Response, StatusCode> {
    serve_asset("app.js", "application/javascript")
}

/// Fetch the feed and derive one marker per feature. A failed fetch answers
/// 502 with no partial result; the legend endpoint is unaffected.
pub async fn get_earthquakes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Marker>>, StatusCode> {
    let feed = state.feed.fetch().await.map_err(|e| {
        error!(url = %state.feed.url(), "Feed fetch failed: {:#}", e);
        StatusCode::BAD_GATEWAY
    })?;

    Ok(Json(markers_from_feed(&feed)))
}

/// Static depth legend, independent of feed data.
pub async fn get_legend() -> Json<Vec<LegendEntry>> {
    Json(legend_entries())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedClient;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn legend_endpoint_returns_five_bands() {
        let Json(entries) = get_legend().await;
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[4].label, "100+");
    }

    #[tokio::test]
    async fn unreachable_feed_answers_bad_gateway_and_legend_survives() {
        // Port 1 refuses connections; the short timeout bounds the test
        // even where the connection hangs instead.
        let feed = FeedClient::new("http://127.0.0.1:1/feed", Duration::from_millis(500)).unwrap();
        let state = AppState { feed: Arc::new(feed) };

        let result = get_earthquakes(State(state)).await;
        assert!(matches!(result, Err(StatusCode::BAD_GATEWAY)));

        // The legend has no feed dependency and still answers in full.
        let Json(entries) = get_legend().await;
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn frontend_assets_are_embedded() {
        assert!(Asset::get("index.html").is_some());
        assert!(Asset::get("app.js").is_some());
        assert!(Asset::get("style.css").is_some());
    }
}
