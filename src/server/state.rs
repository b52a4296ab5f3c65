use std::sync::Arc;

use crate::feed::FeedClient;

// Application state for sharing the feed client across handlers
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedClient>,
}
