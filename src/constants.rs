// Port configuration
pub const DEFAULT_PORT: u16 = 3001;

// USGS "all earthquakes, past week" summary feed
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

// Outbound request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
