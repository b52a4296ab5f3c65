use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Top-level GeoJSON document returned by the USGS summary feeds.
#[derive(Debug, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One earthquake record from the feed.
#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Properties,
}

/// GeoJSON point geometry. Coordinates are [lon, lat, depth_km];
/// depth may be absent in degenerate entries.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    /// Event time, milliseconds since the Unix epoch.
    pub time: Option<i64>,
}

impl Feature {
    /// Position as (lat, lon); GeoJSON stores (lon, lat).
    pub fn position(&self) -> Option<(f64, f64)> {
        let coords = &self.geometry.as_ref()?.coordinates;
        match coords[..] {
            [lon, lat, ..] => Some((lat, lon)),
            _ => None,
        }
    }

    /// Hypocenter depth in km, if the feed supplied one.
    pub fn depth_km(&self) -> Option<f64> {
        self.geometry.as_ref()?.coordinates.get(2).copied()
    }
}

/// HTTP client for the earthquake feed. One GET per call, no retry, no caching.
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the feed. Network errors, non-2xx statuses, and
    /// malformed JSON all surface as errors; there is no partial result.
    pub async fn fetch(&self) -> Result<FeatureCollection> {
        debug!(url = %self.url, "Fetching earthquake feed");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Feed request to {} failed", self.url))?
            .error_for_status()
            .context("Feed responded with an error status")?;

        let collection: FeatureCollection = response
            .json()
            .await
            .context("Failed to parse feed as GeoJSON")?;

        info!(count = collection.features.len(), "Fetched earthquake feed");
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_usgs_shaped_feed() {
        let json = r#"{
            "type": "FeatureCollection",
            "metadata": {"generated": 1700000000000, "title": "USGS All Earthquakes, Past Week"},
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [10.0, 20.0, 15.0]},
                    "properties": {"mag": 4.5, "place": "Test", "time": 1700000000000, "tsunami": 0}
                }
            ]
        }"#;

        let feed: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(feed.features.len(), 1);

        let feature = &feed.features[0];
        assert_eq!(feature.position(), Some((20.0, 10.0)));
        assert_eq!(feature.depth_km(), Some(15.0));
        assert_eq!(feature.properties.mag, Some(4.5));
        assert_eq!(feature.properties.place.as_deref(), Some("Test"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let feed: FeatureCollection = serde_json::from_str(r#"{"type":"FeatureCollection"}"#).unwrap();
        assert!(feed.features.is_empty());

        let feed: FeatureCollection =
            serde_json::from_str(r#"{"features":[{"geometry":null,"properties":{}}]}"#).unwrap();
        let feature = &feed.features[0];
        assert_eq!(feature.position(), None);
        assert_eq!(feature.depth_km(), None);
        assert_eq!(feature.properties.mag, None);
    }

    #[test]
    fn null_magnitude_is_none() {
        let json = r#"{"features":[{"geometry":{"coordinates":[1.0,2.0,3.0]},"properties":{"mag":null,"place":null}}]}"#;
        let feed: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(feed.features[0].properties.mag, None);
    }

    #[test]
    fn two_element_coordinates_have_no_depth() {
        let json = r#"{"features":[{"geometry":{"coordinates":[10.0,20.0]},"properties":{"mag":1.0}}]}"#;
        let feed: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(feed.features[0].position(), Some((20.0, 10.0)));
        assert_eq!(feed.features[0].depth_km(), None);
    }
}
