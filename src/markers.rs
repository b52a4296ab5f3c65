use chrono::{TimeZone, Utc};
use serde::Serialize;
use tracing::warn;

use crate::feed::{Feature, FeatureCollection};

/// Depth band boundaries (km) shared by the color scale and the legend.
pub const DEPTH_THRESHOLDS: [f64; 5] = [0.0, 10.0, 30.0, 50.0, 100.0];

/// Map hypocenter depth to a fixed color. Strict `>` comparisons, so a depth
/// exactly on a boundary falls into the lower band; NaN falls through to the
/// shallowest band.
pub fn depth_color(depth_km: f64) -> &'static str {
    if depth_km > 100.0 {
        "#800026"
    } else if depth_km > 50.0 {
        "#BD0026"
    } else if depth_km > 30.0 {
        "#E31A1C"
    } else if depth_km > 10.0 {
        "#FD8D3C"
    } else {
        "#FEB24C"
    }
}

/// Marker radius in pixels: magnitude * 3, floored at 1 so zero-, negative-,
/// and missing-magnitude events still get a visible dot.
pub fn marker_radius(magnitude: Option<f64>) -> f64 {
    // f64::max returns the non-NaN operand, so a NaN magnitude also floors to 1.
    magnitude.map_or(1.0, |m| (m * 3.0).max(1.0))
}

/// One circle marker, ready for the frontend to draw. Stroke weight, opacity,
/// and fill opacity are fixed client-side.
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub color: &'static str,
    pub popup: String,
}

/// One row of the static depth legend.
#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: String,
}

/// Derive one marker per feature, in feed order. Features without a lon/lat
/// pair cannot be positioned and are skipped rather than aborting the pass.
pub fn markers_from_feed(feed: &FeatureCollection) -> Vec<Marker> {
    feed.features
        .iter()
        .filter_map(|feature| match feature.position() {
            Some((lat, lon)) => {
                let depth = feature.depth_km();
                let magnitude = feature.properties.mag;
                Some(Marker {
                    lat,
                    lon,
                    radius: marker_radius(magnitude),
                    color: depth_color(depth.unwrap_or(f64::NAN)),
                    popup: popup_html(feature, depth),
                })
            }
            None => {
                warn!(place = ?feature.properties.place, "Skipping feature without coordinates");
                None
            }
        })
        .collect()
}

fn popup_html(feature: &Feature, depth: Option<f64>) -> String {
    let place = feature.properties.place.as_deref().unwrap_or("Unknown location");
    let magnitude = match feature.properties.mag {
        Some(m) => m.to_string(),
        None => "n/a".to_string(),
    };
    let depth = match depth {
        Some(d) => format!("{} km", d),
        None => "n/a".to_string(),
    };

    let mut html = format!(
        "<b>Location:</b> {}<br><b>Magnitude:</b> {}<br><b>Depth:</b> {}",
        place, magnitude, depth
    );

    if let Some(time) = event_time(feature) {
        html.push_str(&format!("<br><b>Time:</b> {}", time));
    }

    html
}

fn event_time(feature: &Feature) -> Option<String> {
    let millis = feature.properties.time?;
    let timestamp = Utc.timestamp_millis_opt(millis).single()?;
    Some(timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// Build the five legend rows from the fixed thresholds. The swatch samples
/// the color scale just above each boundary; the last band is open-ended.
pub fn legend_entries() -> Vec<LegendEntry> {
    DEPTH_THRESHOLDS
        .iter()
        .enumerate()
        .map(|(i, &low)| LegendEntry {
            color: depth_color(low + 1.0),
            label: match DEPTH_THRESHOLDS.get(i + 1) {
                Some(high) => format!("{}\u{2013}{}", low, high),
                None => format!("{}+", low),
            },
        })
        .collect()
}
