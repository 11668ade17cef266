use std::time::Duration;

use travel_map_shared::colors::{Palette, parse_hex_color};
use travel_map_shared::{RegionKind, Rgb};

pub const DEFAULT_VISITED_FEED_URL: &str = "http://justinmiller.io/travel/visited.json";

pub const COUNTRY_SOURCE_URL: &str = "mapbox://justin.d6fe2f0a";
pub const STATE_SOURCE_URL: &str = "mapbox://justin.ceee0bde";

/// Style layer the region fills are inserted below, so border lines stay on top.
pub const BOUNDARY_REFERENCE_LAYER_ID: &str = "admin-3-4-boundaries-bg";

pub const HIGHLIGHT_OPACITY: f64 = 1.0;
pub const DEFAULT_LABEL_OFFSET_Y: f64 = 40.0;

pub const FEED_USER_AGENT: &str = "travel-map/0.1";
pub const DEFAULT_FEED_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FEED_CONNECT_TIMEOUT_SECS: u64 = 3;

pub const fn source_url(kind: RegionKind) -> &'static str {
    match kind {
        RegionKind::Country => COUNTRY_SOURCE_URL,
        RegionKind::State => STATE_SOURCE_URL,
    }
}

pub fn visited_feed_url() -> String {
    std::env::var("VISITED_FEED_URL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_VISITED_FEED_URL.to_string())
}

pub fn feed_http_timeout() -> Duration {
    std::env::var("FEED_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_FEED_HTTP_TIMEOUT_SECS))
}

pub fn feed_connect_timeout() -> Duration {
    std::env::var("FEED_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_FEED_CONNECT_TIMEOUT_SECS))
}

pub fn label_offset_y() -> f64 {
    std::env::var("LABEL_OFFSET_Y")
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(DEFAULT_LABEL_OFFSET_Y)
}

pub fn palette() -> Palette {
    let defaults = Palette::default();
    Palette {
        country_base: color_from_env("COUNTRY_BASE_COLOR").unwrap_or(defaults.country_base),
        state_base: color_from_env("STATE_BASE_COLOR").unwrap_or(defaults.state_base),
        highlight: color_from_env("HIGHLIGHT_COLOR").unwrap_or(defaults.highlight),
    }
}

fn color_from_env(key: &str) -> Option<Rgb> {
    std::env::var(key)
        .ok()
        .and_then(|value| parse_hex_color(&value))
}
