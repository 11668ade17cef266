use chrono::{Datelike, Utc};

/// Opacity of a region visited this year (or later).
pub const RECENT_OPACITY: f64 = 0.9;
/// Opacity once a visit is `FULL_DECAY_YEARS` old or older.
pub const FADED_OPACITY: f64 = 0.4;
pub const FULL_DECAY_YEARS: f64 = 10.0;

const DECAY_SPAN: f64 = 0.5;

/// Fill opacity for a region last visited in `last_visited_year`.
///
/// Decays linearly from 0.9 to 0.4 over ten years. Visits dated in the
/// future count as this year.
pub fn recency_opacity(last_visited_year: i32, current_year: i32) -> f64 {
    let delta = current_year.saturating_sub(last_visited_year).max(0);
    let fraction = (f64::from(delta) / FULL_DECAY_YEARS).min(1.0);
    RECENT_OPACITY - DECAY_SPAN * fraction
}

/// Calendar year of the current UTC date.
pub fn current_year() -> i32 {
    Utc::now().year()
}
