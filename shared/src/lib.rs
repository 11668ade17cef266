pub mod colors;
pub mod recency;
pub mod region;

pub use colors::{Palette, Rgb};
pub use recency::{current_year, recency_opacity};
pub use region::{RegionKind, RegionRecord};
