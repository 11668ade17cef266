use std::fmt;

use serde::{Deserialize, Serialize};

use crate::recency::recency_opacity;

/// Which vector source a region is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Country,
    State,
}

impl RegionKind {
    pub const ALL: [RegionKind; 2] = [RegionKind::Country, RegionKind::State];

    pub const fn source_id(self) -> &'static str {
        match self {
            Self::Country => "countries",
            Self::State => "states",
        }
    }

    pub const fn source_layer_id(self) -> &'static str {
        match self {
            Self::Country => "countries",
            Self::State => "states",
        }
    }

    /// Feature attribute matched against the region name. The state tiles
    /// carry their name under `gn_name`, not `name`.
    pub const fn filter_attribute(self) -> &'static str {
        match self {
            Self::Country => "name",
            Self::State => "gn_name",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Country => f.write_str("country"),
            Self::State => f.write_str("state"),
        }
    }
}

/// One visited region as resolved from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    pub kind: RegionKind,
    pub last_visited_year: i32,
}

impl RegionRecord {
    pub fn new(name: impl Into<String>, kind: RegionKind, last_visited_year: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            last_visited_year,
        }
    }

    pub fn base_opacity(&self, current_year: i32) -> f64 {
        recency_opacity(self.last_visited_year, current_year)
    }
}
