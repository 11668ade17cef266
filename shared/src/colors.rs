use crate::region::RegionKind;

/// RGB triple handed to the renderer for every region fill.
pub type Rgb = (u8, u8, u8);

pub const COUNTRY_BASE_COLOR: Rgb = (241, 163, 64);
pub const STATE_BASE_COLOR: Rgb = (153, 142, 195);
pub const HIGHLIGHT_COLOR: Rgb = (255, 0, 0);

/// The three logical colors of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub country_base: Rgb,
    pub state_base: Rgb,
    pub highlight: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            country_base: COUNTRY_BASE_COLOR,
            state_base: STATE_BASE_COLOR,
            highlight: HIGHLIGHT_COLOR,
        }
    }
}

impl Palette {
    pub const fn base_for(&self, kind: RegionKind) -> Rgb {
        match kind {
            RegionKind::Country => self.country_base,
            RegionKind::State => self.state_base,
        }
    }
}

/// Parse `#rrggbb` or `rrggbb`. Anything else yields `None`.
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Format as an uppercase `#RRGGBB` string.
pub fn to_hex((r, g, b): Rgb) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Format RGBA as a CSS color string.
pub fn rgba_css((r, g, b): Rgb, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}
