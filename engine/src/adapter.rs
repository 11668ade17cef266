//! Seams to the external map renderer and label view.
//!
//! The engine never draws anything itself. Everything it knows about the map
//! goes through [`RenderAdapter`], which a mapping framework implements on the
//! thread that owns its style.

use travel_map_shared::Rgb;

/// Pointer location in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The same point moved `dy` units toward the top of the view.
    pub fn raised(self, dy: f64) -> Self {
        Self {
            x: self.x,
            y: self.y - dy,
        }
    }
}

/// Everything needed to create one region fill layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FillLayerSpec {
    /// Layer identifier; equal to the region name.
    pub id: String,
    pub source_id: String,
    pub source_layer_id: String,
    /// Only features whose `filter_attribute` equals `filter_value` are filled.
    pub filter_attribute: String,
    pub filter_value: String,
    pub fill_color: Rgb,
    pub fill_opacity: f64,
}

/// Style operations the engine needs from the map renderer.
///
/// Implementations are usually bound to a UI thread and need not be `Send`.
pub trait RenderAdapter {
    /// Opaque reference to a style layer owned by the renderer.
    type Handle: Clone;

    fn add_vector_source(&mut self, source_id: &str, url: &str) -> Result<(), String>;

    /// Looks up the layer region fills must stay beneath.
    fn boundary_reference_layer(&self, id: &str) -> Option<Self::Handle>;

    /// Creates the layer, or replaces an existing one with the same id.
    /// With `below` set, the layer is inserted directly beneath it.
    fn create_or_replace_fill_layer(
        &mut self,
        spec: &FillLayerSpec,
        below: Option<&Self::Handle>,
    ) -> Result<Self::Handle, String>;

    fn set_fill_color(&mut self, handle: &Self::Handle, color: Rgb);

    fn set_fill_opacity(&mut self, handle: &Self::Handle, opacity: f64);

    /// Ids of the `candidates` layers with a feature under `point`, topmost first.
    fn hit_test(&self, point: ScreenPoint, candidates: &[&str]) -> Vec<String>;
}

/// Transient label naming the highlighted region.
pub trait LabelPresenter {
    /// Fade the label in above the pointer.
    fn show(&mut self, name: &str, anchor: ScreenPoint);

    /// Follow the pointer while the same region stays highlighted.
    fn move_to(&mut self, _anchor: ScreenPoint) {}

    /// Fade the label out.
    fn hide(&mut self);
}
