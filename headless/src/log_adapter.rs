use std::collections::HashMap;

use tracing::{debug, info};
use travel_map_engine::config::BOUNDARY_REFERENCE_LAYER_ID;
use travel_map_engine::{FillLayerSpec, RenderAdapter, ScreenPoint};
use travel_map_shared::Rgb;
use travel_map_shared::colors::rgba_css;

/// Renderer stand-in with no geometry: keeps the style in memory and logs it.
#[derive(Debug, Default)]
pub struct LogAdapter {
    sources: HashMap<String, String>,
    fills: HashMap<String, (Rgb, f64)>,
}

impl LogAdapter {
    pub fn fill_css(&self, id: &str) -> Option<String> {
        self.fills
            .get(id)
            .map(|(color, opacity)| rgba_css(*color, *opacity))
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl RenderAdapter for LogAdapter {
    type Handle = String;

    fn add_vector_source(&mut self, source_id: &str, url: &str) -> Result<(), String> {
        info!(source_id, url, "vector source added");
        self.sources.insert(source_id.to_string(), url.to_string());
        Ok(())
    }

    fn boundary_reference_layer(&self, id: &str) -> Option<String> {
        (id == BOUNDARY_REFERENCE_LAYER_ID).then(|| id.to_string())
    }

    fn create_or_replace_fill_layer(
        &mut self,
        spec: &FillLayerSpec,
        below: Option<&String>,
    ) -> Result<String, String> {
        if !self.sources.contains_key(&spec.source_id) {
            return Err(format!("unknown source {}", spec.source_id));
        }
        debug!(
            layer = %spec.id,
            source = %spec.source_layer_id,
            filter = %format!("{} == {}", spec.filter_attribute, spec.filter_value),
            below = below.map(String::as_str).unwrap_or("-"),
            "fill layer created"
        );
        self.fills
            .insert(spec.id.clone(), (spec.fill_color, spec.fill_opacity));
        Ok(spec.id.clone())
    }

    fn set_fill_color(&mut self, handle: &String, color: Rgb) {
        if let Some(fill) = self.fills.get_mut(handle) {
            fill.0 = color;
        }
    }

    fn set_fill_opacity(&mut self, handle: &String, opacity: f64) {
        if let Some(fill) = self.fills.get_mut(handle) {
            fill.1 = opacity;
        }
    }

    fn hit_test(&self, _point: ScreenPoint, _candidates: &[&str]) -> Vec<String> {
        Vec::new()
    }
}
