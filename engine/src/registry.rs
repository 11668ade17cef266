use std::collections::HashMap;

use tracing::{debug, warn};
use travel_map_shared::{Palette, RegionKind, RegionRecord, Rgb};

use crate::adapter::{FillLayerSpec, RenderAdapter};
use crate::config::{BOUNDARY_REFERENCE_LAYER_ID, HIGHLIGHT_OPACITY, source_url};

/// A region that has a live fill layer, with its cached base style.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredLayer<H> {
    pub name: String,
    pub kind: RegionKind,
    pub base_color: Rgb,
    pub base_opacity: f64,
    pub handle: H,
}

/// Sole owner of the region fill layers and the only writer of their style.
pub struct LayerRegistry<A: RenderAdapter> {
    adapter: A,
    palette: Palette,
    layers: HashMap<String, RegisteredLayer<A::Handle>>,
    warned_missing_boundary: bool,
}

impl<A: RenderAdapter> LayerRegistry<A> {
    pub fn new(adapter: A) -> Self {
        Self::with_palette(adapter, Palette::default())
    }

    pub fn with_palette(adapter: A, palette: Palette) -> Self {
        Self {
            adapter,
            palette,
            layers: HashMap::new(),
            warned_missing_boundary: false,
        }
    }

    /// Adds the country and state vector sources. Returns how many were accepted.
    pub fn install_sources(&mut self) -> usize {
        let mut installed = 0;
        for kind in RegionKind::ALL {
            match self
                .adapter
                .add_vector_source(kind.source_id(), source_url(kind))
            {
                Ok(()) => installed += 1,
                Err(e) => warn!(source = kind.source_id(), error = %e, "failed to add vector source"),
            }
        }
        installed
    }

    /// Creates or replaces the fill layer for `record`. Returns `false` when
    /// the renderer refused the layer, in which case nothing is stored.
    pub fn register(&mut self, record: &RegionRecord, current_year: i32) -> bool {
        let base_opacity = record.base_opacity(current_year);
        let base_color = self.palette.base_for(record.kind);
        let spec = FillLayerSpec {
            id: record.name.clone(),
            source_id: record.kind.source_id().to_string(),
            source_layer_id: record.kind.source_layer_id().to_string(),
            filter_attribute: record.kind.filter_attribute().to_string(),
            filter_value: record.name.clone(),
            fill_color: base_color,
            fill_opacity: base_opacity,
        };

        let below = self
            .adapter
            .boundary_reference_layer(BOUNDARY_REFERENCE_LAYER_ID);
        if below.is_none() && !self.warned_missing_boundary {
            self.warned_missing_boundary = true;
            warn!(
                layer = BOUNDARY_REFERENCE_LAYER_ID,
                "boundary reference layer missing; region fills may cover borders"
            );
        }

        let handle = match self
            .adapter
            .create_or_replace_fill_layer(&spec, below.as_ref())
        {
            Ok(handle) => handle,
            Err(e) => {
                warn!(region = %record.name, error = %e, "renderer refused region layer");
                return false;
            }
        };

        let previous = self.layers.insert(
            record.name.clone(),
            RegisteredLayer {
                name: record.name.clone(),
                kind: record.kind,
                base_color,
                base_opacity,
                handle,
            },
        );
        if let Some(previous) = previous {
            debug!(
                region = %record.name,
                previous_kind = %previous.kind,
                kind = %record.kind,
                "replaced registered region layer"
            );
        }
        true
    }

    /// Puts every layer back to its base color and opacity.
    pub fn reset_all(&mut self) {
        for layer in self.layers.values() {
            self.adapter.set_fill_color(&layer.handle, layer.base_color);
            self.adapter
                .set_fill_opacity(&layer.handle, layer.base_opacity);
        }
    }

    /// Paints `name` in the highlight style. Unregistered names are ignored.
    pub fn highlight(&mut self, name: &str) -> bool {
        let Some(layer) = self.layers.get(name) else {
            return false;
        };
        self.adapter
            .set_fill_color(&layer.handle, self.palette.highlight);
        self.adapter
            .set_fill_opacity(&layer.handle, HIGHLIGHT_OPACITY);
        true
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredLayer<A::Handle>> {
        self.layers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    pub fn layers(&self) -> impl Iterator<Item = &RegisteredLayer<A::Handle>> {
        self.layers.values()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }
}
