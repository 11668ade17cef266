//! In-memory doubles for the renderer and label seams.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use travel_map_shared::Rgb;

use crate::adapter::{FillLayerSpec, LabelPresenter, RenderAdapter, ScreenPoint};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    AddSource { source_id: String, url: String },
    CreateLayer { spec: FillLayerSpec, below: Option<String> },
    SetColor { layer: String, color: Rgb },
    SetOpacity { layer: String, opacity: f64 },
}

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<Call>,
    /// Current fill per layer. Survives `take_calls`.
    styles: HashMap<String, (Rgb, f64)>,
    hits: Vec<(ScreenPoint, Vec<String>)>,
    refused: HashSet<String>,
    boundary_missing: bool,
}

/// Records every style call. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingAdapter {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingAdapter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn without_boundary() -> Self {
        let adapter = Self::default();
        adapter.lock().boundary_missing = true;
        adapter
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().expect("recording adapter lock")
    }

    pub(crate) fn refuse(&self, id: &str) {
        self.lock().refused.insert(id.to_string());
    }

    /// Hit-test result reported at `point`, in the given order.
    pub(crate) fn set_hits(&self, point: ScreenPoint, ids: &[&str]) {
        let ids = ids.iter().map(|id| id.to_string()).collect();
        let mut inner = self.lock();
        inner.hits.retain(|(p, _)| *p != point);
        inner.hits.push((point, ids));
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub(crate) fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.lock().calls)
    }

    /// Current fill of every layer created so far.
    pub(crate) fn styles(&self) -> HashMap<String, (Rgb, f64)> {
        self.lock().styles.clone()
    }

    fn record(&self, call: Call) {
        let mut inner = self.lock();
        apply_call(&mut inner.styles, &call);
        inner.calls.push(call);
    }
}

/// Styles touched by `calls` alone. Layers created outside the slice start
/// black and transparent.
pub(crate) fn replay(calls: &[Call]) -> HashMap<String, (Rgb, f64)> {
    let mut styles = HashMap::new();
    for call in calls {
        apply_call(&mut styles, call);
    }
    styles
}

pub(crate) fn apply_call(styles: &mut HashMap<String, (Rgb, f64)>, call: &Call) {
    match call {
        Call::AddSource { .. } => {}
        Call::CreateLayer { spec, .. } => {
            styles.insert(spec.id.clone(), (spec.fill_color, spec.fill_opacity));
        }
        Call::SetColor { layer, color } => {
            styles.entry(layer.clone()).or_insert(((0, 0, 0), 0.0)).0 = *color;
        }
        Call::SetOpacity { layer, opacity } => {
            styles.entry(layer.clone()).or_insert(((0, 0, 0), 0.0)).1 = *opacity;
        }
    }
}

impl RenderAdapter for RecordingAdapter {
    type Handle = String;

    fn add_vector_source(&mut self, source_id: &str, url: &str) -> Result<(), String> {
        self.record(Call::AddSource {
            source_id: source_id.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    fn boundary_reference_layer(&self, id: &str) -> Option<String> {
        if self.lock().boundary_missing {
            None
        } else {
            Some(id.to_string())
        }
    }

    fn create_or_replace_fill_layer(
        &mut self,
        spec: &FillLayerSpec,
        below: Option<&String>,
    ) -> Result<String, String> {
        if self.lock().refused.contains(&spec.id) {
            return Err(format!("layer {} rejected", spec.id));
        }
        self.record(Call::CreateLayer {
            spec: spec.clone(),
            below: below.cloned(),
        });
        Ok(spec.id.clone())
    }

    fn set_fill_color(&mut self, handle: &String, color: Rgb) {
        self.record(Call::SetColor {
            layer: handle.clone(),
            color,
        });
    }

    fn set_fill_opacity(&mut self, handle: &String, opacity: f64) {
        self.record(Call::SetOpacity {
            layer: handle.clone(),
            opacity,
        });
    }

    fn hit_test(&self, point: ScreenPoint, candidates: &[&str]) -> Vec<String> {
        let inner = self.lock();
        inner
            .hits
            .iter()
            .find(|(p, _)| *p == point)
            .map(|(_, ids)| {
                ids.iter()
                    .filter(|id| candidates.contains(&id.as_str()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LabelEvent {
    Show(String, ScreenPoint),
    Move(ScreenPoint),
    Hide,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingLabel {
    events: Arc<Mutex<Vec<LabelEvent>>>,
}

impl RecordingLabel {
    pub(crate) fn events(&self) -> Vec<LabelEvent> {
        self.events.lock().expect("recording label lock").clone()
    }

    fn push(&self, event: LabelEvent) {
        self.events.lock().expect("recording label lock").push(event);
    }
}

impl LabelPresenter for RecordingLabel {
    fn show(&mut self, name: &str, anchor: ScreenPoint) {
        self.push(LabelEvent::Show(name.to_string(), anchor));
    }

    fn move_to(&mut self, anchor: ScreenPoint) {
        self.push(LabelEvent::Move(anchor));
    }

    fn hide(&mut self) {
        self.push(LabelEvent::Hide);
    }
}

#[cfg(test)]
mod tests {
    use travel_map_shared::colors::{COUNTRY_BASE_COLOR, HIGHLIGHT_COLOR};

    use super::{Call, RecordingAdapter, replay};
    use crate::adapter::{FillLayerSpec, RenderAdapter};

    fn spec(id: &str) -> FillLayerSpec {
        FillLayerSpec {
            id: id.to_string(),
            source_id: "countries".to_string(),
            source_layer_id: "countries".to_string(),
            filter_attribute: "name".to_string(),
            filter_value: id.to_string(),
            fill_color: COUNTRY_BASE_COLOR,
            fill_opacity: 0.5,
        }
    }

    #[test]
    fn styles_survive_taking_the_call_log() {
        let mut adapter = RecordingAdapter::new();
        let handle = adapter
            .create_or_replace_fill_layer(&spec("Peru"), None)
            .expect("layer should be created");
        adapter.take_calls();

        adapter.set_fill_color(&handle, HIGHLIGHT_COLOR);
        assert_eq!(adapter.styles()["Peru"], (HIGHLIGHT_COLOR, 0.5));
        adapter.take_calls();
        assert_eq!(adapter.styles()["Peru"], (HIGHLIGHT_COLOR, 0.5));
    }

    #[test]
    fn replay_covers_layers_created_outside_the_slice() {
        let calls = [Call::SetColor {
            layer: "Peru".to_string(),
            color: HIGHLIGHT_COLOR,
        }];
        assert_eq!(replay(&calls)["Peru"].0, HIGHLIGHT_COLOR);
    }
}
