//! Gesture-driven highlighting.
//!
//! Every pointer sample first resets all registered layers, then highlights
//! at most one region. Stale highlights cannot survive a sample, and two
//! regions are never highlighted at the same time.

use tracing::debug;

use crate::adapter::{LabelPresenter, RenderAdapter, ScreenPoint};
use crate::config::{self, DEFAULT_LABEL_OFFSET_Y};
use crate::registry::LayerRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighting(String),
}

impl HighlightState {
    pub fn region(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Highlighting(name) => Some(name.as_str()),
        }
    }
}

/// Phase of a drag or long-press gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GesturePhase {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub phase: GesturePhase,
    pub point: ScreenPoint,
}

impl GestureSample {
    pub const fn new(phase: GesturePhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            point: ScreenPoint::new(x, y),
        }
    }
}

/// What one sample changed. Both fields are `None` when the highlighted
/// region stayed the same.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightTransition {
    pub left: Option<String>,
    pub entered: Option<String>,
}

impl HighlightTransition {
    pub fn is_noop(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Placeholder presenter for gestures that show no label.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLabel;

impl LabelPresenter for NoLabel {
    fn show(&mut self, _name: &str, _anchor: ScreenPoint) {}

    fn hide(&mut self) {}
}

pub struct HighlightController<L: LabelPresenter = NoLabel> {
    state: HighlightState,
    label: Option<L>,
    label_offset_y: f64,
}

impl HighlightController<NoLabel> {
    pub fn new() -> Self {
        Self {
            state: HighlightState::Idle,
            label: None,
            label_offset_y: DEFAULT_LABEL_OFFSET_Y,
        }
    }
}

impl Default for HighlightController<NoLabel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LabelPresenter> HighlightController<L> {
    /// Label controller using the `LABEL_OFFSET_Y` setting.
    pub fn labelled(label: L) -> Self {
        Self::with_label(label, config::label_offset_y())
    }

    /// Controller that also drives a label floating `label_offset_y` above the pointer.
    pub fn with_label(label: L, label_offset_y: f64) -> Self {
        Self {
            state: HighlightState::Idle,
            label: Some(label),
            label_offset_y,
        }
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    pub fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }

    /// Restores every layer to its base style and drops the highlight.
    pub fn clear<A: RenderAdapter>(
        &mut self,
        registry: &mut LayerRegistry<A>,
    ) -> HighlightTransition {
        registry.reset_all();
        match std::mem::take(&mut self.state) {
            HighlightState::Highlighting(prev) => {
                if let Some(label) = self.label.as_mut() {
                    label.hide();
                }
                HighlightTransition {
                    left: Some(prev),
                    entered: None,
                }
            }
            HighlightState::Idle => HighlightTransition::default(),
        }
    }

    /// Keeps the highlight drawn after `name` was registered again. A
    /// replacement layer starts in its base style.
    pub fn region_registered<A: RenderAdapter>(
        &mut self,
        registry: &mut LayerRegistry<A>,
        name: &str,
    ) -> HighlightTransition {
        if self.state.region() != Some(name) {
            return HighlightTransition::default();
        }
        if registry.highlight(name) {
            HighlightTransition::default()
        } else {
            self.clear(registry)
        }
    }

    /// Runs one full transition for a pointer sample.
    pub fn on_sample<A: RenderAdapter>(
        &mut self,
        registry: &mut LayerRegistry<A>,
        sample: GestureSample,
    ) -> HighlightTransition {
        registry.reset_all();

        let target = if sample.phase.is_active() {
            region_at(registry, sample.point)
        } else {
            None
        };
        let target = target.filter(|name| {
            let applied = registry.highlight(name);
            if !applied {
                debug!(region = %name, "pointer over unregistered region");
            }
            applied
        });

        let previous = std::mem::take(&mut self.state);
        let anchor = sample.point.raised(self.label_offset_y);
        match (previous, target) {
            (HighlightState::Highlighting(prev), Some(next)) if prev == next => {
                if let Some(label) = self.label.as_mut() {
                    label.move_to(anchor);
                }
                self.state = HighlightState::Highlighting(next);
                HighlightTransition::default()
            }
            (previous, Some(next)) => {
                if let Some(label) = self.label.as_mut() {
                    label.show(&next, anchor);
                }
                self.state = HighlightState::Highlighting(next.clone());
                HighlightTransition {
                    left: previous.region().map(str::to_string),
                    entered: Some(next),
                }
            }
            (HighlightState::Highlighting(prev), None) => {
                if let Some(label) = self.label.as_mut() {
                    label.hide();
                }
                HighlightTransition {
                    left: Some(prev),
                    entered: None,
                }
            }
            (HighlightState::Idle, None) => HighlightTransition::default(),
        }
    }
}

/// First registered region under `point`, in the renderer's hit order.
fn region_at<A: RenderAdapter>(registry: &LayerRegistry<A>, point: ScreenPoint) -> Option<String> {
    if registry.is_empty() {
        return None;
    }
    let candidates: Vec<&str> = registry.names().collect();
    registry
        .adapter()
        .hit_test(point, &candidates)
        .into_iter()
        .next()
}
