pub mod adapter;
pub mod config;
pub mod feed;
pub mod highlight;
pub mod registry;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{FillLayerSpec, LabelPresenter, RenderAdapter, ScreenPoint};
pub use feed::{LoadError, ParsedFeed, RecordMalformed, VisitFeedLoader, parse_visit_feed};
pub use highlight::{
    GesturePhase, GestureSample, HighlightController, HighlightState, HighlightTransition, NoLabel,
};
pub use registry::{LayerRegistry, RegisteredLayer};
pub use session::{
    LayerSummary, MapSession, SessionClosed, SessionCommand, SessionHandle, spawn_feed_merge,
};
