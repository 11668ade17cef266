//! The single writer for a map's region layers.
//!
//! Feed registration and pointer gestures both mutate the same layers, and the
//! renderer behind them is usually bound to one thread. [`MapSession`] owns the
//! registry and the controller and applies queued [`SessionCommand`]s one at a
//! time, so the two streams can never interleave inside an operation.
//!
//! `run` does not require `Send`: drive it with `tokio::task::spawn_local` when
//! the adapter is UI-affine, or `tokio::spawn` when it is not.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use travel_map_shared::{RegionKind, RegionRecord, Rgb};

use crate::adapter::{LabelPresenter, RenderAdapter};
use crate::feed::{LoadError, VisitFeedLoader};
use crate::highlight::{GestureSample, HighlightController, NoLabel};
use crate::registry::LayerRegistry;

#[derive(Debug)]
pub enum SessionCommand {
    Register {
        record: RegionRecord,
        current_year: i32,
    },
    Gesture(GestureSample),
    ResetAll,
    Highlighted(oneshot::Sender<Option<String>>),
    Layers(oneshot::Sender<Vec<LayerSummary>>),
}

/// Base style of one registered region, detached from the renderer handle.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSummary {
    pub name: String,
    pub kind: RegionKind,
    pub base_color: Rgb,
    pub base_opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("map session has stopped")]
pub struct SessionClosed;

/// Cloneable sender side of a [`MapSession`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// Queues a registration. Returns `false` once the session has stopped.
    pub fn register(&self, record: RegionRecord, current_year: i32) -> bool {
        self.send(SessionCommand::Register {
            record,
            current_year,
        })
    }

    /// Queues a pointer sample. Never blocks, so it is safe to call from an
    /// event handler.
    pub fn gesture(&self, sample: GestureSample) -> bool {
        self.send(SessionCommand::Gesture(sample))
    }

    pub fn reset_all(&self) -> bool {
        self.send(SessionCommand::ResetAll)
    }

    /// Region highlighted once every command queued before this call has run.
    pub async fn highlighted(&self) -> Result<Option<String>, SessionClosed> {
        let (tx, rx) = oneshot::channel();
        if !self.send(SessionCommand::Highlighted(tx)) {
            return Err(SessionClosed);
        }
        rx.await.map_err(|_| SessionClosed)
    }

    /// Registered layers, sorted by name.
    pub async fn layers(&self) -> Result<Vec<LayerSummary>, SessionClosed> {
        let (tx, rx) = oneshot::channel();
        if !self.send(SessionCommand::Layers(tx)) {
            return Err(SessionClosed);
        }
        rx.await.map_err(|_| SessionClosed)
    }

    fn send(&self, command: SessionCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}

pub struct MapSession<A: RenderAdapter, L: LabelPresenter = NoLabel> {
    registry: LayerRegistry<A>,
    controller: HighlightController<L>,
    rx: mpsc::UnboundedReceiver<SessionCommand>,
}

impl<A: RenderAdapter, L: LabelPresenter> MapSession<A, L> {
    pub fn new(
        registry: LayerRegistry<A>,
        controller: HighlightController<L>,
    ) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            registry,
            controller,
            rx,
        };
        (session, SessionHandle { tx })
    }

    /// Processes commands until every [`SessionHandle`] is dropped, then
    /// hands the registry back.
    pub async fn run(mut self) -> LayerRegistry<A> {
        info!("map session starting");
        while let Some(command) = self.rx.recv().await {
            self.apply(command);
        }
        debug!(layers = self.registry.len(), "map session stopped");
        self.registry
    }

    pub fn apply(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Register {
                record,
                current_year,
            } => {
                self.registry.register(&record, current_year);
                self.controller
                    .region_registered(&mut self.registry, &record.name);
            }
            SessionCommand::Gesture(sample) => {
                let transition = self.controller.on_sample(&mut self.registry, sample);
                if !transition.is_noop() {
                    debug!(
                        left = transition.left.as_deref().unwrap_or("-"),
                        entered = transition.entered.as_deref().unwrap_or("-"),
                        "highlight changed"
                    );
                }
            }
            SessionCommand::ResetAll => {
                let transition = self.controller.clear(&mut self.registry);
                if let Some(left) = transition.left {
                    debug!(left = %left, "highlight cleared");
                }
            }
            SessionCommand::Highlighted(reply) => {
                let _ = reply.send(self.controller.state().region().map(str::to_string));
            }
            SessionCommand::Layers(reply) => {
                let _ = reply.send(self.layer_summaries());
            }
        }
    }

    pub fn registry(&self) -> &LayerRegistry<A> {
        &self.registry
    }

    pub fn controller(&self) -> &HighlightController<L> {
        &self.controller
    }

    fn layer_summaries(&self) -> Vec<LayerSummary> {
        let mut layers: Vec<LayerSummary> = self
            .registry
            .layers()
            .map(|layer| LayerSummary {
                name: layer.name.clone(),
                kind: layer.kind,
                base_color: layer.base_color,
                base_opacity: layer.base_opacity,
            })
            .collect();
        layers.sort_by(|a, b| a.name.cmp(&b.name));
        layers
    }
}

/// Loads the feed in the background and queues one registration per record.
/// Resolves to the number of records queued. On failure nothing is merged.
pub fn spawn_feed_merge(
    loader: VisitFeedLoader,
    handle: SessionHandle,
    current_year: i32,
) -> JoinHandle<Result<usize, LoadError>> {
    tokio::spawn(async move {
        let records = match loader.load().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, url = loader.url(), "visit feed merge skipped");
                return Err(e);
            }
        };

        let mut queued = 0;
        for record in records {
            if !handle.register(record, current_year) {
                warn!("map session stopped before the visit feed was merged");
                break;
            }
            queued += 1;
        }
        info!(queued, current_year, "queued visited regions for registration");
        Ok(queued)
    })
}
