mod log_adapter;

use tokio::signal;
use tracing_subscriber::EnvFilter;
use travel_map_engine::{
    HighlightController, LayerRegistry, MapSession, VisitFeedLoader, config, spawn_feed_merge,
};
use travel_map_shared::colors::to_hex;
use travel_map_shared::current_year;

use crate::log_adapter::LogAdapter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let loader = match VisitFeedLoader::from_env() {
        Ok(loader) => loader,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            return;
        }
    };

    let mut registry = LayerRegistry::with_palette(LogAdapter::default(), config::palette());
    registry.install_sources();
    tracing::info!(
        sources = registry.adapter().source_count(),
        country = %to_hex(registry.palette().country_base),
        state = %to_hex(registry.palette().state_base),
        "map style ready"
    );

    let (session, handle) = MapSession::new(registry, HighlightController::new());
    let session_task = tokio::spawn(session.run());

    let year = current_year();
    tracing::info!(url = loader.url(), year, "loading visit feed");
    let mut merge = spawn_feed_merge(loader, handle.clone(), year);

    tokio::select! {
        result = &mut merge => {
            match result {
                Ok(Ok(queued)) => tracing::info!(queued, "visit feed merged"),
                Ok(Err(e)) => tracing::warn!(error = %e, "map stays unshaded"),
                Err(e) => tracing::error!(error = %e, "feed merge task failed"),
            }
        }
        () = shutdown_signal() => {
            merge.abort();
            tracing::info!("interrupted before the visit feed arrived");
        }
    }

    match handle.layers().await {
        Ok(layers) => {
            for layer in &layers {
                tracing::info!(
                    region = %layer.name,
                    kind = %layer.kind,
                    opacity = layer.base_opacity,
                    "shaded region"
                );
            }
            tracing::info!(regions = layers.len(), "session summary");
        }
        Err(e) => tracing::error!(error = %e, "could not read session layers"),
    }

    drop(handle);
    match session_task.await {
        Ok(registry) => {
            for name in registry.names() {
                if let Some(fill) = registry.adapter().fill_css(name) {
                    tracing::debug!(region = name, fill = %fill, "final fill");
                }
            }
        }
        Err(e) => tracing::error!(error = %e, "map session task failed"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
