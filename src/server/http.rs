use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::signal;

use super::{ServerConfig, ServerError};
#[cfg(feature = "emitter")]
use crate::broadcast::EmitterSink;
use crate::broadcast::{LogSink, TracingSink};
use crate::dispatcher::{ApiResponse, Dispatcher};
use crate::store::CollectionStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub sink: Arc<dyn LogSink>,
}

/// Build the axum `Router`. Every request lands in one handler, which
/// splits API traffic from everything else by prefix.
pub fn router(dispatcher: Arc<Dispatcher>, sink: Arc<dyn LogSink>) -> Router {
    Router::new()
        .fallback(handle_request)
        .with_state(AppState { dispatcher, sink })
}

/// The body is drained by the `Bytes` extractor before anything runs, so a
/// client that disconnects mid-body never reaches the store.
async fn handle_request(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path();

    if state.dispatcher.is_api_path(path) {
        announce(state.sink.as_ref(), format!("REST: {} {}", method, uri));
        state
            .dispatcher
            .dispatch(&method, path, &body)
            .await
            .into_response()
    } else {
        announce(state.sink.as_ref(), format!(" WWW: {} {}", method, uri));
        ApiResponse::text(StatusCode::NOT_FOUND, "Not Found").into_response()
    }
}

fn announce(sink: &dyn LogSink, line: String) {
    if let Err(e) = sink.send(&line) {
        tracing::warn!("Dropped log line {:?}: {}", line, e);
    }
}

/// HTTP server for a data directory.
pub struct MockServer {
    dispatcher: Arc<Dispatcher>,
    sink: Arc<dyn LogSink>,
    config: ServerConfig,
}

impl MockServer {
    /// Open the data directory and prepare the server.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let store = CollectionStore::open(&config.data_dir, config.format)?;
        let dispatcher = Dispatcher::new(Arc::new(store), config.prefix.clone())
            .with_policy(config.status_policy);

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            sink: Arc::new(TracingSink),
            config,
        })
    }

    /// Mirror request lines to another sink instead of the tracing output.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Mirror request lines to `listener` through an event emitter.
    ///
    /// Replaces the current sink. The listener runs off the request path.
    #[cfg(feature = "emitter")]
    pub fn with_listener<F>(self, listener: F) -> Result<Self, ServerError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let sink = EmitterSink::new(event_emitter_rs::EventEmitter::new());
        sink.on_line(listener)?;
        Ok(self.with_sink(Arc::new(sink)))
    }

    pub fn router(&self) -> Router {
        router(self.dispatcher.clone(), self.sink.clone())
    }

    /// Bind and serve until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = self.router();
        let addr = self.config.addr();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("Server running at http://{}", listener.local_addr()?);
        tracing::info!(
            "Serving {} under {}",
            self.dispatcher.store().root().display(),
            self.config.prefix
        );
        tracing::info!("Collection files are {}", self.config.format);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shut down gracefully");
        Ok(())
    }
}

/// Listen for SIGTERM and SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
