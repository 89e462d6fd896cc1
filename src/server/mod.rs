// HTTP backend for the catalog.
// Wires the item store, stats cache, and file watcher into an axum router.

pub mod handlers;
pub mod response;

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{CatalogError, Result};
use crate::stats::StatsCache;
use crate::store::{FileWatcher, ItemStore};

pub use response::ErrorBody;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<ItemStore>,
    pub stats: Arc<StatsCache>,
}

impl AppState {
    pub fn new(store: Arc<ItemStore>, stats: Arc<StatsCache>) -> Self {
        Self { store, stats }
    }
}

/// Build the API router without CORS.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route("/api/items/count", get(handlers::count_items))
        .route("/api/items/:id", get(handlers::get_item))
        .route("/api/stats", get(handlers::get_stats))
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy allowing only the given front-end origins.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| CatalogError::invalid(format!("Invalid CORS origin: {origin}")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]))
}

/// Running backend: state plus the background stats refresher and file watcher.
///
/// Dropping it stops both background tasks.
#[derive(Debug)]
pub struct Backend {
    pub state: AppState,
    refresher: JoinHandle<()>,
    watcher: JoinHandle<()>,
}

impl Backend {
    /// Prepare the data file, compute initial stats, and start watching for changes.
    pub async fn start(config: &ServerConfig) -> Result<Self> {
        let store = Arc::new(ItemStore::new(&config.data_path));
        store.ensure_exists().await?;

        let stats = StatsCache::new(Arc::clone(&store));
        let initial = stats.recompute().await;
        info!(
            path = %config.data_path.display(),
            total = initial.total,
            "catalog loaded"
        );

        let refresher = stats.spawn_refresher();
        let watcher = {
            let stats = Arc::clone(&stats);
            FileWatcher::new(&config.data_path, config.watch_interval)
                .spawn(move || stats.invalidate())
        };

        Ok(Self {
            state: AppState::new(store, stats),
            refresher,
            watcher,
        })
    }

    /// Router with the configured CORS policy applied.
    pub fn router(&self, config: &ServerConfig) -> Result<Router> {
        Ok(build_router(self.state.clone()).layer(cors_layer(&config.allowed_origins)?))
    }
}

impl Drop for Backend {
    fn drop(&mut self) {
        self.refresher.abort();
        self.watcher.abort();
    }
}

/// Run the backend until `shutdown` resolves.
pub async fn serve<F>(config: &ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let backend = Backend::start(config).await?;
    let app = backend.router(config)?;

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    info!(address = %addr, "catalog backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("catalog backend stopped");
    Ok(())
}
