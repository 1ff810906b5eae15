//! Development editing server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use currents_entry::{CreatedEntry, EntryFields, EntryStore, EntrySummary, StoreError};
use currents_static::{PageBuilder, PageConfig};

use crate::gui::EDITOR_HTML;
use crate::watcher::FileWatcher;

/// Route of the editing page.
pub const GUI_ROUTE: &str = "/__currents";

/// Prefix of the JSON API.
pub const API_BASE: &str = "/__currents/api";

/// Quiet period before a burst of entry changes triggers a rebuild.
const REBUILD_DEBOUNCE: Duration = Duration::from_millis(150);

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Entries directory, page and markers
    pub page: PageConfig,

    /// Directory served for every path outside the editor routes
    pub site_root: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Rebuild the page when entries change
    pub watch: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            site_root: PathBuf::from("."),
            port: 5174,
            host: "127.0.0.1".to_string(),
            open: true,
            watch: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Errors returned by the JSON API, always as `400 {"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("Request failed: {}", self);
        let body = serde_json::json!({ "error": self.to_string() });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Shared server state.
pub struct ServerState {
    store: EntryStore,
}

impl ServerState {
    /// State serving the entries in `store`.
    pub fn new(store: EntryStore) -> Self {
        Self { store }
    }
}

/// Query string of the read endpoint.
#[derive(Debug, Deserialize)]
struct ReadQuery {
    file: Option<String>,
}

/// Request body of the create and save endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EntryPayload {
    file: Option<String>,
    data: EntryFields,
    body: Option<String>,
}

/// A full entry as sent to the editor.
#[derive(Debug, Serialize)]
struct EntryResponse {
    file: String,
    data: EntryFields,
    body: String,
}

#[derive(Debug, Serialize)]
struct SavedResponse {
    file: String,
}

/// Build the editor routes.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(GUI_ROUTE, get(gui_handler))
        .route(&format!("{API_BASE}/list"), get(list_handler))
        .route(&format!("{API_BASE}/read"), get(read_handler))
        .route(&format!("{API_BASE}/create"), post(create_handler))
        .route(&format!("{API_BASE}/save"), post(save_handler))
        .with_state(state)
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let state = Arc::new(ServerState::new(EntryStore::new(
            &self.config.page.entries_dir,
        )));

        if self.config.watch {
            spawn_rebuilder(self.config.page.clone())?;
        }

        let app = router(state).fallback_service(ServeDir::new(&self.config.site_root));

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        let url = format!("http://{}{}", addr, GUI_ROUTE);
        tracing::info!("Editor at {}", url);

        if self.config.open {
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Watch the entries directory and rebuild the page after each burst of changes.
fn spawn_rebuilder(page: PageConfig) -> Result<(), ServerError> {
    std::fs::create_dir_all(&page.entries_dir)
        .map_err(|e| ServerError::WatchError(format!("{}: {}", page.entries_dir.display(), e)))?;

    let (watcher, mut rx) = FileWatcher::new(&page.entries_dir)
        .map_err(|e| ServerError::WatchError(e.to_string()))?;

    tracing::info!("Watching {}", page.entries_dir.display());

    let builder = Arc::new(PageBuilder::new(page));
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            tracing::debug!("Entry changed: {}", event.path().display());

            tokio::time::sleep(REBUILD_DEBOUNCE).await;
            while rx.try_recv().is_ok() {}

            let builder = Arc::clone(&builder);
            match tokio::task::spawn_blocking(move || builder.build()).await {
                Ok(Ok(result)) => tracing::info!(
                    "Rebuilt {} with {} entries in {}ms",
                    result.page_path.display(),
                    result.rendered,
                    result.duration_ms
                ),
                Ok(Err(e)) => tracing::warn!("Rebuild failed: {}", e),
                Err(e) => tracing::warn!("Rebuild task failed: {}", e),
            }
        }
        // Keep watcher alive
        drop(watcher);
    });

    Ok(())
}

async fn gui_handler() -> Html<&'static str> {
    Html(EDITOR_HTML)
}

async fn list_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<EntrySummary>>, ApiError> {
    Ok(Json(state.store.list()?))
}

async fn read_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ReadQuery>,
) -> Result<Json<EntryResponse>, ApiError> {
    let file = query.file.unwrap_or_default();
    let entry = state.store.read(&file)?;

    Ok(Json(EntryResponse {
        file: entry.file_name,
        data: entry.fields,
        body: entry.body,
    }))
}

async fn create_handler(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<EntryPayload>, JsonRejection>,
) -> Result<Json<CreatedEntry>, ApiError> {
    let Json(payload) = payload?;
    let body = payload.body.unwrap_or_default();

    Ok(Json(state.store.create(payload.data, &body)?))
}

async fn save_handler(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<EntryPayload>, JsonRejection>,
) -> Result<Json<SavedResponse>, ApiError> {
    let Json(payload) = payload?;
    let file = payload.file.unwrap_or_default();
    let body = payload.body.unwrap_or_default();

    let file = state.store.save(&file, payload.data, &body)?;
    Ok(Json(SavedResponse { file }))
}
