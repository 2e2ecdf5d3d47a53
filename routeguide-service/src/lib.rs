//! Route Guide Service Library
//!
//! HTTP and WebSocket transport for the route guide calls.
//! This library is used by both the routeguide-service binary and integration tests.

pub mod config;
pub mod handlers;
pub mod transport;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use routeguide::{FeatureStore, NoteBoard};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers.
pub struct AppState {
    /// Feature catalog, read-only after startup.
    pub store: FeatureStore,
    /// Notes exchanged through `RouteChat`.
    pub notes: NoteBoard,
}

impl AppState {
    pub fn new(store: FeatureStore) -> Self {
        Self {
            store,
            notes: NoteBoard::new(),
        }
    }
}

/// Build the service router.
///
/// | Route | Call |
/// |-------|------|
/// | `GET /feature?latitude=..&longitude=..` | GetFeature |
/// | `POST /features` | ListFeatures (NDJSON response) |
/// | `POST /route` | RecordRoute (NDJSON request) |
/// | `GET /chat` | RouteChat (WebSocket) |
/// | `GET /health` | Health check |
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/feature", get(handlers::get_feature))
        .route("/features", post(handlers::list_features))
        .route("/route", post(handlers::record_route))
        .route("/chat", get(handlers::route_chat))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use config::Config;
pub use handlers::{ErrorResponse, HealthResponse, PointQuery, NDJSON_CONTENT_TYPE};
