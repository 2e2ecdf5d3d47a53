//! Route Guide Service - location-oriented RPC over HTTP and WebSocket.
//!
//! ## Configuration
//!
//! | Flag | Variable | Description | Default |
//! |------|----------|-------------|---------|
//! | `--host` | `ROUTEGUIDE_HOST` | Listen address | `0.0.0.0` |
//! | `--port` | `ROUTEGUIDE_PORT` | Listen port | `10101` |
//! | `--file-path` | `ROUTEGUIDE_FILE_PATH` | Feature snapshot (JSON) | `./testdata/route_guide_db.json` |
//! | | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /feature?latitude=X&longitude=Y` - Feature at a point
//! - `POST /features` - Features inside a rectangle (NDJSON stream)
//! - `POST /route` - Summarize a route sent as NDJSON points
//! - `GET /chat` - Exchange location notes over a WebSocket
//! - `GET /health` - Health check

use std::sync::Arc;

use clap::Parser;
use routeguide::FeatureStore;
use routeguide_service::{router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "routeguide_service=info,routeguide=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    // A catalog that fails to load is fatal: never serve without one
    let store = match FeatureStore::load(&config.file_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load feature snapshot");
            return Err(e.into());
        }
    };

    tracing::info!(
        file_path = %config.file_path.display(),
        features = store.len(),
        addr = %config.listen_addr(),
        "Starting route guide service"
    );

    let state = Arc::new(AppState::new(store));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;

    tracing::info!("Listening on http://{}", config.listen_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
