//! HTTP request handlers for the route guide service.
//!
//! Each handler adapts one call shape to HTTP and hands the actual work to
//! [`routeguide::session`].

use axum::{
    body::Body,
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::{SinkExt, StreamExt};
use routeguide::stream::encode_line;
use routeguide::{session, Feature, NdjsonInbound, Point, Rectangle, TransportError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::transport::{WsInbound, WsOutbound};
use crate::AppState;

/// Content type of streamed responses and requests.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Features buffered between the `ListFeatures` task and the response body.
const LIST_BUFFER: usize = 16;

/// Query parameters for the feature endpoint.
#[derive(Debug, Deserialize)]
pub struct PointQuery {
    /// Latitude in degrees × 10^7.
    pub latitude: i32,
    /// Longitude in degrees × 10^7.
    pub longitude: i32,
}

impl From<PointQuery> for Point {
    fn from(query: PointQuery) -> Self {
        Point::new(query.latitude, query.longitude)
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Number of features in the catalog.
    pub features: usize,
    /// Number of locations holding notes.
    pub note_locations: usize,
}

/// `GetFeature`: the feature at the given point.
///
/// Always `200 OK`. When nothing is stored at the point the response is a
/// feature with an empty name at the queried location.
pub async fn get_feature(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PointQuery>,
) -> Json<Feature> {
    let point = Point::from(query);
    let feature = session::get_feature(&state.store, point);

    tracing::info!(
        latitude = point.latitude,
        longitude = point.longitude,
        name = %feature.name,
        "GetFeature"
    );

    Json(feature)
}

/// `ListFeatures`: stream the features inside a rectangle.
///
/// The response body is NDJSON, one feature per line, in catalog order. If
/// the client goes away mid-stream the producing task stops at its next send.
pub async fn list_features(
    State(state): State<Arc<AppState>>,
    Json(rect): Json<Rectangle>,
) -> impl IntoResponse {
    let (mut tx, rx) = mpsc::channel::<Feature>(LIST_BUFFER);

    tokio::spawn(async move {
        match session::list_features(&state.store, rect, &mut tx).await {
            Ok(sent) => tracing::info!(lo = %rect.lo, hi = %rect.hi, sent, "ListFeatures"),
            Err(e) => tracing::warn!(lo = %rect.lo, hi = %rect.hi, error = %e, "ListFeatures aborted"),
        }
    });

    let lines = ReceiverStream::new(rx).map(|feature| encode_line(&feature));

    (
        [(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)],
        Body::from_stream(lines),
    )
}

/// `RecordRoute`: summarize a route sent as an NDJSON request body.
///
/// # Returns
///
/// - `200 OK` with the route summary once the body has been fully consumed
/// - `400 Bad Request` if a line is not a valid point
/// - `500 Internal Server Error` if the body cannot be read
pub async fn record_route(State(state): State<Arc<AppState>>, body: Body) -> Response {
    let mut inbound = NdjsonInbound::new(Box::pin(body.into_data_stream()));

    match session::record_route(&state.store, &mut inbound).await {
        Ok(summary) => {
            tracing::info!(
                point_count = summary.point_count,
                feature_count = summary.feature_count,
                distance = summary.distance,
                elapsed_time = summary.elapsed_time,
                "RecordRoute"
            );
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => error_response("RecordRoute", e),
    }
}

/// `RouteChat`: upgrade to a WebSocket and exchange notes.
pub async fn route_chat(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| chat_session(state, socket))
}

async fn chat_session(state: Arc<AppState>, socket: WebSocket) {
    let (sink, stream) = socket.split();
    let mut inbound = WsInbound::new(stream);
    let mut outbound = WsOutbound::new(sink);

    match session::route_chat(&state.notes, &mut inbound, &mut outbound).await {
        Ok(()) => {
            tracing::info!(note_locations = state.notes.location_count(), "RouteChat complete");
            // The peer already half-closed; finish the handshake on our side
            if let Err(e) = outbound.into_inner().close().await {
                tracing::debug!(error = %e, "RouteChat close");
            }
        }
        Err(e) => tracing::warn!(error = %e, "RouteChat aborted"),
    }
}

/// Create an error response for a failed call.
fn error_response(call: &'static str, e: TransportError) -> Response {
    let status = match &e {
        TransportError::Decode(_) | TransportError::Protocol(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    tracing::warn!(call, error = %e, "Call failed");

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint.
///
/// Returns service status, version and catalog size.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: state.store.len(),
        note_locations: state.notes.location_count(),
    })
}
