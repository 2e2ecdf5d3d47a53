//! The four route guide calls.
//!
//! | Call | Shape | Handler |
//! |------|-------|---------|
//! | `GetFeature(Point) -> Feature` | unary | [`get_feature`] |
//! | `ListFeatures(Rectangle) -> stream Feature` | server-stream | [`list_features`] |
//! | `RecordRoute(stream Point) -> RouteSummary` | client-stream | [`record_route`] |
//! | `RouteChat(stream RouteNote) -> stream RouteNote` | bidirectional | [`route_chat`] |
//!
//! Handlers talk to the caller only through [`Inbound`] and [`Outbound`]. A
//! [`TransportError`](crate::TransportError) from either ends the call at once
//! and is returned unchanged; nothing is retried.

use crate::error::Result;
use crate::notes::NoteBoard;
use crate::point::{Feature, Point, Rectangle, RouteNote, RouteSummary};
use crate::range::in_range;
use crate::route::RouteRecorder;
use crate::store::FeatureStore;
use crate::stream::{Inbound, Outbound};

/// Feature at exactly `point`, or an unnamed feature there.
pub fn get_feature(store: &FeatureStore, point: Point) -> Feature {
    let feature = store.get_exact(point);
    tracing::debug!(%point, found = feature.is_named(), "GetFeature");
    feature
}

/// Stream every stored feature inside `rect`, in store order.
///
/// Stops at the first failed send; whatever was delivered before stays
/// delivered. Returns the number of features sent.
pub async fn list_features<O>(store: &FeatureStore, rect: Rectangle, outbound: &mut O) -> Result<usize>
where
    O: Outbound<Feature> + Send + ?Sized,
{
    let mut sent = 0;
    for feature in store.all_matching(|p| in_range(p, &rect)) {
        outbound.send(feature.clone()).await?;
        sent += 1;
    }
    tracing::debug!(lo = %rect.lo, hi = %rect.hi, sent, "ListFeatures complete");
    Ok(sent)
}

/// Consume a route until its end and summarize it.
///
/// No summary is produced if the inbound stream fails.
pub async fn record_route<I>(store: &FeatureStore, inbound: &mut I) -> Result<RouteSummary>
where
    I: Inbound<Point> + Send + ?Sized,
{
    let mut recorder = RouteRecorder::start();
    while let Some(point) = inbound.receive().await? {
        recorder.record(store, point);
        tracing::trace!(%point, seen = recorder.point_count(), "RecordRoute point");
    }
    let summary = recorder.finish();
    tracing::debug!(
        point_count = summary.point_count,
        feature_count = summary.feature_count,
        distance = summary.distance,
        elapsed_time = summary.elapsed_time,
        "RecordRoute complete"
    );
    Ok(summary)
}

/// Post each inbound note to `board` and send back the location's full
/// history, the new note included.
///
/// Returns once the caller ends its side of the stream. The outbound side is
/// left for the transport to close.
pub async fn route_chat<I, O>(board: &NoteBoard, inbound: &mut I, outbound: &mut O) -> Result<()>
where
    I: Inbound<RouteNote> + Send + ?Sized,
    O: Outbound<RouteNote> + Send + ?Sized,
{
    while let Some(note) = inbound.receive().await? {
        tracing::debug!(location = %note.location, message = %note.message, "RouteChat note");
        let replay = board.post(note);
        for stored in replay {
            outbound.send(stored).await?;
        }
    }
    Ok(())
}
