use anyhow::Result;
use routeguide::{Point, Rectangle};

use crate::client::{chat_script, random_route, RouteGuideClient};

/// Run the reference scenario. A failing step is logged and the next one
/// still runs.
pub async fn run(client: &RouteGuideClient) -> Result<()> {
    // Looking for a valid feature, then a missing one
    for point in [Point::new(409146138, -746188906), Point::new(0, 0)] {
        match client.get_feature(point).await {
            Ok(feature) => tracing::info!(
                name = %feature.name,
                latitude = feature.location.latitude,
                longitude = feature.location.longitude,
                "Found"
            ),
            Err(e) => tracing::error!(error = %e, "GetFeature failed"),
        }
    }

    let rect = Rectangle::new(
        Point::new(400000000, -750000000),
        Point::new(420000000, -730000000),
    );
    tracing::info!(lo = %rect.lo, hi = %rect.hi, "Looking for features");
    if let Err(e) = client.list_features(rect).await {
        tracing::error!(error = %e, "ListFeatures failed");
    }

    let route = random_route(&mut rand::thread_rng());
    match client.record_route(route).await {
        Ok(summary) => tracing::info!(
            point_count = summary.point_count,
            feature_count = summary.feature_count,
            distance = summary.distance,
            elapsed_time = summary.elapsed_time,
            "Route summary"
        ),
        Err(e) => tracing::error!(error = %e, "RecordRoute failed"),
    }

    if let Err(e) = client.route_chat(chat_script()).await {
        tracing::error!(error = %e, "RouteChat failed");
    }

    Ok(())
}
