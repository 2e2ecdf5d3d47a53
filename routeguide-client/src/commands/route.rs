use anyhow::Result;

use crate::client::{random_route, RouteGuideClient};

pub async fn run(client: &RouteGuideClient) -> Result<()> {
    let points = random_route(&mut rand::thread_rng());
    let summary = client.record_route(points).await?;

    tracing::info!(
        point_count = summary.point_count,
        feature_count = summary.feature_count,
        distance = summary.distance,
        elapsed_time = summary.elapsed_time,
        "Route summary"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
