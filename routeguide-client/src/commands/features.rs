use anyhow::Result;
use routeguide::{Point, Rectangle};

use crate::client::RouteGuideClient;

pub async fn run(
    client: &RouteGuideClient,
    lo: (i32, i32),
    hi: (i32, i32),
    json: bool,
) -> Result<()> {
    let rect = Rectangle::new(Point::new(lo.0, lo.1), Point::new(hi.0, hi.1));
    tracing::info!(lo = %rect.lo, hi = %rect.hi, "Looking for features");

    let features = client.list_features(rect).await?;

    for feature in &features {
        if json {
            println!("{}", serde_json::to_string(feature)?);
        } else {
            println!(
                "{:>10.5} {:>11.5}  {}",
                feature.location.lat_degrees(),
                feature.location.lon_degrees(),
                if feature.is_named() { feature.name.as_str() } else { "(unnamed)" }
            );
        }
    }

    if !json {
        eprintln!("{} feature(s)", features.len());
    }

    Ok(())
}
