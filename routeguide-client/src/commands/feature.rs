use anyhow::Result;
use routeguide::Point;

use crate::client::RouteGuideClient;

pub async fn run(client: &RouteGuideClient, latitude: i32, longitude: i32, json: bool) -> Result<()> {
    let feature = client.get_feature(Point::new(latitude, longitude)).await?;

    if json {
        println!("{}", serde_json::to_string(&feature)?);
    } else if feature.is_named() {
        println!("{}", feature.name);
    } else {
        println!("no feature at {}", feature.location);
    }

    Ok(())
}
