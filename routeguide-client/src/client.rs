//! Client side of the four route guide calls.

use anyhow::{Context, Result};
use futures::{stream, SinkExt, StreamExt};
use rand::Rng;
use reqwest::header::CONTENT_TYPE;
use routeguide::stream::encode_line;
use routeguide::{Feature, Inbound, NdjsonInbound, Point, Rectangle, RouteNote, RouteSummary};
use tokio_tungstenite::{connect_async, tungstenite::Message};

const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Shortest route `random_route` generates.
pub const MIN_ROUTE_LEN: usize = 2;
/// Longest route `random_route` generates.
pub const MAX_ROUTE_LEN: usize = 101;

/// A random point on whole degrees: latitude in `[-90, 90)`, longitude in
/// `[-180, 180)`.
pub fn random_point<R: Rng>(rng: &mut R) -> Point {
    let lat: i32 = rng.gen_range(-90..90);
    let lon: i32 = rng.gen_range(-180..180);
    Point::from_degrees(f64::from(lat), f64::from(lon))
}

/// A random route of `MIN_ROUTE_LEN..=MAX_ROUTE_LEN` random points.
pub fn random_route<R: Rng>(rng: &mut R) -> Vec<Point> {
    let len = rng.gen_range(MIN_ROUTE_LEN..=MAX_ROUTE_LEN);
    (0..len).map(|_| random_point(rng)).collect()
}

/// Notes sent by `route-chat`: two rounds over three locations.
pub fn chat_script() -> Vec<RouteNote> {
    vec![
        RouteNote::new(Point::new(0, 1), "First message"),
        RouteNote::new(Point::new(0, 2), "Second message"),
        RouteNote::new(Point::new(0, 3), "Third message"),
        RouteNote::new(Point::new(0, 1), "Fourth message"),
        RouteNote::new(Point::new(0, 2), "Fifth message"),
        RouteNote::new(Point::new(0, 3), "Sixth message"),
    ]
}

/// Connection to a route guide service.
#[derive(Debug, Clone)]
pub struct RouteGuideClient {
    http: reqwest::Client,
    http_base: String,
    ws_base: String,
}

impl RouteGuideClient {
    /// Create a client for `server_address`.
    ///
    /// Accepts a bare `host:port` (plain HTTP is assumed) or a full
    /// `http://`/`https://` URL.
    pub fn new(server_address: &str) -> Self {
        let (http_base, ws_base) = base_urls(server_address);
        Self {
            http: reqwest::Client::new(),
            http_base,
            ws_base,
        }
    }

    /// `GetFeature`: the feature at `point`, unnamed if nothing is stored there.
    pub async fn get_feature(&self, point: Point) -> Result<Feature> {
        let feature = self
            .http
            .get(format!("{}/feature", self.http_base))
            .query(&[("latitude", point.latitude), ("longitude", point.longitude)])
            .send()
            .await
            .context("GetFeature request failed")?
            .error_for_status()?
            .json()
            .await
            .context("Invalid GetFeature response")?;
        Ok(feature)
    }

    /// `ListFeatures`: every feature inside `rect`, read as they stream in.
    pub async fn list_features(&self, rect: Rectangle) -> Result<Vec<Feature>> {
        let response = self
            .http
            .post(format!("{}/features", self.http_base))
            .json(&rect)
            .send()
            .await
            .context("ListFeatures request failed")?
            .error_for_status()?;

        let mut inbound: NdjsonInbound<_, Feature> =
            NdjsonInbound::new(Box::pin(response.bytes_stream()));
        let mut features = Vec::new();
        while let Some(feature) = inbound.receive().await? {
            tracing::info!(
                name = %feature.name,
                latitude = feature.location.latitude,
                longitude = feature.location.longitude,
                "Found"
            );
            features.push(feature);
        }
        Ok(features)
    }

    /// `RecordRoute`: stream `points` to the server and wait for the summary.
    pub async fn record_route(&self, points: Vec<Point>) -> Result<RouteSummary> {
        tracing::info!(length = points.len(), "Traversing points");

        let lines = stream::iter(points.into_iter().map(|p| encode_line(&p)));
        let summary = self
            .http
            .post(format!("{}/route", self.http_base))
            .header(CONTENT_TYPE, NDJSON_CONTENT_TYPE)
            .body(reqwest::Body::wrap_stream(lines))
            .send()
            .await
            .context("RecordRoute request failed")?
            .error_for_status()?
            .json()
            .await
            .context("Invalid RecordRoute response")?;
        Ok(summary)
    }

    /// `RouteChat`: send `script` while collecting every note the server
    /// sends back.
    ///
    /// A sender task writes the script and then half-closes the socket; a
    /// receiver task drains replies until the server ends the stream. The call
    /// returns only after both tasks have finished.
    pub async fn route_chat(&self, script: Vec<RouteNote>) -> Result<Vec<RouteNote>> {
        let url = format!("{}/chat", self.ws_base);
        let (socket, _) = connect_async(url.as_str())
            .await
            .with_context(|| format!("Failed to open {}", url))?;
        let (mut sink, mut stream) = socket.split();

        let sender = tokio::spawn(async move {
            for note in script {
                tracing::info!(
                    latitude = note.location.latitude,
                    longitude = note.location.longitude,
                    message = %note.message,
                    "Sending"
                );
                let text = serde_json::to_string(&note)?;
                sink.send(Message::Text(text)).await?;
            }
            sink.close().await?;
            anyhow::Ok(())
        });

        let receiver = tokio::spawn(async move {
            let mut received = Vec::new();
            while let Some(frame) = stream.next().await {
                match frame? {
                    Message::Text(text) => {
                        let note: RouteNote = serde_json::from_str(&text)?;
                        tracing::info!(
                            latitude = note.location.latitude,
                            longitude = note.location.longitude,
                            message = %note.message,
                            "Got message"
                        );
                        received.push(note);
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            anyhow::Ok(received)
        });

        let (sent, received) = tokio::join!(sender, receiver);
        sent.context("RouteChat sender panicked")??;
        received.context("RouteChat receiver panicked")?
    }
}

/// HTTP and WebSocket base URLs for a server address.
fn base_urls(server_address: &str) -> (String, String) {
    let address = server_address.trim_end_matches('/');
    if let Some(rest) = address.strip_prefix("https://") {
        (address.to_string(), format!("wss://{}", rest))
    } else if let Some(rest) = address.strip_prefix("http://") {
        (address.to_string(), format!("ws://{}", rest))
    } else {
        (format!("http://{}", address), format!("ws://{}", address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use routeguide::FeatureStore;
    use routeguide_service::{router, AppState};
    use std::sync::Arc;

    const SNAPSHOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../testdata/route_guide_db.json");

    /// Serve the bundled snapshot on an ephemeral local port.
    async fn spawn_service() -> (RouteGuideClient, FeatureStore) {
        let state = Arc::new(AppState::new(FeatureStore::load(SNAPSHOT).unwrap()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        let client = RouteGuideClient::new(&addr.to_string());
        (client, FeatureStore::load(SNAPSHOT).unwrap())
    }

    #[test]
    fn test_random_point_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let p = random_point(&mut rng);
            assert!((-900_000_000..900_000_000).contains(&p.latitude));
            assert!((-1_800_000_000..1_800_000_000).contains(&p.longitude));
            assert_eq!(p.latitude % 10_000_000, 0);
            assert_eq!(p.longitude % 10_000_000, 0);
        }
    }

    #[test]
    fn test_random_route_length() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let route = random_route(&mut rng);
            assert!((MIN_ROUTE_LEN..=MAX_ROUTE_LEN).contains(&route.len()));
        }
    }

    #[test]
    fn test_chat_script_revisits_locations() {
        let script = chat_script();
        assert_eq!(script.len(), 6);
        for i in 0..3 {
            assert_eq!(script[i].location, script[i + 3].location);
        }
    }

    #[test]
    fn test_base_urls() {
        assert_eq!(
            base_urls("127.0.0.1:10101"),
            ("http://127.0.0.1:10101".to_string(), "ws://127.0.0.1:10101".to_string())
        );
        assert_eq!(
            base_urls("http://guide.local:8080/"),
            ("http://guide.local:8080".to_string(), "ws://guide.local:8080".to_string())
        );
        assert_eq!(
            base_urls("https://guide.example.com"),
            ("https://guide.example.com".to_string(), "wss://guide.example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_feature_against_service() {
        let (client, _) = spawn_service().await;

        let known = client.get_feature(Point::new(409146138, -746188906)).await.unwrap();
        assert_eq!(known.name, "Berkshire Valley Management Area Trail, Jefferson, NJ, USA");

        let missing = client.get_feature(Point::new(0, 0)).await.unwrap();
        assert_eq!(missing, Feature::unnamed(Point::new(0, 0)));
    }

    #[tokio::test]
    async fn test_list_features_against_service() {
        let (client, store) = spawn_service().await;
        let rect = Rectangle::new(
            Point::new(400000000, -750000000),
            Point::new(420000000, -730000000),
        );

        let features = client.list_features(rect).await.unwrap();

        let expected: Vec<Feature> = store.all_matching(|p| rect.contains(p)).cloned().collect();
        assert!(!expected.is_empty());
        assert_eq!(features, expected);

        let everything = Rectangle::new(
            Point::new(-900000000, -1800000000),
            Point::new(900000000, 1800000000),
        );
        let all = client.list_features(everything).await.unwrap();
        assert_eq!(all.len(), store.len());
    }

    #[tokio::test]
    async fn test_record_route_against_service() {
        let (client, _) = spawn_service().await;

        let known = vec![Point::new(409146138, -746188906); 3];
        let summary = client.record_route(known).await.unwrap();
        assert_eq!(summary.point_count, 3);
        assert_eq!(summary.feature_count, 3);
        assert_eq!(summary.distance, 0);

        let mut rng = StdRng::seed_from_u64(3);
        let route = random_route(&mut rng);
        let expected: u64 = route
            .windows(2)
            .map(|pair| u64::from(routeguide::distance(pair[0], pair[1])))
            .sum();
        let summary = client.record_route(route.clone()).await.unwrap();
        assert_eq!(summary.point_count as usize, route.len());
        assert_eq!(summary.distance, expected);
    }

    #[tokio::test]
    async fn test_route_chat_against_service() {
        let (client, _) = spawn_service().await;
        let script = chat_script();

        let received = client.route_chat(script.clone()).await.unwrap();

        let expected = vec![
            script[0].clone(),
            script[1].clone(),
            script[2].clone(),
            script[0].clone(),
            script[3].clone(),
            script[1].clone(),
            script[4].clone(),
            script[2].clone(),
            script[5].clone(),
        ];
        assert_eq!(received, expected);
    }
}
