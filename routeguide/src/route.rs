//! Trip statistics over a stream of traversed points.

use std::time::Instant;

use crate::distance::distance;
use crate::point::{Point, RouteSummary};
use crate::store::FeatureStore;

/// Accumulates a [`RouteSummary`] one point at a time.
///
/// The clock starts in [`RouteRecorder::start`] and stops in
/// [`RouteRecorder::finish`]. A recorder that is dropped without `finish`
/// (e.g. after a transport error) produces no summary.
#[derive(Debug)]
pub struct RouteRecorder {
    started: Instant,
    point_count: u32,
    feature_count: u32,
    distance: u64,
    last_point: Option<Point>,
}

impl RouteRecorder {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            point_count: 0,
            feature_count: 0,
            distance: 0,
            last_point: None,
        }
    }

    /// Account for the next point of the route.
    pub fn record(&mut self, store: &FeatureStore, point: Point) {
        self.point_count += 1;
        if store.has_named_feature(point) {
            self.feature_count += 1;
        }
        if let Some(last) = self.last_point {
            self.distance += u64::from(distance(last, point));
        }
        self.last_point = Some(point);
    }

    /// Number of points recorded so far.
    pub fn point_count(&self) -> u32 {
        self.point_count
    }

    /// Stop the clock and produce the summary.
    pub fn finish(self) -> RouteSummary {
        RouteSummary {
            point_count: self.point_count,
            feature_count: self.feature_count,
            distance: self.distance,
            elapsed_time: self.started.elapsed().as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Feature;

    fn store() -> FeatureStore {
        FeatureStore::from_features(vec![
            Feature::new(
                "Berkshire Valley Management Area Trail, Jefferson, NJ, USA",
                Point::new(409146138, -746188906),
            ),
            Feature::new(
                "Patriots Path, Mendham, NJ 07945, USA",
                Point::new(407838351, -746143763),
            ),
            Feature::new("", Point::new(407113723, -749746483)),
        ])
    }

    #[test]
    fn test_empty_route() {
        let summary = RouteRecorder::start().finish();
        assert_eq!(summary, RouteSummary::default());
    }

    #[test]
    fn test_repeated_known_point() {
        let store = store();
        let p = Point::new(409146138, -746188906);
        for k in 2..6u32 {
            let mut recorder = RouteRecorder::start();
            for _ in 0..k {
                recorder.record(&store, p);
            }
            let summary = recorder.finish();
            assert_eq!(summary.point_count, k);
            assert_eq!(summary.feature_count, k);
            assert_eq!(summary.distance, 0);
        }
    }

    #[test]
    fn test_repeated_unknown_point() {
        let store = store();
        let mut recorder = RouteRecorder::start();
        for _ in 0..3 {
            recorder.record(&store, Point::new(0, 0));
        }
        let summary = recorder.finish();
        assert_eq!(summary.point_count, 3);
        assert_eq!(summary.feature_count, 0);
        assert_eq!(summary.distance, 0);
    }

    #[test]
    fn test_unnamed_feature_does_not_count() {
        let store = store();
        let mut recorder = RouteRecorder::start();
        recorder.record(&store, Point::new(407113723, -749746483));
        assert_eq!(recorder.finish().feature_count, 0);
    }

    #[test]
    fn test_distance_accumulates_between_consecutive_points() {
        let store = store();
        let a = Point::new(409146138, -746188906);
        let b = Point::new(407838351, -746143763);
        let c = Point::new(0, 0);

        let mut recorder = RouteRecorder::start();
        for p in [a, b, c] {
            recorder.record(&store, p);
        }
        assert_eq!(recorder.point_count(), 3);
        let summary = recorder.finish();

        let expected = u64::from(distance(a, b)) + u64::from(distance(b, c));
        assert_eq!(summary.distance, expected);
        assert_eq!(summary.feature_count, 2);
        assert_eq!(summary.elapsed_time, 0);
    }
}
