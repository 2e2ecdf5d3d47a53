//! Great-circle distance between two [`Point`]s.
//!
//! Uses the haversine formula on a spherical Earth:
//!
//! ```text
//! a = sin²(Δφ/2) + cos(φ1)·cos(φ2)·sin²(Δλ/2)
//! c = 2·atan2(√a, √(1−a))
//! d = R·c
//! ```

use crate::point::Point;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance between `p1` and `p2` in whole meters (truncated).
///
/// # Examples
///
/// ```
/// use routeguide::{distance, Point};
///
/// let p = Point::new(409146138, -746188906);
/// assert_eq!(distance(p, p), 0);
/// ```
pub fn distance(p1: Point, p2: Point) -> u32 {
    let phi1 = p1.lat_degrees().to_radians();
    let phi2 = p2.lat_degrees().to_radians();
    let delta_phi = (p2.lat_degrees() - p1.lat_degrees()).to_radians();
    let delta_lambda = (p2.lon_degrees() - p1.lon_degrees()).to_radians();

    // Rounding can push `a` just past 1.0 for antipodal points
    let a = ((delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_M * c) as u32
}
