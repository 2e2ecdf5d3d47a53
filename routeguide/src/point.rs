//! Wire types shared by the catalog, the handlers and the transports.
//!
//! # Fixed-point coordinates
//!
//! A [`Point`] stores latitude and longitude as degrees multiplied by
//! [`COORD_FACTOR`] and truncated to `i32`:
//!
//! - `40.9146138°` becomes `409146138`
//! - `-74.6188906°` becomes `-746188906`
//!
//! Divide by [`COORD_FACTOR`] before feeding a coordinate to any trigonometric
//! function.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scale between degrees and the integer encoding used by [`Point`].
pub const COORD_FACTOR: f64 = 1e7;

/// A fixed-point (latitude, longitude) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Latitude in degrees × 10^7.
    pub latitude: i32,
    /// Longitude in degrees × 10^7.
    pub longitude: i32,
}

impl Point {
    /// Create a point from already-scaled coordinates.
    pub fn new(latitude: i32, longitude: i32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a point from decimal degrees, rounded to the nearest unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use routeguide::Point;
    ///
    /// let p = Point::from_degrees(40.9146138, -74.6188906);
    /// assert_eq!(p, Point::new(409146138, -746188906));
    /// ```
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            latitude: (lat * COORD_FACTOR).round() as i32,
            longitude: (lon * COORD_FACTOR).round() as i32,
        }
    }

    /// Latitude in decimal degrees.
    pub fn lat_degrees(&self) -> f64 {
        self.latitude as f64 / COORD_FACTOR
    }

    /// Longitude in decimal degrees.
    pub fn lon_degrees(&self) -> f64 {
        self.longitude as f64 / COORD_FACTOR
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A bounding box given by two opposite corners.
///
/// The corners may arrive in any order; containment tests normalize them
/// per axis (see [`crate::range::in_range`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// One corner of the rectangle.
    pub lo: Point,
    /// The opposite corner of the rectangle.
    pub hi: Point,
}

impl Rectangle {
    pub fn new(lo: Point, hi: Point) -> Self {
        Self { lo, hi }
    }
}

/// A named point of interest.
///
/// An empty `name` means "no feature here". Two features match when their
/// locations are equal; names take no part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Feature {
    /// Feature name, empty when unnamed.
    #[serde(default)]
    pub name: String,
    /// Where the feature is.
    pub location: Point,
}

impl Feature {
    pub fn new(name: impl Into<String>, location: Point) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    /// The "nothing stored here" answer for `location`.
    pub fn unnamed(location: Point) -> Self {
        Self {
            name: String::new(),
            location,
        }
    }

    /// Whether this feature carries a name.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A message attached to an exact location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNote {
    /// Where the note was left.
    pub location: Point,
    /// The note text.
    pub message: String,
}

impl RouteNote {
    pub fn new(location: Point, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

/// Statistics over one recorded route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Number of points received.
    pub point_count: u32,
    /// Number of received points that hit a named feature.
    pub feature_count: u32,
    /// Distance covered, in meters.
    pub distance: u64,
    /// Duration of the call, in whole seconds.
    pub elapsed_time: u64,
}
