//! # Route Guide
//!
//! Request-handling core of a location-oriented RPC service.
//!
//! ## Features
//!
//! - **Feature catalog**: an immutable, load-once list of named points of interest
//! - **Range queries**: inclusive bounding-box lookups with unordered corners
//! - **Route statistics**: point and feature counts, haversine distance, elapsed time
//! - **Location notes**: a shared board where callers exchange notes keyed by exact location
//!
//! The four calls (`GetFeature`, `ListFeatures`, `RecordRoute`, `RouteChat`) live in
//! [`session`] and only depend on the [`Inbound`]/[`Outbound`] stream capability, so
//! any transport that can move messages one at a time can host them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use routeguide::{FeatureStore, Point};
//!
//! let store = FeatureStore::load("testdata/route_guide_db.json")?;
//! let feature = store.get_exact(Point::new(409146138, -746188906));
//! println!("Found: {}", feature.name);
//! ```
//!
//! ## Coordinates
//!
//! Points use a fixed-point encoding: degrees multiplied by 10^7 and truncated to
//! `i32`. See [`COORD_FACTOR`].

pub mod distance;
pub mod error;
pub mod notes;
pub mod point;
pub mod range;
pub mod route;
pub mod session;
pub mod store;
pub mod stream;

// Re-export main types at crate root for convenience
pub use distance::distance;
pub use error::{LoadError, Result, TransportError};
pub use notes::NoteBoard;
pub use point::{Feature, Point, Rectangle, RouteNote, RouteSummary, COORD_FACTOR};
pub use range::in_range;
pub use route::RouteRecorder;
pub use store::FeatureStore;
pub use stream::{Inbound, NdjsonInbound, Outbound};
