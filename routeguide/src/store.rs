//! The feature catalog.
//!
//! [`FeatureStore`] holds the features loaded from a JSON snapshot at startup.
//! It is never mutated afterwards, so handlers share it behind an `Arc`
//! without any locking.
//!
//! # Snapshot format
//!
//! ```json
//! [
//!   {"name": "Patriots Path, Mendham, NJ 07945, USA",
//!    "location": {"latitude": 407838351, "longitude": -746143763}},
//!   {"name": "", "location": {"latitude": 407113723, "longitude": -749746483}}
//! ]
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::point::{Feature, Point};

/// Immutable, insertion-ordered list of [`Feature`]s.
///
/// # Example
///
/// ```ignore
/// use routeguide::{FeatureStore, Point};
///
/// let store = FeatureStore::load("testdata/route_guide_db.json")?;
///
/// let found = store.get_exact(Point::new(409146138, -746188906));
/// assert!(found.is_named());
///
/// let missing = store.get_exact(Point::new(0, 0));
/// assert!(!missing.is_named());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
}

impl FeatureStore {
    /// Load a store from a JSON snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be opened or read, and
    /// [`LoadError::Malformed`] if its contents are not a list of features.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_snapshot(BufReader::new(file), path.to_path_buf())
    }

    /// Load a store from any reader producing a JSON snapshot.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Self::read_snapshot(reader, PathBuf::from("<reader>"))
    }

    /// Build a store directly from features, keeping their order.
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self { features }
    }

    fn read_snapshot<R: Read>(reader: R, path: PathBuf) -> Result<Self, LoadError> {
        match serde_json::from_reader::<_, Vec<Feature>>(reader) {
            Ok(features) => Ok(Self { features }),
            Err(source) if source.is_io() => Err(LoadError::Io {
                path,
                source: source.into(),
            }),
            Err(source) => Err(LoadError::Malformed { path, source }),
        }
    }

    /// The feature stored at exactly `point`.
    ///
    /// A miss is a normal answer, not an error: it yields
    /// [`Feature::unnamed`] at the queried location.
    pub fn get_exact(&self, point: Point) -> Feature {
        self.features
            .iter()
            .find(|f| f.location == point)
            .cloned()
            .unwrap_or_else(|| Feature::unnamed(point))
    }

    /// Same as `get_exact(point).is_named()`, without cloning the feature.
    pub fn has_named_feature(&self, point: Point) -> bool {
        self.features
            .iter()
            .find(|f| f.location == point)
            .is_some_and(Feature::is_named)
    }

    /// Lazily yield, in insertion order, every feature whose location satisfies
    /// `predicate`.
    ///
    /// Each call starts a fresh pass over the store.
    pub fn all_matching<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = &'a Feature> + 'a
    where
        F: Fn(Point) -> bool + 'a,
    {
        self.features
            .iter()
            .filter(move |f| predicate(f.location))
    }

    /// All stored features in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Number of stored features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the store holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
