//! Shared board of notes keyed by exact location.
//!
//! Every `RouteChat` session posts into the same [`NoteBoard`]. Posting a note
//! appends it to the history of its location and hands back a snapshot of
//! that whole history, in acceptance order, taken under the same lock as the
//! append. Replaying the snapshot therefore never shows a partial or
//! duplicated history, however many sessions write to the location at once.
//!
//! Locking is per location: a `RwLock` guards the map of locations and each
//! location owns its own `Mutex`. Sessions writing to different locations do
//! not contend beyond the brief map lookup.
//!
//! Histories grow for the life of the process; nothing is evicted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::point::{Point, RouteNote};

type History = Arc<Mutex<Vec<RouteNote>>>;

/// Location → append-only note history.
#[derive(Debug, Default)]
pub struct NoteBoard {
    locations: RwLock<HashMap<Point, History>>,
}

impl NoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `note` under its location and return every note stored there,
    /// oldest first, including `note` itself.
    ///
    /// The append and the snapshot form one critical section per location:
    /// the n-th note accepted at a location always gets back exactly n notes.
    pub fn post(&self, note: RouteNote) -> Vec<RouteNote> {
        let history = self.history_slot(note.location);
        let mut notes = history.lock().unwrap_or_else(PoisonError::into_inner);
        notes.push(note);
        notes.clone()
    }

    /// Notes stored at exactly `location`, oldest first.
    pub fn history(&self, location: Point) -> Vec<RouteNote> {
        let locations = self.locations.read().unwrap_or_else(PoisonError::into_inner);
        match locations.get(&location) {
            Some(history) => history
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            None => Vec::new(),
        }
    }

    /// Number of distinct locations holding at least one note.
    pub fn location_count(&self) -> usize {
        self.locations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn history_slot(&self, location: Point) -> History {
        if let Some(history) = self
            .locations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&location)
        {
            return Arc::clone(history);
        }

        // Another session may have created the slot between the two locks
        let mut locations = self.locations.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locations.entry(location).or_default())
    }
}
