//! Auto-save sequencing.
//!
//! Saves are fire-and-forget and may complete out of order. Each save is
//! stamped with a revision from a single monotonically increasing counter;
//! the tracker remembers the newest revision issued per slide so a late
//! response for an older revision can be recognised and ignored.

use std::collections::HashMap;

use crate::types::DbId;

/// Classification of a completed save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// The newest save issued for the slide.
    Current,
    /// A newer save was issued after this one.
    Superseded,
}

#[derive(Debug, Clone, Default)]
pub struct SaveTracker {
    last_issued: i64,
    latest: HashMap<DbId, i64>,
    in_flight: usize,
}

impl SaveTracker {
    /// Start issuing revisions above `floor` (the highest revision already
    /// persisted for the project).
    pub fn with_floor(floor: i64) -> Self {
        Self {
            last_issued: floor.max(0),
            ..Self::default()
        }
    }

    /// Issue the revision for a new save of `slide_id`.
    pub fn issue(&mut self, slide_id: DbId) -> i64 {
        self.last_issued += 1;
        self.latest.insert(slide_id, self.last_issued);
        self.in_flight += 1;
        self.last_issued
    }

    /// Record completion (success or failure) of a save.
    pub fn settle(&mut self, slide_id: DbId, revision: i64) -> SaveStatus {
        self.in_flight = self.in_flight.saturating_sub(1);
        match self.latest.get(&slide_id) {
            Some(&latest) if latest == revision => SaveStatus::Current,
            _ => SaveStatus::Superseded,
        }
    }

    /// Drop bookkeeping for a deleted slide. Pending saves still settle.
    pub fn forget(&mut self, slide_id: DbId) {
        self.latest.remove(&slide_id);
    }

    /// Advisory "is-saving" flag for the UI.
    pub fn is_saving(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn latest_revision(&self, slide_id: DbId) -> Option<i64> {
        self.latest.get(&slide_id).copied()
    }
}
