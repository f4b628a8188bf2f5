//! In-memory storage for receipt scores

use points_common::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// Storage backend mapping receipt IDs to their points
///
/// Not synchronized on its own; callers share it behind a lock.
#[derive(Debug, Default)]
pub struct Storage {
    scores: HashMap<String, u64>,
}

impl Storage {
    /// Create an empty storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the points for a receipt ID, replacing any earlier value
    /// Returns the value that was replaced, if any
    pub fn put(&mut self, id: impl Into<String>, points: u64) -> Option<u64> {
        let id = id.into();
        debug!("Storing {} points for receipt: {}", points, id);
        self.scores.insert(id, points)
    }

    /// Get the points stored for a receipt ID
    pub fn get(&self, id: &str) -> Result<u64> {
        self.scores
            .get(id)
            .copied()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Number of stored receipts
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
