// Allowed date range
// Optional navigation bounds, min inclusive and max exclusive

use serde::{Deserialize, Serialize};

/// Bounds outside of which dates are past or future.
///
/// Both bounds are epoch seconds; an absent bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllowedRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl AllowedRange {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// `timestamp < min`
    pub fn is_past(&self, timestamp: i64) -> bool {
        self.min.is_some_and(|min| timestamp < min)
    }

    /// `timestamp >= max`
    pub fn is_future(&self, timestamp: i64) -> bool {
        self.max.is_some_and(|max| timestamp >= max)
    }
}
