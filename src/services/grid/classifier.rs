use chrono::{DateTime, Local};

use crate::models::allowed_range::AllowedRange;
use crate::models::grid_cell::Classification;
use crate::models::time_window::TimeWindow;

/// Classifies a cell date against the displayed window and the allowed
/// range. Every flag is computed on its own.
pub fn classify(cell_date: DateTime<Local>, window: &TimeWindow, range: &AllowedRange) -> Classification {
    let timestamp = cell_date.timestamp();
    let out = !window.contains(cell_date);
    let future = range.is_future(timestamp);
    let past = range.is_past(timestamp);

    Classification {
        out,
        active: !future && !past,
        future,
        past,
    }
}
