//! Calendar sources: the data-access boundary of grid building.
//! A source answers two questions: which items fall into a window, and
//! which dates are navigable at all.

pub mod codec;
pub mod config;
mod error;
pub mod query;
pub mod sqlite;

pub use codec::AttributeType;
pub use config::{DateRangeSource, ItemFilter};
pub use error::{CalendarError, Result};
pub use query::QueryContext;
pub use sqlite::{SqliteCalendar, SqliteCalendarBuilder};

use crate::models::allowed_range::AllowedRange;

/// Contract between the grid and whatever stores the records.
pub trait CalendarSource {
    type Item;

    /// Items whose date falls in `[start, end)` (epoch seconds). Order is
    /// whatever the store returns.
    fn find_items(&self, start: i64, end: i64) -> Result<Vec<Self::Item>>;

    /// Navigable bounds. Sources backed by a supplier re-evaluate it on
    /// every call.
    fn allowed_date_range(&self) -> Result<AllowedRange>;

    /// Epoch seconds of an item's date attribute.
    fn item_timestamp(&self, item: &Self::Item) -> Result<i64>;
}
