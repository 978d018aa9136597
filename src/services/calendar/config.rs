//! Configuration variants of a calendar source: static values or
//! functions evaluated on demand.

use rusqlite::types::Value;
use std::fmt;

use super::query::QueryContext;
use crate::models::allowed_range::AllowedRange;

/// Callback that may narrow the query of `find_items`. It receives the
/// query with the date predicate already applied plus the window bounds.
/// Returning `None` leaves the query unchanged.
pub type FilterFn = dyn Fn(QueryContext, i64, i64) -> Option<QueryContext> + Send + Sync;

/// Supplier of the allowed range, evaluated on every request.
pub type RangeFn = dyn Fn() -> AllowedRange + Send + Sync;

/// Extra restriction applied to item queries.
pub enum ItemFilter {
    /// `column = value` pairs AND-ed into the query
    Static(Vec<(String, Value)>),
    Computed(Box<FilterFn>),
}

impl ItemFilter {
    pub fn computed<F>(filter: F) -> Self
    where
        F: Fn(QueryContext, i64, i64) -> Option<QueryContext> + Send + Sync + 'static,
    {
        ItemFilter::Computed(Box::new(filter))
    }

    /// Applies the filter to `query`.
    pub fn apply(&self, query: QueryContext, start: i64, end: i64) -> QueryContext {
        match self {
            ItemFilter::Static(pairs) => pairs
                .iter()
                .fold(query, |query, (column, value)| query.and_where_eq(column, value.clone())),
            ItemFilter::Computed(filter) => match filter(query.clone(), start, end) {
                Some(filtered) => filtered,
                None => {
                    log::debug!("filter callback returned no query, keeping date-only query");
                    query
                }
            },
        }
    }
}

impl fmt::Debug for ItemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemFilter::Static(pairs) => f.debug_tuple("Static").field(pairs).finish(),
            ItemFilter::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Where the allowed date range comes from.
pub enum DateRangeSource {
    /// Returned verbatim on every call
    Static(AllowedRange),
    /// Invoked fresh on every call, never cached
    Computed(Box<RangeFn>),
}

impl DateRangeSource {
    pub fn computed<F>(supplier: F) -> Self
    where
        F: Fn() -> AllowedRange + Send + Sync + 'static,
    {
        DateRangeSource::Computed(Box::new(supplier))
    }

    pub fn resolve(&self) -> AllowedRange {
        match self {
            DateRangeSource::Static(range) => *range,
            DateRangeSource::Computed(supplier) => supplier(),
        }
    }
}

impl Default for DateRangeSource {
    fn default() -> Self {
        DateRangeSource::Static(AllowedRange::unbounded())
    }
}

impl fmt::Debug for DateRangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRangeSource::Static(range) => f.debug_tuple("Static").field(range).finish(),
            DateRangeSource::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
