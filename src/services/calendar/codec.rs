//! Conversion between epoch-second timestamps and the storage
//! representation of a date attribute.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use super::error::{CalendarError, Result};
use super::query::quote_identifier;
use crate::models::record::StoredDate;
use crate::services::database::metadata;
use crate::utils::date;

/// Text layout used when writing `Date` attributes.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// How a date attribute is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// Epoch seconds in an integer column
    Integer,
    /// Local date/time text in a DATE, DATETIME, TIMESTAMP or TIME column
    Date,
}

impl AttributeType {
    /// Maps a declared SQLite column type to an attribute type.
    pub fn from_declared_type(declared: &str) -> Self {
        let declared = declared.to_ascii_uppercase();
        if declared.contains("DATE") || declared.contains("TIME") {
            AttributeType::Date
        } else {
            AttributeType::Integer
        }
    }

    /// Storage value to epoch seconds.
    pub fn to_timestamp(&self, value: &StoredDate) -> Result<i64> {
        match (self, value) {
            (_, StoredDate::Integer(ts)) => Ok(*ts),
            (AttributeType::Integer, StoredDate::Text(text)) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| CalendarError::parse(text)),
            (AttributeType::Date, StoredDate::Text(text)) => parse_date_text(text),
        }
    }

    /// SQL expression over `column` whose values order the same way as the
    /// timestamps they hold, so range bounds from [`Self::to_stored`] can be
    /// compared against it.
    ///
    /// `Date` values are normalised through `datetime()` into
    /// [`STORAGE_FORMAT`] local time: bare dates gain a midnight time,
    /// numeric values are read as epoch seconds and offset-qualified text is
    /// shifted to local time. Text SQLite cannot read is compared as stored.
    pub fn comparable_sql(&self, column: &str) -> String {
        let column = quote_identifier(column);
        match self {
            AttributeType::Integer => column,
            AttributeType::Date => format!(
                "COALESCE(CASE \
                 WHEN typeof({c}) IN ('integer', 'real') THEN datetime({c}, 'unixepoch', 'localtime') \
                 WHEN {c} GLOB '*[+-][0-9][0-9]:[0-9][0-9]' OR {c} GLOB '*[Zz]' \
                 THEN datetime({c}, 'localtime') \
                 ELSE datetime(replace({c}, '/', '-')) END, {c})",
                c = column
            ),
        }
    }

    /// Epoch seconds to storage value.
    pub fn to_stored(&self, timestamp: i64) -> Result<StoredDate> {
        match self {
            AttributeType::Integer => Ok(StoredDate::Integer(timestamp)),
            AttributeType::Date => date::from_timestamp(timestamp)
                .map(|dt| StoredDate::Text(dt.format(STORAGE_FORMAT).to_string()))
                .ok_or_else(|| CalendarError::parse(timestamp)),
        }
    }
}

/// Inspects the column metadata of `table` to find how `column` is stored.
pub fn resolve_attribute_type(conn: &Connection, table: &str, column: &str) -> Result<AttributeType> {
    let declared = metadata::column_type(conn, table, column)?.ok_or_else(|| CalendarError::Lookup {
        table: table.to_string(),
        column: column.to_string(),
    })?;
    let resolved = AttributeType::from_declared_type(&declared);
    log::debug!("{}.{} declared as '{}' resolved to {:?}", table, column, declared, resolved);
    Ok(resolved)
}

/// Parses a local date/time string into epoch seconds.
///
/// Accepts RFC 3339 (offset honoured), `YYYY-MM-DD HH:MM[:SS[.f]]` with a
/// space or `T` separator, slash-separated dates, and bare dates (local
/// midnight).
pub fn parse_date_text(text: &str) -> Result<i64> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp());
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| CalendarError::parse(text))?;

    date::from_local(naive)
        .map(|dt| dt.timestamp())
        .ok_or_else(|| CalendarError::parse(text))
}
