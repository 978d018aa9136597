// Record model
// A row fetched from a calendar source and its date attribute value

use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Storage representation of a date attribute: epoch seconds for integer
/// columns, `YYYY-MM-DD HH:MM:SS` text for date/time columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredDate {
    Integer(i64),
    Text(String),
}

impl fmt::Display for StoredDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredDate::Integer(value) => write!(f, "{}", value),
            StoredDate::Text(value) => f.write_str(value),
        }
    }
}

impl ToSql for StoredDate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            StoredDate::Integer(value) => value.to_sql(),
            StoredDate::Text(value) => value.to_sql(),
        }
    }
}

impl From<ValueRef<'_>> for StoredDate {
    /// Lossy: values that cannot hold a date become text so that the
    /// failure surfaces when the value is converted to a timestamp.
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Integer(value) => StoredDate::Integer(value),
            ValueRef::Real(value) => StoredDate::Integer(value.trunc() as i64),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                StoredDate::Text(String::from_utf8_lossy(bytes).into_owned())
            }
            ValueRef::Null => StoredDate::Text(String::new()),
        }
    }
}

impl From<StoredDate> for Value {
    fn from(value: StoredDate) -> Self {
        match value {
            StoredDate::Integer(value) => Value::Integer(value),
            StoredDate::Text(value) => Value::Text(value),
        }
    }
}

/// Non-owning back-reference from an item to the source that produced it.
///
/// Holds only the source's name; resolving it to a live source is up to
/// whoever keeps the sources. It never keeps a source alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef(Arc<str>);

impl SourceRef {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record returned by a SQLite-backed calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// SQLite rowid
    pub id: i64,
    /// Raw value of the configured date attribute
    pub date: StoredDate,
    /// Every selected column, keyed by column name
    pub fields: BTreeMap<String, serde_json::Value>,
    pub source: Option<SourceRef>,
}

impl Record {
    pub fn new(id: i64, date: StoredDate) -> Self {
        Self {
            id,
            date,
            fields: BTreeMap::new(),
            source: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }

    /// Text value of a column, if the column holds text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|value| value.as_str())
    }

    /// Records the producing source. Set once, after retrieval.
    pub fn attach_source(&mut self, source: SourceRef) {
        self.source = Some(source);
    }
}
