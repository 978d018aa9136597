use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection, Row};
use std::sync::OnceLock;

use super::codec::{self, AttributeType};
use super::config::{DateRangeSource, ItemFilter};
use super::error::{CalendarError, Result};
use super::query::QueryContext;
use super::CalendarSource;
use crate::models::allowed_range::AllowedRange;
use crate::models::record::{Record, SourceRef, StoredDate};
use crate::services::database::metadata;

const ROWID_ALIAS: &str = "__calendar_rowid";

/// Calendar over the rows of a single SQLite table.
///
/// The storage type of the date attribute is resolved from the table
/// schema at most once per instance, either at build time
/// ([`SqliteCalendarBuilder::eager`]) or on first use.
pub struct SqliteCalendar<'a> {
    conn: &'a Connection,
    source: SourceRef,
    table: String,
    date_attribute: String,
    attribute_type: OnceLock<AttributeType>,
    filter: Option<ItemFilter>,
    date_range: DateRangeSource,
}

impl<'a> SqliteCalendar<'a> {
    pub fn builder(table: impl Into<String>) -> SqliteCalendarBuilder {
        SqliteCalendarBuilder::new(table)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn date_attribute(&self) -> &str {
        &self.date_attribute
    }

    /// The storage type of the date attribute, resolving it on first call.
    pub fn attribute_type(&self) -> Result<AttributeType> {
        if let Some(resolved) = self.attribute_type.get() {
            return Ok(*resolved);
        }
        let resolved =
            codec::resolve_attribute_type(self.conn, &self.table, &self.date_attribute)?;
        Ok(*self.attribute_type.get_or_init(|| resolved))
    }

    /// Overrides the storage type, replacing any resolved value.
    pub fn set_attribute_type(&mut self, attribute_type: AttributeType) {
        self.attribute_type = OnceLock::from(attribute_type);
    }

    pub fn date_to_timestamp(&self, value: &StoredDate) -> Result<i64> {
        self.attribute_type()?.to_timestamp(value)
    }

    pub fn timestamp_to_date(&self, timestamp: i64) -> Result<StoredDate> {
        self.attribute_type()?.to_stored(timestamp)
    }

    /// The query `find_items` would run for `[start, end)`.
    pub fn items_query(&self, start: i64, end: i64) -> Result<QueryContext> {
        let attribute_type = self.attribute_type()?;
        let operand = attribute_type.comparable_sql(&self.date_attribute);
        let query = QueryContext::new(self.table.as_str()).and_where(
            format!("{0} >= ? AND {0} < ?", operand),
            [
                Value::from(attribute_type.to_stored(start)?),
                Value::from(attribute_type.to_stored(end)?),
            ],
        );

        Ok(match &self.filter {
            Some(filter) => filter.apply(query, start, end),
            None => query,
        })
    }

    fn fetch(&self, query: &QueryContext) -> Result<Vec<Record>> {
        let sql = query.to_sql(&format!("rowid AS {}, *", ROWID_ALIAS));
        log::debug!("{}: {}", self.source, sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let date_index = columns
            .iter()
            .skip(1)
            .position(|name| name.eq_ignore_ascii_case(&self.date_attribute))
            .map(|index| index + 1)
            .ok_or_else(|| CalendarError::Lookup {
                table: self.table.clone(),
                column: self.date_attribute.clone(),
            })?;

        let mut records = stmt
            .query_map(params_from_iter(query.params()), |row| {
                map_record_row(row, &columns, date_index)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for record in &mut records {
            record.attach_source(self.source.clone());
        }

        Ok(records)
    }
}

impl CalendarSource for SqliteCalendar<'_> {
    type Item = Record;

    fn find_items(&self, start: i64, end: i64) -> Result<Vec<Record>> {
        if start >= end {
            return Ok(Vec::new());
        }
        let query = self.items_query(start, end)?;
        self.fetch(&query)
    }

    fn allowed_date_range(&self) -> Result<AllowedRange> {
        Ok(self.date_range.resolve())
    }

    fn item_timestamp(&self, item: &Record) -> Result<i64> {
        self.date_to_timestamp(&item.date)
    }
}

fn map_record_row(row: &Row<'_>, columns: &[String], date_index: usize) -> rusqlite::Result<Record> {
    let mut record = Record::new(row.get(0)?, StoredDate::from(row.get_ref(date_index)?));
    for (index, name) in columns.iter().enumerate().skip(1) {
        record.fields.insert(name.clone(), json_value(row.get_ref(index)?));
    }
    Ok(record)
}

fn json_value(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(value) => serde_json::Value::from(value),
        ValueRef::Real(value) => serde_json::Number::from_f64(value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Builder for [`SqliteCalendar`].
#[derive(Debug)]
pub struct SqliteCalendarBuilder {
    table: String,
    name: Option<String>,
    date_attribute: String,
    attribute_type: Option<AttributeType>,
    eager: bool,
    filter: Option<ItemFilter>,
    date_range: DateRangeSource,
}

impl SqliteCalendarBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: None,
            date_attribute: "date".to_string(),
            attribute_type: None,
            eager: false,
            filter: None,
            date_range: DateRangeSource::default(),
        }
    }

    /// Name carried by item back-references. Defaults to the table name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Column holding the item date. Defaults to `date`.
    pub fn date_attribute(mut self, column: impl Into<String>) -> Self {
        self.date_attribute = column.into();
        self
    }

    /// Skips schema inspection and uses the given storage type.
    pub fn attribute_type(mut self, attribute_type: AttributeType) -> Self {
        self.attribute_type = Some(attribute_type);
        self
    }

    /// Resolves the storage type while building instead of on first use.
    pub fn eager(mut self) -> Self {
        self.eager = true;
        self
    }

    pub fn filter(mut self, filter: ItemFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn date_range(mut self, date_range: DateRangeSource) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn build(self, conn: &Connection) -> Result<SqliteCalendar<'_>> {
        if self.table.trim().is_empty() {
            return Err(CalendarError::Config("table is not set".to_string()));
        }
        if self.date_attribute.trim().is_empty() {
            return Err(CalendarError::Config("date attribute is not set".to_string()));
        }
        if !metadata::table_exists(conn, &self.table)? {
            return Err(CalendarError::Config(format!(
                "table '{}' not found",
                self.table
            )));
        }
        if metadata::is_without_rowid(conn, &self.table)? {
            return Err(CalendarError::Config(format!(
                "table '{}' has no rowid to identify items",
                self.table
            )));
        }
        if let Some(ItemFilter::Static(pairs)) = &self.filter {
            for (column, _) in pairs {
                if metadata::column_type(conn, &self.table, column)?.is_none() {
                    return Err(CalendarError::Config(format!(
                        "filter column '{}' does not exist in table '{}'",
                        column, self.table
                    )));
                }
            }
        }

        let attribute_type = match (self.attribute_type, self.eager) {
            (Some(explicit), _) => OnceLock::from(explicit),
            (None, true) => OnceLock::from(codec::resolve_attribute_type(
                conn,
                &self.table,
                &self.date_attribute,
            )?),
            (None, false) => OnceLock::new(),
        };

        let name = self.name.unwrap_or_else(|| self.table.clone());

        Ok(SqliteCalendar {
            conn,
            source: SourceRef::new(name),
            table: self.table,
            date_attribute: self.date_attribute,
            attribute_type,
            filter: self.filter,
            date_range: self.date_range,
        })
    }
}
