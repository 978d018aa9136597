use rusqlite::types::Value;
use rusqlite::Connection;

use crate::models::allowed_range::AllowedRange;
use crate::models::record::StoredDate;
use crate::models::settings::{FilterValue, Settings};
use crate::services::calendar::codec;
use crate::services::calendar::{
    CalendarError, DateRangeSource, ItemFilter, Result, SqliteCalendar,
};

impl From<FilterValue> for Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Bool(flag) => Value::Integer(flag as i64),
            FilterValue::Integer(number) => Value::Integer(number),
            FilterValue::Real(number) => Value::Real(number),
            FilterValue::Text(text) => Value::Text(text),
        }
    }
}

/// Allowed range from the settings file. Text bounds are parsed as local
/// dates; a bound that cannot be parsed is a configuration error.
pub fn allowed_range(settings: &Settings) -> Result<AllowedRange> {
    Ok(AllowedRange::new(
        bound_timestamp(settings.date_range.min.as_ref())?,
        bound_timestamp(settings.date_range.max.as_ref())?,
    ))
}

fn bound_timestamp(bound: Option<&StoredDate>) -> Result<Option<i64>> {
    match bound {
        None => Ok(None),
        Some(StoredDate::Integer(timestamp)) => Ok(Some(*timestamp)),
        Some(StoredDate::Text(text)) => codec::parse_date_text(text)
            .map(Some)
            .map_err(|_| CalendarError::Config(format!("invalid date range bound '{}'", text))),
    }
}

/// Static filter from the settings file, if any pairs are configured.
pub fn item_filter(settings: &Settings) -> Option<ItemFilter> {
    if settings.filter.is_empty() {
        return None;
    }
    let pairs = settings
        .filter
        .iter()
        .map(|(column, value)| (column.clone(), Value::from(value.clone())))
        .collect();
    Some(ItemFilter::Static(pairs))
}

/// Builds the SQLite calendar described by `settings`.
pub fn calendar_from_settings<'a>(
    settings: &Settings,
    conn: &'a Connection,
) -> Result<SqliteCalendar<'a>> {
    settings.validate().map_err(CalendarError::Config)?;

    let mut builder = SqliteCalendar::builder(settings.table.as_str())
        .date_attribute(settings.date_attribute.as_str())
        .date_range(DateRangeSource::Static(allowed_range(settings)?));

    if let Some(name) = &settings.name {
        builder = builder.name(name.as_str());
    }
    if let Some(filter) = item_filter(settings) {
        builder = builder.filter(filter);
    }
    builder = match settings.attribute_type {
        Some(attribute_type) => builder.attribute_type(attribute_type),
        None => builder.eager(),
    };

    builder.build(conn)
}
