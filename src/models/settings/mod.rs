// Settings module
// File-based configuration of a calendar source and its grid

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::models::grid_cell::CellClasses;
use crate::models::record::StoredDate;
use crate::models::view_mode::ViewMode;
use crate::services::calendar::codec::AttributeType;

/// A static filter value, written as a plain TOML scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

/// Allowed range bounds, each an epoch timestamp or a date string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRangeSettings {
    pub min: Option<StoredDate>,
    pub max: Option<StoredDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite database holding the records
    pub database: Option<PathBuf>,
    pub table: String,
    /// Name carried by item back-references, defaults to the table
    pub name: Option<String>,
    pub date_attribute: String,
    /// Overrides schema inspection when set
    pub attribute_type: Option<AttributeType>,
    pub view_mode: ViewMode,
    pub first_day_of_week: u8, // 0 = Sunday
    pub cell_date_format: String,
    pub filter: BTreeMap<String, FilterValue>,
    pub date_range: DateRangeSettings,
    pub classes: CellClasses,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: None,
            table: String::new(),
            name: None,
            date_attribute: "date".to_string(),
            attribute_type: None,
            view_mode: ViewMode::default(),
            first_day_of_week: 1, // Monday
            cell_date_format: "%Y-%m-%d".to_string(),
            filter: BTreeMap::new(),
            date_range: DateRangeSettings::default(),
            classes: CellClasses::default(),
        }
    }
}

impl Settings {
    /// Validate values that cannot be checked by deserialization
    pub fn validate(&self) -> Result<(), String> {
        if self.table.trim().is_empty() {
            return Err("Table name cannot be empty".to_string());
        }

        if self.date_attribute.trim().is_empty() {
            return Err("Date attribute cannot be empty".to_string());
        }

        if self.first_day_of_week > 6 {
            return Err("First day of week must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }

        if self.cell_date_format.trim().is_empty() {
            return Err("Cell date format cannot be empty".to_string());
        }

        Ok(())
    }
}
