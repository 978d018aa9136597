// Grid cell model
// One displayed day with its items and classification flags

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Class name emitted for cells outside the displayed window.
pub const OUT_CLASS: &str = "out";

/// Independent classification flags of a cell. They are not mutually
/// exclusive: a cell can be both `out` and `future`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Classification {
    pub out: bool,
    pub active: bool,
    pub future: bool,
    pub past: bool,
}

impl Classification {
    /// Class names for this cell in `out, active, future, past` order.
    pub fn css_classes<'a>(&self, classes: &'a CellClasses) -> Vec<&'a str> {
        let mut names = Vec::new();
        if self.out {
            names.push(OUT_CLASS);
        }
        if self.active {
            names.push(classes.active.as_str());
        }
        if self.future {
            names.push(classes.future.as_str());
        }
        if self.past {
            names.push(classes.past.as_str());
        }
        names
    }
}

/// Configurable class names for the range-based flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellClasses {
    pub active: String,
    pub future: String,
    pub past: String,
}

impl Default for CellClasses {
    fn default() -> Self {
        Self {
            active: "active".to_string(),
            future: "future".to_string(),
            past: "past".to_string(),
        }
    }
}

/// A single day of a calendar grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<T> {
    pub date: DateTime<Local>,
    pub items: Vec<T>,
    pub classification: Classification,
}

impl<T> GridCell<T> {
    /// The cell date rendered with a `chrono` format string, e.g. `%Y-%m-%d`.
    pub fn date_key(&self, format: &str) -> String {
        self.date.format(format).to_string()
    }

    /// Two-digit hour of the cell start, for renderers that split days into
    /// hour slots.
    pub fn hour_key(&self) -> String {
        self.date.format("%H").to_string()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}
