use thiserror::Error;

/// Errors raised by calendar sources and grid building.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Missing or invalid source configuration.
    #[error("invalid calendar configuration: {0}")]
    Config(String),

    /// A date attribute value could not be converted to a timestamp.
    #[error("cannot parse date value '{value}'")]
    Parse { value: String },

    /// The configured date attribute does not exist in storage.
    #[error("column '{column}' does not exist in table '{table}'")]
    Lookup { table: String, column: String },

    #[error("calendar arithmetic out of range: {0}")]
    DateOutOfRange(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl CalendarError {
    pub(crate) fn parse(value: impl ToString) -> Self {
        CalendarError::Parse {
            value: value.to_string(),
        }
    }

    /// True for errors that stem from setup rather than data.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CalendarError::Config(_) | CalendarError::Lookup { .. })
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
