//! Navigation anchors and compact period labels for a displayed window.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use std::fmt;

use crate::models::time_window::TimeWindow;
use crate::models::view_mode::ViewMode;
use crate::services::calendar::{CalendarError, Result};
use crate::utils::date;

/// Renders the month and year tokens of a period label.
pub trait LabelFormatter {
    fn month(&self, date: NaiveDate) -> String;
    fn year(&self, date: NaiveDate) -> String;
}

/// English abbreviated month (`Mar`) and four-digit year.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortMonthFormatter;

impl LabelFormatter for ShortMonthFormatter {
    fn month(&self, date: NaiveDate) -> String {
        date.format("%b").to_string()
    }

    fn year(&self, date: NaiveDate) -> String {
        date.format("%Y").to_string()
    }
}

/// Label tokens for the first day (`left`), the last day (`right`), and
/// the month/year both share (`common`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeriodLabel {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub common: Vec<String>,
}

impl PeriodLabel {
    /// Text for a "previous" link: the first day tokens.
    pub fn prev_label(&self) -> String {
        self.left.join(" ")
    }

    /// Text for a "next" link: the last day tokens plus shared tokens.
    pub fn next_label(&self) -> String {
        self.right
            .iter()
            .chain(self.common.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.left.join(" "), self.right.join(" "))?;
        if !self.common.is_empty() {
            write!(f, " {}", self.common.join(" "))?;
        }
        Ok(())
    }
}

/// Computes navigation targets and labels for caller-supplied windows.
#[derive(Debug, Clone, Default)]
pub struct PeriodResolver<F = ShortMonthFormatter> {
    formatter: F,
}

impl PeriodResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: LabelFormatter> PeriodResolver<F> {
    pub fn with_formatter(formatter: F) -> Self {
        Self { formatter }
    }

    /// Anchor of the following period: the window's exclusive end.
    pub fn next_anchor(&self, window: &TimeWindow) -> DateTime<Local> {
        window.end()
    }

    /// Anchor of the preceding period: the window start moved back by
    /// seven days or one calendar month.
    pub fn prev_anchor(&self, window: &TimeWindow, mode: ViewMode) -> Result<DateTime<Local>> {
        let shifted = match mode {
            ViewMode::Week => date::sub_days(window.start(), 7),
            ViewMode::Month => date::sub_months(window.start(), 1),
        };
        shifted.ok_or_else(|| {
            CalendarError::DateOutOfRange(format!(
                "no {} before {}",
                mode,
                window.start().format("%Y-%m-%d %H:%M:%S")
            ))
        })
    }

    /// Anchor used when switching to week view: the first displayed day.
    pub fn week_view_anchor(&self, window: &TimeWindow) -> NaiveDate {
        window.start().date_naive()
    }

    /// Anchor used when switching to month view: the last displayed day.
    pub fn month_view_anchor(&self, window: &TimeWindow) -> NaiveDate {
        window.last_date()
    }

    /// Splits the window's boundary days into label tokens so that a month
    /// or year shared by both days is printed once.
    pub fn compact_label(&self, window: &TimeWindow) -> PeriodLabel {
        let first = window.start().date_naive();
        let last = window.last_date();

        let mut label = PeriodLabel {
            left: vec![first.day().to_string()],
            right: vec![last.day().to_string()],
            common: Vec::new(),
        };

        if first.month() == last.month() {
            label.common.push(self.formatter.month(first));
        } else {
            label.left.push(self.formatter.month(first));
            label.right.push(self.formatter.month(last));
        }

        if first.year() == last.year() {
            label.common.push(self.formatter.year(first));
        } else {
            label.left.push(self.formatter.year(first));
            label.right.push(self.formatter.year(last));
        }

        label
    }
}
