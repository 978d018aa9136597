// Time window
// Half-open interval [start, end) of local instants

use chrono::{DateTime, Local, NaiveDate};

use crate::models::view_mode::ViewMode;
use crate::utils::date;

/// The period a grid displays. `end` is exclusive; the last displayed day
/// is `end` minus one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl TimeWindow {
    /// Create a window, rejecting empty or inverted intervals.
    ///
    /// # Examples
    /// ```
    /// use calendar_grid::models::time_window::TimeWindow;
    /// use chrono::{Duration, Local};
    ///
    /// let start = Local::now();
    /// let window = TimeWindow::new(start, start + Duration::days(7)).unwrap();
    /// assert!(window.contains(start));
    /// assert!(TimeWindow::new(start, start).is_err());
    /// ```
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Result<Self, String> {
        if end <= start {
            return Err("Time window end must be after start".to_string());
        }
        Ok(Self { start, end })
    }

    /// Window from local midnight of `start` to local midnight of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        let start = date::local_midnight(start)
            .ok_or_else(|| format!("Local midnight does not exist on {}", start))?;
        let end = date::local_midnight(end)
            .ok_or_else(|| format!("Local midnight does not exist on {}", end))?;
        Self::new(start, end)
    }

    /// The seven days of the week containing `date`.
    pub fn week_of(date: NaiveDate, first_day_of_week: u8) -> Result<Self, String> {
        let start = date::week_start(date, first_day_of_week);
        let end = start
            .checked_add_days(chrono::Days::new(7))
            .ok_or("Week end is out of range")?;
        Self::from_dates(start, end)
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Result<Self, String> {
        let start = date::month_start(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .ok_or("Month end is out of range")?;
        Self::from_dates(start, end)
    }

    /// Aligned window for a view mode: a week or a calendar month.
    pub fn for_mode(date: NaiveDate, mode: ViewMode, first_day_of_week: u8) -> Result<Self, String> {
        match mode {
            ViewMode::Week => Self::week_of(date, first_day_of_week),
            ViewMode::Month => Self::month_of(date),
        }
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    /// Date of the last displayed day (`end` minus one calendar day).
    pub fn last_date(&self) -> NaiveDate {
        let end = self.end.date_naive();
        end.pred_opt().unwrap_or(end)
    }

    /// `start <= date < end`
    pub fn contains(&self, date: DateTime<Local>) -> bool {
        self.start <= date && date < self.end
    }

    /// Iterates the window one calendar day at a time, starting at `start`.
    pub fn days(&self) -> WindowDays {
        WindowDays {
            next: Some(self.start),
            end: self.end,
        }
    }
}

/// Iterator over the days of a [`TimeWindow`].
#[derive(Debug, Clone)]
pub struct WindowDays {
    next: Option<DateTime<Local>>,
    end: DateTime<Local>,
}

impl Iterator for WindowDays {
    type Item = DateTime<Local>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|day| *day < self.end)?;
        self.next = date::add_days(current, 1);
        Some(current)
    }
}
