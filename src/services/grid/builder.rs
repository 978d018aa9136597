use chrono::{DateTime, Local, NaiveDate};

use super::classifier::classify;
use crate::models::allowed_range::AllowedRange;
use crate::models::grid_cell::GridCell;
use crate::models::time_window::TimeWindow;
use crate::services::calendar::{CalendarError, CalendarSource, Result};
use crate::utils::date;

/// An item left out of the grid because its date could not be read.
#[derive(Debug)]
pub struct SkippedItem<T> {
    pub item: T,
    pub error: CalendarError,
}

/// Cells of one window, in ascending date order.
#[derive(Debug)]
pub struct Grid<T> {
    /// The period being displayed; cells outside it are flagged `out`
    pub window: TimeWindow,
    /// Allowed range snapshot used to classify every cell
    pub allowed_range: AllowedRange,
    pub cells: Vec<GridCell<T>>,
    pub skipped: Vec<SkippedItem<T>>,
}

impl<T> Grid<T> {
    pub fn item_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.items.len()).sum()
    }

    /// Cells grouped into rows of seven, as shown in a month view.
    pub fn weeks(&self) -> std::slice::Chunks<'_, GridCell<T>> {
        self.cells.chunks(7)
    }
}

/// Builds grids from a calendar source.
///
/// Items are fetched with a single query per grid and assigned to days by
/// their own timestamp. An item whose timestamp cannot be computed is
/// skipped, logged, and reported in [`Grid::skipped`]; errors from the
/// source itself fail the build.
#[derive(Debug)]
pub struct GridBuilder<'s, S> {
    source: &'s S,
}

impl<'s, S: CalendarSource> GridBuilder<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self { source }
    }

    /// One cell per day of `window`.
    pub fn build(&self, window: &TimeWindow) -> Result<Grid<S::Item>> {
        self.build_range(window, window.start(), window.end())
    }

    /// Cells for whole weeks around `window`, starting on
    /// `first_day_of_week` (0 = Sunday). Padding days fall outside the
    /// window and are flagged `out`.
    pub fn build_padded(&self, window: &TimeWindow, first_day_of_week: u8) -> Result<Grid<S::Item>> {
        let first = window.start().date_naive();
        let start_date = date::week_start(first, first_day_of_week);
        let last_week = date::week_start(window.last_date(), first_day_of_week);
        let end_date = last_week
            .checked_add_days(chrono::Days::new(7))
            .ok_or_else(|| out_of_range(last_week))?;

        let start = if start_date == first {
            window.start()
        } else {
            padding_day(window.start(), start_date)?
        };
        let end = padding_day(window.start(), end_date)?;

        self.build_range(window, start, end)
    }

    fn build_range(
        &self,
        window: &TimeWindow,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Grid<S::Item>> {
        let allowed_range = self.source.allowed_date_range()?;
        let items = self.source.find_items(start.timestamp(), end.timestamp())?;

        let display = TimeWindow::new(start, end).map_err(CalendarError::DateOutOfRange)?;
        let days: Vec<DateTime<Local>> = display.days().collect();
        let mut buckets: Vec<Vec<S::Item>> = days.iter().map(|_| Vec::new()).collect();
        let mut skipped = Vec::new();

        for item in items {
            let timestamp = match self.source.item_timestamp(&item) {
                Ok(timestamp) => timestamp,
                Err(error) => {
                    log::warn!("Skipping calendar item: {}", error);
                    skipped.push(SkippedItem { item, error });
                    continue;
                }
            };
            // Day i covers [days[i], days[i + 1]), the last day ends at `end`.
            let index = days.partition_point(|day| day.timestamp() <= timestamp);
            if index == 0 || timestamp >= end.timestamp() {
                log::debug!("Item at {} lies outside {}..{}", timestamp, start, end);
                continue;
            }
            buckets[index - 1].push(item);
        }

        let cells = days
            .into_iter()
            .zip(buckets)
            .map(|(day, items)| GridCell {
                date: day,
                items,
                classification: classify(day, window, &allowed_range),
            })
            .collect();

        Ok(Grid {
            window: *window,
            allowed_range,
            cells,
            skipped,
        })
    }
}

/// `day` at the wall-clock time of `reference`.
fn padding_day(reference: DateTime<Local>, day: NaiveDate) -> Result<DateTime<Local>> {
    date::from_local(day.and_time(reference.time())).ok_or_else(|| out_of_range(day))
}

fn out_of_range(day: NaiveDate) -> CalendarError {
    CalendarError::DateOutOfRange(format!("cannot place a grid day on {}", day))
}
