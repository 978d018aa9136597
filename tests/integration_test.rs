// Integration tests for settings, SQLite calendars and grid building

mod fixtures;

use calendar_grid::models::allowed_range::AllowedRange;
use calendar_grid::models::time_window::TimeWindow;
use calendar_grid::models::view_mode::ViewMode;
use calendar_grid::services::calendar::{
    AttributeType, CalendarError, CalendarSource, DateRangeSource, ItemFilter, SqliteCalendar,
};
use calendar_grid::services::grid::GridBuilder;
use calendar_grid::services::period::PeriodResolver;
use calendar_grid::services::settings::load_settings;
use calendar_grid::services::settings::mapper::calendar_from_settings;
use fixtures::{databases, dates};
use pretty_assertions::assert_eq;

#[test]
fn test_month_grid_from_settings_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("posts.db");
    let db = databases::posts(db_path.to_str().unwrap());
    databases::add_post(&db, "Leap post", "live", "2024-02-29 18:00:00");
    databases::add_post(&db, "Opening", "live", "2024-03-01 09:00:00");
    databases::add_post(&db, "Hidden", "draft", "2024-03-01 10:00:00");
    databases::add_post(&db, "Closing", "live", "2024-03-31 23:59:59");
    databases::add_post(&db, "April", "live", "2024-04-01 00:00:00");

    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(
        &settings_path,
        r#"
        table = "posts"
        date_attribute = "published_at"
        first_day_of_week = 1

        [filter]
        status = "live"

        [date_range]
        max = "2024-03-15"
        "#,
    )
    .unwrap();

    let settings = load_settings(&settings_path).expect("Failed to load settings");
    let calendar =
        calendar_from_settings(&settings, db.connection()).expect("Failed to build calendar");
    assert_eq!(calendar.attribute_type().unwrap(), AttributeType::Date);

    let window = TimeWindow::month_of(dates::ymd(2024, 3, 10)).unwrap();
    let grid = GridBuilder::new(&calendar)
        .build_padded(&window, settings.first_day_of_week)
        .expect("Failed to build grid");

    assert_eq!(grid.cells.len(), 35);
    assert!(grid.skipped.is_empty());

    let leap = &grid.cells[3];
    assert_eq!(leap.date.date_naive(), dates::leap_day_2024());
    assert!(leap.classification.out);
    assert_eq!(leap.items.len(), 1);
    assert_eq!(leap.items[0].text("title"), Some("Leap post"));

    let first = &grid.cells[4];
    assert_eq!(first.date_key(&settings.cell_date_format), "2024-03-01");
    assert_eq!(first.items.len(), 1, "draft post must be filtered out");
    assert!(first.classification.active);

    let last = grid.cells.last().unwrap();
    assert_eq!(last.date_key("%Y-%m-%d"), "2024-03-31");
    assert_eq!(last.items.len(), 1);
    assert!(last.classification.future && !last.classification.out);
    assert_eq!(
        last.classification.css_classes(&settings.classes),
        vec!["future"]
    );

    assert_eq!(grid.item_count(), 3);
    assert!(grid
        .cells
        .iter()
        .flat_map(|cell| cell.items.iter())
        .all(|item| item.source.as_ref().map(|s| s.name()) == Some("posts")));
}

#[test]
fn test_week_navigation_walks_back_and_forth() {
    let db = databases::readings(":memory:");
    for day in 1..=21 {
        databases::add_reading(&db, day as f64, dates::ts(2024, 3, day, 12));
    }
    let calendar = SqliteCalendar::builder("readings")
        .eager()
        .build(db.connection())
        .unwrap();
    let resolver = PeriodResolver::new();

    let window = TimeWindow::week_of(dates::monday_mar_4_2024(), 1).unwrap();
    assert_eq!(resolver.compact_label(&window).to_string(), "4 — 10 Mar 2024");
    let grid = GridBuilder::new(&calendar).build(&window).unwrap();
    assert!(grid.cells.iter().all(|cell| cell.items.len() == 1));

    let next_start = resolver.next_anchor(&window);
    let next = TimeWindow::week_of(next_start.date_naive(), 1).unwrap();
    assert_eq!(next.start(), next_start);
    assert_eq!(resolver.compact_label(&next).to_string(), "11 — 17 Mar 2024");

    let prev_start = resolver.prev_anchor(&window, ViewMode::Week).unwrap();
    let prev = TimeWindow::week_of(prev_start.date_naive(), 1).unwrap();
    assert_eq!(resolver.compact_label(&prev).to_string(), "26 Feb — 3 Mar 2024");
    let grid = GridBuilder::new(&calendar).build(&prev).unwrap();
    let counts: Vec<usize> = grid.cells.iter().map(|cell| cell.items.len()).collect();
    assert_eq!(counts, vec![0, 0, 0, 0, 1, 1, 1]);
}

#[test]
fn test_month_navigation_across_year() {
    let resolver = PeriodResolver::new();
    let january = TimeWindow::month_of(dates::ymd(2025, 1, 20)).unwrap();

    let prev = resolver.prev_anchor(&january, ViewMode::Month).unwrap();
    assert_eq!(prev.date_naive(), dates::ymd(2024, 12, 1));
    assert_eq!(resolver.next_anchor(&january).date_naive(), dates::ymd(2025, 2, 1));

    let padded = TimeWindow::new(dates::at(2024, 12, 30, 0), dates::at(2025, 1, 6, 0)).unwrap();
    let label = resolver.compact_label(&padded);
    assert_eq!(label.to_string(), "30 Dec 2024 — 5 Jan 2025");
    assert_eq!(resolver.month_view_anchor(&padded), dates::ymd(2025, 1, 5));
    assert_eq!(resolver.week_view_anchor(&padded), dates::ymd(2024, 12, 30));
}

#[test]
fn test_unparsable_dates_are_reported_not_fatal() {
    let db = databases::posts(":memory:");
    databases::add_post(&db, "Fine", "live", "2024-03-05 08:00:00");
    databases::add_post(&db, "Broken", "live", "2024-03-06 at noon");

    let calendar = SqliteCalendar::builder("posts")
        .date_attribute("published_at")
        .build(db.connection())
        .unwrap();
    let window = TimeWindow::week_of(dates::monday_mar_4_2024(), 1).unwrap();
    let grid = GridBuilder::new(&calendar).build(&window).unwrap();

    assert_eq!(grid.item_count(), 1);
    assert_eq!(grid.skipped.len(), 1);
    assert_eq!(grid.skipped[0].item.text("title"), Some("Broken"));
    assert!(matches!(grid.skipped[0].error, CalendarError::Parse { .. }));
}

#[test]
fn test_computed_range_follows_supplier() {
    let db = databases::readings(":memory:");
    let cutoff = std::sync::Arc::new(std::sync::atomic::AtomicI64::new(dates::ts(2024, 3, 6, 0)));
    let supplier_cutoff = std::sync::Arc::clone(&cutoff);
    let calendar = SqliteCalendar::builder("readings")
        .date_range(DateRangeSource::computed(move || {
            AllowedRange::new(
                Some(supplier_cutoff.load(std::sync::atomic::Ordering::SeqCst)),
                None,
            )
        }))
        .build(db.connection())
        .unwrap();
    let window = TimeWindow::week_of(dates::monday_mar_4_2024(), 1).unwrap();

    let past = |calendar: &SqliteCalendar<'_>| -> usize {
        GridBuilder::new(calendar)
            .build(&window)
            .unwrap()
            .cells
            .iter()
            .filter(|cell| cell.classification.past)
            .count()
    };

    assert_eq!(past(&calendar), 2);
    cutoff.store(dates::ts(2024, 3, 9, 0), std::sync::atomic::Ordering::SeqCst);
    assert_eq!(past(&calendar), 5);
    assert_eq!(
        calendar.allowed_date_range().unwrap().min,
        Some(dates::ts(2024, 3, 9, 0))
    );
}

#[test]
fn test_filter_callback_can_use_window_bounds() {
    let db = databases::readings(":memory:");
    for (value, day) in [(1.0, 4), (50.0, 5), (75.0, 6)] {
        databases::add_reading(&db, value, dates::ts(2024, 3, day, 9));
    }

    let calendar = SqliteCalendar::builder("readings")
        .filter(ItemFilter::computed(|query, _, _| {
            Some(query.and_where("value >= ?", [rusqlite::types::Value::Real(10.0)]))
        }))
        .build(db.connection())
        .unwrap();

    let items = calendar
        .find_items(dates::ts(2024, 3, 1, 0), dates::ts(2024, 4, 1, 0))
        .unwrap();
    let values: Vec<f64> = items
        .iter()
        .filter_map(|item| item.field("value").and_then(|v| v.as_f64()))
        .collect();
    assert_eq!(values, vec![50.0, 75.0]);
}

#[test]
fn test_missing_column_is_configuration_error() {
    let db = databases::posts(":memory:");
    let err = SqliteCalendar::builder("posts")
        .date_attribute("created_at")
        .eager()
        .build(db.connection())
        .err()
        .unwrap();
    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "column 'created_at' does not exist in table 'posts'"
    );
}
