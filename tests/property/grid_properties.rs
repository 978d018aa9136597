// Property-based tests for window arithmetic, classification and queries
// Checks the invariants with random inputs

use calendar_grid::models::allowed_range::AllowedRange;
use calendar_grid::models::time_window::TimeWindow;
use calendar_grid::services::calendar::codec::AttributeType;
use calendar_grid::services::calendar::{CalendarSource, SqliteCalendar};
use calendar_grid::services::database::Database;
use calendar_grid::services::grid::classify;
use calendar_grid::services::period::PeriodResolver;
use calendar_grid::utils::date;
use chrono::{Days, Local, NaiveDate, TimeZone};
use proptest::prelude::*;

proptest! {
    /// Property: integer attributes convert without any loss
    #[test]
    fn prop_integer_round_trip_is_identity(ts in any::<i64>()) {
        let ty = AttributeType::Integer;
        let stored = ty.to_stored(ts).unwrap();
        prop_assert_eq!(ty.to_timestamp(&stored).unwrap(), ts);
    }

    /// Property: date attributes round-trip to the second
    #[test]
    fn prop_date_round_trip_within_a_second(ts in 0i64..4_102_444_800) {
        let local = date::from_timestamp(ts).unwrap();
        // Wall-clock times repeated by a DST change cannot identify one instant.
        prop_assume!(Local.from_local_datetime(&local.naive_local()).single().is_some());

        let ty = AttributeType::Date;
        let stored = ty.to_stored(ts).unwrap();
        let back = ty.to_timestamp(&stored).unwrap();
        prop_assert!((back - ts).abs() <= 1);
    }

    /// Property: the four flags follow their definitions independently
    #[test]
    fn prop_classification_flags_are_independent(
        cell in 0i64..10_000,
        start in 0i64..10_000,
        len in 1i64..5_000,
        min in proptest::option::of(0i64..10_000),
        max in proptest::option::of(0i64..10_000),
    ) {
        let at = |ts: i64| Local.timestamp_opt(ts, 0).unwrap();
        let window = TimeWindow::new(at(start), at(start + len)).unwrap();
        let range = AllowedRange::new(min, max);
        let flags = classify(at(cell), &window, &range);

        prop_assert_eq!(flags.out, !(start <= cell && cell < start + len));
        prop_assert_eq!(flags.past, min.is_some_and(|m| cell < m));
        prop_assert_eq!(flags.future, max.is_some_and(|m| cell >= m));
        prop_assert_eq!(flags.active, !flags.past && !flags.future);
    }

    /// Property: every item found lies in the half-open query window
    #[test]
    fn prop_find_items_respects_window(
        stamps in proptest::collection::vec(0i64..1_000, 0..40),
        start in 0i64..1_000,
        len in 1i64..500,
    ) {
        let db = Database::new(":memory:").unwrap();
        db.connection()
            .execute_batch("CREATE TABLE ticks (id INTEGER PRIMARY KEY, date INTEGER NOT NULL);")
            .unwrap();
        for stamp in &stamps {
            db.connection().execute("INSERT INTO ticks (date) VALUES (?1)", [stamp]).unwrap();
        }
        let calendar = SqliteCalendar::builder("ticks").build(db.connection()).unwrap();

        let end = start + len;
        let items = calendar.find_items(start, end).unwrap();
        let expected = stamps.iter().filter(|s| start <= **s && **s < end).count();
        prop_assert_eq!(items.len(), expected);
        for item in &items {
            let ts = calendar.item_timestamp(item).unwrap();
            prop_assert!(start <= ts && ts < end);
        }
    }

    /// Property: bare dates in a DATE column are matched as local midnights
    #[test]
    fn prop_find_items_respects_window_on_date_column(
        offsets in proptest::collection::vec(0u64..90, 0..40),
        start_hour in 0i64..(90 * 24),
        len_hours in 1i64..(30 * 24),
    ) {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let db = Database::new(":memory:").unwrap();
        db.connection()
            .execute_batch("CREATE TABLE ev (id INTEGER PRIMARY KEY, date DATE);")
            .unwrap();
        let mut midnights = Vec::new();
        for offset in &offsets {
            let day = base.checked_add_days(Days::new(*offset)).unwrap();
            db.connection()
                .execute("INSERT INTO ev (date) VALUES (?1)", [day.format("%Y-%m-%d").to_string()])
                .unwrap();
            midnights.push(date::local_midnight(day).unwrap().timestamp());
        }
        let calendar = SqliteCalendar::builder("ev").build(db.connection()).unwrap();

        let start = date::local_midnight(base).unwrap().timestamp() + start_hour * 3_600;
        let end = start + len_hours * 3_600;
        let items = calendar.find_items(start, end).unwrap();
        let expected = midnights.iter().filter(|m| start <= **m && **m < end).count();
        prop_assert_eq!(items.len(), expected);
        for item in &items {
            let ts = calendar.item_timestamp(item).unwrap();
            prop_assert!(start <= ts && ts < end);
        }
    }

    /// Property: week labels always name both boundary days
    #[test]
    fn prop_week_label_starts_with_boundary_days(
        year in 2000..2100i32,
        ordinal in 1..=365u32,
        first_day in 0..=6u8,
    ) {
        let anchor = NaiveDate::from_yo_opt(year, ordinal).unwrap();
        let window = TimeWindow::week_of(anchor, first_day).unwrap();
        let label = PeriodResolver::new().compact_label(&window);

        prop_assert_eq!(window.days().count(), 7);
        prop_assert_eq!(&label.left[0], &window.start().format("%-d").to_string());
        prop_assert_eq!(&label.right[0], &window.last_date().format("%-d").to_string());
        prop_assert!(label.to_string().contains(" — "));
        prop_assert!(label.common.len() <= 2);
        prop_assert_eq!(label.left.len() + label.common.len(), 3);
    }
}
