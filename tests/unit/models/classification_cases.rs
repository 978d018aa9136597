// Table-driven classification cases
// Cell dates against an allowed range of [100, 200) inside a wide window

use calendar_grid::models::allowed_range::AllowedRange;
use calendar_grid::models::grid_cell::{CellClasses, Classification};
use calendar_grid::models::time_window::TimeWindow;
use calendar_grid::services::grid::classify;
use chrono::{Local, TimeZone};
use test_case::test_case;

fn classify_at(cell: i64, window: (i64, i64), range: AllowedRange) -> Classification {
    let at = |ts: i64| Local.timestamp_opt(ts, 0).unwrap();
    let window = TimeWindow::new(at(window.0), at(window.1)).unwrap();
    classify(at(cell), &window, &range)
}

#[test_case(99, true, false, false; "below min is past")]
#[test_case(100, false, true, false; "min is inclusive")]
#[test_case(150, false, true, false; "inside is active")]
#[test_case(199, false, true, false; "just below max is active")]
#[test_case(200, false, false, true; "max is exclusive")]
fn test_range_classification(cell: i64, past: bool, active: bool, future: bool) {
    let flags = classify_at(cell, (0, 1_000), AllowedRange::new(Some(100), Some(200)));
    assert_eq!(flags.past, past, "past flag for {}", cell);
    assert_eq!(flags.active, active, "active flag for {}", cell);
    assert_eq!(flags.future, future, "future flag for {}", cell);
    assert!(!flags.out);
}

#[test_case(50, (100, 150), vec!["out", "past"]; "before window and range")]
#[test_case(250, (100, 150), vec!["out", "future"]; "after window and range")]
#[test_case(120, (100, 150), vec!["active"]; "inside both")]
#[test_case(160, (100, 150), vec!["out", "active"]; "after window inside range")]
fn test_out_combines_with_range_flags(cell: i64, window: (i64, i64), expected: Vec<&str>) {
    let flags = classify_at(cell, window, AllowedRange::new(Some(100), Some(200)));
    assert_eq!(flags.css_classes(&CellClasses::default()), expected);
}

#[test]
fn test_unbounded_range_is_always_active() {
    for cell in [i32::MIN as i64, 0, i32::MAX as i64] {
        let flags = classify_at(cell, (0, 1), AllowedRange::unbounded());
        assert!(flags.active && !flags.past && !flags.future);
    }
}
