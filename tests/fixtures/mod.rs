// Test fixtures - reusable test data
// Provides consistent dates and databases across the test files

#![allow(dead_code)]

use calendar_grid::services::database::Database;
use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Local time on the given day and hour
    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    pub fn ts(year: i32, month: u32, day: u32, hour: u32) -> i64 {
        at(year, month, day, hour).timestamp()
    }

    /// Monday 4 March 2024
    pub fn monday_mar_4_2024() -> NaiveDate {
        ymd(2024, 3, 4)
    }

    /// Thursday 29 February 2024 (leap day)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }
}

/// Sample databases for testing
pub mod databases {
    use super::*;

    /// Posts with a DATETIME publication column.
    pub const POSTS_SCHEMA: &str = "CREATE TABLE posts (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'live',
        published_at DATETIME
    );";

    /// Readings with an integer epoch column named `date`.
    pub const READINGS_SCHEMA: &str = "CREATE TABLE readings (
        id INTEGER PRIMARY KEY,
        value REAL NOT NULL,
        date INTEGER NOT NULL
    );";

    pub fn posts(path: &str) -> Database {
        let db = Database::new(path).expect("Failed to create database");
        db.connection()
            .execute_batch(POSTS_SCHEMA)
            .expect("Failed to create posts table");
        db
    }

    pub fn add_post(db: &Database, title: &str, status: &str, published_at: &str) {
        db.connection()
            .execute(
                "INSERT INTO posts (title, status, published_at) VALUES (?1, ?2, ?3)",
                [title, status, published_at],
            )
            .expect("Failed to insert post");
    }

    pub fn readings(path: &str) -> Database {
        let db = Database::new(path).expect("Failed to create database");
        db.connection()
            .execute_batch(READINGS_SCHEMA)
            .expect("Failed to create readings table");
        db
    }

    pub fn add_reading(db: &Database, value: f64, date: i64) {
        db.connection()
            .execute(
                "INSERT INTO readings (value, date) VALUES (?1, ?2)",
                rusqlite::params![value, date],
            )
            .expect("Failed to insert reading");
    }
}
