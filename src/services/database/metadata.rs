use rusqlite::{Connection, OptionalExtension};

/// Checks whether a table exists.
pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Checks whether a table was created `WITHOUT ROWID`.
pub fn is_without_rowid(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let flag: Option<i64> = conn
        .query_row(
            "SELECT wr FROM pragma_table_list WHERE schema = 'main' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(flag == Some(1))
}

/// Declared type of a column, or `None` when the column does not exist.
/// Untyped columns report an empty string.
pub fn column_type(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT type FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |row| row.get(0),
    )
    .optional()
}
