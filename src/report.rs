//! Defines the report table schema.
//!
//! The table is part of the persisted schema so that generated reports can be
//! stored in a later release, but no request handler currently reads from or
//! writes to it.

use rusqlite::Connection;

/// Create the report table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_report_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS report (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id),
            report_type TEXT NOT NULL,
            report_date TEXT NOT NULL,
            content TEXT
        )",
        (),
    )?;

    Ok(())
}
