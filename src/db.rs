//! Database initialization for the application's SQLite schema.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, account::create_account_table, report::create_report_table,
    transaction::create_transaction_table, user::create_user_table,
};

/// Create the tables for the application's domain models.
///
/// Table creation happens within a single exclusive transaction so that a
/// partially created schema is never committed.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_account_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_report_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
