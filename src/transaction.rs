//! Defines the transaction model and its database queries.
//!
//! A transaction here is a single stored record of a computed net-profit
//! figure, not a double-entry ledger line.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, account::AccountId, user::UserID};

/// The transaction type tag written by the finance recorder.
pub const FINANCIAL_DATA: &str = "financial_data";

/// The description given to transactions created by the finance recorder.
pub const FINANCIAL_TRANSACTION_DESCRIPTION: &str = "Financial transaction";

/// An integer transaction ID as stored in the database.
pub type TransactionId = i64;

/// A stored net-profit figure, attributed to a user and one of their accounts.
///
/// The amount is signed: a loss-making period produces a negative amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the user that recorded the transaction.
    pub user_id: UserID,
    /// The ID of the account the transaction belongs to.
    pub account_id: AccountId,
    /// When the transaction happened.
    pub date: Date,
    /// The type tag, e.g. [FINANCIAL_DATA].
    pub transaction_type: String,
    /// The net amount of money earned (positive) or lost (negative).
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
}

/// The fields needed to insert a new transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The ID of the user recording the transaction.
    pub user_id: UserID,
    /// The ID of the account the transaction belongs to.
    pub account_id: AccountId,
    /// When the transaction happened.
    pub date: Date,
    /// The type tag, e.g. [FINANCIAL_DATA].
    pub transaction_type: String,
    /// The net amount of money earned (positive) or lost (negative).
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
}

/// Create the transaction table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id),
            account_id INTEGER NOT NULL REFERENCES account(id),
            date TEXT NOT NULL,
            transaction_type TEXT NOT NULL,
            amount REAL NOT NULL,
            description TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_transaction_row(row: &rusqlite::Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        account_id: row.get(2)?,
        date: row.get(3)?,
        transaction_type: row.get(4)?,
        amount: row.get(5)?,
        description: row.get(6)?,
    })
}

/// Insert a new transaction row into the database.
///
/// # Errors
///
/// This function will return an [Error::SqlError] if an SQL related error occurred.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "INSERT INTO \"transaction\" \
                (user_id, account_id, date, transaction_type, amount, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, user_id, account_id, date, transaction_type, amount, description",
        )?
        .query_row(
            (
                new_transaction.user_id.as_i64(),
                new_transaction.account_id,
                new_transaction.date,
                new_transaction.transaction_type,
                new_transaction.amount,
                new_transaction.description,
            ),
            map_transaction_row,
        )
        .map_err(|error| error.into())
}

/// Get all of a user's transactions with the given type tag, ordered by date
/// and then ID so the order is stable.
///
/// # Errors
///
/// This function will return an [Error::SqlError] if an SQL related error occurred.
pub fn get_transactions_by_type(
    user_id: UserID,
    transaction_type: &str,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, account_id, date, transaction_type, amount, description \
             FROM \"transaction\" \
             WHERE user_id = :user_id AND transaction_type = :transaction_type \
             ORDER BY date ASC, id ASC",
        )?
        .query_map(
            rusqlite::named_params! {
                ":user_id": user_id.as_i64(),
                ":transaction_type": transaction_type,
            },
            map_transaction_row,
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
///
/// This function will return an [Error::SqlError] if an SQL related error occurred.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}
