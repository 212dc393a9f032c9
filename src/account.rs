//! Defines the account model and its database queries.
//!
//! An account holds the user's contact details and a running balance. The
//! balance is kept in sync with the account's transactions by
//! [crate::finance::record_net_profit].

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{Error, user::UserID};

/// An integer account ID as stored in the database.
pub type AccountId = i64;

/// The contact details and balance associated with a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The ID of the user that owns the account.
    pub user_id: UserID,
    /// The account holder's name.
    pub name: String,
    /// The account holder's email address.
    pub email: String,
    /// The account holder's phone number, if any.
    pub phone: Option<String>,
    /// The sum of the account's transaction amounts.
    pub balance: f64,
    /// When the balance was last updated.
    pub updated_at: OffsetDateTime,
}

/// Create the account table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id),
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT,
            balance REAL NOT NULL DEFAULT 0.0,
            updated_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_account_row(row: &rusqlite::Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        balance: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Create and insert a new account for `user_id` with a zero balance.
///
/// # Errors
///
/// This function will return a:
/// - [Error::DuplicateEmail] if `email` is already taken,
/// - or [Error::SqlError] if an SQL related error occurred.
pub fn create_account(
    user_id: UserID,
    name: &str,
    email: &str,
    phone: Option<&str>,
    connection: &Connection,
) -> Result<Account, Error> {
    let updated_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO account (user_id, name, email, phone, balance, updated_at)
         VALUES (?1, ?2, ?3, ?4, 0.0, ?5)",
        (user_id.as_i64(), name, email, phone, updated_at),
    )?;

    Ok(Account {
        id: connection.last_insert_rowid(),
        user_id,
        name: name.to_owned(),
        email: email.to_owned(),
        phone: phone.map(str::to_owned),
        balance: 0.0,
        updated_at,
    })
}

/// Get the first account belonging to `user_id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NotFound] if the user has no accounts,
/// - or [Error::SqlError] if an SQL related error occurred.
pub fn get_account_by_user(user_id: UserID, connection: &Connection) -> Result<Account, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, email, phone, balance, updated_at FROM account \
             WHERE user_id = :user_id ORDER BY id ASC LIMIT 1",
        )?
        .query_row(&[(":user_id", &user_id.as_i64())], map_account_row)
        .map_err(|error| error.into())
}

/// Add `amount` to the balance of the account with `account_id` and refresh
/// its updated timestamp.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NotFound] if `account_id` does not refer to an account,
/// - or [Error::SqlError] if an SQL related error occurred.
pub fn add_to_balance(
    account_id: AccountId,
    amount: f64,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE account SET balance = balance + ?1, updated_at = ?2 WHERE id = ?3",
        (amount, OffsetDateTime::now_utc(), account_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}
