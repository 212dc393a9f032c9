//! The finance recorder: the manage-finance page and the POST handler that
//! computes a net-profit figure from the submitted income/expense fields and
//! persists it as a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    account::{add_to_balance, get_account_by_user},
    alert::{alert_error, alert_success},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, labelled_input},
    navigation::NavBar,
    timezone::today_in_timezone,
    transaction::{
        FINANCIAL_DATA, FINANCIAL_TRANSACTION_DESCRIPTION, NewTransaction, Transaction,
        create_transaction,
    },
    user::{UserID, get_user_by_id},
};

/// Compute the net profit figure from the four form fields.
///
/// Income and interest count towards the profit, losses and loaner payments
/// against it. The result is signed: a loss-making period is negative.
pub fn net_profit(income: f64, interest: f64, loss: f64, loaner: f64) -> f64 {
    income + interest - loss - loaner
}

/// Date format for the transaction date form field, e.g. "2024-03-15".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Resolve the effective transaction date from the raw form value.
///
/// A missing or empty value resolves to `today`. Anything else must parse as
/// a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an [Error::InvalidDate] if the value is present but not a valid date.
pub fn resolve_transaction_date(raw_date: Option<&str>, today: Date) -> Result<Date, Error> {
    match raw_date {
        None => Ok(today),
        Some(raw_date) if raw_date.is_empty() => Ok(today),
        Some(raw_date) => {
            Date::parse(raw_date, DATE_FORMAT).map_err(|_| Error::InvalidDate(raw_date.to_owned()))
        }
    }
}

/// The ways recording a net profit figure can fail.
///
/// The first two are user-visible conditions rendered as page alerts; the
/// request itself still succeeds.
#[derive(Debug, PartialEq)]
pub enum RecordError {
    /// The session's user ID does not refer to a user row.
    UserNotFound,
    /// The user has no account to attribute the transaction to.
    AccountNotFound,
    /// The database failed.
    Database(Error),
}

impl From<Error> for RecordError {
    fn from(error: Error) -> Self {
        Self::Database(error)
    }
}

/// Insert a transaction recording `amount` for `user_id` and add the amount
/// to the balance of the user's first account.
///
/// The row insert and the balance update happen in a single database
/// transaction so the account balance always equals the sum of its
/// transactions' amounts.
///
/// # Errors
///
/// Returns a:
/// - [RecordError::UserNotFound] if `user_id` does not refer to a user,
/// - [RecordError::AccountNotFound] if the user has no accounts,
/// - [RecordError::Database] if an SQL related error occurred.
pub fn record_net_profit(
    user_id: UserID,
    amount: f64,
    date: Date,
    connection: &Connection,
) -> Result<Transaction, RecordError> {
    let user = get_user_by_id(user_id, connection).map_err(|error| match error {
        Error::NotFound => RecordError::UserNotFound,
        error => RecordError::Database(error),
    })?;

    let account = get_account_by_user(user.id, connection).map_err(|error| match error {
        Error::NotFound => RecordError::AccountNotFound,
        error => RecordError::Database(error),
    })?;

    let sql_transaction = rusqlite::Transaction::new_unchecked(
        connection,
        rusqlite::TransactionBehavior::Deferred,
    )
    .map_err(Error::from)?;

    let transaction = create_transaction(
        NewTransaction {
            user_id: user.id,
            account_id: account.id,
            date,
            transaction_type: FINANCIAL_DATA.to_owned(),
            amount,
            description: FINANCIAL_TRANSACTION_DESCRIPTION.to_owned(),
        },
        &sql_transaction,
    )?;
    add_to_balance(account.id, amount, &sql_transaction)?;

    sql_transaction.commit().map_err(Error::from)?;

    Ok(transaction)
}

/// The state needed by the manage-finance handlers.
#[derive(Debug, Clone)]
pub struct FinanceState {
    /// The database connection for recording transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for FinanceState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Parse a numeric form field, treating a missing or empty value as zero.
///
/// Browsers submit untouched number inputs as empty strings rather than
/// omitting them, so plain `#[serde(default)]` is not enough.
fn amount_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: String = Deserialize::deserialize(deserializer)?;

    if raw.is_empty() {
        return Ok(0.0);
    }

    raw.parse().map_err(serde::de::Error::custom)
}

/// The raw data entered by the user in the manage-finance form.
///
/// The numeric fields default to zero when absent or left blank so that a
/// partially filled form still produces a figure.
#[derive(Debug, Clone, Deserialize)]
pub struct FinanceForm {
    /// Money earned in the period.
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub income: f64,
    /// Interest earned in the period.
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub interest: f64,
    /// Money lost in the period.
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub loss: f64,
    /// Loan repayments made in the period.
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub loaner: f64,
    /// The date the figures apply to, in `YYYY-MM-DD` form. Empty or missing
    /// means today.
    pub transaction_date: Option<String>,
}

fn manage_finance_page(net_profit: f64, alert: Option<Markup>) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::MANAGE_FINANCE_VIEW).into_html())

        section class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl mb-4"
            {
                "Manage Finance"
            }

            @if let Some(alert) = alert {
                (alert)
            }

            p class="mb-4" id="net-profit"
            {
                "Net profit: " (format!("{net_profit:.2}"))
            }

            form
                method="post"
                action=(endpoints::MANAGE_FINANCE_VIEW)
                class="w-full max-w-md space-y-4"
            {
                (labelled_input("Income", "income", "number", "", false))
                (labelled_input("Interest", "interest", "number", "", false))
                (labelled_input("Loss", "loss", "number", "", false))
                (labelled_input("Loaner", "loaner", "number", "", false))
                (labelled_input("Transaction date", "transaction_date", "date", "", false))

                button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Record"
                }
            }
        }
    };

    base("Manage Finance", &content)
}

/// Display the manage-finance page with an empty form.
pub async fn get_manage_finance_page() -> Response {
    manage_finance_page(0.0, None).into_response()
}

/// Handler for finance form submissions via the POST method.
///
/// Computes the net profit from the submitted fields and records it as a
/// transaction against the user's account. The computed figure is displayed
/// even when persistence fails with a user-visible condition (missing user or
/// account).
pub async fn post_manage_finance(
    State(state): State<FinanceState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<FinanceForm>,
) -> Response {
    let today = match today_in_timezone(&state.local_timezone) {
        Some(today) => today,
        None => return Error::InvalidTimezoneError(state.local_timezone).into_response(),
    };

    let date = match resolve_transaction_date(form.transaction_date.as_deref(), today) {
        Ok(date) => date,
        Err(Error::InvalidDate(raw_date)) => {
            let message = format!("\"{raw_date}\" is not a valid date in YYYY-MM-DD form");
            return manage_finance_page(0.0, Some(alert_error(&message))).into_response();
        }
        Err(error) => return error.into_response(),
    };

    let amount = net_profit(form.income, form.interest, form.loss, form.loaner);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let alert = match record_net_profit(user_id, amount, date, &connection) {
        Ok(transaction) => {
            tracing::info!(
                "recorded net profit {amount} for user {user_id} on {}",
                transaction.date
            );
            Some(alert_success("Net profit recorded"))
        }
        Err(RecordError::UserNotFound) => Some(alert_error("User not found")),
        Err(RecordError::AccountNotFound) => Some(alert_error("Account not found")),
        Err(RecordError::Database(error)) => return error.into_response(),
    };

    manage_finance_page(amount, alert).into_response()
}




#[cfg(test)]
mod record_net_profit_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        account::{create_account, get_account_by_user},
        auth::PasswordHash,
        db::initialize,
        transaction::{FINANCIAL_DATA, count_transactions},
        user::{User, UserID, create_user},
    };

    use super::{RecordError, record_net_profit};

    fn get_db_connection_and_user() -> (Connection, User) {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        initialize(&conn).expect("Could not initialize database");

        let user = create_user(
            "alice",
            "alice@example.com",
            PasswordHash::new_unchecked("hunter2"),
            &conn,
        )
        .unwrap();

        (conn, user)
    }

    #[test]
    fn records_transaction_and_updates_balance() {
        let (conn, user) = get_db_connection_and_user();
        create_account(user.id, "Alice", "acc@example.com", None, &conn).unwrap();

        let transaction =
            record_net_profit(user.id, 25.0, date!(2024 - 03 - 15), &conn).unwrap();

        assert_eq!(transaction.amount, 25.0);
        assert_eq!(transaction.date, date!(2024 - 03 - 15));
        assert_eq!(transaction.transaction_type, FINANCIAL_DATA);

        let account = get_account_by_user(user.id, &conn).unwrap();
        assert_eq!(account.balance, 25.0);
    }

    #[test]
    fn balance_tracks_sum_of_amounts() {
        let (conn, user) = get_db_connection_and_user();
        create_account(user.id, "Alice", "acc@example.com", None, &conn).unwrap();

        record_net_profit(user.id, 10.0, date!(2024 - 03 - 15), &conn).unwrap();
        record_net_profit(user.id, -4.5, date!(2024 - 03 - 16), &conn).unwrap();

        let account = get_account_by_user(user.id, &conn).unwrap();
        assert_eq!(account.balance, 5.5);
    }

    #[test]
    fn fails_without_account_and_writes_nothing() {
        let (conn, user) = get_db_connection_and_user();

        let result = record_net_profit(user.id, 25.0, date!(2024 - 03 - 15), &conn);

        assert_eq!(result, Err(RecordError::AccountNotFound));
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn fails_without_user_and_writes_nothing() {
        let (conn, _) = get_db_connection_and_user();

        let result = record_net_profit(UserID::new(999), 25.0, date!(2024 - 03 - 15), &conn);

        assert_eq!(result, Err(RecordError::UserNotFound));
        assert_eq!(count_transactions(&conn), Ok(0));
    }
}
