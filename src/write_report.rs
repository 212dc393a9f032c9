//! The report page: partitions the user's recorded net-profit transactions
//! into daily and monthly sets and renders them with a monthly average.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    timezone::today_in_timezone,
    transaction::{FINANCIAL_DATA, Transaction, get_transactions_by_type},
    user::UserID,
};

/// Select the transactions dated today.
pub fn daily_transactions(transactions: &[Transaction], today: Date) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.date == today)
        .collect()
}

/// Select the transactions dated in the current calendar month.
///
/// Both the year and the month must match, so a figure from March of a
/// previous year does not leak into this March's report.
pub fn monthly_transactions(transactions: &[Transaction], today: Date) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.date.year() == today.year() && transaction.date.month() == today.month()
        })
        .collect()
}

/// The arithmetic mean of the transactions' amounts, or zero when there are
/// none.
pub fn average_net_profit(transactions: &[&Transaction]) -> f64 {
    if transactions.is_empty() {
        return 0.0;
    }

    let total: f64 = transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum();

    total / transactions.len() as f64
}

/// The state needed by the report handlers.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for fetching transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

fn transaction_table(heading: &str, transactions: &[&Transaction]) -> Markup {
    html! {
        h2 class="text-lg font-bold mt-6 mb-2" { (heading) }

        @if transactions.is_empty() {
            p { "No transactions recorded." }
        } @else {
            table class="w-full max-w-md text-sm text-left"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th class=(TABLE_CELL_STYLE) { "Date" }
                        th class=(TABLE_CELL_STYLE) { "Amount" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            td class=(TABLE_CELL_STYLE) { (format!("{:.2}", transaction.amount)) }
                        }
                    }
                }
            }
        }
    }
}

fn write_report_page(report: Option<Markup>) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::WRITE_REPORT_VIEW).into_html())

        section class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl mb-4"
            {
                "Write Report"
            }

            form method="post" action=(endpoints::WRITE_REPORT_VIEW) class="w-full max-w-md"
            {
                button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Generate report"
                }
            }

            @if let Some(report) = report {
                (report)
            }
        }
    };

    base("Write Report", &content)
}

/// Display the report page before a report has been generated.
pub async fn get_write_report_page() -> Response {
    write_report_page(None).into_response()
}

/// Handler for report generation via the POST method.
///
/// Fetches the user's recorded net-profit transactions and renders the ones
/// dated today, the ones dated this month, and the monthly average.
pub async fn post_write_report(
    State(state): State<ReportState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let today = match today_in_timezone(&state.local_timezone) {
        Some(today) => today,
        None => return Error::InvalidTimezoneError(state.local_timezone).into_response(),
    };

    let transactions = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_transactions_by_type(user_id, FINANCIAL_DATA, &connection) {
            Ok(transactions) => transactions,
            Err(error) => return error.into_response(),
        }
    };

    let daily = daily_transactions(&transactions, today);
    let monthly = monthly_transactions(&transactions, today);
    let monthly_average = average_net_profit(&monthly);

    let report = html! {
        (transaction_table("Daily report", &daily))
        (transaction_table("Monthly report", &monthly))

        p class="mt-4" id="monthly-average"
        {
            "Average monthly net profit: " (format!("{monthly_average:.2}"))
        }
    };

    write_report_page(Some(report)).into_response()
}


#[cfg(test)]
mod write_report_route_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, response::IntoResponse};
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime};

    use crate::{
        account::create_account,
        auth::PasswordHash,
        db::initialize,
        transaction::{FINANCIAL_DATA, NewTransaction, create_transaction},
        user::{User, create_user},
    };

    use super::{ReportState, post_write_report};

    fn get_test_state_and_user() -> (ReportState, User) {
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
        create_account(user.id, "Alice", "acc@example.com", None, &conn).unwrap();

        let state = ReportState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        };

        (state, user)
    }

    fn insert_transaction(state: &ReportState, user: &User, date: time::Date, amount: f64) {
        let conn = state.db_connection.lock().unwrap();

        create_transaction(
            NewTransaction {
                user_id: user.id,
                account_id: 1,
                date,
                transaction_type: FINANCIAL_DATA.to_owned(),
                amount,
                description: "Financial transaction".to_owned(),
            },
            &conn,
        )
        .unwrap();
    }

    async fn response_text(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        String::from_utf8_lossy(&body).to_string()
    }

    #[tokio::test]
    async fn report_shows_monthly_average() {
        let (state, user) = get_test_state_and_user();
        let today = OffsetDateTime::now_utc().date();

        insert_transaction(&state, &user, today, 10.0);
        insert_transaction(&state, &user, today, -5.0);
        insert_transaction(&state, &user, today, 25.0);

        let response = post_write_report(State(state), Extension(user.id))
            .await
            .into_response();

        let text = response_text(response).await;
        assert!(
            text.contains("Average monthly net profit: 10.00"),
            "got page: {text}"
        );
    }

    #[tokio::test]
    async fn report_excludes_transactions_from_previous_years() {
        let (state, user) = get_test_state_and_user();
        let today = OffsetDateTime::now_utc().date();
        let last_year = today - Duration::days(365);

        insert_transaction(&state, &user, today, 10.0);
        insert_transaction(&state, &user, last_year, 1000.0);

        let response = post_write_report(State(state), Extension(user.id))
            .await
            .into_response();

        let text = response_text(response).await;
        assert!(
            text.contains("Average monthly net profit: 10.00"),
            "got page: {text}"
        );
        assert!(!text.contains("1000.00"), "got page: {text}");
    }

    #[tokio::test]
    async fn report_with_no_transactions_shows_zero_average() {
        let (state, user) = get_test_state_and_user();

        let response = post_write_report(State(state), Extension(user.id))
            .await
            .into_response();

        let text = response_text(response).await;
        assert!(text.contains("No transactions recorded."), "got page: {text}");
        assert!(
            text.contains("Average monthly net profit: 0.00"),
            "got page: {text}"
        );
    }
}
