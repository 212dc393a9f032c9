//! The manage-account page: shows the signed-in user's profile alongside
//! their account's details and balance.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{Account, get_account_by_user},
    alert::alert_error,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_ROW_STYLE, base},
    navigation::NavBar,
    user::{User, UserID, get_user_by_id},
};

/// The state needed by the manage-account handler.
#[derive(Debug, Clone)]
pub struct ManageAccountState {
    /// The database connection for looking up the user and their account.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ManageAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn detail_row(label: &str, value: &str) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            th class=(TABLE_CELL_STYLE) scope="row" { (label) }
            td class=(TABLE_CELL_STYLE) { (value) }
        }
    }
}

fn account_details(account: &Account) -> Markup {
    html! {
        table class="w-full max-w-md text-sm text-left" id="account-details"
        {
            tbody
            {
                (detail_row("Name", &account.name))
                (detail_row("Email", &account.email))
                (detail_row("Phone", account.phone.as_deref().unwrap_or("-")))
                (detail_row("Balance", &format!("{:.2}", account.balance)))
                (detail_row("Last updated", &account.updated_at.date().to_string()))
            }
        }
    }
}

fn manage_account_page(user: &User, account: Option<&Account>) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::MANAGE_ACCOUNT_VIEW).into_html())

        section class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl mb-4"
            {
                "Manage Account"
            }

            h2 class="text-lg font-bold mt-4 mb-2" { "Profile" }

            table class="w-full max-w-md text-sm text-left" id="profile-details"
            {
                tbody
                {
                    (detail_row("Username", &user.username))
                    (detail_row("Email", &user.email))
                    (detail_row("Registered", &user.registration_date.date().to_string()))
                }
            }

            h2 class="text-lg font-bold mt-6 mb-2" { "Account" }

            @match account {
                Some(account) => { (account_details(account)) }
                None => { (alert_error("Account not found")) }
            }
        }
    };

    base("Manage Account", &content)
}

/// Display the signed-in user's profile and account details.
///
/// A user without an account still gets their profile, with an alert in
/// place of the account table.
pub async fn get_manage_account_page(
    State(state): State<ManageAccountState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let user = match get_user_by_id(user_id, &connection) {
        Ok(user) => user,
        Err(error) => return error.into_response(),
    };

    let account = match get_account_by_user(user.id, &connection) {
        Ok(account) => Some(account),
        Err(Error::NotFound) => None,
        Err(error) => return error.into_response(),
    };

    manage_account_page(&user, account.as_ref()).into_response()
}
