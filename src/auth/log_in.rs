//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The rest of the auth module handles the lower level cookie auth logic.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    alert::alert_error,
    auth::{DEFAULT_COOKIE_DURATION, set_auth_cookie},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, form_page, labelled_input},
    user::get_user_by_username,
};

/// The message shown when the username or password did not match a user.
pub(crate) const INVALID_CREDENTIALS_ERROR_MSG: &str = "Invalid username or password";

fn log_in_form(username: &str, error_message: Option<&str>) -> Markup {
    html! {
        form method="post" action=(endpoints::LOG_IN) class="space-y-4 md:space-y-6"
        {
            @if let Some(error_message) = error_message {
                (alert_error(error_message))
            }

            (labelled_input("Username", "username", "text", username, true))
            (labelled_input("Password", "password", "password", "", true))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                "Log in"
            }
        }
    }
}

fn log_in_page(username: &str, error_message: Option<&str>) -> Markup {
    base(
        "Log In",
        &form_page("Log in to your account", &log_in_form(username, error_message)),
    )
}

/// Display the log-in page.
pub async fn get_log_in_page() -> Response {
    log_in_page("", None).into_response()
}

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl LoginState {
    /// Create a new login state with the default cookie duration.
    pub fn new(cookie_key: Key, db_connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            cookie_key,
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection,
        }
    }
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the log-in form.
///
/// The password is stored as a plain string. There is no need for validation
/// here since it will be compared against the password hash in the database.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Username entered during log-in.
    pub username: String,
    /// Password entered during log-in.
    pub password: String,
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the auth cookie is set and the client is
/// redirected to the dashboard page. Otherwise, the log-in page is returned
/// with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_user_by_username(&user_data.username, &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => {
                return log_in_page(&user_data.username, Some(INVALID_CREDENTIALS_ERROR_MSG))
                    .into_response();
            }
            Err(error) => {
                tracing::error!("Unhandled error while looking up user: {error}");
                return log_in_page(
                    &user_data.username,
                    Some("An internal error occurred. Please try again later."),
                )
                .into_response();
            }
        }
    };

    let is_password_valid = match user.password_hash.verify(&user_data.password) {
        Ok(is_password_valid) => is_password_valid,
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return log_in_page(
                &user_data.username,
                Some("An internal error occurred. Please try again later."),
            )
            .into_response();
        }
    };

    if !is_password_valid {
        return log_in_page(&user_data.username, Some(INVALID_CREDENTIALS_ERROR_MSG))
            .into_response();
    }

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(updated_jar) => {
            (updated_jar, Redirect::to(endpoints::DASHBOARD_VIEW)).into_response()
        }
        Err(err) => {
            tracing::error!("Error setting auth cookie: {err}");
            Error::InvalidDateFormat(err.to_string(), "auth cookie expiry".to_owned())
                .into_response()
        }
    }
}
