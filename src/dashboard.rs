//! This file defines the dashboard route and its handlers.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    user::{UserID, get_user_by_id},
};

/// The state needed by the dashboard handler.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for looking up the signed-in user.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the landing page for a signed-in user.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_user_by_id(user_id, &connection) {
            Ok(user) => user,
            Err(error) => return error.into_response(),
        }
    };

    let content = html! {
        (NavBar::new(endpoints::DASHBOARD_VIEW).into_html())

        section class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl mb-4"
            {
                "Dashboard"
            }

            p id="greeting" { "Welcome, " (user.username) "!" }
        }
    };

    base("Dashboard", &content).into_response()
}
