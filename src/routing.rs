//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    auth::{auth_guard, get_log_in_page, get_log_out, post_log_in},
    dashboard::get_dashboard_page,
    endpoints,
    finance::{get_manage_finance_page, post_manage_finance},
    maintenance::get_maintenance_page,
    manage_account::get_manage_account_page,
    not_found::get_404_not_found,
    write_report::{get_write_report_page, post_write_report},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LOG_IN, get(get_log_in_page))
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out));

    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::MANAGE_ACCOUNT_VIEW, get(get_manage_account_page))
        .route(endpoints::MANAGE_FINANCE_VIEW, get(get_manage_finance_page))
        .route(endpoints::MANAGE_FINANCE_VIEW, post(post_manage_finance))
        .route(endpoints::WRITE_REPORT_VIEW, get(get_write_report_page))
        .route(endpoints::WRITE_REPORT_VIEW, post(post_write_report))
        .route(endpoints::MAINTENANCE_VIEW, get(get_maintenance_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects unauthenticated visitors to the log-in page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::LOG_IN)
}
