//! The application's endpoint URIs.

/// The root route which redirects to the log in page.
pub const ROOT: &str = "/";
/// The route for the log in page and log in form submissions.
pub const LOG_IN: &str = "/login";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/logout";
/// The landing page for logged in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page showing the current user's profile and account details.
pub const MANAGE_ACCOUNT_VIEW: &str = "/manage_account";
/// The page for recording income/expense figures as a net-profit transaction.
pub const MANAGE_FINANCE_VIEW: &str = "/manage_finance";
/// The page for generating daily/monthly profit reports.
pub const WRITE_REPORT_VIEW: &str = "/write_report";
/// The maintenance information page.
pub const MAINTENANCE_VIEW: &str = "/maintenance";
