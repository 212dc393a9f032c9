//! User authentication: password hashing, the auth cookie, the middleware
//! guard for protected routes, and the log-in/log-out routes.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod password;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::auth_guard;
pub use password::{PasswordHash, ValidatedPassword};

#[cfg(test)]
pub(crate) use cookie::COOKIE_USER_ID;
