//! Alert partials for displaying success and error messages to users.
//!
//! These fill the role of the flash messages in a classic server-rendered
//! app: handlers render them inline at the top of the page they return.

use maud::{Markup, html};

const SUCCESS_STYLE: &str = "w-full max-w-md p-4 mb-4 text-sm rounded-lg \
    text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400";

const ERROR_STYLE: &str = "w-full max-w-md p-4 mb-4 text-sm rounded-lg \
    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400";

/// Render a success message.
pub fn alert_success(message: &str) -> Markup {
    html! {
        div class=(SUCCESS_STYLE) role="alert"
        {
            (message)
        }
    }
}

/// Render an error message.
pub fn alert_error(message: &str) -> Markup {
    html! {
        div class=(ERROR_STYLE) role="alert"
        {
            (message)
        }
    }
}
