//! The page displayed when a request fails with an unexpected error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Build the 500 page response, used when an error bubbles up to the client.
pub fn get_internal_server_error_response() -> Response {
    let page = error_view(
        "Internal Server Error",
        "500",
        "Sorry, something went wrong.",
        "Try again later or check the server logs.",
    );

    (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
}

#[cfg(test)]
mod internal_server_error_tests {
    use axum::http::StatusCode;

    use super::get_internal_server_error_response;

    #[test]
    fn returns_internal_server_error_status() {
        let response = get_internal_server_error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
