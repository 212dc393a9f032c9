//! Route for logging out the current user.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::invalidate_auth_cookie, endpoints};

/// Invalidate the auth cookie and redirect the client to the log-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_auth_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN)).into_response()
}

#[cfg(test)]
mod log_out_tests {
    use axum::http::{StatusCode, header::SET_COOKIE};
    use axum_extra::extract::PrivateCookieJar;

    use crate::{
        app_state::create_cookie_key,
        auth::{DEFAULT_COOKIE_DURATION, set_auth_cookie},
        endpoints,
        user::UserID,
    };

    use super::get_log_out;

    #[tokio::test]
    async fn log_out_invalidates_cookie_and_redirects() {
        let jar = PrivateCookieJar::new(create_cookie_key("foobar"));
        let jar = set_auth_cookie(jar, UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();

        let response = get_log_out(jar).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::LOG_IN
        );

        let mut found_deleted_cookie = false;
        for cookie_header in response.headers().get_all(SET_COOKIE) {
            let cookie_string = cookie_header.to_str().unwrap();
            if cookie_string.contains("Max-Age=0") {
                found_deleted_cookie = true;
            }
        }
        assert!(found_deleted_cookie, "want a deleted auth cookie");
    }
}
