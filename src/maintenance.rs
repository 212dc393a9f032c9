//! A static placeholder page for maintenance tasks.

use axum::response::{IntoResponse, Response};
use maud::html;

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// Display the maintenance page.
pub async fn get_maintenance_page() -> Response {
    let content = html! {
        (NavBar::new(endpoints::MAINTENANCE_VIEW).into_html())

        section class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl mb-4"
            {
                "Maintenance"
            }

            p { "Nothing to see here yet." }
        }
    };

    base("Maintenance", &content).into_response()
}

#[cfg(test)]
mod maintenance_route_tests {
    use axum::http::StatusCode;

    use super::get_maintenance_page;

    #[tokio::test]
    async fn maintenance_page_renders() {
        let response = get_maintenance_page().await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}
