//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

/// The navigation bar shown on every page behind the session gate.
pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::DASHBOARD_VIEW,
                title: "Dashboard",
                is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
            },
            Link {
                url: endpoints::MANAGE_ACCOUNT_VIEW,
                title: "Manage Account",
                is_current: active_endpoint == endpoints::MANAGE_ACCOUNT_VIEW,
            },
            Link {
                url: endpoints::MANAGE_FINANCE_VIEW,
                title: "Manage Finance",
                is_current: active_endpoint == endpoints::MANAGE_FINANCE_VIEW,
            },
            Link {
                url: endpoints::WRITE_REPORT_VIEW,
                title: "Write Report",
                is_current: active_endpoint == endpoints::WRITE_REPORT_VIEW,
            },
            Link {
                url: endpoints::MAINTENANCE_VIEW,
                title: "Maintenance",
                is_current: active_endpoint == endpoints::MAINTENANCE_VIEW,
            },
            Link {
                url: endpoints::LOG_OUT,
                title: "Log out",
                is_current: false,
            },
        ];

        NavBar { links }
    }

    /// Render the navigation bar.
    pub fn into_html(self) -> Markup {
        html! {
            nav class="bg-white border-gray-200 dark:bg-gray-900 border-b dark:border-gray-700"
            {
                div class="max-w-screen-xl flex flex-wrap items-center gap-6 mx-auto p-4"
                {
                    span class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Profiteur"
                    }

                    ul class="flex flex-row flex-wrap gap-4 font-medium"
                    {
                        @for link in self.links
                        {
                            li { (link.into_html()) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use scraper::{Html, Selector};

    use crate::endpoints;

    use super::NavBar;

    #[test]
    fn contains_links_to_all_pages() {
        let markup = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
        let fragment = Html::parse_fragment(&markup.into_string());

        let hrefs: Vec<_> = fragment
            .select(&Selector::parse("a[href]").unwrap())
            .filter_map(|link| link.value().attr("href"))
            .collect();

        for endpoint in [
            endpoints::DASHBOARD_VIEW,
            endpoints::MANAGE_ACCOUNT_VIEW,
            endpoints::MANAGE_FINANCE_VIEW,
            endpoints::WRITE_REPORT_VIEW,
            endpoints::MAINTENANCE_VIEW,
            endpoints::LOG_OUT,
        ] {
            assert!(
                hrefs.contains(&endpoint),
                "want link to {endpoint}, got {hrefs:?}"
            );
        }
    }
}
