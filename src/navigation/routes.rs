//! UI routes for cron workflows.

/// The list page.
pub const LIST_ROUTE: &str = "cron-workflows";

/// Detail page of one cron workflow.
pub fn detail_route(namespace: &str, name: &str) -> String {
    format!("{}/{}/{}", LIST_ROUTE, namespace, name)
}

/// Absolute UI URL of `route` under `base_href`.
pub fn ui_url(base_href: &str, route: &str) -> String {
    format!(
        "{}/{}",
        base_href.trim_end_matches('/'),
        route.trim_start_matches('/')
    )
}
