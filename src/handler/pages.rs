//! HTML page handlers
//!
//! Renders the landing and about pages through the template module.

use chrono::Local;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::templates;
use crate::config::AppState;
use crate::http;

/// GET / - landing page with host and deployment info
pub async fn home(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let hostname = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());

    // Containers export the container id as HOSTNAME
    let container_id = std::env::var("HOSTNAME").unwrap_or_else(|_| "local".to_string());

    let current_time = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let html = templates::render(
        "index",
        &[
            ("hostname", hostname.as_str()),
            ("container_id", container_id.as_str()),
            ("current_time", current_time.as_str()),
        ],
    )
    .await;

    http::build_html_response(html, &state.config.http, is_head)
}

/// GET /about - static about page
pub async fn about(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let html = templates::render("about", &[]).await;
    http::build_html_response(html, &state.config.http, is_head)
}
