//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching and access logging.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::api::{handlers, invalid_request};
use crate::config::AppState;
use crate::handler::pages;
use crate::http;
use crate::logger;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);

    let response = dispatch(req, &state).await;

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        let mut entry = logger::AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path,
        );
        entry.query = query;
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route the request to the matching handler
async fn dispatch(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    // Reject oversized bodies before reading anything
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    let allow = allowed_methods(&path);

    if method == Method::OPTIONS {
        return match allow {
            Some(allow) => http::build_options_response(allow, state.config.http.enable_cors),
            None => http::build_404_response(),
        };
    }

    let response = match (&method, path.as_str()) {
        (&Method::GET | &Method::HEAD, "/") => pages::home(state, is_head).await,
        (&Method::GET | &Method::HEAD, "/about") => pages::about(state, is_head).await,
        (&Method::GET | &Method::HEAD, "/health") => handlers::health(),
        (&Method::GET | &Method::HEAD, "/env") => handlers::environment(state),
        (&Method::GET | &Method::HEAD, "/api/items") => handlers::list_items(state).await,
        (&Method::POST, "/api/items") => {
            let body = match req.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    logger::log_warning(&format!("Failed to read request body: {e}"));
                    return invalid_request();
                }
            };
            handlers::create_item(state, &body).await
        }
        (&Method::GET | &Method::HEAD, p) if p.starts_with("/api/items/") => {
            match parse_item_id(p) {
                Some(id) => handlers::get_item(state, id).await,
                None => http::build_404_response(),
            }
        }
        _ => match allow {
            Some(allow) => {
                logger::log_warning(&format!("Method not allowed: {method} {path}"));
                http::build_405_response(allow)
            }
            None => http::build_404_response(),
        },
    };

    if is_head {
        http::strip_body(response)
    } else {
        response
    }
}

/// Methods accepted for a known path, `None` for unknown paths
fn allowed_methods(path: &str) -> Option<&'static str> {
    match path {
        "/" | "/about" | "/health" | "/env" => Some("GET, HEAD, OPTIONS"),
        "/api/items" => Some("GET, HEAD, POST, OPTIONS"),
        p if parse_item_id(p).is_some() => Some("GET, HEAD, OPTIONS"),
        _ => None,
    }
}

/// Parse the integer path parameter of `/api/items/{id}`.
/// Only all-digit segments match; anything else falls through to 404.
fn parse_item_id(path: &str) -> Option<u64> {
    let segment = path.strip_prefix("/api/items/")?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Exact size of a fully buffered response body
fn body_len(response: &Response<Full<Bytes>>) -> usize {
    use hyper::body::Body;

    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_id_accepts_digits() {
        assert_eq!(parse_item_id("/api/items/1"), Some(1));
        assert_eq!(parse_item_id("/api/items/42"), Some(42));
    }

    #[test]
    fn test_parse_item_id_rejects_non_numeric() {
        assert_eq!(parse_item_id("/api/items/abc"), None);
        assert_eq!(parse_item_id("/api/items/1x"), None);
        assert_eq!(parse_item_id("/api/items/-1"), None);
        assert_eq!(parse_item_id("/api/items/1.5"), None);
    }

    #[test]
    fn test_parse_item_id_rejects_empty_and_nested() {
        assert_eq!(parse_item_id("/api/items/"), None);
        assert_eq!(parse_item_id("/api/items/1/extra"), None);
        assert_eq!(parse_item_id("/api/items"), None);
    }

    #[test]
    fn test_parse_item_id_rejects_overflow() {
        assert_eq!(parse_item_id("/api/items/99999999999999999999999"), None);
    }

    #[test]
    fn test_allowed_methods_per_route() {
        assert_eq!(allowed_methods("/"), Some("GET, HEAD, OPTIONS"));
        assert_eq!(allowed_methods("/api/items"), Some("GET, HEAD, POST, OPTIONS"));
        assert_eq!(allowed_methods("/api/items/7"), Some("GET, HEAD, OPTIONS"));
        assert_eq!(allowed_methods("/nope"), None);
    }
}
