// Item API handlers module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::collections::HashMap;

use super::response::{invalid_request, item_not_found, json_response};
use super::types::{CreateItemRequest, HealthResponse};
use crate::config::AppState;
use crate::http;
use crate::logger;

/// GET /api/items - all items in insertion order
pub async fn list_items(state: &AppState) -> Response<Full<Bytes>> {
    let items = state.store.list().await;
    json_response(StatusCode::OK, &items)
}

/// GET /api/items/{id} - single item lookup
pub async fn get_item(state: &AppState, id: u64) -> Response<Full<Bytes>> {
    match state.store.get(id).await {
        Some(item) => json_response(StatusCode::OK, &item),
        None => item_not_found(),
    }
}

/// POST /api/items - create an item from a JSON body
pub async fn create_item(state: &AppState, body: &[u8]) -> Response<Full<Bytes>> {
    let request = match CreateItemRequest::from_body(body) {
        Ok(r) => r,
        Err(e) => {
            logger::log_warning(&format!("Rejected create payload: {e}"));
            return invalid_request();
        }
    };

    let item = state.store.create(request.name, request.description).await;
    json_response(StatusCode::CREATED, &item)
}

/// GET /health - liveness probe, independent of store state
pub fn health() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &HealthResponse::healthy())
}

/// GET /env - dump all process environment variables
///
/// Debugging aid with no access control; the route disappears entirely
/// when `http.expose_env` is off.
pub fn environment(state: &AppState) -> Response<Full<Bytes>> {
    if !state.config.http.expose_env {
        return http::build_404_response();
    }

    let env_vars: HashMap<String, String> = std::env::vars().collect();
    json_response(StatusCode::OK, &env_vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use http_body_util::BodyExt;

    fn test_state() -> AppState {
        AppState::new(test_config())
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_items_returns_seed() {
        let state = test_state();
        let resp = list_items(&state).await;
        assert_eq!(resp.status(), 200);

        let json = body_json(resp).await;
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["id"], 1);
        assert_eq!(items[2]["name"], "Item 3");
    }

    #[tokio::test]
    async fn test_get_item_found() {
        let state = test_state();
        let resp = get_item(&state, 2).await;
        assert_eq!(resp.status(), 200);

        let json = body_json(resp).await;
        assert_eq!(json["id"], 2);
        assert_eq!(json["name"], "Item 2");
        assert_eq!(json["description"], "This is item 2");
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let state = test_state();
        let resp = get_item(&state, 99).await;
        assert_eq!(resp.status(), 404);

        let json = body_json(resp).await;
        assert_eq!(json["error"], "Item not found");
        assert_eq!(state.store.len().await, 3);
    }

    #[tokio::test]
    async fn test_create_item_success_scenario() {
        let state = test_state();
        let resp = create_item(&state, br#"{"name":"Item 4"}"#).await;
        assert_eq!(resp.status(), 201);

        let json = body_json(resp).await;
        assert_eq!(json["id"], 4);
        assert_eq!(json["name"], "Item 4");
        assert_eq!(json["description"], "");

        // The created item is visible to a subsequent lookup
        let resp = get_item(&state, 4).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_json(resp).await["id"], 4);
    }

    #[tokio::test]
    async fn test_create_item_invalid_bodies_leave_store_unchanged() {
        let state = test_state();
        let bodies: [&[u8]; 5] = [
            b"",
            b"{}",
            br#"{"description":"d"}"#,
            b"not json",
            br#"["Item 4"]"#,
        ];
        for body in bodies {
            let resp = create_item(&state, body).await;
            assert_eq!(resp.status(), 400);
            assert_eq!(body_json(resp).await["error"], "Invalid request");
        }
        assert_eq!(state.store.len().await, 3);
    }

    #[tokio::test]
    async fn test_health_is_independent_of_store() {
        let resp = health();
        assert_eq!(resp.status(), 200);
        assert_eq!(body_json(resp).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_environment_dump_contains_known_var() {
        let state = test_state();
        std::env::set_var("ITEM_SERVICE_TEST_VAR", "present");
        let resp = environment(&state);
        assert_eq!(resp.status(), 200);

        let json = body_json(resp).await;
        assert_eq!(json["ITEM_SERVICE_TEST_VAR"], "present");
    }

    #[tokio::test]
    async fn test_environment_dump_can_be_disabled() {
        let mut config = test_config();
        config.http.expose_env = false;
        let state = AppState::new(config);

        let resp = environment(&state);
        assert_eq!(resp.status(), 404);
    }
}
