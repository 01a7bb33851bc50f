// API request/response types for the item endpoints

use serde::{Deserialize, Serialize};

/// Create-item payload. The body must be a JSON object with a `name`
/// field; `description` is optional and defaults to the empty string.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateItemRequest {
    /// Parse and validate a request body. Any shape other than an
    /// object carrying `name` is rejected.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub const fn healthy() -> Self {
        Self { status: "healthy" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_body_with_description() {
        let req = CreateItemRequest::from_body(br#"{"name":"Item 4","description":"d"}"#).unwrap();
        assert_eq!(req.name, "Item 4");
        assert_eq!(req.description, "d");
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let req = CreateItemRequest::from_body(br#"{"name":"Item 4"}"#).unwrap();
        assert_eq!(req.description, "");
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(CreateItemRequest::from_body(b"{}").is_err());
        assert!(CreateItemRequest::from_body(br#"{"description":"d"}"#).is_err());
    }

    #[test]
    fn test_non_object_bodies_are_rejected() {
        assert!(CreateItemRequest::from_body(b"").is_err());
        assert!(CreateItemRequest::from_body(b"null").is_err());
        assert!(CreateItemRequest::from_body(br#""Item 4""#).is_err());
        assert!(CreateItemRequest::from_body(br#"[{"name":"Item 4"}]"#).is_err());
        assert!(CreateItemRequest::from_body(b"not json").is_err());
    }

    #[test]
    fn test_non_string_name_is_rejected() {
        assert!(CreateItemRequest::from_body(br#"{"name":42}"#).is_err());
    }

    #[test]
    fn test_health_body_shape() {
        let body = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert_eq!(body, r#"{"status":"healthy"}"#);
    }
}
