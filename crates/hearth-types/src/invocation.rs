//! The request/response descriptors exchanged with the hosting layer.
//!
//! These mirror the event shape of a cloud function runtime: the host hands
//! over the HTTP method, the decoded query string and the raw body, and
//! expects back a status code, a header map and a string body.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const CONTENT_TYPE: &str = "Content-Type";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".into()
}

impl ApiRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            query_string_parameters: None,
            body: None,
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    pub fn is_preflight(&self) -> bool {
        self.http_method.eq_ignore_ascii_case("OPTIONS")
    }

    pub fn is_post(&self) -> bool {
        self.http_method.eq_ignore_ascii_case("POST")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// A JSON response. Serialization of the payload types cannot fail in
    /// practice, but a failure still yields a well-formed 500.
    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Self {
        let (status_code, body) = match serde_json::to_string(payload) {
            Ok(body) => (status_code, body),
            Err(_) => (500, r#"{"error":"Internal server error"}"#.to_string()),
        };

        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        headers.insert(ALLOW_ORIGIN.to_string(), "*".to_string());

        Self {
            status_code,
            headers,
            body,
        }
    }

    /// CORS preflight answer: permissive headers, empty body.
    pub fn preflight() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(ALLOW_ORIGIN.to_string(), "*".to_string());
        headers.insert(ALLOW_METHODS.to_string(), "GET, POST, OPTIONS".to_string());
        headers.insert(ALLOW_HEADERS.to_string(), "Content-Type".to_string());

        Self {
            status_code: 200,
            headers,
            body: String::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorBody;

    #[test]
    fn request_accepts_cloud_event_shape() {
        let raw = r#"{
            "httpMethod": "GET",
            "queryStringParameters": {"action": "get_messages", "chat_id": "3"},
            "headers": {"Host": "example"}
        }"#;
        let req: ApiRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.http_method, "GET");
        assert_eq!(req.query_param("action"), Some("get_messages"));
        assert_eq!(req.query_param("chat_id"), Some("3"));
        assert!(req.body.is_none());
    }

    #[test]
    fn request_tolerates_null_query() {
        let raw = r#"{"httpMethod": "POST", "queryStringParameters": null, "body": "{}"}"#;
        let req: ApiRequest = serde_json::from_str(raw).unwrap();
        assert!(req.is_post());
        assert_eq!(req.query_param("action"), None);
    }

    #[test]
    fn preflight_is_case_insensitive() {
        assert!(ApiRequest::new("options").is_preflight());
        assert!(!ApiRequest::new("GET").is_preflight());
    }

    #[test]
    fn json_response_carries_cors_and_content_type() {
        let resp = ApiResponse::json(400, &ErrorBody::new("Unknown action"));
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.header(ALLOW_ORIGIN), Some("*"));
        assert_eq!(resp.header(CONTENT_TYPE), Some("application/json"));
        assert_eq!(resp.body, r#"{"error":"Unknown action"}"#);
    }

    #[test]
    fn preflight_response_is_empty() {
        let resp = ApiResponse::preflight();
        assert_eq!(resp.status_code, 200);
        assert!(resp.body.is_empty());
        assert_eq!(resp.header(ALLOW_METHODS), Some("GET, POST, OPTIONS"));
        assert_eq!(resp.header(ALLOW_HEADERS), Some("Content-Type"));
        assert_eq!(resp.header(CONTENT_TYPE), None);
    }

    #[test]
    fn response_serializes_camel_case() {
        let resp = ApiResponse::preflight();
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["body"], "");
    }
}
