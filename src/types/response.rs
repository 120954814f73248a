//! Normalized response types and content-type driven body decoding

use super::constants::content_types;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Why a call did not produce data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Signing was attempted without a private key; nothing was sent
    MissingKeyMaterial,
    /// The request could not be built (bad URL, unencodable header); nothing was sent
    InvalidRequest,
    /// No HTTP response was obtained (DNS, TLS, connect, timeout)
    Transport,
    /// The provider answered with a non-success status
    Provider,
}

/// Decoded success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum ResponseData {
    /// Structured JSON payload
    Json(Value),
    /// Plain text payload
    Text(String),
    /// Undecoded bytes (compressed bill files and the like)
    Binary(Vec<u8>),
}

impl ResponseData {
    /// The JSON payload, if this body was JSON
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The text payload, if this body was text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The raw bytes, if this body was passed through undecoded
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Look up a top-level field of a JSON object payload
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_json().and_then(|value| value.get(key))
    }
}

/// Uniform result of every call made through [`crate::PayClient::execute`]
///
/// Exactly one of `data` and `error` is populated. `raw_error` and `failure`
/// accompany `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayResponse {
    /// HTTP status, or 0 when no response was obtained
    pub status_code: u16,
    /// Decoded body of a successful call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    /// Structured provider error payload; empty when the body was not a JSON object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Map<String, Value>>,
    /// Diagnostic text for a failed call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_error: Option<String>,
    /// Failure classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl PayResponse {
    /// Build a successful response
    pub fn success(status_code: u16, data: ResponseData) -> Self {
        Self {
            status_code,
            data: Some(data),
            error: None,
            raw_error: None,
            failure: None,
        }
    }

    /// Build a failed response
    pub fn failure(
        status_code: u16,
        kind: FailureKind,
        error: Map<String, Value>,
        raw_error: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            data: None,
            error: Some(error),
            raw_error: Some(raw_error.into()),
            failure: Some(kind),
        }
    }

    /// Failure that happened before any request was sent
    pub(crate) fn rejected(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::failure(0, kind, Map::new(), message)
    }

    /// Whether the call produced data
    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }

    /// The JSON payload of a successful call
    pub fn json(&self) -> Option<&Value> {
        self.data.as_ref().and_then(ResponseData::as_json)
    }

    /// Provider error code (`code` field of the error payload)
    pub fn error_code(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|error| error.get("code"))
            .and_then(Value::as_str)
    }

    /// Provider error message (`message` field of the error payload)
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
    }
}

/// Body decoding strategy selected from the declared content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDecoding {
    /// Parse as JSON; the default for missing or unknown content types
    Json,
    /// Pass through as UTF-8 text
    PlainText,
    /// Pass through undecoded
    Compressed,
}

impl ResponseDecoding {
    /// Pick a strategy from a `Content-Type` header value
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return Self::Json;
        };

        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            content_types::X_GZIP | content_types::GZIP | content_types::OCTET_STREAM => {
                Self::Compressed
            }
            content_types::TEXT_PLAIN => Self::PlainText,
            other if other.starts_with("text/") => Self::PlainText,
            _ => Self::Json,
        }
    }

    /// Decode a response body with this strategy
    pub fn decode(self, body: Vec<u8>) -> ResponseData {
        match self {
            Self::Json => {
                if body.iter().all(u8::is_ascii_whitespace) {
                    return ResponseData::Json(Value::Object(Map::new()));
                }
                match serde_json::from_slice(&body) {
                    Ok(value) => ResponseData::Json(value),
                    Err(e) => {
                        tracing::debug!("JSON response body did not parse, keeping text: {}", e);
                        ResponseData::Text(String::from_utf8_lossy(&body).into_owned())
                    }
                }
            }
            Self::PlainText => ResponseData::Text(String::from_utf8_lossy(&body).into_owned()),
            Self::Compressed => ResponseData::Binary(body),
        }
    }
}

/// Parse a provider error body into the `error` map of a [`PayResponse`]
///
/// Anything but a JSON object yields an empty map.
pub fn parse_error_body(body: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
