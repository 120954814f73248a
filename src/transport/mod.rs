//! HTTP transport capability
//!
//! The executor only needs two operations from the network: a POST with a
//! pre-serialized JSON body and a GET. [`Transport`] is that seam;
//! [`ReqwestTransport`] is the default implementation. Tests and callers with
//! their own HTTP stack can plug in anything else.
//!
//! A transport reports every non-2xx response as a [`TransportFailure`]
//! carrying the status and body, and every network-level problem (DNS, TLS,
//! connect, timeout) as a failure without a status. Timeouts are the
//! transport's business; the executor never enforces one.

use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use std::time::Duration;
use thiserror::Error;

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;


/// A response with a success status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Declared `Content-Type`, if any
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// Extract the content type from response headers
    pub fn content_type_of(headers: &HeaderMap) -> Option<String> {
        headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }
}

/// A call that did not end in a success status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportFailure {
    /// Human-readable diagnostic
    pub message: String,
    /// HTTP status, when a response was obtained
    pub status: Option<u16>,
    /// Response body text, when a response was obtained
    pub response_body: Option<String>,
}

impl TransportFailure {
    /// Failure without a response (DNS, TLS, connect, timeout)
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            response_body: None,
        }
    }

    /// Failure with a non-success response
    pub fn status(status: u16, response_body: impl Into<String>) -> Self {
        Self {
            message: format!("Request failed with status code {}", status),
            status: Some(status),
            response_body: Some(response_body.into()),
        }
    }
}

impl TransportFailure {
    /// Response whose body could not be read; the status is still known
    pub fn unreadable_body(status: u16, detail: impl std::fmt::Display) -> Self {
        Self {
            message: format!(
                "Request failed with status code {}: response body could not be read: {}",
                status, detail
            ),
            status: Some(status),
            response_body: None,
        }
    }
}

/// The HTTP capability the executor drives
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` (already serialized JSON) to `url`
    async fn post(
        &self,
        url: &str,
        body: String,
        headers: &HeaderMap,
    ) -> Result<TransportResponse, TransportFailure>;

    /// GET `url`
    async fn get(&self, url: &str, headers: &HeaderMap)
        -> Result<TransportResponse, TransportFailure>;
}

/// Settings for the default transport
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Whole-request timeout
    pub timeout: Option<Duration>,
}
