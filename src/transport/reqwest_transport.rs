//! `reqwest`-backed transport

use super::{Transport, TransportConfig, TransportFailure, TransportResponse};
use crate::{PayError, Result};
use async_trait::async_trait;
use http::HeaderMap;
use reqwest::Client;

/// Default transport over a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with its own connection pool
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().map_err(PayError::Http)?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn finish(
        response: std::result::Result<reqwest::Response, reqwest::Error>,
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        let response = response.map_err(|e| TransportFailure::network(describe(&e)))?;
        let status = response.status();
        let content_type = TransportResponse::content_type_of(response.headers());

        if !status.is_success() {
            return match response.text().await {
                Ok(body) => Err(TransportFailure::status(status.as_u16(), body)),
                Err(e) => Err(TransportFailure::unreadable_body(status.as_u16(), describe(&e))),
            };
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportFailure::unreadable_body(status.as_u16(), describe(&e)))?;

        Ok(TransportResponse::new(
            status.as_u16(),
            content_type,
            body.to_vec(),
        ))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        body: String,
        headers: &HeaderMap,
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        let response = self
            .client
            .post(url)
            .headers(headers.clone())
            .body(body)
            .send()
            .await;
        Self::finish(response).await
    }

    async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        let response = self.client.get(url).headers(headers.clone()).send().await;
        Self::finish(response).await
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Request timed out: {}", error)
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        format!("HTTP error: {}", error)
    }
}
