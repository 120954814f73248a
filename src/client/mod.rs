//! Signed request executor
//!
//! [`PayClient`] owns the merchant identity, the key material and a
//! [`Transport`]. Every call goes through [`PayClient::execute`]:
//!
//! 1. generate a nonce and a Unix timestamp,
//! 2. reduce the URL to its path and query,
//! 3. sign the canonical string with the merchant private key,
//! 4. build the `Authorization` header,
//! 5. send the request through the transport,
//! 6. fold the outcome into a [`PayResponse`].
//!
//! `execute` never returns an error. Provider error payloads are data the
//! caller usually needs (duplicate order numbers, closed orders), so they
//! come back in [`PayResponse::error`] next to the status code.
//!
//! # Examples
//!
//! ```no_run
//! use http::Method;
//! use wechat_pay_v3::{PayClient, PayConfig};
//!
//! # async fn example() -> wechat_pay_v3::Result<()> {
//! let config = PayConfig::new("wxd678efh567hg6787", "1230000109", "1DDE55AD98ED71D6EDD4A4A16996DE7B47773A8C")
//!     .with_private_key(std::fs::read_to_string("apiclient_key.pem")?);
//! let client = PayClient::new(config)?;
//!
//! let response = client
//!     .execute(Method::GET, "https://api.mch.weixin.qq.com/v3/certificates", None)
//!     .await;
//! if let Some(code) = response.error_code() {
//!     println!("provider rejected the call: {}", code);
//! }
//! # Ok(())
//! # }
//! ```

use crate::crypto::{generate_nonce, serialize_body, timestamp, Identity, KeyMaterial, SignableRequest};
use crate::transport::{
    ReqwestTransport, Transport, TransportConfig, TransportFailure, TransportResponse,
};
use crate::types::constants::content_types;
use crate::types::response::parse_error_body;
use crate::types::{FailureKind, PayConfig, PayResponse, ResponseDecoding};
use crate::{PayError, Result};
use http::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, Method};
use serde_json::{Map, Value};
use std::sync::Arc;
use url::{Position, Url};


/// Client for the WeChat Pay API v3
#[derive(Clone)]
pub struct PayClient {
    identity: Arc<Identity>,
    keys: Arc<KeyMaterial>,
    base_url: String,
    user_agent: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for PayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayClient")
            .field("identity", &self.identity)
            .field("keys", &self.keys)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("transport", &"<transport>")
            .finish()
    }
}

/// A request that passed every local check and is ready to send
struct PreparedRequest {
    url: String,
    headers: HeaderMap,
}

impl PayClient {
    /// Create a client that sends requests with [`ReqwestTransport`]
    pub fn new(config: PayConfig) -> Result<Self> {
        config.validate()?;

        let transport = ReqwestTransport::new(TransportConfig {
            timeout: config.timeout,
        })?;

        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(config: PayConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;

        let keys = KeyMaterial::from_pem(
            config.private_key.as_deref(),
            config.public_key.as_deref(),
        )?;

        Ok(Self {
            identity: Arc::new(Identity::from(&config)),
            keys: Arc::new(keys),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent,
            transport,
        })
    }

    /// Merchant identity this client signs for
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// API origin requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign one request
    ///
    /// `path` must be path+query only. A structured body should be passed
    /// through [`serialize_body`] first so that the signed bytes are the sent
    /// bytes.
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        timestamp: &str,
        nonce: &str,
        body: Option<&str>,
    ) -> Result<String> {
        self.keys
            .sign_request(&SignableRequest::new(method, path, timestamp, nonce, body))
    }

    /// Build the `Authorization` header value for a signature
    pub fn build_authorization(&self, nonce: &str, timestamp: &str, signature: &str) -> String {
        self.identity.build_authorization(nonce, timestamp, signature)
    }

    /// Verify a provider signature (response headers or notification)
    ///
    /// Pass the `Wechatpay-Timestamp`, `Wechatpay-Nonce` and
    /// `Wechatpay-Signature` header values and the raw body.
    pub fn verify_signature(
        &self,
        timestamp: &str,
        nonce: &str,
        body: &str,
        signature: &str,
    ) -> Result<bool> {
        self.keys.verify(timestamp, nonce, body, signature)
    }

    /// Resolve `url` (absolute, or a path relative to the API origin) into
    /// the absolute URL to send and the path+query to sign
    pub fn resolve_url(&self, url: &str) -> Result<(String, String)> {
        let absolute = if url.starts_with('/') {
            Url::parse(&format!("{}{}", self.base_url, url))?
        } else {
            Url::parse(url)?
        };

        let path = absolute[Position::BeforePath..Position::AfterQuery].to_string();
        Ok((absolute[..Position::AfterQuery].to_string(), path))
    }

    /// Sign and send a request, folding every outcome into a [`PayResponse`]
    ///
    /// Only `GET` and `POST` are supported; `GET` requests carry no body.
    pub async fn execute(&self, method: Method, url: &str, body: Option<&Value>) -> PayResponse {
        let body = match body.map(serialize_body).transpose() {
            Ok(body) => body.flatten(),
            Err(e) => return PayResponse::rejected(FailureKind::InvalidRequest, e.to_string()),
        };

        if method != Method::GET && method != Method::POST {
            return PayResponse::rejected(
                FailureKind::InvalidRequest,
                format!("Unsupported HTTP method: {}", method),
            );
        }
        if method == Method::GET && body.is_some() {
            return PayResponse::rejected(
                FailureKind::InvalidRequest,
                "GET requests cannot carry a body",
            );
        }

        let prepared = match self.prepare(&method, url, body.as_deref()) {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!("Request to {} was not sent: {}", url, e);
                return PayResponse::rejected(rejection_kind(&e), e.to_string());
            }
        };

        tracing::debug!("Sending {} {}", method, prepared.url);

        let outcome = if method == Method::GET {
            self.transport.get(&prepared.url, &prepared.headers).await
        } else {
            self.transport
                .post(&prepared.url, body.unwrap_or_default(), &prepared.headers)
                .await
        };

        match outcome {
            Ok(response) => normalize_success(response),
            Err(failure) => normalize_failure(&method, &prepared.url, failure),
        }
    }

    /// Signed GET
    pub async fn get(&self, url: &str) -> PayResponse {
        self.execute(Method::GET, url, None).await
    }

    /// Signed POST with a JSON body
    pub async fn post(&self, url: &str, body: &Value) -> PayResponse {
        self.execute(Method::POST, url, Some(body)).await
    }

    fn prepare(&self, method: &Method, url: &str, body: Option<&str>) -> Result<PreparedRequest> {
        if !self.keys.has_private_key() {
            return Err(PayError::missing_private_key());
        }

        let (url, path) = self.resolve_url(url)?;
        let nonce = generate_nonce();
        let timestamp = timestamp();

        let signature = self.sign(method.as_str(), &path, &timestamp, &nonce, body)?;
        let authorization = self.build_authorization(&nonce, &timestamp, &signature);

        Ok(PreparedRequest {
            url,
            headers: self.headers(&authorization)?,
        })
    }

    fn headers(&self, authorization: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(content_types::JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_types::JSON));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| PayError::config(format!("Invalid User-Agent header: {}", e)))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(authorization)
                .map_err(|e| PayError::config(format!("Invalid Authorization header: {}", e)))?,
        );
        Ok(headers)
    }

    /// Merge `mchid` (and `appid` when asked) into serialized parameters,
    /// keeping any value the caller already set
    pub(crate) fn with_identity<T: serde::Serialize>(
        &self,
        params: &T,
        include_app_id: bool,
    ) -> Result<Value> {
        let mut value = serde_json::to_value(params)?;
        let Value::Object(map) = &mut value else {
            return Err(PayError::config(
                "Request parameters must serialize to a JSON object",
            ));
        };

        if include_app_id {
            map.entry("appid")
                .or_insert_with(|| Value::String(self.identity.app_id.clone()));
        }
        map.entry("mchid")
            .or_insert_with(|| Value::String(self.identity.merchant_id.clone()));

        Ok(value)
    }

    pub(crate) fn keys(&self) -> &KeyMaterial {
        &self.keys
    }
}

fn rejection_kind(error: &PayError) -> FailureKind {
    if error.is_missing_key_material() {
        FailureKind::MissingKeyMaterial
    } else {
        FailureKind::InvalidRequest
    }
}

fn normalize_success(response: TransportResponse) -> PayResponse {
    tracing::debug!("Received status {}", response.status);

    let decoding = ResponseDecoding::from_content_type(response.content_type.as_deref());
    PayResponse::success(response.status, decoding.decode(response.body))
}

fn normalize_failure(method: &Method, url: &str, failure: TransportFailure) -> PayResponse {
    let Some(status) = failure.status else {
        tracing::warn!("{} {} failed without a response: {}", method, url, failure);
        return PayResponse::failure(0, FailureKind::Transport, Map::new(), failure.message);
    };

    let body = failure.response_body.unwrap_or_default();
    let error = parse_error_body(&body);
    let raw_error = if body.is_empty() {
        failure.message
    } else {
        format!("{}: {}", failure.message, body)
    };

    let code = error
        .get("code")
        .and_then(Value::as_str)
        .unwrap_or("no error code");
    tracing::warn!("{} {} failed with status {} ({})", method, url, status, code);

    PayResponse::failure(status, FailureKind::Provider, error, raw_error)
}
