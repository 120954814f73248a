//! Client configuration

use super::constants::{API_BASE_URL, DEFAULT_AUTH_SCHEME};
use crate::{PayError, Result};
use std::env;
use std::fs;
use std::time::Duration;

/// Environment variable holding the app id
pub const ENV_APP_ID: &str = "WECHATPAY_APP_ID";
/// Environment variable holding the merchant id
pub const ENV_MERCHANT_ID: &str = "WECHATPAY_MCH_ID";
/// Environment variable holding the merchant certificate serial number
pub const ENV_SERIAL_NO: &str = "WECHATPAY_SERIAL_NO";
/// Environment variable holding the path of the merchant private key PEM
pub const ENV_PRIVATE_KEY_PATH: &str = "WECHATPAY_PRIVATE_KEY_PATH";
/// Environment variable holding the path of the provider public key PEM
pub const ENV_PUBLIC_KEY_PATH: &str = "WECHATPAY_PUBLIC_KEY_PATH";
/// Environment variable overriding the auth scheme
pub const ENV_AUTH_SCHEME: &str = "WECHATPAY_AUTH_SCHEME";
/// Environment variable overriding the API origin
pub const ENV_BASE_URL: &str = "WECHATPAY_BASE_URL";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "WECHATPAY_TIMEOUT_SECS";

/// Client configuration
///
/// Identity fields are copied into the client once and never change for its
/// lifetime. Keys are PEM text; the private key accepts PKCS#8
/// (`BEGIN PRIVATE KEY`) or PKCS#1 (`BEGIN RSA PRIVATE KEY`), the public key
/// SPKI (`BEGIN PUBLIC KEY`) or PKCS#1 (`BEGIN RSA PUBLIC KEY`).
#[derive(Clone)]
pub struct PayConfig {
    /// App id the merchant registered (official account, mini program or app)
    pub app_id: String,
    /// Merchant id (`mchid`)
    pub merchant_id: String,
    /// Serial number of the merchant API certificate
    pub serial_no: String,
    /// Provider public key, used to verify response and notification signatures
    pub public_key: Option<String>,
    /// Merchant private key, used to sign requests
    pub private_key: Option<String>,
    /// Authorization scheme prefix
    pub auth_scheme: String,
    /// API origin stripped from request URLs before signing
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Request timeout applied by the default transport
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for PayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayConfig")
            .field("app_id", &self.app_id)
            .field("merchant_id", &self.merchant_id)
            .field("serial_no", &self.serial_no)
            .field("public_key", &self.public_key.as_ref().map(|_| "<pem>"))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("auth_scheme", &self.auth_scheme)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PayConfig {
    /// Create a new config with the default scheme, origin and user agent
    pub fn new(
        app_id: impl Into<String>,
        merchant_id: impl Into<String>,
        serial_no: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            merchant_id: merchant_id.into(),
            serial_no: serial_no.into(),
            public_key: None,
            private_key: None,
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            base_url: API_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: None,
        }
    }

    /// Set the merchant private key PEM
    pub fn with_private_key(mut self, pem: impl Into<String>) -> Self {
        self.private_key = Some(pem.into());
        self
    }

    /// Set the provider public key PEM
    pub fn with_public_key(mut self, pem: impl Into<String>) -> Self {
        self.public_key = Some(pem.into());
        self
    }

    /// Override the authorization scheme
    pub fn with_auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_scheme = scheme.into();
        self
    }

    /// Override the API origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.is_empty() {
            return Err(PayError::config("Merchant id cannot be empty"));
        }

        if self.serial_no.is_empty() {
            return Err(PayError::config("Certificate serial number cannot be empty"));
        }

        if self.auth_scheme.is_empty() || self.auth_scheme.contains(char::is_whitespace) {
            return Err(PayError::config(
                "Auth scheme must be a single non-empty token",
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(PayError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        Ok(())
    }

    /// Load a config from `WECHATPAY_*` environment variables
    ///
    /// Keys are read from the files named by [`ENV_PRIVATE_KEY_PATH`] and
    /// [`ENV_PUBLIC_KEY_PATH`]; both are optional.
    pub fn from_env() -> Result<Self> {
        let required = |name: &str| {
            env::var(name).map_err(|_| {
                PayError::config(format!("Missing required environment variable {}", name))
            })
        };

        let mut config = Self::new(
            env::var(ENV_APP_ID).unwrap_or_default(),
            required(ENV_MERCHANT_ID)?,
            required(ENV_SERIAL_NO)?,
        );

        if let Ok(path) = env::var(ENV_PRIVATE_KEY_PATH) {
            config.private_key = Some(fs::read_to_string(path)?);
        }
        if let Ok(path) = env::var(ENV_PUBLIC_KEY_PATH) {
            config.public_key = Some(fs::read_to_string(path)?);
        }
        if let Ok(scheme) = env::var(ENV_AUTH_SCHEME) {
            config.auth_scheme = scheme;
        }
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Ok(secs) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .parse()
                .map_err(|_| PayError::config(format!("{} must be an integer", ENV_TIMEOUT_SECS)))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }
}

fn default_user_agent() -> String {
    format!("wechat-pay-v3-rust/{}", crate::VERSION)
}
