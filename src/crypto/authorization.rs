//! `Authorization` header assembly

use crate::types::PayConfig;

/// Merchant identity carried in every `Authorization` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub app_id: String,
    pub merchant_id: String,
    pub serial_no: String,
    pub auth_scheme: String,
}

impl From<&PayConfig> for Identity {
    fn from(config: &PayConfig) -> Self {
        Self {
            app_id: config.app_id.clone(),
            merchant_id: config.merchant_id.clone(),
            serial_no: config.serial_no.clone(),
            auth_scheme: config.auth_scheme.clone(),
        }
    }
}

impl Identity {
    /// Build the header value for one signed request
    ///
    /// Field order is fixed: `mchid`, `nonce_str`, `timestamp`, `serial_no`,
    /// `signature`. Contents are not validated here.
    pub fn build_authorization(&self, nonce: &str, timestamp: &str, signature: &str) -> String {
        format!(
            r#"{} mchid="{}",nonce_str="{}",timestamp="{}",serial_no="{}",signature="{}""#,
            self.auth_scheme, self.merchant_id, nonce, timestamp, self.serial_no, signature
        )
    }
}
