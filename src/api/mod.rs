//! Endpoint calls
//!
//! Thin wrappers over [`PayClient::execute`] for the order, refund and bill
//! endpoints. Every call returns a [`PayResponse`]; parameters that cannot be
//! turned into a request come back as an `InvalidRequest` failure without
//! touching the network.
//!
//! # Examples
//!
//! ```no_run
//! use wechat_pay_v3::types::{Amount, TransactionRequest};
//! use wechat_pay_v3::{PayClient, PayConfig};
//!
//! # async fn example() -> wechat_pay_v3::Result<()> {
//! let config = PayConfig::from_env()?;
//! let client = PayClient::new(config)?;
//!
//! let order = TransactionRequest::new(
//!     "Image形象店-深圳腾大-QQ公仔",
//!     "1217752501201407033233368018",
//!     "https://www.weixin.qq.com/wxpay/pay.php",
//!     Amount::cny(100),
//! );
//! let response = client.transactions_native(&order).await;
//! if let Some(code_url) = response.json().and_then(|body| body.get("code_url")) {
//!     println!("scan to pay: {}", code_url);
//! }
//! # Ok(())
//! # }
//! ```

use crate::client::PayClient;
use crate::types::{FailureKind, PayResponse};
use crate::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

mod bills;
mod refunds;
mod transactions;


/// Characters left unescaped in query components
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build `?k=v&...` from the fields of `params`, skipping `exclude`
///
/// `params` must serialize to a JSON object. Null fields are dropped, string
/// values are used as-is and other values use their JSON text. Returns an
/// empty string when nothing is left.
pub fn build_query_string<T: Serialize>(params: &T, exclude: &[&str]) -> Result<String> {
    let Value::Object(map) = serde_json::to_value(params)? else {
        return Err(crate::PayError::config(
            "Query parameters must serialize to a JSON object",
        ));
    };

    let pairs: Vec<String> = map
        .iter()
        .filter(|(key, value)| !exclude.contains(&key.as_str()) && !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(&value, QUERY_COMPONENT)
            )
        })
        .collect();

    if pairs.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("?{}", pairs.join("&")))
    }
}

impl PayClient {
    /// Signed GET of `path` with `params` appended as a query string
    pub async fn execute_get_with_query<T: Serialize>(
        &self,
        path: &str,
        params: &T,
        exclude: &[&str],
    ) -> PayResponse {
        match build_query_string(params, exclude) {
            Ok(query) => self.get(&format!("{}{}", path, query)).await,
            Err(e) => PayResponse::rejected(FailureKind::InvalidRequest, e.to_string()),
        }
    }

    /// Signed POST of parameters after merging the merchant identity
    async fn post_with_identity<T: Serialize>(
        &self,
        path: &str,
        params: &T,
        include_app_id: bool,
    ) -> PayResponse {
        match self.with_identity(params, include_app_id) {
            Ok(body) => self.post(path, &body).await,
            Err(e) => PayResponse::rejected(FailureKind::InvalidRequest, e.to_string()),
        }
    }
}
