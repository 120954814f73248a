//! Core types for the WeChat Pay client
//!
//! This module defines the configuration, the normalized response shape and
//! the typed request parameters of the endpoint helpers.
//!
//! # Architecture
//!
//! The types module is organized as follows:
//! - [`config`] - Client configuration and environment loading
//! - [`response`] - [`PayResponse`] and content-type driven body decoding
//! - [`transaction`] - Order placement parameters
//! - [`refund`] - Refund parameters
//! - [`bill`] - Bill application queries
//! - [`constants`] - API origin, auth scheme and endpoint routes
//!
//! # Examples
//!
//! ## Configuration
//!
//! ```
//! use std::time::Duration;
//! use wechat_pay_v3::types::PayConfig;
//!
//! # fn example() -> wechat_pay_v3::Result<()> {
//! let config = PayConfig::new("wx8888888888888888", "1900000001", "5157F09EFDC096DE15EBE81A47057A72")
//!     .with_timeout(Duration::from_secs(10));
//!
//! config.validate()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading a Response
//!
//! ```
//! use serde_json::json;
//! use wechat_pay_v3::types::{PayResponse, ResponseData};
//!
//! let response = PayResponse::success(200, ResponseData::Json(json!({"prepay_id": "wx201410272009395522657a690389285100"})));
//! assert!(response.is_success());
//! assert_eq!(response.json().unwrap()["prepay_id"], "wx201410272009395522657a690389285100");
//! ```

pub mod bill;
pub mod config;
pub mod constants;
pub mod refund;
pub mod response;
pub mod transaction;

// Re-export commonly used types
pub use bill::{FundFlowBillQuery, TradeBillQuery};
pub use config::PayConfig;
pub use constants::{routes, API_BASE_URL, DEFAULT_AUTH_SCHEME};
pub use refund::{RefundAmount, RefundRequest};
pub use response::{FailureKind, PayResponse, ResponseData, ResponseDecoding};
pub use transaction::{
    Amount, H5Info, JsapiPayParams, Payer, SceneInfo, SettleInfo, TransactionRequest,
};
