//! # WeChat Pay API v3 client
//!
//! A signed request client for the WeChat Pay merchant API (v3).
//!
//! ## Features
//!
//! - **Canonical signing**: RSA PKCS#1 v1.5 over SHA-256 of the exact bytes sent
//! - **Authorization header**: `WECHATPAY2-SHA256-RSA2048` header assembly
//! - **Uniform results**: every call returns a [`PayResponse`], whether it
//!   succeeded, was rejected by the provider or never reached it
//! - **Pluggable transport**: bring your own HTTP stack through [`Transport`]
//! - **Endpoint helpers**: orders (H5, JSAPI, Native, App), lookups, closing,
//!   refunds and bills
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wechat_pay_v3::types::{Amount, H5Info, SceneInfo, TransactionRequest};
//! use wechat_pay_v3::{PayClient, PayConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PayConfig::new(
//!         "wxd678efh567hg6787",
//!         "1230000109",
//!         "1DDE55AD98ED71D6EDD4A4A16996DE7B47773A8C",
//!     )
//!     .with_private_key(std::fs::read_to_string("apiclient_key.pem")?);
//!     let client = PayClient::new(config)?;
//!
//!     let order = TransactionRequest::new(
//!         "Image形象店-深圳腾大-QQ公仔",
//!         "1217752501201407033233368018",
//!         "https://www.weixin.qq.com/wxpay/pay.php",
//!         Amount::cny(1),
//!     )
//!     .with_scene_info(SceneInfo {
//!         payer_client_ip: "14.23.150.211".to_string(),
//!         device_id: None,
//!         store_info: None,
//!         h5_info: Some(H5Info {
//!             h5_type: "Wap".to_string(),
//!             app_name: None,
//!             app_url: None,
//!             bundle_id: None,
//!             package_name: None,
//!         }),
//!     });
//!
//!     let response = client.transactions_h5(&order).await;
//!     match response.json() {
//!         Some(body) => println!("h5_url: {}", body["h5_url"]),
//!         None => println!("failed ({}): {:?}", response.status_code, response.raw_error),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`crypto`**: canonical string, signing, verification, nonces and the
//!   `Authorization` header
//! - **`client`**: the request executor
//! - **`transport`**: the HTTP capability and its `reqwest` implementation
//! - **`api`**: endpoint calls built on the executor
//! - **`types`**: configuration, request parameters and [`PayResponse`]
//! - **`error`**: error handling

pub mod api;
pub mod client;
pub mod crypto;
pub mod error;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use api::build_query_string;
pub use client::PayClient;
pub use error::{PayError, Result};
pub use transport::{ReqwestTransport, Transport, TransportFailure, TransportResponse};
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
