//! Cryptographic utilities for signed API requests
//!
//! This module provides the primitives every call goes through: the
//! canonical request string, its RSA-SHA256 signature, per-request nonces and
//! the `Authorization` header that carries them.
//!
//! # Architecture
//!
//! The crypto module is organized as follows:
//! - [`signer`] - Canonical strings, key loading, signing and verification
//! - [`authorization`] - `Authorization` header assembly
//! - [`nonce`] - Nonce and timestamp generation
//!
//! # Examples
//!
//! ## Canonical Strings
//!
//! ```
//! use wechat_pay_v3::crypto::SignableRequest;
//!
//! let request = SignableRequest::new("GET", "/v3/certificates", "1554208460", "593BEC0C930BF1AFEB40B4A08C8FB242", None);
//! assert_eq!(
//!     request.canonical_string(),
//!     "GET\n/v3/certificates\n1554208460\n593BEC0C930BF1AFEB40B4A08C8FB242\n"
//! );
//! ```
//!
//! ## Missing Keys
//!
//! ```
//! use wechat_pay_v3::crypto::{KeyMaterial, SignableRequest};
//!
//! let keys = KeyMaterial::default();
//! let request = SignableRequest::new("GET", "/v3/certificates", "1554208460", "nonce", None);
//! assert!(keys.sign_request(&request).unwrap_err().is_missing_key_material());
//! ```
//!
//! ## Generating Nonces
//!
//! ```
//! use wechat_pay_v3::crypto::generate_nonce;
//!
//! let nonce = generate_nonce();
//! assert_eq!(nonce.len(), 32);
//! assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
//! ```

pub mod authorization;
pub mod nonce;
pub mod signer;


// Re-export commonly used items
pub use authorization::Identity;
pub use nonce::{generate_nonce, timestamp};
pub use signer::{
    parse_private_key, parse_public_key, serialize_body, KeyMaterial, SignableRequest,
};
