//! Common constants for the API origin, auth scheme and endpoint routes

/// Production API origin
pub const API_BASE_URL: &str = "https://api.mch.weixin.qq.com";

/// Authorization scheme currently documented by the provider
pub const DEFAULT_AUTH_SCHEME: &str = "WECHATPAY2-SHA256-RSA2048";

/// Length of generated request nonces
pub const NONCE_LENGTH: usize = 32;

/// Endpoint routes, relative to [`API_BASE_URL`]
///
/// Caller-supplied order and refund numbers are percent-encoded into a single
/// path segment, so `/`, `?` and `#` cannot change the target. Empty ids and
/// the dot segments `.` and `..` are rejected.
pub mod routes {
    use crate::{PayError, Result};
    use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

    /// Characters left unescaped in an id segment
    const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
        .remove(b'-')
        .remove(b'_')
        .remove(b'.')
        .remove(b'~');

    /// H5 (mobile browser) order placement
    pub const TRANSACTIONS_H5: &str = "/v3/pay/transactions/h5";
    /// JSAPI (official account / mini program) order placement
    pub const TRANSACTIONS_JSAPI: &str = "/v3/pay/transactions/jsapi";
    /// Native (QR code) order placement
    pub const TRANSACTIONS_NATIVE: &str = "/v3/pay/transactions/native";
    /// In-app order placement
    pub const TRANSACTIONS_APP: &str = "/v3/pay/transactions/app";
    /// Order lookup by the provider's transaction id
    pub const TRANSACTIONS_BY_ID: &str = "/v3/pay/transactions/id";
    /// Order lookup by the merchant's order number
    pub const TRANSACTIONS_BY_OUT_TRADE_NO: &str = "/v3/pay/transactions/out-trade-no";
    /// Domestic refunds
    pub const REFUNDS: &str = "/v3/refund/domestic/refunds";
    /// Trade bill application
    pub const TRADE_BILL: &str = "/v3/bill/tradebill";
    /// Fund flow bill application
    pub const FUND_FLOW_BILL: &str = "/v3/bill/fundflowbill";

    /// Order lookup route for a transaction id
    pub fn transaction_by_id(transaction_id: &str) -> Result<String> {
        Ok(format!("{}/{}", TRANSACTIONS_BY_ID, segment(transaction_id)?))
    }

    /// Order lookup route for a merchant order number
    pub fn transaction_by_out_trade_no(out_trade_no: &str) -> Result<String> {
        Ok(format!("{}/{}", TRANSACTIONS_BY_OUT_TRADE_NO, segment(out_trade_no)?))
    }

    /// Close route for a merchant order number
    pub fn close_transaction(out_trade_no: &str) -> Result<String> {
        Ok(format!("{}/{}/close", TRANSACTIONS_BY_OUT_TRADE_NO, segment(out_trade_no)?))
    }

    /// Refund lookup route for a merchant refund number
    pub fn refund(out_refund_no: &str) -> Result<String> {
        Ok(format!("{}/{}", REFUNDS, segment(out_refund_no)?))
    }

    fn segment(id: &str) -> Result<String> {
        if matches!(id, "" | "." | "..") {
            return Err(PayError::invalid_id(id));
        }
        Ok(utf8_percent_encode(id, ID_SEGMENT).to_string())
    }
}

/// Response content types the executor distinguishes
pub mod content_types {
    pub const JSON: &str = "application/json";
    pub const TEXT_PLAIN: &str = "text/plain";
    pub const X_GZIP: &str = "application/x-gzip";
    pub const GZIP: &str = "application/gzip";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}
