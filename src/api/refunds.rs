//! Refund application and lookup

use crate::client::PayClient;
use crate::types::{routes, FailureKind, PayResponse, RefundRequest};

impl PayClient {
    /// Apply for a refund
    ///
    /// Refunds are keyed by order, not by merchant, so the body is sent
    /// without `appid`/`mchid`.
    pub async fn refunds(&self, params: &RefundRequest) -> PayResponse {
        match serde_json::to_value(params) {
            Ok(body) => self.post(routes::REFUNDS, &body).await,
            Err(e) => PayResponse::rejected(FailureKind::InvalidRequest, e.to_string()),
        }
    }

    /// Look up a refund by the merchant's refund number
    pub async fn find_refund(&self, out_refund_no: &str) -> PayResponse {
        match routes::refund(out_refund_no) {
            Ok(path) => self.get(&path).await,
            Err(e) => PayResponse::rejected(FailureKind::InvalidRequest, e.to_string()),
        }
    }
}
