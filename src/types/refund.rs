//! Refund request types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Refund amount, in the smallest currency unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundAmount {
    /// Amount to refund
    pub refund: u64,
    /// Total of the original order
    pub total: u64,
    /// ISO currency code; only `CNY` is accepted
    pub currency: String,
    /// Funding sources to refund from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
}

/// Domestic refund request
///
/// One of `transaction_id` or `out_trade_no` identifies the original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_trade_no: Option<String>,
    /// Merchant refund number, unique per merchant
    pub out_refund_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds_account: Option<String>,
    pub amount: RefundAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods_detail: Option<Value>,
}

impl RefundRequest {
    /// Refund part or all of an order identified by its merchant order number
    pub fn for_out_trade_no(
        out_trade_no: impl Into<String>,
        out_refund_no: impl Into<String>,
        refund: u64,
        total: u64,
    ) -> Self {
        Self {
            transaction_id: None,
            out_trade_no: Some(out_trade_no.into()),
            out_refund_no: out_refund_no.into(),
            reason: None,
            notify_url: None,
            funds_account: None,
            amount: RefundAmount {
                refund,
                total,
                currency: "CNY".to_string(),
                from: None,
            },
            goods_detail: None,
        }
    }

    /// Set the refund reason shown to the payer
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the refund notification URL
    pub fn with_notify_url(mut self, notify_url: impl Into<String>) -> Self {
        self.notify_url = Some(notify_url.into());
        self
    }
}
