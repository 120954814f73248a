//! Bill application query types

use serde::{Deserialize, Serialize};

/// Trade bill query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeBillQuery {
    /// Bill date, `YYYY-MM-DD`
    pub bill_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_mchid: Option<String>,
    /// `ALL`, `SUCCESS` or `REFUND`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_type: Option<String>,
    /// `GZIP` to receive a compressed file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tar_type: Option<String>,
}

impl TradeBillQuery {
    pub fn new(bill_date: impl Into<String>) -> Self {
        Self {
            bill_date: bill_date.into(),
            sub_mchid: None,
            bill_type: None,
            tar_type: None,
        }
    }

    pub fn with_bill_type(mut self, bill_type: impl Into<String>) -> Self {
        self.bill_type = Some(bill_type.into());
        self
    }

    pub fn gzip(mut self) -> Self {
        self.tar_type = Some("GZIP".to_string());
        self
    }
}

/// Fund flow bill query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundFlowBillQuery {
    /// Bill date, `YYYY-MM-DD`
    pub bill_date: String,
    /// `BASIC`, `OPERATION` or `FEES`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tar_type: Option<String>,
}

impl FundFlowBillQuery {
    pub fn new(bill_date: impl Into<String>) -> Self {
        Self {
            bill_date: bill_date.into(),
            account_type: None,
            tar_type: None,
        }
    }

    pub fn with_account_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_type = Some(account_type.into());
        self
    }
}
