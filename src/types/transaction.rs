//! Order placement request types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Order amount, in the smallest currency unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Total in fen
    pub total: u64,
    /// ISO currency code, `CNY` when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Amount {
    /// Amount in CNY fen
    pub fn cny(total: u64) -> Self {
        Self {
            total,
            currency: Some("CNY".to_string()),
        }
    }
}

/// Paying user, required for JSAPI orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    pub openid: String,
}

/// H5 client description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct H5Info {
    /// Scene type: `iOS`, `Android` or `Wap`
    #[serde(rename = "type")]
    pub h5_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
}

/// Scene information, required for H5 orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneInfo {
    /// Client IP of the paying user
    pub payer_client_ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_info: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h5_info: Option<H5Info>,
}

/// Settlement options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleInfo {
    pub profit_sharing: bool,
}

/// Parameters shared by the H5, JSAPI, Native and APP order endpoints
///
/// `appid` and `mchid` are filled in by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Goods description shown to the payer
    pub description: String,
    /// Merchant order number, unique per merchant
    pub out_trade_no: String,
    /// RFC 3339 expiry time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_expire: Option<String>,
    /// Free-form data echoed back in queries and notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach: Option<String>,
    /// Callback URL for payment notifications
    pub notify_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_fapiao: Option<bool>,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
    /// Itemized goods details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_info: Option<SceneInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_info: Option<SettleInfo>,
}

impl TransactionRequest {
    /// Create a request with the required fields
    pub fn new(
        description: impl Into<String>,
        out_trade_no: impl Into<String>,
        notify_url: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            description: description.into(),
            out_trade_no: out_trade_no.into(),
            time_expire: None,
            attach: None,
            notify_url: notify_url.into(),
            goods_tag: None,
            support_fapiao: None,
            amount,
            payer: None,
            detail: None,
            scene_info: None,
            settle_info: None,
        }
    }

    /// Set the paying user
    pub fn with_payer(mut self, openid: impl Into<String>) -> Self {
        self.payer = Some(Payer {
            openid: openid.into(),
        });
        self
    }

    /// Set the scene information
    pub fn with_scene_info(mut self, scene_info: SceneInfo) -> Self {
        self.scene_info = Some(scene_info);
        self
    }

    /// Set the attach field
    pub fn with_attach(mut self, attach: impl Into<String>) -> Self {
        self.attach = Some(attach.into());
        self
    }

    /// Set the expiry time
    pub fn with_time_expire(mut self, time_expire: impl Into<String>) -> Self {
        self.time_expire = Some(time_expire.into());
        self
    }
}

/// Client-side parameters for invoking a JSAPI payment (`WeixinJSBridge`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsapiPayParams {
    pub app_id: String,
    pub time_stamp: String,
    pub nonce_str: String,
    pub package: String,
    pub sign_type: String,
    pub pay_sign: String,
}
