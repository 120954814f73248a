//! Order placement, lookup and closing

use crate::client::PayClient;
use crate::crypto::{generate_nonce, timestamp};
use crate::types::{routes, FailureKind, JsapiPayParams, PayResponse, TransactionRequest};
use crate::Result;
use serde_json::json;

/// `signType` of client-side pay signatures
const PAY_SIGN_TYPE: &str = "RSA";

impl PayClient {
    /// Place an H5 (mobile browser) order; the response carries `h5_url`
    pub async fn transactions_h5(&self, params: &TransactionRequest) -> PayResponse {
        self.post_with_identity(routes::TRANSACTIONS_H5, params, true)
            .await
    }

    /// Place a JSAPI order; `params.payer` must be set. The response carries `prepay_id`
    pub async fn transactions_jsapi(&self, params: &TransactionRequest) -> PayResponse {
        self.post_with_identity(routes::TRANSACTIONS_JSAPI, params, true)
            .await
    }

    /// Place a Native (QR code) order; the response carries `code_url`
    pub async fn transactions_native(&self, params: &TransactionRequest) -> PayResponse {
        self.post_with_identity(routes::TRANSACTIONS_NATIVE, params, true)
            .await
    }

    /// Place an in-app order; the response carries `prepay_id`
    pub async fn transactions_app(&self, params: &TransactionRequest) -> PayResponse {
        self.post_with_identity(routes::TRANSACTIONS_APP, params, true)
            .await
    }

    /// Build the parameters a JSAPI page passes to `requestPayment`
    ///
    /// `paySign` signs `appId\ntimeStamp\nnonceStr\npackage\n` with the
    /// merchant private key.
    pub fn jsapi_pay_params(&self, prepay_id: &str) -> Result<JsapiPayParams> {
        let app_id = self.identity().app_id.clone();
        let time_stamp = timestamp();
        let nonce_str = generate_nonce();
        let package = format!("prepay_id={}", prepay_id);

        let pay_sign = self
            .keys()
            .sign_message(&[&app_id, &time_stamp, &nonce_str, &package])?;

        Ok(JsapiPayParams {
            app_id,
            time_stamp,
            nonce_str,
            package,
            sign_type: PAY_SIGN_TYPE.to_string(),
            pay_sign,
        })
    }

    /// Look up an order by the provider's transaction id
    pub async fn query_by_transaction_id(&self, transaction_id: &str) -> PayResponse {
        let path = match routes::transaction_by_id(transaction_id) {
            Ok(path) => path,
            Err(e) => return PayResponse::rejected(FailureKind::InvalidRequest, e.to_string()),
        };
        let mchid = json!({ "mchid": self.identity().merchant_id });
        self.execute_get_with_query(&path, &mchid, &[]).await
    }

    /// Look up an order by the merchant's order number
    pub async fn query_by_out_trade_no(&self, out_trade_no: &str) -> PayResponse {
        let path = match routes::transaction_by_out_trade_no(out_trade_no) {
            Ok(path) => path,
            Err(e) => return PayResponse::rejected(FailureKind::InvalidRequest, e.to_string()),
        };
        let mchid = json!({ "mchid": self.identity().merchant_id });
        self.execute_get_with_query(&path, &mchid, &[]).await
    }

    /// Close an unpaid order. Success is `204` with an empty body
    pub async fn close(&self, out_trade_no: &str) -> PayResponse {
        let path = match routes::close_transaction(out_trade_no) {
            Ok(path) => path,
            Err(e) => return PayResponse::rejected(FailureKind::InvalidRequest, e.to_string()),
        };
        let body = json!({ "mchid": self.identity().merchant_id });
        self.post(&path, &body).await
    }
}
