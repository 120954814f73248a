//! Integration tests for the endpoint calls

use mockito::{Matcher, Server};
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use wechat_pay_v3::{
    types::{
        config::{
            ENV_APP_ID, ENV_BASE_URL, ENV_MERCHANT_ID, ENV_PRIVATE_KEY_PATH, ENV_SERIAL_NO,
            ENV_TIMEOUT_SECS,
        },
        *,
    },
    PayClient, PayError,
};

const PRIVATE_KEY: &str = include_str!("fixtures/apiclient_key.pem");
const PUBLIC_KEY: &str = include_str!("fixtures/apiclient_pub.pem");

const AUTHORIZATION_PATTERN: &str = r#"^WECHATPAY2-SHA256-RSA2048 mchid="1230000109",nonce_str="[A-Za-z0-9]{32}",timestamp="\d+",serial_no="1DDE55AD98ED71D6EDD4A4A16996DE7B47773A8C",signature="[A-Za-z0-9+/=]+"$"#;

fn client_for(server: &Server) -> PayClient {
    let config = PayConfig::new(
        "wxd678efh567hg6787",
        "1230000109",
        "1DDE55AD98ED71D6EDD4A4A16996DE7B47773A8C",
    )
    .with_private_key(PRIVATE_KEY)
    .with_public_key(PUBLIC_KEY)
    .with_base_url(server.url())
    .with_timeout(Duration::from_secs(5));
    PayClient::new(config).unwrap()
}

fn sample_order() -> TransactionRequest {
    TransactionRequest::new(
        "Image形象店-深圳腾大-QQ公仔",
        "1217752501201407033233368018",
        "https://www.weixin.qq.com/wxpay/pay.php",
        Amount::cny(100),
    )
}

fn signed() -> Matcher {
    Matcher::Regex(AUTHORIZATION_PATTERN.to_string())
}

#[tokio::test]
async fn test_transactions_h5_merges_identity() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v3/pay/transactions/h5")
        .match_header("authorization", signed())
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "appid": "wxd678efh567hg6787",
            "mchid": "1230000109",
            "out_trade_no": "1217752501201407033233368018",
            "amount": {"total": 100, "currency": "CNY"},
            "scene_info": {"payer_client_ip": "14.23.150.211", "h5_info": {"type": "Wap"}}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"h5_url": "https://wx.tenpay.com/cgi-bin/mmpayweb-bin/checkmweb?prepay_id=wx2016121516420242444321ca0631331346&package=1405458241"})
                .to_string(),
        )
        .create_async()
        .await;

    let order = sample_order().with_scene_info(SceneInfo {
        payer_client_ip: "14.23.150.211".to_string(),
        device_id: None,
        store_info: None,
        h5_info: Some(H5Info {
            h5_type: "Wap".to_string(),
            app_name: None,
            app_url: None,
            bundle_id: None,
            package_name: None,
        }),
    });

    let response = client_for(&server).transactions_h5(&order).await;

    mock.assert_async().await;
    assert_eq!(response.status_code, 200);
    assert!(response
        .json()
        .and_then(|body| body["h5_url"].as_str())
        .unwrap()
        .starts_with("https://wx.tenpay.com"));
}

#[tokio::test]
async fn test_transactions_jsapi_and_pay_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v3/pay/transactions/jsapi")
        .match_header("authorization", signed())
        .match_body(Matcher::PartialJson(json!({
            "appid": "wxd678efh567hg6787",
            "mchid": "1230000109",
            "payer": {"openid": "oUpF8uMuAJO_M2pxb1Q9zNjWeS6o"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"prepay_id": "wx26112221580621e9b071c00d9e093b0000"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .transactions_jsapi(&sample_order().with_payer("oUpF8uMuAJO_M2pxb1Q9zNjWeS6o"))
        .await;

    mock.assert_async().await;
    let prepay_id = response
        .data
        .as_ref()
        .and_then(|data| data.get("prepay_id"))
        .and_then(|value| value.as_str())
        .unwrap();

    let params = client.jsapi_pay_params(prepay_id).unwrap();
    assert_eq!(params.package, "prepay_id=wx26112221580621e9b071c00d9e093b0000");
    assert!(!params.pay_sign.is_empty());
}

#[tokio::test]
async fn test_transactions_native_provider_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v3/pay/transactions/native")
        .match_header("authorization", signed())
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"code": "PARAM_ERROR", "message": "参数错误", "detail": {"field": "/amount/total"}})
                .to_string(),
        )
        .create_async()
        .await;

    let response = client_for(&server).transactions_native(&sample_order()).await;

    assert_eq!(response.status_code, 400);
    assert!(response.data.is_none());
    assert_eq!(response.failure, Some(FailureKind::Provider));
    assert_eq!(response.error_code(), Some("PARAM_ERROR"));
    assert_eq!(response.error.as_ref().unwrap()["detail"]["field"], "/amount/total");
    assert!(response.raw_error.unwrap().contains("400"));
}

#[tokio::test]
async fn test_transactions_app() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v3/pay/transactions/app")
        .match_header("authorization", signed())
        .match_body(Matcher::PartialJson(json!({"appid": "wxd678efh567hg6787", "mchid": "1230000109"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"prepay_id": "wx241653070658372a9e3b7a9a18eb2c0000"}).to_string())
        .create_async()
        .await;

    let response = client_for(&server).transactions_app(&sample_order()).await;

    mock.assert_async().await;
    assert!(response.is_success());
}

#[tokio::test]
async fn test_query_by_out_trade_no() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v3/pay/transactions/out-trade-no/1217752501201407033233368018")
        .match_query(Matcher::UrlEncoded("mchid".to_string(), "1230000109".to_string()))
        .match_header("authorization", signed())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"trade_state": "SUCCESS", "out_trade_no": "1217752501201407033233368018"}).to_string())
        .create_async()
        .await;

    let response = client_for(&server)
        .query_by_out_trade_no("1217752501201407033233368018")
        .await;

    mock.assert_async().await;
    assert_eq!(
        response.json().unwrap()["trade_state"],
        json!("SUCCESS")
    );
}

#[tokio::test]
async fn test_query_by_transaction_id_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v3/pay/transactions/id/4200000985201911261234567890")
        .match_query(Matcher::UrlEncoded("mchid".to_string(), "1230000109".to_string()))
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json!({"code": "ORDER_NOT_EXIST", "message": "订单不存在"}).to_string())
        .create_async()
        .await;

    let response = client_for(&server)
        .query_by_transaction_id("4200000985201911261234567890")
        .await;

    assert_eq!(response.status_code, 404);
    assert_eq!(response.error_code(), Some("ORDER_NOT_EXIST"));
    assert_eq!(response.error_message(), Some("订单不存在"));
}

#[tokio::test]
async fn test_close_returns_empty_object() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            "/v3/pay/transactions/out-trade-no/1217752501201407033233368018/close",
        )
        .match_header("authorization", signed())
        .match_body(Matcher::Json(json!({"mchid": "1230000109"})))
        .with_status(204)
        .create_async()
        .await;

    let response = client_for(&server)
        .close("1217752501201407033233368018")
        .await;

    mock.assert_async().await;
    assert_eq!(response.status_code, 204);
    assert_eq!(response.data, Some(ResponseData::Json(json!({}))));
}

#[tokio::test]
async fn test_refunds_and_find_refund() {
    let mut server = Server::new_async().await;
    let apply = server
        .mock("POST", "/v3/refund/domestic/refunds")
        .match_header("authorization", signed())
        .match_body(Matcher::Json(json!({
            "out_trade_no": "1217752501201407033233368018",
            "out_refund_no": "1217752501201407033233368019",
            "reason": "商品已售完",
            "amount": {"refund": 50, "total": 100, "currency": "CNY"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"refund_id": "50000000382019052709732678859", "status": "PROCESSING"}).to_string())
        .create_async()
        .await;
    let lookup = server
        .mock("GET", "/v3/refund/domestic/refunds/1217752501201407033233368019")
        .match_header("authorization", signed())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"refund_id": "50000000382019052709732678859", "status": "SUCCESS"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let refund = RefundRequest::for_out_trade_no(
        "1217752501201407033233368018",
        "1217752501201407033233368019",
        50,
        100,
    )
    .with_reason("商品已售完");

    let applied = client.refunds(&refund).await;
    let found = client.find_refund("1217752501201407033233368019").await;

    apply.assert_async().await;
    lookup.assert_async().await;
    assert_eq!(applied.json().unwrap()["status"], "PROCESSING");
    assert_eq!(found.json().unwrap()["status"], "SUCCESS");
}

#[tokio::test]
async fn test_bills_apply_and_download() {
    let mut server = Server::new_async().await;
    let download_url = format!("{}/v3/billdownload/file?token=6XIv5TUPto7pByrTQKhd6kwvyKLG2uY2wMMR8cNXqaA_Cv_isgaUtBzp4QtiozLO", server.url());

    let trade_bill = server
        .mock("GET", "/v3/bill/tradebill")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("bill_date".to_string(), "2019-06-11".to_string()),
            Matcher::UrlEncoded("bill_type".to_string(), "ALL".to_string()),
        ]))
        .match_header("authorization", signed())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"hash_type": "SHA1", "download_url": download_url}).to_string())
        .create_async()
        .await;
    let fund_flow = server
        .mock("GET", "/v3/bill/fundflowbill")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("bill_date".to_string(), "2019-06-11".to_string()),
            Matcher::UrlEncoded("account_type".to_string(), "BASIC".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"hash_type": "SHA1", "download_url": download_url}).to_string())
        .create_async()
        .await;
    let download = server
        .mock("GET", "/v3/billdownload/file")
        .match_query(Matcher::Any)
        .match_header("authorization", signed())
        .with_status(200)
        .with_header("content-type", "text/plain;charset=utf-8")
        .with_body("交易时间,公众账号ID,商户号\n`2019-06-10 00:00:01,`wxd678efh567hg6787,`1230000109\n")
        .create_async()
        .await;

    let client = client_for(&server);
    let applied = client
        .trade_bill(&TradeBillQuery::new("2019-06-11").with_bill_type("ALL"))
        .await;
    let fund_flow_applied = client
        .fund_flow_bill(&FundFlowBillQuery::new("2019-06-11").with_account_type("BASIC"))
        .await;
    let url = applied.json().unwrap()["download_url"].as_str().unwrap().to_string();
    let file = client.download_bill(&url).await;

    trade_bill.assert_async().await;
    fund_flow.assert_async().await;
    download.assert_async().await;
    assert!(fund_flow_applied.is_success());
    let text = file.data.as_ref().and_then(ResponseData::as_text).unwrap();
    assert!(text.starts_with("交易时间"));
}

#[tokio::test]
async fn test_download_gzip_bill_is_binary() {
    let mut server = Server::new_async().await;
    let gzip_header = vec![0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00];
    let _mock = server
        .mock("GET", "/v3/billdownload/file")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/x-gzip")
        .with_body(gzip_header.clone())
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .download_bill(&format!("{}/v3/billdownload/file?token=abc&tartype=gzip", server.url()))
        .await;

    assert_eq!(response.data, Some(ResponseData::Binary(gzip_header)));
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_failure() {
    let config = PayConfig::new(
        "wxd678efh567hg6787",
        "1230000109",
        "1DDE55AD98ED71D6EDD4A4A16996DE7B47773A8C",
    )
    .with_private_key(PRIVATE_KEY)
    .with_base_url("http://127.0.0.1:9")
    .with_timeout(Duration::from_millis(200));
    let client = PayClient::new(config).unwrap();

    let response = client.close("1217752501201407033233368018").await;

    assert_eq!(response.status_code, 0);
    assert_eq!(response.failure, Some(FailureKind::Transport));
    assert!(!response.raw_error.unwrap().is_empty());
}

#[test]
fn test_config_validation() {
    let base = PayConfig::new(
        "wxd678efh567hg6787",
        "1230000109",
        "1DDE55AD98ED71D6EDD4A4A16996DE7B47773A8C",
    );
    assert!(base.validate().is_ok());

    assert!(matches!(
        base.clone().with_auth_scheme("WECHATPAY2 SHA256").validate(),
        Err(PayError::Config { .. })
    ));
    assert!(base.clone().with_auth_scheme("").validate().is_err());
    assert!(base.clone().with_base_url("api.mch.weixin.qq.com").validate().is_err());

    let mut no_serial = base.clone();
    no_serial.serial_no.clear();
    assert!(no_serial.validate().is_err());
}

#[test]
fn test_config_debug_redacts_keys() {
    let config = PayConfig::new(
        "wxd678efh567hg6787",
        "1230000109",
        "1DDE55AD98ED71D6EDD4A4A16996DE7B47773A8C",
    )
    .with_private_key(PRIVATE_KEY);

    let debug = format!("{:?}", config);
    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains("PRIVATE KEY"));
}

// The only test in this binary that touches WECHATPAY_* variables
#[test]
fn test_config_from_env() {
    for name in [ENV_APP_ID, ENV_MERCHANT_ID, ENV_SERIAL_NO, ENV_PRIVATE_KEY_PATH, ENV_BASE_URL, ENV_TIMEOUT_SECS] {
        std::env::remove_var(name);
    }

    let missing = PayConfig::from_env();
    assert!(matches!(missing, Err(PayError::Config { .. })));

    let mut key_file = tempfile::NamedTempFile::new().unwrap();
    key_file.write_all(PRIVATE_KEY.as_bytes()).unwrap();

    std::env::set_var(ENV_APP_ID, "wxd678efh567hg6787");
    std::env::set_var(ENV_MERCHANT_ID, "1230000109");
    std::env::set_var(ENV_SERIAL_NO, "1DDE55AD98ED71D6EDD4A4A16996DE7B47773A8C");
    std::env::set_var(ENV_PRIVATE_KEY_PATH, key_file.path());
    std::env::set_var(ENV_BASE_URL, "http://localhost:8080");
    std::env::set_var(ENV_TIMEOUT_SECS, "15");

    let config = PayConfig::from_env().unwrap();
    assert_eq!(config.app_id, "wxd678efh567hg6787");
    assert_eq!(config.merchant_id, "1230000109");
    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    assert_eq!(config.private_key.as_deref(), Some(PRIVATE_KEY));
    assert!(PayClient::new(config).is_ok());

    std::env::set_var(ENV_TIMEOUT_SECS, "soon");
    assert!(PayConfig::from_env().is_err());

    for name in [ENV_APP_ID, ENV_MERCHANT_ID, ENV_SERIAL_NO, ENV_PRIVATE_KEY_PATH, ENV_BASE_URL, ENV_TIMEOUT_SECS] {
        std::env::remove_var(name);
    }
}
