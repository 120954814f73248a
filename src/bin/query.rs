//! Order lookup tool
//!
//! Queries one order and prints the normalized response as JSON.
//!
//! ```text
//! wechat-pay-query <out_trade_no>
//! wechat-pay-query --transaction-id <transaction_id>
//! ```
//!
//! Credentials come from the `WECHATPAY_*` environment variables read by
//! [`PayConfig::from_env`].

use std::env;
use std::process::ExitCode;

use wechat_pay_v3::{PayClient, PayConfig};

/// Which order number was given on the command line
enum Lookup {
    OutTradeNo(String),
    TransactionId(String),
}

fn parse_args(args: &[String]) -> Option<Lookup> {
    match args {
        [flag, id] if flag == "--transaction-id" => Some(Lookup::TransactionId(id.clone())),
        [out_trade_no] if !out_trade_no.starts_with('-') => {
            Some(Lookup::OutTradeNo(out_trade_no.clone()))
        }
        _ => None,
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("   wechat-pay-query <out_trade_no>");
    eprintln!("   wechat-pay-query --transaction-id <transaction_id>");
    eprintln!("\nEnvironment variables:");
    eprintln!("   WECHATPAY_APP_ID            - App id (optional)");
    eprintln!("   WECHATPAY_MCH_ID            - Merchant id");
    eprintln!("   WECHATPAY_SERIAL_NO         - Merchant certificate serial number");
    eprintln!("   WECHATPAY_PRIVATE_KEY_PATH  - Merchant private key PEM file");
    eprintln!("   WECHATPAY_PUBLIC_KEY_PATH   - Provider public key PEM file (optional)");
    eprintln!("   WECHATPAY_BASE_URL          - API origin (default: https://api.mch.weixin.qq.com)");
    eprintln!("   WECHATPAY_TIMEOUT_SECS      - Request timeout in seconds (optional)");
}

#[tokio::main]
async fn main() -> std::result::Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(lookup) = parse_args(&args) else {
        print_usage();
        return Ok(ExitCode::from(2));
    };

    let config = PayConfig::from_env()?;
    tracing::debug!("Loaded configuration: {:?}", config);
    let client = PayClient::new(config)?;

    let response = match &lookup {
        Lookup::OutTradeNo(out_trade_no) => client.query_by_out_trade_no(out_trade_no).await,
        Lookup::TransactionId(transaction_id) => {
            client.query_by_transaction_id(transaction_id).await
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
