//! Bill applications and downloads

use crate::client::PayClient;
use crate::types::{routes, FundFlowBillQuery, PayResponse, TradeBillQuery};

impl PayClient {
    /// Apply for a trade bill; the response carries `download_url`
    pub async fn trade_bill(&self, query: &TradeBillQuery) -> PayResponse {
        self.execute_get_with_query(routes::TRADE_BILL, query, &[])
            .await
    }

    /// Apply for a fund flow bill; the response carries `download_url`
    pub async fn fund_flow_bill(&self, query: &FundFlowBillQuery) -> PayResponse {
        self.execute_get_with_query(routes::FUND_FLOW_BILL, query, &[])
            .await
    }

    /// Download a bill from the `download_url` of a bill application
    ///
    /// The file comes back as text, or as bytes when it was requested gzipped.
    pub async fn download_bill(&self, download_url: &str) -> PayResponse {
        self.get(download_url).await
    }
}
