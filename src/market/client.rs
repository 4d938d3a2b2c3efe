//! Market Data Client
//!
//! A client for the public market data API, allowing for ranked snapshot and
//! price history retrieval.

use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::market::MarketData;
use crate::market::error::MarketError;
use crate::market::types::{AssetSnapshot, MarketChart, PricePoint, SnapshotQuery};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("coinwatch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct MarketClient {
    client: Client,
    environment: Environment,
}

impl MarketClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::connect_timeout())
                .timeout(http::request_timeout())
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, MarketError> {
        serde_json::from_slice(bytes).map_err(MarketError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, MarketError> {
        if !response.status().is_success() {
            return Err(MarketError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, MarketError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }
}

#[async_trait::async_trait]
impl MarketData for MarketClient {
    /// Fetch the current ranked snapshot of market assets.
    async fn ranked_snapshots(
        &self,
        query: &SnapshotQuery,
    ) -> Result<Vec<AssetSnapshot>, MarketError> {
        let params = [
            ("vs_currency", query.vs_currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", query.per_page.to_string()),
            ("page", query.page.to_string()),
            ("sparkline", "true".to_string()),
            ("price_change_percentage", "1h,24h,7d".to_string()),
        ];

        self.get_request("coins/markets", &params).await
    }

    /// Fetch the recent price history for a single asset.
    async fn price_history(
        &self,
        asset_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, MarketError> {
        let asset_path = urlencoding::encode(asset_id).into_owned();
        let endpoint = format!("coins/{}/market_chart", asset_path);
        let params = [
            ("vs_currency", vs_currency.to_string()),
            ("days", days.to_string()),
        ];

        let chart: MarketChart = self.get_request(&endpoint, &params).await?;
        Ok(chart.prices)
    }
}

#[cfg(test)]
/// These are ignored by default since they require the live market data API.
mod live_market_tests {
    use crate::environment::Environment;
    use crate::market::MarketData;
    use crate::market::types::SnapshotQuery;

    #[tokio::test]
    #[ignore] // This test requires network access to the live API.
    /// Should return a ranked snapshot of market assets.
    async fn test_ranked_snapshots() {
        let client = super::MarketClient::new(Environment::Production);
        let query = SnapshotQuery::new("gbp");
        match client.ranked_snapshots(&query).await {
            Ok(snapshots) => {
                println!("Got {} snapshots", snapshots.len());
                for snapshot in snapshots.iter().take(3) {
                    println!("{} ({}): {}", snapshot.name, snapshot.symbol, snapshot.current_price);
                }
            }
            Err(e) => panic!("Failed to fetch snapshots: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires network access to the live API.
    /// Should return a week of price history for bitcoin.
    async fn test_price_history() {
        let client = super::MarketClient::new(Environment::Production);
        match client.price_history("bitcoin", "gbp", 7).await {
            Ok(points) => println!("Got {} price points", points.len()),
            Err(e) => panic!("Failed to fetch price history: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_client(api_url: &str) -> MarketClient {
        MarketClient::new(Environment::Custom {
            api_url: api_url.to_string(),
        })
    }

    #[test]
    fn build_url_joins_without_duplicate_slashes() {
        let client = local_client("http://localhost:8080/");
        assert_eq!(
            client.build_url("/coins/markets"),
            "http://localhost:8080/coins/markets"
        );
        assert_eq!(
            client.build_url("coins/bitcoin/market_chart"),
            "http://localhost:8080/coins/bitcoin/market_chart"
        );
    }

    #[test]
    fn decode_rejects_malformed_payloads() {
        let result: Result<Vec<AssetSnapshot>, _> = MarketClient::decode_response(b"not json");
        assert!(matches!(result, Err(MarketError::Decode(_))));
    }
}
