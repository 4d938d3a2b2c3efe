//! Response types for the market data API.

use crate::consts::cli_consts::snapshot_polling;
use serde::Deserialize;

/// One ranked row from the markets endpoint.
///
/// Percentage fields are optional: the API omits them for thinly traded
/// assets, and the dashboard renders those cells as `N/A`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetSnapshot {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "image")]
    pub image_url: String,
    pub current_price: f64,
    pub market_cap: f64,
    #[serde(rename = "total_volume")]
    pub volume_24h: f64,
    #[serde(rename = "price_change_percentage_1h_in_currency")]
    pub percent_change_1h: Option<f64>,
    #[serde(rename = "price_change_percentage_24h")]
    pub percent_change_24h: Option<f64>,
    #[serde(rename = "price_change_percentage_7d_in_currency")]
    pub percent_change_7d: Option<f64>,
    #[serde(rename = "sparkline_in_7d")]
    pub sparkline: Option<SparklineSeries>,
}

/// The week of price samples attached to a snapshot row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SparklineSeries {
    pub price: Vec<f64>,
}

/// One timestamped sample from the market chart endpoint, which encodes
/// each sample as a `[timestamp_ms, price]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(i64, f64)")]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl From<(i64, f64)> for PricePoint {
    fn from((timestamp_ms, price): (i64, f64)) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }
}

/// Response body of the market chart endpoint. The payload also carries
/// market cap and volume series, which the dashboard does not use.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<PricePoint>,
}

/// Parameters for a ranked snapshot request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotQuery {
    pub vs_currency: String,
    pub per_page: u32,
    pub page: u32,
}

impl SnapshotQuery {
    pub fn new(vs_currency: impl Into<String>) -> Self {
        Self {
            vs_currency: vs_currency.into(),
            per_page: snapshot_polling::MARKET_PAGE_SIZE,
            page: 1,
        }
    }
}
