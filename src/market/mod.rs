use crate::market::error::MarketError;
use crate::market::types::{AssetSnapshot, PricePoint, SnapshotQuery};

pub(crate) mod client;
pub use client::MarketClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::{automock, predicate::*};

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the current ranked snapshot of market assets.
    async fn ranked_snapshots(
        &self,
        query: &SnapshotQuery,
    ) -> Result<Vec<AssetSnapshot>, MarketError>;

    /// Fetch the recent price history for a single asset.
    async fn price_history(
        &self,
        asset_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, MarketError>;
}
