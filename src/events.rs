//! Event System
//!
//! Types and implementations for worker events, fetch errors, and the
//! dashboard message protocol.

use crate::error_classifier::LogLevel;
use crate::logging::should_log_with_env;
use crate::market::error::MarketError;
use crate::market::types::{AssetSnapshot, PricePoint};
use chrono::Local;
use std::fmt::Display;
use thiserror::Error;

/// Failure of one snapshot fetch attempt.
#[derive(Debug, Error)]
#[error("snapshot fetch failed: {0}")]
pub struct SnapshotFetchError(#[from] pub MarketError);

/// Failure of one price history fetch attempt.
#[derive(Debug, Error)]
#[error("history fetch failed: {0}")]
pub struct HistoricalFetchError(#[from] pub MarketError);

/// A state transition for the dashboard. Worker messages arrive over the
/// session channel; key handling applies `PageChanged` and `AssetSelected`
/// directly. Every mutation of `DashboardState` goes through exactly one of
/// these.
#[derive(Debug)]
pub enum DashboardMessage {
    /// A snapshot fetch attempt has started.
    SnapshotFetchStarted,
    /// A snapshot fetch attempt has settled, successfully or not.
    SnapshotFetchSettled(Result<Vec<AssetSnapshot>, SnapshotFetchError>),
    /// The price history fetch tagged with `target_id` has settled.
    HistoricalFetchSettled {
        target_id: String,
        result: Result<Vec<PricePoint>, HistoricalFetchError>,
    },
    /// The user moved to a page (1-based, deliberately unvalidated).
    PageChanged(usize),
    /// The user asked for the price history of a visible asset.
    AssetSelected(String),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Worker that polls the ranked market snapshot on a fixed period.
    SnapshotFetcher,
    /// Worker that fetches the price history for a selected asset.
    HistoryFetcher,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn snapshot_fetcher_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::SnapshotFetcher, msg, event_type, log_level)
    }

    pub fn history_fetcher_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::HistoryFetcher, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
