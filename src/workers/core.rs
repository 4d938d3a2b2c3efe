//! Core worker utilities shared by the fetch workers

use crate::consts::cli_consts::{history_lookup, snapshot_polling};
use crate::events::DashboardMessage;
use std::time::Duration;
use tokio::sync::mpsc;

/// Common message sending utilities for workers
#[derive(Clone)]
pub struct MessageSender {
    sender: mpsc::Sender<DashboardMessage>,
}

impl MessageSender {
    pub fn new(sender: mpsc::Sender<DashboardMessage>) -> Self {
        Self { sender }
    }

    /// Send a dashboard message, dropping it if the UI has gone away.
    pub async fn send(&self, message: DashboardMessage) {
        let _ = self.sender.send(message).await;
    }
}

/// Worker configuration shared across all worker types
#[derive(Clone)]
pub struct WorkerConfig {
    pub vs_currency: String,
    pub refresh_interval: Duration,
    pub lookback_days: u32,
}

impl WorkerConfig {
    pub fn new(vs_currency: String) -> Self {
        Self {
            vs_currency,
            refresh_interval: snapshot_polling::refresh_interval(),
            lookback_days: history_lookup::LOOKBACK_DAYS,
        }
    }
}
