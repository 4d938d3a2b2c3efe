//! Simplified runtime for coordinating the dashboard workers

use crate::consts::cli_consts::{HISTORY_COMMAND_QUEUE_SIZE, MESSAGE_QUEUE_SIZE};
use crate::events::DashboardMessage;
use crate::market::{MarketClient, MarketData};
use crate::workers::core::{MessageSender, WorkerConfig};
use crate::workers::history::{HistoryCommand, start_history_fetcher};
use crate::workers::snapshot::start_snapshot_fetcher;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Start the snapshot and history workers around a shared market client
pub fn start_dashboard_workers(
    market: MarketClient,
    vs_currency: String,
    shutdown: broadcast::Receiver<()>,
) -> (
    mpsc::Receiver<DashboardMessage>,
    mpsc::Sender<HistoryCommand>,
    Vec<JoinHandle<()>>,
) {
    let config = WorkerConfig::new(vs_currency);
    let (message_sender, message_receiver) = mpsc::channel::<DashboardMessage>(MESSAGE_QUEUE_SIZE);
    let (history_sender, history_receiver) =
        mpsc::channel::<HistoryCommand>(HISTORY_COMMAND_QUEUE_SIZE);

    let market: Arc<dyn MarketData> = Arc::new(market);
    let sender = MessageSender::new(message_sender);

    let join_handles = vec![
        start_snapshot_fetcher(
            market.clone(),
            config.clone(),
            sender.clone(),
            shutdown.resubscribe(),
        ),
        start_history_fetcher(market, config, history_receiver, sender, shutdown),
    ];

    (message_receiver, history_sender, join_handles)
}
