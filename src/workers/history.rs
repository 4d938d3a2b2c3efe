//! Asset history lookup worker
//!
//! Serves one-shot lookback requests issued when an asset is selected on the
//! dashboard. Every completion is tagged with the asset it was fetched for so
//! the dashboard can discard results that arrive after a newer selection.

use crate::events::{DashboardMessage, HistoricalFetchError};
use crate::market::MarketData;
use crate::workers::core::{MessageSender, WorkerConfig};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Request for the lookback series of a single asset.
#[derive(Debug, Clone)]
pub struct HistoryCommand {
    pub asset_id: String,
}

/// Spawns the history lookup loop.
///
/// The worker drains commands one at a time and exits when the command
/// channel closes or shutdown is signalled.
pub fn start_history_fetcher(
    market: Arc<dyn MarketData>,
    config: WorkerConfig,
    mut commands: mpsc::Receiver<HistoryCommand>,
    sender: MessageSender,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                command = commands.recv() => {
                    match command {
                        Some(command) => lookup_history(&*market, &config, command, &sender).await,
                        None => break,
                    }
                }
            }
        }
    })
}

/// Fetches the lookback series for one command and reports the tagged result.
async fn lookup_history(
    market: &dyn MarketData,
    config: &WorkerConfig,
    command: HistoryCommand,
    sender: &MessageSender,
) {
    let result = market
        .price_history(&command.asset_id, &config.vs_currency, config.lookback_days)
        .await
        .map_err(HistoricalFetchError::from);

    sender
        .send(DashboardMessage::HistoricalFetchSettled {
            target_id: command.asset_id,
            result,
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::cli_consts::{HISTORY_COMMAND_QUEUE_SIZE, MESSAGE_QUEUE_SIZE};
    use crate::market::MockMarketData;
    use crate::market::error::MarketError;
    use crate::market::types::PricePoint;
    use std::time::Duration;

    fn spawn_worker(
        mock: MockMarketData,
        vs_currency: &str,
    ) -> (
        mpsc::Sender<HistoryCommand>,
        mpsc::Receiver<DashboardMessage>,
        broadcast::Sender<()>,
        JoinHandle<()>,
    ) {
        let market: Arc<dyn MarketData> = Arc::new(mock);
        let (command_sender, command_receiver) = mpsc::channel(HISTORY_COMMAND_QUEUE_SIZE);
        let (message_sender, message_receiver) = mpsc::channel(MESSAGE_QUEUE_SIZE);
        let (shutdown_sender, _) = broadcast::channel(1);
        let handle = start_history_fetcher(
            market,
            WorkerConfig::new(vs_currency.to_string()),
            command_receiver,
            MessageSender::new(message_sender),
            shutdown_sender.subscribe(),
        );
        (command_sender, message_receiver, shutdown_sender, handle)
    }

    async fn recv_message(receiver: &mut mpsc::Receiver<DashboardMessage>) -> DashboardMessage {
        tokio::time::timeout(Duration::from_secs(5), receiver.recv())
            .await
            .expect("timed out waiting for a worker message")
            .expect("message channel closed unexpectedly")
    }

    #[tokio::test]
    // Should tag the completion with the asset the command named.
    async fn test_completion_carries_the_requested_id() {
        let mut mock = MockMarketData::new();
        mock.expect_price_history()
            .withf(|asset_id: &str, vs_currency: &str, days: &u32| {
                asset_id == "bitcoin" && vs_currency == "gbp" && *days == 7
            })
            .returning(|_, _, _| {
                Ok(vec![
                    PricePoint::from((0, 100.0)),
                    PricePoint::from((3_600_000, 101.0)),
                    PricePoint::from((7_200_000, 99.5)),
                ])
            });

        let (command_sender, mut message_receiver, _shutdown_sender, handle) =
            spawn_worker(mock, "gbp");

        command_sender
            .send(HistoryCommand {
                asset_id: "bitcoin".to_string(),
            })
            .await
            .expect("worker dropped the command channel");

        match recv_message(&mut message_receiver).await {
            DashboardMessage::HistoricalFetchSettled { target_id, result } => {
                assert_eq!(target_id, "bitcoin");
                assert_eq!(result.expect("expected a successful lookup").len(), 3);
            }
            other => panic!("expected a history completion, got {:?}", other),
        }

        handle.abort();
    }

    #[tokio::test]
    // Should report a failed lookup and keep serving later commands.
    async fn test_failures_do_not_stop_the_worker() {
        let mut mock = MockMarketData::new();
        mock.expect_price_history().returning(|asset_id, _, _| {
            if asset_id == "aave" {
                Err(MarketError::Http {
                    status: 500,
                    message: "internal error".to_string(),
                })
            } else {
                Ok(vec![PricePoint::from((0, 1.0))])
            }
        });

        let (command_sender, mut message_receiver, _shutdown_sender, handle) =
            spawn_worker(mock, "usd");

        command_sender
            .send(HistoryCommand {
                asset_id: "aave".to_string(),
            })
            .await
            .expect("worker dropped the command channel");
        match recv_message(&mut message_receiver).await {
            DashboardMessage::HistoricalFetchSettled { target_id, result } => {
                assert_eq!(target_id, "aave");
                assert!(result.is_err());
            }
            other => panic!("expected a history completion, got {:?}", other),
        }

        command_sender
            .send(HistoryCommand {
                asset_id: "bitcoin".to_string(),
            })
            .await
            .expect("worker dropped the command channel");
        match recv_message(&mut message_receiver).await {
            DashboardMessage::HistoricalFetchSettled { target_id, result } => {
                assert_eq!(target_id, "bitcoin");
                assert!(result.is_ok());
            }
            other => panic!("expected a history completion, got {:?}", other),
        }

        handle.abort();
    }

    #[tokio::test]
    // Should exit when the command channel closes.
    async fn test_closed_command_channel_ends_the_worker() {
        let mock = MockMarketData::new();
        let (command_sender, _message_receiver, _shutdown_sender, handle) =
            spawn_worker(mock, "usd");

        drop(command_sender);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker did not exit")
            .expect("worker panicked");
    }

    #[tokio::test]
    // Should exit when shutdown is signalled.
    async fn test_shutdown_ends_the_worker() {
        let mock = MockMarketData::new();
        let (_command_sender, _message_receiver, shutdown_sender, handle) =
            spawn_worker(mock, "usd");

        shutdown_sender.send(()).expect("worker dropped its receiver");

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker did not shut down")
            .expect("worker panicked");
    }
}
