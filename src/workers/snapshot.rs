//! Market snapshot polling worker
//!
//! Polls the ranked markets endpoint on a fixed cadence and reports every
//! attempt to the dashboard as a started/settled message pair.

use crate::events::{DashboardMessage, SnapshotFetchError};
use crate::market::MarketData;
use crate::market::types::SnapshotQuery;
use crate::workers::core::{MessageSender, WorkerConfig};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawns the snapshot polling loop.
///
/// The first attempt fires immediately; later attempts follow the configured
/// refresh interval. A slow request delays the next tick instead of stacking
/// attempts behind it.
pub fn start_snapshot_fetcher(
    market: Arc<dyn MarketData>,
    config: WorkerConfig,
    sender: MessageSender,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    fetch_snapshot(&*market, &config, &sender).await;
                }
            }
        }
    })
}

/// Runs one snapshot attempt and reports both edges of it.
async fn fetch_snapshot(market: &dyn MarketData, config: &WorkerConfig, sender: &MessageSender) {
    sender.send(DashboardMessage::SnapshotFetchStarted).await;

    let query = SnapshotQuery::new(&config.vs_currency);
    let result = market
        .ranked_snapshots(&query)
        .await
        .map_err(SnapshotFetchError::from);

    sender
        .send(DashboardMessage::SnapshotFetchSettled(result))
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::cli_consts::{MESSAGE_QUEUE_SIZE, snapshot_polling};
    use crate::market::MockMarketData;
    use crate::market::error::MarketError;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    fn spawn_worker(
        mock: MockMarketData,
        vs_currency: &str,
    ) -> (
        mpsc::Receiver<DashboardMessage>,
        broadcast::Sender<()>,
        JoinHandle<()>,
    ) {
        let market: Arc<dyn MarketData> = Arc::new(mock);
        let (message_sender, message_receiver) = mpsc::channel(MESSAGE_QUEUE_SIZE);
        let (shutdown_sender, _) = broadcast::channel(1);
        let handle = start_snapshot_fetcher(
            market,
            WorkerConfig::new(vs_currency.to_string()),
            MessageSender::new(message_sender),
            shutdown_sender.subscribe(),
        );
        (message_receiver, shutdown_sender, handle)
    }

    async fn recv_message(receiver: &mut mpsc::Receiver<DashboardMessage>) -> DashboardMessage {
        tokio::time::timeout(Duration::from_secs(5), receiver.recv())
            .await
            .expect("timed out waiting for a worker message")
            .expect("message channel closed unexpectedly")
    }

    #[tokio::test]
    // Should announce the attempt before delivering its result.
    async fn test_started_precedes_settled() {
        let mut mock = MockMarketData::new();
        mock.expect_ranked_snapshots().returning(|_| Ok(Vec::new()));

        let (mut message_receiver, _shutdown_sender, handle) = spawn_worker(mock, "usd");

        assert!(matches!(
            recv_message(&mut message_receiver).await,
            DashboardMessage::SnapshotFetchStarted
        ));
        match recv_message(&mut message_receiver).await {
            DashboardMessage::SnapshotFetchSettled(Ok(snapshots)) => {
                assert!(snapshots.is_empty())
            }
            other => panic!("expected a successful settle, got {:?}", other),
        }

        handle.abort();
    }

    #[tokio::test]
    // Should query the configured vs currency with first-page defaults.
    async fn test_query_uses_configured_currency() {
        let mut mock = MockMarketData::new();
        mock.expect_ranked_snapshots()
            .withf(|query| {
                query.vs_currency == "eur"
                    && query.per_page == snapshot_polling::MARKET_PAGE_SIZE
                    && query.page == 1
            })
            .returning(|_| Ok(Vec::new()));

        let (mut message_receiver, _shutdown_sender, handle) = spawn_worker(mock, "eur");

        // An unexpected query panics inside the mock, so a settled success
        // here means the expectation matched.
        recv_message(&mut message_receiver).await;
        assert!(matches!(
            recv_message(&mut message_receiver).await,
            DashboardMessage::SnapshotFetchSettled(Ok(_))
        ));

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    // Should poll on the refresh interval with an immediate first attempt.
    async fn test_polling_cadence() {
        let stamps: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = stamps.clone();
        let mut mock = MockMarketData::new();
        mock.expect_ranked_snapshots().returning(move |_| {
            recorded.lock().unwrap().push(Instant::now());
            Ok(Vec::new())
        });

        let (mut message_receiver, _shutdown_sender, handle) = spawn_worker(mock, "usd");

        // Three attempts, two messages each
        for _ in 0..6 {
            let _ = tokio::time::timeout(Duration::from_secs(300), message_receiver.recv())
                .await
                .expect("worker stopped sending")
                .expect("message channel closed unexpectedly");
        }

        let stamps = stamps.lock().unwrap();
        assert!(stamps.len() >= 3);
        assert_eq!(stamps[1] - stamps[0], snapshot_polling::refresh_interval());
        assert_eq!(stamps[2] - stamps[1], snapshot_polling::refresh_interval());

        handle.abort();
    }

    #[tokio::test]
    // Should deliver fetch failures as settled errors and keep running.
    async fn test_failures_are_reported() {
        let mut mock = MockMarketData::new();
        mock.expect_ranked_snapshots().returning(|_| {
            Err(MarketError::Http {
                status: 503,
                message: "upstream unavailable".to_string(),
            })
        });

        let (mut message_receiver, _shutdown_sender, handle) = spawn_worker(mock, "usd");

        recv_message(&mut message_receiver).await;
        assert!(matches!(
            recv_message(&mut message_receiver).await,
            DashboardMessage::SnapshotFetchSettled(Err(_))
        ));
        assert!(!handle.is_finished());

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    // Should stop polling and close the message channel on shutdown.
    async fn test_shutdown_stops_polling() {
        let mut mock = MockMarketData::new();
        mock.expect_ranked_snapshots().returning(|_| Ok(Vec::new()));

        let (mut message_receiver, shutdown_sender, handle) = spawn_worker(mock, "usd");

        // Let the first attempt complete before signalling shutdown
        recv_message(&mut message_receiver).await;
        recv_message(&mut message_receiver).await;
        shutdown_sender.send(()).expect("worker dropped its receiver");

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker did not shut down")
            .expect("worker panicked");
        assert!(message_receiver.recv().await.is_none());
    }
}
