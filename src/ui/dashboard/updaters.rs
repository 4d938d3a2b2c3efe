//! Dashboard state update logic
//!
//! Contains the message handlers that apply worker completions and user
//! actions to the dashboard state

use super::state::DashboardState;

use crate::error_classifier::LogLevel;
use crate::events::{
    DashboardMessage, Event as WorkerEvent, EventType, HistoricalFetchError, SnapshotFetchError,
};
use crate::market::types::{AssetSnapshot, PricePoint};
use chrono::Local;

impl DashboardState {
    /// Update the dashboard state with a new tick, applying queued messages.
    pub fn update(&mut self) {
        self.tick += 1;

        // Apply all queued messages one by one
        while let Some(message) = self.pending_messages.pop_front() {
            if let Some(event) = self.apply(message) {
                self.add_to_activity_log(event);
            }
        }
    }

    /// Apply a single message. Every state transition goes through here; the
    /// returned event, if any, is the activity log entry for the transition.
    pub fn apply(&mut self, message: DashboardMessage) -> Option<WorkerEvent> {
        match message {
            DashboardMessage::SnapshotFetchStarted => self.handle_snapshot_started(),
            DashboardMessage::SnapshotFetchSettled(result) => self.handle_snapshot_settled(result),
            DashboardMessage::HistoricalFetchSettled { target_id, result } => {
                self.handle_historical_settled(target_id, result)
            }
            DashboardMessage::PageChanged(page) => self.handle_page_changed(page),
            DashboardMessage::AssetSelected(asset_id) => self.handle_asset_selected(asset_id),
        }
    }

    fn handle_snapshot_started(&mut self) -> Option<WorkerEvent> {
        self.set_loading(true);
        Some(WorkerEvent::snapshot_fetcher_with_level(
            "Refreshing market snapshot...".to_string(),
            EventType::Refresh,
            LogLevel::Debug,
        ))
    }

    fn handle_snapshot_settled(
        &mut self,
        result: Result<Vec<AssetSnapshot>, SnapshotFetchError>,
    ) -> Option<WorkerEvent> {
        // Loading clears no matter how the attempt settled.
        self.set_loading(false);

        match result {
            Ok(snapshots) => {
                let count = snapshots.len();
                self.set_snapshots(snapshots);
                self.set_last_refresh_timestamp(Some(Local::now().format("%H:%M:%S").to_string()));

                // The page is kept across refreshes. An out-of-range page is
                // left alone unless the clamp option asks otherwise.
                if self.clamp_out_of_range_page && self.current_page() > self.total_pages() {
                    self.set_current_page(self.total_pages());
                }
                self.clamp_cursor();

                Some(WorkerEvent::snapshot_fetcher_with_level(
                    format!("Refreshed {} assets", count),
                    EventType::Success,
                    LogLevel::Info,
                ))
            }
            Err(error) => {
                let log_level = self.error_classifier.classify_fetch_error(&error.0);
                Some(WorkerEvent::snapshot_fetcher_with_level(
                    error.to_string(),
                    EventType::Error,
                    log_level,
                ))
            }
        }
    }

    fn handle_historical_settled(
        &mut self,
        target_id: String,
        result: Result<Vec<PricePoint>, HistoricalFetchError>,
    ) -> Option<WorkerEvent> {
        // A completion for anything but the latest selection is stale.
        if self.requested_asset_id() != Some(target_id.as_str()) {
            return Some(WorkerEvent::history_fetcher_with_level(
                format!("Discarding stale history for {}", target_id),
                EventType::Waiting,
                LogLevel::Debug,
            ));
        }

        match result {
            Ok(series) => {
                let points = series.len();
                self.set_selection(target_id.clone(), series);
                Some(WorkerEvent::history_fetcher_with_level(
                    format!("Loaded {} price points for {}", points, target_id),
                    EventType::Success,
                    LogLevel::Info,
                ))
            }
            Err(error) => {
                let log_level = self.error_classifier.classify_fetch_error(&error.0);
                Some(WorkerEvent::history_fetcher_with_level(
                    error.to_string(),
                    EventType::Error,
                    log_level,
                ))
            }
        }
    }

    fn handle_page_changed(&mut self, page: usize) -> Option<WorkerEvent> {
        self.set_current_page(page);
        self.reset_cursor();
        None
    }

    fn handle_asset_selected(&mut self, asset_id: String) -> Option<WorkerEvent> {
        self.set_requested_asset_id(Some(asset_id.clone()));
        Some(WorkerEvent::history_fetcher_with_level(
            format!("Fetching 7-day history for {}", asset_id),
            EventType::Refresh,
            LogLevel::Info,
        ))
    }
}
