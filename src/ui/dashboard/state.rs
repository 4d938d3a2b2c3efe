//! Dashboard state management
//!
//! Contains the main dashboard state struct, pagination helpers, and the
//! cursor used to pick an asset from the visible window

use crate::consts::cli_consts::{MAX_ACTIVITY_LOGS, TABLE_PAGE_SIZE};
use crate::environment::Environment;
use crate::error_classifier::ErrorClassifier;
use crate::events::{DashboardMessage, Event as WorkerEvent};
use crate::market::types::{AssetSnapshot, PricePoint};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// Dashboard state: the single owner of everything the dashboard renders.
///
/// The market-facing fields are private and mutated only through the message
/// handlers in `updaters.rs`; the UI plumbing fields (queues, tick, flags)
/// are public like the rest of the UI layer.
#[derive(Debug)]
pub struct DashboardState {
    /// The environment in which the application is running.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Display currency code for all monetary values.
    pub vs_currency: String,
    /// Queue of messages waiting to be applied.
    pub pending_messages: VecDeque<DashboardMessage>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Pull `current_page` back into range after a successful refresh.
    pub clamp_out_of_range_page: bool,
    /// Animation tick counter
    pub tick: usize,
    /// Classifies fetch errors into log levels.
    pub error_classifier: ErrorClassifier,

    /// Ranked snapshot rows in source order (descending market cap).
    snapshots: Vec<AssetSnapshot>,
    /// True while a snapshot fetch attempt is in flight.
    is_loading: bool,
    /// Current table page, 1-based. May point past the last page.
    current_page: usize,
    /// Cursor row within the visible window, 0-based.
    cursor: usize,
    /// The most recent selection target. History completions are matched
    /// against this tag; mismatches are stale and discarded.
    requested_asset_id: Option<String>,
    /// The asset whose history panel is showing. Set only on fetch success.
    selected_asset_id: Option<String>,
    /// The price series backing the history panel.
    historical_series: Vec<PricePoint>,
    /// Wall-clock time of the last successful snapshot refresh.
    last_refresh_timestamp: Option<String>,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            vs_currency: ui_config.vs_currency,
            pending_messages: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            clamp_out_of_range_page: ui_config.clamp_out_of_range_page,
            tick: 0,
            error_classifier: ErrorClassifier::new(),
            snapshots: Vec::new(),
            is_loading: true,
            current_page: 1,
            cursor: 0,
            requested_asset_id: None,
            selected_asset_id: None,
            historical_series: Vec::new(),
            last_refresh_timestamp: None,
        }
    }

    // Getter methods for private fields
    pub fn snapshots(&self) -> &[AssetSnapshot] {
        &self.snapshots
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn requested_asset_id(&self) -> Option<&str> {
        self.requested_asset_id.as_deref()
    }

    pub fn selected_asset_id(&self) -> Option<&str> {
        self.selected_asset_id.as_deref()
    }

    pub fn historical_series(&self) -> &[PricePoint] {
        &self.historical_series
    }

    pub fn last_refresh_timestamp(&self) -> &Option<String> {
        &self.last_refresh_timestamp
    }

    /// Number of table pages. At least 1, even with no snapshots.
    pub fn total_pages(&self) -> usize {
        self.snapshots.len().div_ceil(TABLE_PAGE_SIZE).max(1)
    }

    /// The slice of snapshots on the current page. Shorter than the page
    /// size on the last page; empty when `current_page` is out of range.
    pub fn visible_window(&self) -> &[AssetSnapshot] {
        let start = self.current_page.saturating_sub(1) * TABLE_PAGE_SIZE;
        if start >= self.snapshots.len() {
            return &[];
        }
        let end = (start + TABLE_PAGE_SIZE).min(self.snapshots.len());
        &self.snapshots[start..end]
    }

    /// Rank of the first row on the current page, 1-based.
    pub fn first_visible_rank(&self) -> usize {
        self.current_page.saturating_sub(1) * TABLE_PAGE_SIZE + 1
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor
    }

    /// The snapshot under the cursor, if the visible window has one.
    pub fn asset_at_cursor(&self) -> Option<&AssetSnapshot> {
        self.visible_window().get(self.cursor)
    }

    // Setter methods for private fields (for updaters)
    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_snapshots(&mut self, snapshots: Vec<AssetSnapshot>) {
        self.snapshots = snapshots;
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn set_requested_asset_id(&mut self, asset_id: Option<String>) {
        self.requested_asset_id = asset_id;
    }

    /// Record an applied history completion: the selection and its series
    /// always change together.
    pub fn set_selection(&mut self, asset_id: String, series: Vec<PricePoint>) {
        self.selected_asset_id = Some(asset_id);
        self.historical_series = series;
    }

    pub fn set_last_refresh_timestamp(&mut self, timestamp: Option<String>) {
        self.last_refresh_timestamp = timestamp;
    }

    // Cursor movement within the visible window
    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let rows = self.visible_window().len();
        if rows > 0 && self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Keep the cursor on a real row after the window changes size.
    pub fn clamp_cursor(&mut self) {
        let rows = self.visible_window().len();
        if self.cursor >= rows {
            self.cursor = rows.saturating_sub(1);
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add a message to the processing queue
    pub fn add_message(&mut self, message: DashboardMessage) {
        self.pending_messages.push_back(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str) -> AssetSnapshot {
        AssetSnapshot {
            id: id.to_string(),
            symbol: id.chars().take(3).collect(),
            name: id.to_string(),
            image_url: format!("https://assets.example/{}.png", id),
            current_price: 1.0,
            market_cap: 1000.0,
            volume_24h: 100.0,
            percent_change_1h: Some(0.1),
            percent_change_24h: Some(-0.2),
            percent_change_7d: None,
            sparkline: None,
        }
    }

    fn snapshots(count: usize) -> Vec<AssetSnapshot> {
        (1..=count).map(|i| snapshot(&format!("asset-{}", i))).collect()
    }

    fn state() -> DashboardState {
        DashboardState::new(
            Environment::Production,
            Instant::now(),
            UIConfig::new("gbp".to_string(), false, false),
        )
    }

    #[test]
    fn total_pages_rounds_up_and_never_drops_below_one() {
        let mut state = state();
        assert_eq!(state.total_pages(), 1);

        for (count, expected) in [(1, 1), (9, 1), (10, 1), (11, 2), (20, 2), (25, 3)] {
            state.set_snapshots(snapshots(count));
            assert_eq!(state.total_pages(), expected, "count = {}", count);
        }
    }

    #[test]
    fn visible_window_covers_each_page_without_overlap() {
        let mut state = state();
        state.set_snapshots(snapshots(25));

        state.set_current_page(1);
        let page_one: Vec<_> = state.visible_window().iter().map(|s| s.id.clone()).collect();
        assert_eq!(page_one.len(), 10);
        assert_eq!(page_one[0], "asset-1");
        assert_eq!(page_one[9], "asset-10");

        state.set_current_page(2);
        assert_eq!(state.visible_window().len(), 10);
        assert_eq!(state.visible_window()[0].id, "asset-11");
        assert_eq!(state.first_visible_rank(), 11);

        // Last page holds the remainder
        state.set_current_page(3);
        assert_eq!(state.visible_window().len(), 5);
        assert_eq!(state.visible_window()[4].id, "asset-25");
    }

    #[test]
    fn out_of_range_page_yields_an_empty_window() {
        let mut state = state();
        state.set_snapshots(snapshots(25));
        state.set_current_page(4);
        assert!(state.visible_window().is_empty());
        assert!(state.asset_at_cursor().is_none());
    }

    #[test]
    fn cursor_stays_inside_the_visible_window() {
        let mut state = state();
        state.set_snapshots(snapshots(25));
        state.set_current_page(3);

        state.move_cursor_up();
        assert_eq!(state.cursor_row(), 0);

        for _ in 0..10 {
            state.move_cursor_down();
        }
        // Page 3 has 5 rows, so the cursor tops out at index 4
        assert_eq!(state.cursor_row(), 4);
        assert_eq!(state.asset_at_cursor().map(|s| s.id.as_str()), Some("asset-25"));
    }

    #[test]
    fn clamp_cursor_follows_a_shrinking_window() {
        let mut state = state();
        state.set_snapshots(snapshots(10));
        for _ in 0..9 {
            state.move_cursor_down();
        }
        assert_eq!(state.cursor_row(), 9);

        state.set_snapshots(snapshots(3));
        state.clamp_cursor();
        assert_eq!(state.cursor_row(), 2);

        state.set_snapshots(Vec::new());
        state.clamp_cursor();
        assert_eq!(state.cursor_row(), 0);
        assert!(state.asset_at_cursor().is_none());
    }

    #[test]
    fn activity_log_is_bounded() {
        use crate::error_classifier::LogLevel;
        use crate::events::EventType;

        let mut state = state();
        for i in 0..(MAX_ACTIVITY_LOGS + 10) {
            state.add_to_activity_log(WorkerEvent::snapshot_fetcher_with_level(
                format!("event {}", i),
                EventType::Refresh,
                LogLevel::Debug,
            ));
        }
        assert_eq!(state.activity_logs.len(), MAX_ACTIVITY_LOGS);
        assert_eq!(state.activity_logs.front().unwrap().msg, "event 10");
    }
}
