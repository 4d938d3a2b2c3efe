pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity log.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size for the worker-to-controller message channel.
    pub const MESSAGE_QUEUE_SIZE: usize = 100;

    /// Buffer size for the selection-to-history-worker command channel.
    pub const HISTORY_COMMAND_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // TABLE CONFIGURATION
    // =============================================================================

    /// Number of rows shown per dashboard page.
    pub const TABLE_PAGE_SIZE: usize = 10;

    // =============================================================================
    // MARKET DATA CONFIGURATION
    // =============================================================================

    /// Snapshot polling configuration.
    pub mod snapshot_polling {
        use std::time::Duration;

        /// Number of ranked assets requested per snapshot.
        pub const MARKET_PAGE_SIZE: u32 = 20;

        /// Seconds between snapshot fetch attempts. The period is fixed: a
        /// failed attempt is not retried faster, it simply waits for the
        /// next tick.
        pub const REFRESH_INTERVAL_SECS: u64 = 60;

        /// Helper function to get the refresh period.
        pub const fn refresh_interval() -> Duration {
            Duration::from_secs(REFRESH_INTERVAL_SECS)
        }
    }

    /// Historical series lookup configuration.
    pub mod history_lookup {
        /// Lookback window, in days, for the on-demand price history.
        pub const LOOKBACK_DAYS: u32 = 7;
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client timeouts.
    pub mod http {
        use std::time::Duration;

        /// TCP connect timeout (milliseconds).
        pub const CONNECT_TIMEOUT_MS: u64 = 10_000;

        /// Whole-request timeout (milliseconds). Kept well under the refresh
        /// period so a hung request settles before the next attempt starts.
        pub const REQUEST_TIMEOUT_MS: u64 = 30_000;

        /// Helper function to get the connect timeout.
        pub const fn connect_timeout() -> Duration {
            Duration::from_millis(CONNECT_TIMEOUT_MS)
        }

        /// Helper function to get the request timeout.
        pub const fn request_timeout() -> Duration {
            Duration::from_millis(REQUEST_TIMEOUT_MS)
        }
    }
}
