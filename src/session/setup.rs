//! Session setup and initialization

use crate::environment::Environment;
use crate::events::DashboardMessage;
use crate::market::MarketClient;
use crate::runtime::start_dashboard_workers;
use crate::workers::history::HistoryCommand;
use std::error::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Message receiver for dashboard messages
    pub message_receiver: mpsc::Receiver<DashboardMessage>,
    /// Command sender for history lookups
    pub history_sender: mpsc::Sender<HistoryCommand>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Environment the session is connected to
    pub environment: Environment,
    /// Quote currency used for every market request
    pub vs_currency: String,
}

/// Sets up a market watch session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Normalizes the quote currency
/// 2. Creates the market data client and shutdown channel
/// 3. Starts the snapshot and history workers
/// 4. Returns session data for mode-specific handling
///
/// # Arguments
/// * `env` - Environment to connect to
/// * `vs_currency` - Quote currency for prices, e.g. "usd"
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - Session setup failed
pub fn setup_session(env: Environment, vs_currency: &str) -> Result<SessionData, Box<dyn Error>> {
    let vs_currency = normalize_currency(vs_currency)?;

    // Create market data client
    let market_client = MarketClient::new(env.clone());

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    // Start the dashboard workers
    let (message_receiver, history_sender, join_handles) = start_dashboard_workers(
        market_client,
        vs_currency.clone(),
        shutdown_sender.subscribe(),
    );

    Ok(SessionData {
        message_receiver,
        history_sender,
        join_handles,
        shutdown_sender,
        environment: env,
        vs_currency,
    })
}

/// Lowercases a currency code and rejects anything that is not a short
/// alphabetic code like "usd" or "eur".
fn normalize_currency(code: &str) -> Result<String, Box<dyn Error>> {
    let code = code.trim().to_lowercase();
    if code.is_empty() || code.len() > 5 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!(
            "Invalid currency code: {:?}. Expected a short alphabetic code like \"usd\".",
            code
        )
        .into());
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_currency(" USD ").unwrap(), "usd");
        assert_eq!(normalize_currency("Gbp").unwrap(), "gbp");
    }

    #[test]
    fn rejects_non_alphabetic_codes() {
        assert!(normalize_currency("").is_err());
        assert!(normalize_currency("us d").is_err());
        assert!(normalize_currency("u$d").is_err());
        assert!(normalize_currency("toolongcode").is_err());
    }
}
