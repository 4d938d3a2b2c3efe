//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::ui::UIConfig;
use crate::ui::dashboard::DashboardState;
use std::error::Error;
use std::time::Instant;

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Console logging of dashboard activity
/// 2. Ctrl+C shutdown handling
/// 3. Message loop management
///
/// # Arguments
/// * `session` - Session data from setup
///
/// # Returns
/// * `Ok(())` - Headless mode completed successfully
/// * `Err` - Headless mode failed
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    // Print session start message
    print_session_starting("headless", &session.vs_currency);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    // Headless runs the same reducer as the TUI so activity lines carry the
    // usual classification and stale-history handling.
    let ui_config = UIConfig::new(session.vs_currency.clone(), false, false);
    let mut state = DashboardState::new(session.environment.clone(), Instant::now(), ui_config);

    // Message loop: log dashboard activity to console until shutdown
    loop {
        tokio::select! {
            Some(message) = session.message_receiver.recv() => {
                if let Some(event) = state.apply(message) {
                    if event.should_display() {
                        println!("{}", event);
                    }
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    // Wait for workers to finish
    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}
