//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::environment::Environment;
use crate::events::DashboardMessage;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::history::HistoryCommand;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub vs_currency: String,
    pub with_background_color: bool,
    pub clamp_out_of_range_page: bool,
}

impl UIConfig {
    pub fn new(
        vs_currency: String,
        with_background_color: bool,
        clamp_out_of_range_page: bool,
    ) -> Self {
        Self {
            vs_currency,
            with_background_color,
            clamp_out_of_range_page,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying the paginated market table.
    Dashboard(Box<DashboardState>),
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives messages from worker tasks.
    message_receiver: mpsc::Receiver<DashboardMessage>,

    /// Sends history fetch commands to the history worker.
    history_sender: mpsc::Sender<HistoryCommand>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// Configuration handed to the dashboard screen when it is created.
    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        message_receiver: mpsc::Receiver<DashboardMessage>,
        history_sender: mpsc::Sender<HistoryCommand>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            message_receiver,
            history_sender,
            shutdown_sender,
            ui_config,
        }
    }

    /// Builds the dashboard screen, seeding it with any messages that
    /// arrived while the splash was still showing.
    fn open_dashboard(&mut self, held_messages: &mut Vec<DashboardMessage>) {
        let mut state = DashboardState::new(
            self.environment.clone(),
            self.start_time,
            self.ui_config.clone(),
        );
        for message in held_messages.drain(..) {
            state.add_message(message);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // Worker messages that land during the splash are held here so the
    // initial snapshot is not lost before the dashboard exists.
    let mut held_messages: Vec<DashboardMessage> = Vec::new();

    // UI event loop
    loop {
        // Queue all incoming worker messages for processing
        while let Ok(message) = app.message_receiver.try_recv() {
            match &mut app.current_screen {
                Screen::Dashboard(state) => state.add_message(message),
                Screen::Splash => held_messages.push(message),
            }
        }

        // Update the state based on the current screen
        match &mut app.current_screen {
            Screen::Splash => {}
            Screen::Dashboard(state) => {
                state.update();
            }
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.open_dashboard(&mut held_messages);
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                // Handle exit events
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    // Send shutdown signal to workers
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }

                match &mut app.current_screen {
                    Screen::Splash => {
                        // Any key press will skip the splash screen
                        app.open_dashboard(&mut held_messages);
                    }
                    Screen::Dashboard(state) => {
                        handle_dashboard_key(key.code, state, &app.history_sender);
                    }
                }
            }
        }
    }
}

/// Applies a dashboard key press. Left/Right mirror the rendered pagination
/// controls; digit jumps are applied as typed.
fn handle_dashboard_key(
    code: KeyCode,
    state: &mut DashboardState,
    history_sender: &mpsc::Sender<HistoryCommand>,
) {
    match code {
        KeyCode::Left => {
            if state.current_page() > 1 {
                apply_and_log(state, DashboardMessage::PageChanged(state.current_page() - 1));
            }
        }
        KeyCode::Right => {
            if state.current_page() < state.total_pages() {
                apply_and_log(state, DashboardMessage::PageChanged(state.current_page() + 1));
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
            if let Some(page) = c.to_digit(10) {
                apply_and_log(state, DashboardMessage::PageChanged(page as usize));
            }
        }
        KeyCode::Up => state.move_cursor_up(),
        KeyCode::Down => state.move_cursor_down(),
        KeyCode::Enter => {
            // Selection is only reachable through a rendered row
            if let Some(asset) = state.asset_at_cursor() {
                let asset_id = asset.id.clone();
                let _ = history_sender.try_send(HistoryCommand {
                    asset_id: asset_id.clone(),
                });
                apply_and_log(state, DashboardMessage::AssetSelected(asset_id));
            }
        }
        _ => {}
    }
}

fn apply_and_log(state: &mut DashboardState, message: DashboardMessage) {
    if let Some(event) = state.apply(message) {
        state.add_to_activity_log(event);
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
