//! Dashboard header component
//!
//! Renders the title and refresh status gauge

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and refresh status.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title_text = format!(
        "COINWATCH v{} - {} MARKET DASHBOARD",
        version,
        state.vs_currency.to_uppercase()
    );

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Gauge logic: an in-flight fetch takes priority over the idle status
    let (progress_text, gauge_color, progress_percent) = if state.is_loading() {
        // Animated fetch gauge - loops every 20 ticks for smooth animation
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            "REFRESHING - Fetching market snapshot".to_string(),
            Color::LightGreen,
            progress,
        )
    } else {
        match state.last_refresh_timestamp() {
            Some(timestamp) => (
                format!("WATCHING - Last update {}", timestamp),
                Color::LightBlue,
                100,
            ),
            None => ("WAITING - No snapshot yet".to_string(), Color::LightBlue, 100),
        }
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
