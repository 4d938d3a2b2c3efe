//! Dashboard pagination component
//!
//! Renders one numbered button per page, regenerated from the page count on
//! every frame

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render_pagination(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    // No controls until the first snapshot lands
    if state.snapshots().is_empty() {
        return;
    }

    let mut spans: Vec<Span> = vec![Span::styled("Page ", Style::default().fg(Color::Gray))];
    for page in 1..=state.total_pages() {
        let style = if page == state.current_page() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", page), style));
        spans.push(Span::raw(" "));
    }

    if state.current_page() > state.total_pages() {
        spans.push(Span::styled(
            format!("(page {} is out of range)", state.current_page()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(line, area);
}
