//! Dashboard asset table component
//!
//! Renders the visible window of the ranked snapshot with inline sparklines

use super::super::state::DashboardState;
use super::super::utils::{format_money, format_percent, percent_color, sparkline_glyphs};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState,
};

/// Glyph count for the inline 7-day sparkline cell.
const SPARKLINE_CELL_WIDTH: usize = 14;

/// Render the asset table, or the loading placeholder if no snapshot has
/// ever arrived.
pub fn render_asset_table(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let table_block = Block::default()
        .title("MARKETS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if state.snapshots().is_empty() {
        render_placeholder(f, area, state, table_block);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from("1h %"),
        Cell::from("24h %"),
        Cell::from("7d %"),
        Cell::from("Price"),
        Cell::from("Market Cap"),
        Cell::from("Volume 24h"),
        Cell::from("7d Graph"),
    ])
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let first_rank = state.first_visible_rank();
    let rows: Vec<Row> = state
        .visible_window()
        .iter()
        .enumerate()
        .map(|(index, asset)| {
            let spark_cell = match &asset.sparkline {
                Some(series) => Cell::from(sparkline_glyphs(&series.price, SPARKLINE_CELL_WIDTH))
                    .style(Style::default().fg(percent_color(asset.percent_change_7d))),
                None => Cell::from("no data").style(Style::default().fg(Color::DarkGray)),
            };

            Row::new(vec![
                Cell::from(format!("{}", first_rank + index))
                    .style(Style::default().fg(Color::Gray)),
                Cell::from(format!("{} ({})", asset.name, asset.symbol.to_uppercase())),
                Cell::from(format_percent(asset.percent_change_1h))
                    .style(Style::default().fg(percent_color(asset.percent_change_1h))),
                Cell::from(format_percent(asset.percent_change_24h))
                    .style(Style::default().fg(percent_color(asset.percent_change_24h))),
                Cell::from(format_percent(asset.percent_change_7d))
                    .style(Style::default().fg(percent_color(asset.percent_change_7d))),
                Cell::from(format_money(asset.current_price, &state.vs_currency)),
                Cell::from(format_money(asset.market_cap, &state.vs_currency)),
                Cell::from(format_money(asset.volume_24h, &state.vs_currency)),
                spark_cell,
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(20),
        Constraint::Length(18),
        Constraint::Length(SPARKLINE_CELL_WIDTH as u16 + 2),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(table_block)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 48, 56))
                .add_modifier(Modifier::BOLD),
        );

    let mut table_state = TableState::default();
    table_state.select(Some(state.cursor_row()));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn render_placeholder(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &DashboardState,
    block: Block,
) {
    let text = if state.is_loading() {
        "Loading market data..."
    } else {
        "No market data yet - waiting for the next refresh"
    };

    let placeholder = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);

    f.render_widget(placeholder, area);
}
