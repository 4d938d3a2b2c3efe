//! Dashboard history panel component
//!
//! Renders the 7-day price history for the selected asset

use super::super::state::DashboardState;
use super::super::utils::format_money;
use crate::consts::cli_consts::history_lookup::LOOKBACK_DAYS;
use crate::market::types::PricePoint;

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Sparkline};

pub fn render_history_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title(panel_title(state))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let series = state.historical_series();
    if state.selected_asset_id().is_none() || series.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select an asset (Up/Down, then Enter) to load its price history",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let panel_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(inner);

    f.render_widget(summary_line(state, series), panel_chunks[0]);

    let chart_data = downsample_prices(series, panel_chunks[1].width as usize);
    let chart = Sparkline::default()
        .data(&chart_data)
        .max(100)
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(chart, panel_chunks[1]);
}

/// Panel title with the selected asset's display name, falling back to its
/// id once the asset has dropped out of the ranked snapshot.
fn panel_title(state: &DashboardState) -> String {
    match state.selected_asset_id() {
        Some(asset_id) => {
            let name = state
                .snapshots()
                .iter()
                .find(|snapshot| snapshot.id == asset_id)
                .map(|snapshot| snapshot.name.clone())
                .unwrap_or_else(|| asset_id.to_string());
            format!("{}-DAY HISTORY - {}", LOOKBACK_DAYS, name.to_uppercase())
        }
        None => format!("{}-DAY HISTORY", LOOKBACK_DAYS),
    }
}

fn summary_line<'a>(state: &DashboardState, series: &[PricePoint]) -> Paragraph<'a> {
    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;
    for point in series {
        low = low.min(point.price);
        high = high.max(point.price);
    }
    let latest = series.last().map(|point| point.price).unwrap_or(0.0);

    let mut spans = vec![
        Span::styled(
            format!("Low {}", format_money(low, &state.vs_currency)),
            Style::default().fg(Color::Red),
        ),
        Span::raw("  "),
        Span::styled(
            format!("High {}", format_money(high, &state.vs_currency)),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Last {}", format_money(latest, &state.vs_currency)),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(
                "{} -> {}",
                format_point_time(first),
                format_point_time(last)
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn format_point_time(point: &PricePoint) -> String {
    DateTime::from_timestamp_millis(point.timestamp_ms)
        .map(|utc| utc.with_timezone(&Local).format("%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Bucket-average the series into one value per terminal column, scaled to
/// 0..=100 for the sparkline widget.
fn downsample_prices(series: &[PricePoint], width: usize) -> Vec<u64> {
    if series.is_empty() || width == 0 {
        return Vec::new();
    }

    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;
    for point in series {
        low = low.min(point.price);
        high = high.max(point.price);
    }
    let span = high - low;

    let cells = width.min(series.len());
    let bucket = series.len() as f64 / cells as f64;

    (0..cells)
        .map(|i| {
            let start = (i as f64 * bucket) as usize;
            let end = (((i + 1) as f64 * bucket) as usize).clamp(start + 1, series.len());
            let slice = &series[start..end];
            let avg = slice.iter().map(|point| point.price).sum::<f64>() / slice.len() as f64;
            if span <= f64::EPSILON {
                50
            } else {
                ((avg - low) / span * 100.0).round() as u64
            }
        })
        .collect()
}
