//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::SnapshotFetcher => Color::Cyan,
        Worker::HistoryFetcher => Color::Yellow,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some(date_part) = timestamp.split(' ').next() {
        if let Some(time_part) = timestamp.split(' ').nth(1) {
            // Extract MM-DD from date and HH:MM from time
            if let Some(month_day) = date_part.get(5..10) {
                if let Some(hour_min) = time_part.get(0..5) {
                    return format!("{} {}", month_day, hour_min);
                }
            }
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("reqwest::Error") && msg.contains("ConnectTimeout") {
        return "Connection timeout - waiting for next refresh".to_string();
    }
    if msg.contains("reqwest::Error") && msg.contains("TimedOut") {
        return "Request timed out - waiting for next refresh".to_string();
    }
    if msg.contains("reqwest::Error") {
        return "Network error - waiting for next refresh".to_string();
    }
    // Return original message if no HTTP error pattern detected
    msg.to_string()
}

/// Currency symbol for a lowercase ISO code, falling back to the code itself.
pub fn currency_symbol(vs_currency: &str) -> String {
    match vs_currency.to_lowercase().as_str() {
        "gbp" => "£".to_string(),
        "usd" => "$".to_string(),
        "eur" => "€".to_string(),
        "jpy" => "¥".to_string(),
        other => format!("{} ", other.to_uppercase()),
    }
}

/// Format a monetary amount with a currency symbol. Large amounts are
/// grouped by thousands; sub-unit prices keep six decimals so small-cap
/// assets do not collapse to zero.
pub fn format_money(amount: f64, vs_currency: &str) -> String {
    let symbol = currency_symbol(vs_currency);
    if amount.abs() >= 1.0 {
        format!("{}{}", symbol, group_thousands(amount))
    } else {
        format!("{}{:.6}", symbol, amount)
    }
}

fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (whole, frac) = match formatted.split_once('.') {
        Some(parts) => parts,
        None => (formatted.as_str(), "00"),
    };
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}.{}", sign, grouped, frac)
}

/// Format an optional percentage cell. Absent is `N/A`, not zero.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "N/A".to_string(),
    }
}

/// Color a percentage cell by sign.
pub fn percent_color(value: Option<f64>) -> Color {
    match value {
        Some(v) if v > 0.0 => Color::Green,
        Some(v) if v < 0.0 => Color::Red,
        Some(_) => Color::Gray,
        None => Color::DarkGray,
    }
}

const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Downsample a price series into a fixed-width run of block glyphs for a
/// table cell. Values are bucketed by position and scaled to the series'
/// own min/max.
pub fn sparkline_glyphs(series: &[f64], width: usize) -> String {
    if series.is_empty() || width == 0 {
        return String::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in series {
        min = min.min(value);
        max = max.max(value);
    }
    let span = max - min;

    let cells = width.min(series.len());
    let bucket = series.len() as f64 / cells as f64;

    (0..cells)
        .map(|i| {
            let start = (i as f64 * bucket) as usize;
            let end = (((i + 1) as f64 * bucket) as usize)
                .clamp(start + 1, series.len());
            let slice = &series[start..end];
            let avg = slice.iter().sum::<f64>() / slice.len() as f64;
            let norm = if span <= f64::EPSILON {
                0.5
            } else {
                (avg - min) / span
            };
            let idx = ((norm * (SPARK_GLYPHS.len() - 1) as f64).round() as usize)
                .min(SPARK_GLYPHS.len() - 1);
            SPARK_GLYPHS[idx]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(23283.12, "gbp"), "£23,283.12");
        assert_eq!(format_money(456_000_000_000.0, "usd"), "$456,000,000,000.00");
        assert_eq!(format_money(1.5, "eur"), "€1.50");
    }

    #[test]
    fn money_keeps_precision_below_one_unit() {
        assert_eq!(format_money(0.004317, "gbp"), "£0.004317");
    }

    #[test]
    fn unknown_currency_falls_back_to_the_code() {
        assert_eq!(format_money(10.0, "chf"), "CHF 10.00");
    }

    #[test]
    fn absent_percent_is_not_zero() {
        assert_eq!(format_percent(None), "N/A");
        assert_eq!(format_percent(Some(0.0)), "0.00%");
        assert_eq!(format_percent(Some(-1.5)), "-1.50%");
    }

    #[test]
    fn sparkline_is_fixed_width_and_spans_the_range() {
        let series: Vec<f64> = (0..168).map(|i| i as f64).collect();
        let glyphs = sparkline_glyphs(&series, 12);
        assert_eq!(glyphs.chars().count(), 12);
        assert!(glyphs.starts_with('▁'));
        assert!(glyphs.ends_with('█'));
    }

    #[test]
    fn flat_and_short_series_still_render() {
        assert_eq!(sparkline_glyphs(&[], 12), "");
        assert_eq!(sparkline_glyphs(&[5.0, 5.0, 5.0], 12).chars().count(), 3);
    }
}
