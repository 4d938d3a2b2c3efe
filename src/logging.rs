use crate::error_classifier::LogLevel;
use std::env;

/// Reads the activity log threshold from `RUST_LOG`, defaulting to `info`.
pub fn get_rust_log_level() -> LogLevel {
    match env::var("RUST_LOG") {
        Ok(value) => parse_rust_log_level(&value),
        Err(_) => LogLevel::Info,
    }
}

/// Parses a `RUST_LOG`-style directive list down to a single threshold.
///
/// Only the first directive is considered; a `module=level` pair yields its
/// level part. Unrecognized levels fall back to `info`.
pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    let first = rust_log.split(',').next().unwrap_or(rust_log);
    let level = first
        .rsplit('=')
        .next()
        .unwrap_or(first)
        .trim()
        .to_lowercase();

    match level.as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, get_rust_log_level())
}
