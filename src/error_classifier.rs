use crate::market::error::MarketError;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_fetch_error(&self, error: &MarketError) -> LogLevel {
        match error {
            // Non-critical: rate limiting, temporary server issues
            MarketError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            MarketError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: auth, missing assets, malformed responses
            MarketError::Http { status, .. } if *status == 401 => LogLevel::Error,
            MarketError::Http { status, .. } if *status == 403 => LogLevel::Error,
            MarketError::Http { status, .. } if *status == 404 => LogLevel::Error,
            MarketError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: u16) -> MarketError {
        MarketError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn rate_limit_is_quiet() {
        let classifier = ErrorClassifier::new();
        assert_eq!(
            classifier.classify_fetch_error(&http_error(429)),
            LogLevel::Debug
        );
    }

    #[test]
    fn server_errors_warn() {
        let classifier = ErrorClassifier::new();
        assert_eq!(
            classifier.classify_fetch_error(&http_error(500)),
            LogLevel::Warn
        );
        assert_eq!(
            classifier.classify_fetch_error(&http_error(503)),
            LogLevel::Warn
        );
    }

    #[test]
    fn auth_and_missing_asset_errors_are_critical() {
        let classifier = ErrorClassifier::new();
        for status in [401, 403, 404] {
            assert_eq!(
                classifier.classify_fetch_error(&http_error(status)),
                LogLevel::Error
            );
        }
    }
}
