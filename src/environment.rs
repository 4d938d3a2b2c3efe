use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Which market-data API deployment the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// The public CoinGecko API.
    #[default]
    Production,
    /// A self-hosted proxy or test stub with a CoinGecko-compatible surface.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the API base URL associated with the environment.
    pub fn api_base_url(&self) -> String {
        match self {
            Environment::Production => "https://api.coingecko.com/api/v3".to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            _ if s.starts_with("http://") || s.starts_with("https://") => {
                Ok(Environment::Custom {
                    api_url: s.trim_end_matches('/').to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_and_custom_urls() {
        assert_eq!(
            "production".parse::<Environment>(),
            Ok(Environment::Production)
        );
        assert_eq!(
            "http://localhost:8000/api/v3".parse::<Environment>(),
            Ok(Environment::Custom {
                api_url: "http://localhost:8000/api/v3".to_string()
            })
        );
        // Trailing slashes are stripped so build_url can join cleanly.
        assert_eq!(
            "https://proxy.example/api/v3/".parse::<Environment>(),
            Ok(Environment::Custom {
                api_url: "https://proxy.example/api/v3".to_string()
            })
        );
        assert!("definitely-not-an-environment".parse::<Environment>().is_err());
    }
}
