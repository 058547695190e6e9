use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Secrets required before polling may start.
///
/// Values are kept as given; emptiness is checked by [`Credentials::ensure_present`]
/// so the caller decides when a missing credential becomes fatal.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Credentials {
    /// Names of the required variables that are unset or blank, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }

    /// Fails with the first missing credential.
    pub fn ensure_present(&self) -> Result<(), ConfigError> {
        match self.missing().first() {
            Some(name) => Err(ConfigError::MissingCredential(*name)),
            None => Ok(()),
        }
    }

    pub fn practicum_token(&self) -> &str {
        self.practicum_token.as_deref().unwrap_or_default()
    }

    pub fn telegram_token(&self) -> &str {
        self.telegram_token.as_deref().unwrap_or_default()
    }

    pub fn telegram_chat_id(&self) -> &str {
        self.telegram_chat_id.as_deref().unwrap_or_default()
    }
}

// Tokens never go to the log.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |value: &Option<String>| if value.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("practicum_token", &mask(&self.practicum_token))
            .field("telegram_token", &mask(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,

    /// Homework status endpoint
    pub practicum_endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Pause between poll cycles in seconds (default: 600)
    pub retry_period_secs: u64,

    /// How far before startup the `from_date` window begins, in seconds (default: 30 days)
    pub lookback_secs: u64,

    /// Request timeout for outbound HTTP calls in seconds (default: 30)
    pub http_timeout_secs: u64,

    /// Append log lines to this file instead of stderr
    pub log_file: Option<PathBuf>,

    /// Emit JSON log lines
    pub log_json: bool,
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first if present.
    ///
    /// Missing credentials are not an error here; see [`Credentials::ensure_present`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_json = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => false,
            Some("json") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    reason: format!("expected 'text' or 'json', got '{other}'"),
                });
            }
        };

        Ok(Self {
            credentials: Credentials {
                practicum_token: lookup("PRACTICUM_TOKEN"),
                telegram_token: lookup("TELEGRAM_TOKEN"),
                telegram_chat_id: lookup("TELEGRAM_CHAT_ID"),
            },
            practicum_endpoint: lookup("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period_secs: non_zero(
                "RETRY_PERIOD_SECS",
                parse_or(&lookup, "RETRY_PERIOD_SECS", 600)?,
            )?,
            lookback_secs: parse_or(&lookup, "LOOKBACK_SECS", 30 * 24 * 60 * 60)?,
            http_timeout_secs: non_zero(
                "HTTP_TIMEOUT_SECS",
                parse_or(&lookup, "HTTP_TIMEOUT_SECS", 30)?,
            )?,
            log_file: lookup("LOG_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_json,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn non_zero(name: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}
