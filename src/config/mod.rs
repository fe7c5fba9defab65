use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Messages API settings
    pub anthropic: AnthropicConfig,
    /// Tutor behaviour
    pub tutor: TutorConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// HTTP request settings
    pub request: RequestConfig,
}

/// Anthropic Messages API configuration
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// `ANTHROPIC_API_KEY`, sent as `x-api-key`
    pub api_key: String,
    /// Endpoint root, without `/v1/messages`
    pub base_url: String,
    /// `anthropic-version` header value
    pub api_version: String,
    /// Model identifier
    pub model: String,
    /// Cap on generated tokens
    pub max_tokens: u32,
}

/// Tutor behaviour configuration
#[derive(Debug, Clone, Default)]
pub struct TutorConfig {
    /// Prefix normal questions with the standing exam-ready instruction.
    pub exam_ready_prefix: bool,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default tracing filter
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Human-readable
    Pretty,
    /// One JSON object per line
    Json,
}

/// HTTP request configuration
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout_ms: Option<u64>,
}

/// Default endpoint root
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
/// Default `anthropic-version` header
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
/// Default model
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
/// Default token cap
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| AppError::Config {
            message: "ANTHROPIC_API_KEY is required".to_string(),
        })?;
        if api_key.trim().is_empty() {
            return Err(AppError::Config {
                message: "ANTHROPIC_API_KEY cannot be empty".to_string(),
            });
        }

        let anthropic = AnthropicConfig {
            api_key,
            base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_version: env::var("ANTHROPIC_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            model: env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens: parse_var("ANTHROPIC_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        let tutor = TutorConfig {
            exam_ready_prefix: matches!(
                env::var("TUTOR_EXAM_READY")
                    .unwrap_or_default()
                    .to_lowercase()
                    .as_str(),
                "1" | "true" | "yes" | "on"
            ),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: parse_var("REQUEST_TIMEOUT_MS")?,
        };

        Ok(Config {
            anthropic,
            tutor,
            logging,
            request,
        })
    }
}

/// Parse an optional numeric variable. Unset or blank yields `None`;
/// a value that does not parse is a configuration error.
fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|_| AppError::Config {
                    message: format!("{} must be a number, got '{}'", name, raw),
                })
        }
        _ => Ok(None),
    }
}

impl AnthropicConfig {
    /// Configuration with defaults for everything but the key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the endpoint root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
