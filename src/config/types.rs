use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

pub const PRIMARY_URL: &str = "https://api.space-invaders.com/flashinvaders/flashes/";
pub const PRIMARY_ACCEPT: &str = "application/json, text/plain, */*";
pub const PRIMARY_TIMEOUT_SECS: u64 = 10;

pub const FALLBACK_URL: &str = "https://www.space-invaders.com/flashinvaders/";
pub const FALLBACK_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const FALLBACK_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for every path that is not a relay endpoint
    pub static_dir: PathBuf,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub primary: TargetConfig,
    pub fallback: TargetConfig,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            primary: TargetConfig::primary(),
            fallback: TargetConfig::fallback(),
        }
    }
}

/// One upstream the relay fetches from. Per-field defaults for partially
/// written tables are registered in `load_config`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetConfig {
    pub url: String,
    pub accept: String,
    pub timeout_secs: u64,
}

impl TargetConfig {
    pub fn primary() -> Self {
        Self {
            url: PRIMARY_URL.to_string(),
            accept: PRIMARY_ACCEPT.to_string(),
            timeout_secs: PRIMARY_TIMEOUT_SECS,
        }
    }

    pub fn fallback() -> Self {
        Self {
            url: FALLBACK_URL.to_string(),
            accept: FALLBACK_ACCEPT.to_string(),
            timeout_secs: FALLBACK_TIMEOUT_SECS,
        }
    }
}
