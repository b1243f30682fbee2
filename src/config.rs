use crate::types::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// `["*"]` allows any origin
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Clone, Deserialize)]
pub struct SearchConfig {
    pub exa_api_key: Option<String>,
    pub exa_base_url: String,
    pub timeout_secs: u64,
    /// Restrict results to the trusted biomedical domain list. Off by default:
    /// recall matters more than precision for trial discovery.
    pub restrict_to_trusted_domains: bool,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("exa_api_key", &self.exa_api_key.as_ref().map(|_| "***"))
            .field("exa_base_url", &self.exa_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("restrict_to_trusted_domains", &self.restrict_to_trusted_domains)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    pub log_dir: Option<String>,
}

pub const DEFAULT_LOG_FILTER: &str = "trial_scout=debug,tower_http=debug,axum=debug";

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exa_api_key: None,
            exa_base_url: "https://api.exa.ai".to_string(),
            timeout_secs: 60,
            restrict_to_trusted_domains: false,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: parse_var("PORT", 8080)?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            search: SearchConfig {
                exa_api_key: env::var("EXA_API_KEY")
                    .ok()
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty()),
                exa_base_url: env::var("EXA_BASE_URL")
                    .unwrap_or_else(|_| "https://api.exa.ai".to_string()),
                timeout_secs: parse_var("EXA_TIMEOUT_SECS", 60)?,
                restrict_to_trusted_domains: parse_var("RESTRICT_TO_TRUSTED_DOMAINS", false)?,
            },
            logging: LoggingConfig {
                filter: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
                log_dir: env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            },
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{name}={raw:?}: {e}")))
}
