use secrecy::SecretString;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Gemini REST endpoint used when `GEMINI_API_BASE` is not set.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;

/// Upper bound on the whole `/extract` request body. Larger than the 20 MiB
/// file cap so oversized uploads reach validation and get a proper message.
const DEFAULT_MAX_REQUEST_BYTES: usize = 50 * 1024 * 1024;

/// Browser origins allowed to call the API when `CORS_ALLOWED_ORIGINS` is unset.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://liviamed.ai",
    "https://docdoor-livia-web-hmv-ebg7ekg4epfkf5az.brazilsouth-01.azurewebsites.net",
    "http://localhost:3000",
    "http://localhost:5173",
    "*",
];

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub security: SecurityConfig,
    pub limits: LimitsConfig,
    /// OTLP collector for trace export; local logging only when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// `None` leaves the service running but unable to extract.
    pub api_key: Option<SecretString>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub max_request_bytes: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            gemini: GeminiSettings {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
                timeout: Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
            },
            security: SecurityConfig {
                allowed_origins: DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|o| o.to_string())
                    .collect(),
            },
            limits: LimitsConfig {
                max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            },
            otlp_endpoint: None,
        }
    }
}

impl ExtractionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let defaults = Self::default();

        let allowed_origins = match optional_env("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None => defaults.security.allowed_origins,
        };

        Ok(ExtractionConfig {
            common,
            gemini: GeminiSettings {
                api_key: optional_env("GEMINI_API_KEY").map(SecretString::new),
                model: optional_env("GEMINI_MODEL").unwrap_or(defaults.gemini.model),
                api_base: optional_env("GEMINI_API_BASE")
                    .map(|base| base.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.gemini.api_base),
                timeout: Duration::from_secs(parse_env(
                    "GEMINI_TIMEOUT_SECS",
                    DEFAULT_GEMINI_TIMEOUT_SECS,
                )?),
            },
            security: SecurityConfig { allowed_origins },
            limits: LimitsConfig {
                max_request_bytes: parse_env("MAX_REQUEST_BYTES", DEFAULT_MAX_REQUEST_BYTES)?,
            },
            otlp_endpoint: optional_env("OTLP_ENDPOINT"),
        })
    }

    /// Whether a Gemini credential was provided.
    pub fn gemini_configured(&self) -> bool {
        self.gemini.api_key.is_some()
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a variable, treating an empty or blank value as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}
