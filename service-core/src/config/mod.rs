use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Settings shared by every service: where to listen and how verbose to be.
///
/// Sources, lowest precedence first: bare `PORT` / `DEBUG` variables (as set
/// by most PaaS hosts), an optional `configuration` file, then `APP__*`.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub debug: bool,
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            debug: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .set_default("port", env_default("PORT").unwrap_or_else(|| "8080".to_string()))?
            .set_default("debug", env_default("DEBUG").is_some_and(|v| is_truthy(&v)))?
            .add_source(File::with_name("configuration").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Log level implied by the debug flag.
    pub fn log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

fn env_default(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// `true`, `1`, `yes` and `on` (any case) enable a flag.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_8080_without_debug() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn truthy_values() {
        for value in ["true", "TRUE", " 1 ", "yes", "On"] {
            assert!(is_truthy(value), "{value} should enable the flag");
        }
        for value in ["false", "0", "", "debug", "express:*"] {
            assert!(!is_truthy(value), "{value} should not enable the flag");
        }
    }

    #[test]
    fn debug_flag_raises_log_level() {
        let config = Config {
            port: 0,
            debug: true,
        };
        assert_eq!(config.log_level(), "debug");
    }
}
