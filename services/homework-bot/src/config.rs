//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Homework review API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticumConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: String::new(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Telegram bot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: default_telegram_api_base(),
        }
    }
}

/// Poll schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_retry_interval")]
    pub retry_interval_seconds: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_interval_seconds: default_retry_interval(),
        }
    }
}

impl Config {
    /// Fill credentials from the process environment
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Fill credentials from `lookup`; a non-empty value overrides the file
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = [
            (PRACTICUM_TOKEN_VAR, &mut self.practicum.token),
            (TELEGRAM_TOKEN_VAR, &mut self.telegram.bot_token),
            (TELEGRAM_CHAT_ID_VAR, &mut self.telegram.chat_id),
        ];
        for (name, slot) in targets {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => {
                    tracing::debug!("Using {} from environment", name);
                    *slot = value.trim().to_string();
                }
                _ => {}
            }
        }
    }

    /// Startup precondition: all three credentials must be present.
    ///
    /// Every missing credential is logged; the first one is returned.
    pub fn check_credentials(&self) -> Result<(), ConfigError> {
        let credentials = [
            (PRACTICUM_TOKEN_VAR, &self.practicum.token),
            (TELEGRAM_TOKEN_VAR, &self.telegram.bot_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram.chat_id),
        ];
        let missing: Vec<&'static str> = credentials
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        for name in &missing {
            tracing::error!("Missing required environment variable: {}", name);
        }

        match missing.first() {
            Some(&name) => Err(ConfigError::MissingCredential(name)),
            None => Ok(()),
        }
    }

    /// Reject settings the poll loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.polling.retry_interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "retry_interval_seconds must be greater than zero".to_string(),
            ));
        }
        if self.practicum.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.practicum.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.polling.retry_interval_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.practicum.request_timeout_seconds)
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_interval() -> u64 {
    600
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
