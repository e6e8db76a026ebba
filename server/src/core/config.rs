//! Server configuration
//!
//! Everything comes from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/lavka | Work directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
//! | TELEGRAM_BOT_TOKEN | (unset) | Bot token for notifications |
//! | TELEGRAM_CHANNEL_ID | (unset) | Staff channel chat id |
//!
//! The Telegram pair is optional as a pair: with either half missing the
//! server starts with notifications disabled instead of refusing to boot.

use std::path::PathBuf;

/// Telegram credentials, present only when both halves are configured
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Staff channel chat id (negative for channels/supergroups)
    pub channel_id: i64,
}

impl TelegramConfig {
    /// Read credentials from the environment, `None` if incomplete
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let channel_id = std::env::var("TELEGRAM_CHANNEL_ID")
            .ok()?
            .parse()
            .ok()?;
        if bot_token.trim().is_empty() {
            return None;
        }
        Some(Self {
            bot_token,
            channel_id,
        })
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Environment name: development | staging | production
    pub environment: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Telegram credentials; `None` runs with notifications disabled
    pub telegram: Option<TelegramConfig>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/lavka".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            telegram: TelegramConfig::from_env(),
        }
    }

    /// Database directory under the work dir
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Log directory under the work dir
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
