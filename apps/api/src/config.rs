use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::text_fit::TextMetrics;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_BATCH_CARDS: usize = 200;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file overriding the built-in text-fit tables.
    pub text_metrics_path: Option<PathBuf>,
    pub max_batch_cards: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            text_metrics_path: None,
            max_batch_cards: DEFAULT_MAX_BATCH_CARDS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", DEFAULT_PORT)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            text_metrics_path: std::env::var_os("TEXT_METRICS_PATH").map(PathBuf::from),
            max_batch_cards: parse_env("MAX_BATCH_CARDS", DEFAULT_MAX_BATCH_CARDS)?,
        })
    }

    /// Built-in tables unless `TEXT_METRICS_PATH` points at an override file.
    pub fn load_text_metrics(&self) -> Result<TextMetrics> {
        match &self.text_metrics_path {
            Some(path) => TextMetrics::load(path),
            None => Ok(TextMetrics::default()),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid value, got '{raw}'"))
}
