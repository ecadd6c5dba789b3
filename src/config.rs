use anyhow::{anyhow, Result};
use std::env;

/// Used when `DATABASE_URL` is unset or blank.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/planner.db";
const DEFAULT_HELP_TEXTS_PATH: &str = "help_texts.txt";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    pub help_texts_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = var_or_default("DATABASE_URL", DEFAULT_DATABASE_URL);
        let help_texts_path = var_or_default("HELP_TEXTS_PATH", DEFAULT_HELP_TEXTS_PATH);

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            help_texts_path,
        })
    }
}

/// Blank values count as unset.
fn var_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
