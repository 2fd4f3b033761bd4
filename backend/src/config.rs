use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, str::FromStr, time::Duration};

use crate::game::grid::{DEFAULT_GRID_SIZE, DEFAULT_MAX_ATTEMPTS};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub grid_size: usize,
    pub max_attempts: u32,
    pub round_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Without a key the server only serves the built-in word list
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
        };

        let game = GameConfig {
            grid_size: parse_or(&lookup, "GRID_SIZE", DEFAULT_GRID_SIZE)?,
            max_attempts: parse_or(&lookup, "PLACEMENT_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            round_ttl_secs: parse_or(&lookup, "ROUND_TTL_SECS", 1800)?,
        };

        let content = ContentConfig {
            api_key: lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| "gemini-3-flash-preview".to_string()),
            base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string()),
            timeout_secs: parse_or(&lookup, "CONTENT_TIMEOUT_SECS", 30)?,
        };

        Ok(Config {
            server,
            game,
            content,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn round_ttl(&self) -> Duration {
        Duration::from_secs(self.game.round_ttl_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, value)),
        None => Ok(default),
    }
}
