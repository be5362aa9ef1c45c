// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "sqlite://db.sqlite?mode=rwc";

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Text,
  Json,
}

impl FromStr for LogFormat {
  type Err = AppError;

  fn from_str(raw: &str) -> Result<Self> {
    match raw.trim().to_ascii_lowercase().as_str() {
      "text" | "pretty" => Ok(LogFormat::Text),
      "json" => Ok(LogFormat::Json),
      other => Err(AppError::Config(format!("Invalid LOG_FORMAT: '{}'", other))),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// A `sqlite:` URL, or `memory` for the process-local store.
  pub database_url: String,
  pub database_max_connections: u32,
  pub seed_db: bool,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: DEFAULT_DATABASE_URL.to_string(),
      database_max_connections: 5,
      seed_db: false,
      log_format: LogFormat::Text,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let defaults = Self::default();
    let get_env = |var_name: &str| env::var(var_name).ok().filter(|value| !value.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_env(get_env("SERVER_PORT"), "SERVER_PORT", defaults.server_port)?;
    let database_url = get_env("DATABASE_URL").unwrap_or(defaults.database_url);
    let database_max_connections = parse_env(
      get_env("DATABASE_MAX_CONNECTIONS"),
      "DATABASE_MAX_CONNECTIONS",
      defaults.database_max_connections,
    )?;
    let seed_db = parse_env(get_env("SEED_DB"), "SEED_DB", defaults.seed_db)?;
    let log_format = match get_env("LOG_FORMAT") {
      Some(raw) => raw.parse()?,
      None => defaults.log_format,
    };

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      seed_db,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }

  pub fn uses_memory_store(&self) -> bool {
    self.database_url.eq_ignore_ascii_case("memory")
  }
}

fn parse_env<T>(raw: Option<String>, var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match raw {
    Some(value) => value
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e))),
    None => Ok(default),
  }
}
