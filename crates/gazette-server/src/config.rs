use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use gazette_db::DbOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub db_readers: usize,
    pub busy_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("GAZETTE_DB_PATH").unwrap_or_else(|| "gazette.db".into());
        let host = lookup("GAZETTE_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "GAZETTE_PORT", 3000)?;
        let db_readers = parse_or(&lookup, "GAZETTE_DB_READERS", 4)?;
        let busy_timeout_ms = parse_or(&lookup, "GAZETTE_BUSY_TIMEOUT_MS", 5000u64)?;

        Ok(Self {
            db_path: PathBuf::from(db_path),
            host,
            port,
            db_readers,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn db_options(&self) -> DbOptions {
        DbOptions {
            readers: self.db_readers,
            busy_timeout: self.busy_timeout,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        None => Ok(default),
    }
}
