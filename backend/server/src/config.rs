use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Redis,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend {other:?}, expected redis or memory")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub redis_url: String,
    pub debug: bool,
    pub livereload_interval: Duration,
    pub livereload_root: PathBuf,
    pub livereload_watch: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            storage: StorageBackend::Redis,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            debug: false,
            livereload_interval: Duration::from_millis(1500),
            livereload_root: PathBuf::from("."),
            livereload_watch: watch_list("static,templates"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let interval: f64 = try_load("LIVERELOAD_POLL_INTERVAL", "1.5")?;
        let livereload_interval =
            Duration::try_from_secs_f64(interval).map_err(|e| ConfigError::Invalid {
                key: "LIVERELOAD_POLL_INTERVAL",
                value: interval.to_string(),
                reason: e.to_string(),
            })?;
        let watch: String = try_load("LIVERELOAD_WATCH", "static,templates")?;

        Ok(Self {
            host: try_load("BIND_HOST", "0.0.0.0")?,
            port: try_load("BIND_PORT", "5000")?,
            storage: try_load("STORAGE", "redis")?,
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379")?,
            debug: env::var_os("DEBUG").is_some(),
            livereload_interval,
            livereload_root: try_load("LIVERELOAD_ROOT", ".")?,
            livereload_watch: watch_list(&watch),
        })
    }
}

fn watch_list(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");

        ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend() {
        assert_eq!("redis".parse::<StorageBackend>(), Ok(StorageBackend::Redis));
        assert_eq!(" Memory ".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_watch_list() {
        assert_eq!(
            watch_list("static, templates,,app.rs"),
            [
                PathBuf::from("static"),
                PathBuf::from("templates"),
                PathBuf::from("app.rs")
            ]
        );
        assert!(watch_list("").is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.port, 5000);
        assert_eq!(config.storage, StorageBackend::Redis);
        assert_eq!(config.livereload_interval, Duration::from_millis(1500));
        assert!(!config.debug);
    }
}
