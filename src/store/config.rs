use std::{env, str::FromStr, time::Duration};

use crate::store::error::StoreError;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "memory" => Ok(Self::Memory),
            other => Err(StoreError::Config(format!(
                "unknown STORE_BACKEND '{other}', expected 'mysql' or 'memory'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, StoreError> {
        let backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::MySql,
        };

        let url = env::var("DATABASE_URL").ok();
        if backend == StoreBackend::MySql && url.is_none() {
            return Err(StoreError::Config("DATABASE_URL not set".to_string()));
        }

        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let acquire_timeout = Duration::from_secs(parse_var(
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?);

        Ok(Self {
            backend,
            url,
            max_connections,
            acquire_timeout,
        })
    }

    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, StoreError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| StoreError::Config(format!("{name} is not a valid number: '{value}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("mysql".parse::<StoreBackend>().unwrap(), StoreBackend::MySql);
        assert_eq!("MEMORY".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
