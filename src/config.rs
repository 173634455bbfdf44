use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    /// Zero keeps the server default.
    pub statement_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub debug: bool,
    pub run_migrations: bool,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Config {
            host: parse(&lookup, "HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse(&lookup, "PORT", 3000)?,
            debug: parse(&lookup, "DEBUG", false)?,
            run_migrations: parse(&lookup, "RUN_MIGRATIONS", false)?,
            database: DatabaseConfig {
                url,
                max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 10)?,
                min_connections: parse(&lookup, "DB_MIN_CONNECTIONS", 0)?,
                acquire_timeout: Duration::from_secs(parse(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?),
                idle_timeout: Duration::from_secs(parse(&lookup, "DB_IDLE_TIMEOUT_SECS", 600)?),
                statement_timeout: Duration::from_millis(parse(&lookup, "DB_STATEMENT_TIMEOUT_MS", 0)?),
            },
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/malls")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert!(!config.debug);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.database.statement_timeout, Duration::ZERO);
    }

    #[test]
    fn database_url_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn bad_values_are_reported_not_defaulted() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/malls"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/malls"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DEBUG", "true"),
            ("DB_MAX_CONNECTIONS", "32"),
            ("DB_STATEMENT_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.debug);
        assert_eq!(config.database.max_connections, 32);
        assert_eq!(config.database.statement_timeout, Duration::from_millis(1500));
    }
}
