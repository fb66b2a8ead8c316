use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("environment variable `{0}` must be set")]
    Missing(&'static str),
    #[error("environment variable `{key}` has invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
                let port: u16 = parse_or(&lookup, "POSTGRES_PORT", 5432)?;
                [
                    ("host", required("POSTGRES_HOST")?),
                    ("user", required("POSTGRES_USER")?),
                    ("password", required("POSTGRES_PASSWORD")?),
                    ("dbname", required("POSTGRES_DB")?),
                    ("port", port.to_string()),
                ]
                .iter()
                .map(|(key, value)| format!("{}={}", key, conninfo_value(value)))
                .collect::<Vec<_>>()
                .join(" ")
            }
        };

        Ok(Self {
            database_url,
            pool_size: parse_or(&lookup, "DATABASE_POOL_SIZE", 10)?,
            host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "SERVER_PORT", 8080)?,
        })
    }
}

/// Quotes a libpq conninfo value so spaces, quotes and URL metacharacters are taken literally.
fn conninfo_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if matches!(c, '\'' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
