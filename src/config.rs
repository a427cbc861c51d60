use reqwest::Url;
use std::env;
use std::fmt;

pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
/// Upper bound for `TOKEN_TTL_MINUTES` (one year).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
    pub catalog_base_url: Url,
}

/// Reasons the environment could not be turned into a `Config`.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has invalid value {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests don't have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let jwt_secret = required(&lookup, "JWT_SECRET")?;

        let bcrypt_cost = parsed(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let token_ttl_minutes = parsed(&lookup, "TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&token_ttl_minutes) {
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_MINUTES",
                value: token_ttl_minutes.to_string(),
            });
        }

        let catalog_base_url = match lookup("CATALOG_BASE_URL") {
            Some(raw) => match Url::parse(&raw) {
                Ok(url) if !url.cannot_be_a_base() => url,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "CATALOG_BASE_URL",
                        value: raw,
                    })
                }
            },
            None => Url::parse(DEFAULT_CATALOG_BASE_URL).map_err(|_| ConfigError::Invalid {
                key: "CATALOG_BASE_URL",
                value: DEFAULT_CATALOG_BASE_URL.to_string(),
            })?,
        };

        Ok(Self {
            database_url,
            database_max_connections: parsed(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            server_port: parsed(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            jwt_secret,
            token_ttl_minutes,
            bcrypt_cost,
            catalog_base_url,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
