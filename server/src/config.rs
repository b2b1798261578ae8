//! Server configuration read from the environment.
//!
//! | Variable     | Default     | Meaning                                  |
//! |--------------|-------------|------------------------------------------|
//! | `HOST`       | `127.0.0.1` | Address to bind                          |
//! | `PORT`       | `3000`      | Port to bind                             |
//! | `TODOS_SEED` | `false`     | Start with the three classroom todos     |
//!
//! A `.env` file in the working directory is loaded first when present.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            seed: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset and blank values fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(value) = get("HOST") {
            config.host = value.parse().map_err(|_| ConfigError::Invalid {
                var: "HOST",
                value,
                expected: "IP address",
            })?;
        }
        if let Some(value) = get("PORT") {
            config.port = value.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value,
                expected: "port number",
            })?;
        }
        if let Some(value) = get("TODOS_SEED") {
            config.seed = parse_flag(&value).ok_or(ConfigError::Invalid {
                var: "TODOS_SEED",
                value,
                expected: "boolean",
            })?;
        }
        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
