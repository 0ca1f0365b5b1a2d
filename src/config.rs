use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::error::{config_error, Error};

pub const DEFAULT_GOOGLE_MAPS_API_BASE: &str = "https://maps.googleapis.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub google_maps: GoogleMapsConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct GoogleMapsConfig {
    pub api_base: String,
    pub api_key: Option<String>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            server: ServerConfig {
                host: parse_or(&var, "HOST", IpAddr::from([127, 0, 0, 1]))?,
                port: parse_or(&var, "PORT", 3000)?,
            },
            database: DatabaseConfig {
                host: var("PGHOST").unwrap_or_else(|| "localhost".into()),
                port: parse_or(&var, "PGPORT", 5432)?,
                database: var("PGDATABASE"),
                user: var("PGUSER"),
                password: var("PGPASSWORD"),
                max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", 5)?,
            },
            google_maps: GoogleMapsConfig {
                api_base: var("GOOGLE_MAPS_API_BASE")
                    .map(|base| base.trim_end_matches('/').to_owned())
                    .unwrap_or_else(|| DEFAULT_GOOGLE_MAPS_API_BASE.into()),
                api_key: var("GOOGLE_MAPS_API_KEY"),
            },
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| config_error(format!("{} has an invalid value: {:?}", key, raw))),
    }
}
