// ⚙️ Configuration - environment-driven settings for the CLI and server

use crate::hashing::{DEFAULT_BCRYPT_COST, DEFAULT_MOCK_PASSWORD};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_DB_PATH: &str = "MOCKS_DB_PATH";
pub const ENV_BIND_ADDR: &str = "MOCKS_BIND_ADDR";
pub const ENV_PASSWORD: &str = "MOCKS_PASSWORD";
pub const ENV_BCRYPT_COST: &str = "MOCKS_BCRYPT_COST";
pub const ENV_PREVIEW_PETS: &str = "MOCKS_PREVIEW_PETS";
pub const ENV_PREVIEW_USERS: &str = "MOCKS_PREVIEW_USERS";
pub const ENV_MAX_BATCH: &str = "MOCKS_MAX_BATCH";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Server listen address
    pub bind_addr: String,

    /// Plaintext shared by every generated account
    pub mock_password: String,

    pub bcrypt_cost: u32,

    /// Default count for the preview-pets endpoint
    pub preview_pets: usize,

    /// Fixed count for the preview-users endpoint
    pub preview_users: usize,

    /// Largest count one HTTP request may ask for, per entity kind
    pub max_batch: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from("mocks.db"),
            bind_addr: "0.0.0.0:8080".to_string(),
            mock_password: DEFAULT_MOCK_PASSWORD.to_string(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            preview_pets: 50,
            preview_users: 50,
            max_batch: 10_000,
        }
    }
}

impl Config {
    /// Read settings from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the real env)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            db_path: lookup(ENV_DB_PATH).map(PathBuf::from).unwrap_or(defaults.db_path),
            bind_addr: lookup(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr),
            mock_password: lookup(ENV_PASSWORD).unwrap_or(defaults.mock_password),
            bcrypt_cost: parse_or(&lookup, ENV_BCRYPT_COST, defaults.bcrypt_cost)?,
            preview_pets: parse_or(&lookup, ENV_PREVIEW_PETS, defaults.preview_pets)?,
            preview_users: parse_or(&lookup, ENV_PREVIEW_USERS, defaults.preview_users)?,
            max_batch: parse_or(&lookup, ENV_MAX_BATCH, defaults.max_batch)?,
        })
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
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
