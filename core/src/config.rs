use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::repository::DEFAULT_STORE_KEY;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PRESENCIA_HOME";

const DEFAULT_DIR_NAME: &str = ".presencia60";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub store_key: String,
}

impl Config {
    /// Resolves the data directory: explicit path, then `PRESENCIA_HOME`,
    /// then `~/.presencia60`.
    pub fn resolve(explicit_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match explicit_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self {
            data_dir,
            store_key: DEFAULT_STORE_KEY.to_string(),
        })
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home_dir = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}
