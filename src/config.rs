//! Runtime configuration. Everything lives under one data directory in the
//! user's home unless `BOOK_CATALOG_DATA_DIR` points somewhere else.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-catalog-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "catalog.sqlite";
/// Log file written next to the database.
const LOG_FILE_NAME: &str = "catalog.log";

pub const DATA_DIR_ENV: &str = "BOOK_CATALOG_DATA_DIR";
pub const ID_POLICY_ENV: &str = "BOOK_CATALOG_ID_POLICY";
pub const LOG_FILTER_ENV: &str = "BOOK_CATALOG_LOG";

/// How identifiers read from storage are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Keep stored ids as written. New ids still follow the max + 1 rule.
    #[default]
    PreserveStored,
    /// Reassign ids `1..N` by position on every load, each collection on its
    /// own. Book author references are not rewritten.
    RenumberOnLoad,
}

impl FromStr for IdPolicy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(IdPolicy::PreserveStored),
            "renumber" => Ok(IdPolicy::RenumberOnLoad),
            other => Err(anyhow!(
                "unknown id policy \"{other}\" (expected \"preserve\" or \"renumber\")"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub id_policy: IdPolicy,
}

impl Config {
    /// Build the configuration from the environment, falling back to the home
    /// directory layout.
    pub fn from_env() -> Result<Self> {
        let data_dir = match env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };

        let config = Self::for_dir(data_dir);
        match env::var(ID_POLICY_ENV) {
            Ok(raw) => Ok(config.with_id_policy(raw.parse()?)),
            Err(_) => Ok(config),
        }
    }

    /// Root every file under `dir` with the default id policy.
    pub fn for_dir(dir: impl AsRef<Path>) -> Self {
        let data_dir = dir.as_ref().to_path_buf();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            data_dir,
            id_policy: IdPolicy::default(),
        }
    }

    /// Replace the id policy, keeping every path.
    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_are_rooted_in_the_data_dir() {
        let config = Config::for_dir("/tmp/catalog");
        assert_eq!(config.db_path, PathBuf::from("/tmp/catalog/catalog.sqlite"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/catalog/catalog.log"));
        assert_eq!(config.id_policy, IdPolicy::PreserveStored);
    }

    #[test]
    fn id_policy_parses_case_insensitively() {
        assert_eq!("Renumber".parse::<IdPolicy>().unwrap(), IdPolicy::RenumberOnLoad);
        assert_eq!(" preserve ".parse::<IdPolicy>().unwrap(), IdPolicy::PreserveStored);
        assert!("compact".parse::<IdPolicy>().is_err());
    }
}
