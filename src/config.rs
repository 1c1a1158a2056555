use crate::fs::FileSystemOperator;
use std::{env, path::PathBuf};
use thiserror::Error;

/// Environment variable overriding the vault location.
pub const VAULT_DIR_ENV: &str = "SMCLI_VAULT_DIR";

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SMCLI_LOG";

const DEFAULT_VAULT_DIR_NAME: &str = ".smcli";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the home directory, set SMCLI_VAULT_DIR to choose a vault location")]
    NoHomeDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub vault_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration from the process environment.
    pub fn from_env<F: FileSystemOperator>(fs: &F) -> Result<Self, ConfigError> {
        Self::from_lookup(fs, |key| env::var(key).ok())
    }

    fn from_lookup<F, L>(fs: &F, lookup: L) -> Result<Self, ConfigError>
    where
        F: FileSystemOperator,
        L: Fn(&str) -> Option<String>,
    {
        let vault_dir = match lookup(VAULT_DIR_ENV).filter(|dir| !dir.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => fs
                .home_dir()
                .ok_or(ConfigError::NoHomeDir)?
                .join(DEFAULT_VAULT_DIR_NAME),
        };
        Ok(Self { vault_dir })
    }
}
