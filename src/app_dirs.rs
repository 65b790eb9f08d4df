//! Resolve configuration, cache, and data directories for `itemsel`.
//!
//! The helpers in this module respect environment overrides while falling back
//! to platform-appropriate locations provided by the `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "itemsel";
const APPLICATION: &str = "itemsel";

const CONFIG_DIR_ENV: &str = "ITEMSEL_CONFIG_DIR";
const DATA_DIR_ENV: &str = "ITEMSEL_DATA_DIR";
const CACHE_DIR_ENV: &str = "ITEMSEL_CACHE_DIR";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("unable to determine project directories for itemsel"))
}

/// An empty override is treated the same as an unset one.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Directory holding the default item database.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Directory for the log file and other disposable state.
pub fn get_cache_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(CACHE_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.cache_dir().to_path_buf())
}
