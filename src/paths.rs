//! Path helpers for catalog configuration and data directories
//!
//! This module centralizes all path resolution for:
//! - Catalog home directory (~/.app-catalog)
//! - Config and managed-apps files
//! - Cache directory

use std::path::PathBuf;

pub const MANAGED_APPS_FILE: &str = "managed-apps.json";
pub const CONFIG_FILE: &str = "config.json";

// ============================================================================
// HOME DIRECTORY
// ============================================================================

/// Resolve the user's home directory across platforms.
pub fn get_home_dir() -> Result<PathBuf, String> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    if let Ok(profile) = std::env::var("USERPROFILE") {
        if !profile.is_empty() {
            return Ok(PathBuf::from(profile));
        }
    }

    if let (Ok(drive), Ok(path)) = (std::env::var("HOMEDRIVE"), std::env::var("HOMEPATH")) {
        if !drive.is_empty() && !path.is_empty() {
            return Ok(PathBuf::from(format!("{}{}", drive, path)));
        }
    }

    Err("Could not determine home directory".to_string())
}

// ============================================================================
// CATALOG ROOT
// ============================================================================

/// Get the catalog home directory (~/.app-catalog, or $APP_CATALOG_HOME)
pub fn get_catalog_root() -> Result<PathBuf, String> {
    if let Ok(override_home) = std::env::var("APP_CATALOG_HOME") {
        if !override_home.is_empty() {
            return Ok(PathBuf::from(override_home));
        }
    }

    let home = get_home_dir()?;
    Ok(home.join(".app-catalog"))
}

/// Get the config.json path
pub fn get_config_file_path() -> Result<PathBuf, String> {
    Ok(get_catalog_root()?.join(CONFIG_FILE))
}

/// Get the managed-apps.json path
pub fn get_managed_apps_path() -> Result<PathBuf, String> {
    Ok(get_catalog_root()?.join(MANAGED_APPS_FILE))
}

/// Get the cache directory (~/.app-catalog/cache)
pub fn get_cache_dir() -> Result<PathBuf, String> {
    Ok(get_catalog_root()?.join("cache"))
}

// ============================================================================
// TESTS
// ============================================================================
