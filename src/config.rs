//! Catalog configuration
//!
//! Reads and writes ~/.app-catalog/config.json. Missing or malformed files
//! fall back to defaults.

use crate::files::write_json_atomic;
use crate::paths::get_config_file_path;
use crate::types::CatalogConfig;
use log::warn;
use std::path::Path;

/// Load config from ~/.app-catalog/config.json
pub fn load_config() -> CatalogConfig {
    match get_config_file_path() {
        Ok(path) => load_config_from(&path),
        Err(e) => {
            warn!("Failed to resolve config path, using defaults: {}", e);
            CatalogConfig::default()
        }
    }
}

pub fn load_config_from(path: &Path) -> CatalogConfig {
    if !path.exists() {
        return CatalogConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring malformed config {:?}: {}", path, e);
            CatalogConfig::default()
        }),
        Err(_) => CatalogConfig::default(),
    }
}

/// Save config to ~/.app-catalog/config.json
pub fn save_config(config: &CatalogConfig) -> Result<(), String> {
    save_config_to(&get_config_file_path()?, config)
}

pub fn save_config_to(path: &Path, config: &CatalogConfig) -> Result<(), String> {
    write_json_atomic(path, config, "config")
}

/// Get the current config (desktop command)
#[cfg(feature = "desktop")]
#[tauri::command]
pub fn get_catalog_config() -> CatalogConfig {
    load_config()
}

/// Replace the config (desktop command)
#[cfg(feature = "desktop")]
#[tauri::command]
pub fn set_catalog_config(config: CatalogConfig) -> Result<(), String> {
    save_config(&config)
}

// ============================================================================
// TESTS
// ============================================================================
