//! Shared data types for the app catalog backend
//!
//! This module contains all serializable types used across the application:
//! - Managed app types (ManagedApp, InstallStatus, StatusRecord)
//! - Registry snapshot type (ManagedApps)
//! - Configuration types (CatalogConfig)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

pub const DEFAULT_ICON_BASE_URL: &str = "https://getwebcatalog.com/s3";
pub const DEFAULT_CATALOG_URL: &str = "https://getwebcatalog.com/api/apps.json";
pub const DEFAULT_CATALOG_CACHE_SECS: u64 = 3600;

pub fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

pub fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

pub fn default_catalog_cache_secs() -> u64 {
    DEFAULT_CATALOG_CACHE_SECS
}

// ============================================================================
// APP TYPES
// ============================================================================

/// An application entry tracked by the catalog
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ManagedApp {
    pub id: String,
    pub name: String,
    /// Canonical URL of the app
    pub url: String,
}

impl ManagedApp {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Install status of a managed app
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallStatus {
    #[default]
    NotInstalled,
    Installing,
    Installed,
    Uninstalling,
    /// Any status string this build does not recognize
    #[serde(other)]
    Unknown,
}

impl InstallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallStatus::NotInstalled => "NOT_INSTALLED",
            InstallStatus::Installing => "INSTALLING",
            InstallStatus::Installed => "INSTALLED",
            InstallStatus::Uninstalling => "UNINSTALLING",
            InstallStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "NOT_INSTALLED" => InstallStatus::NotInstalled,
            "INSTALLING" => InstallStatus::Installing,
            "INSTALLED" => InstallStatus::Installed,
            "UNINSTALLING" => InstallStatus::Uninstalling,
            _ => InstallStatus::Unknown,
        }
    }
}

impl std::fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-app install-state entry in the registry.
///
/// Status strings this build does not know are kept verbatim and written
/// back unchanged, since installers may own newer states.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "StatusRecordFile", into = "StatusRecordFile")]
pub struct StatusRecord {
    pub status: InstallStatus,
    pub updated_at: Option<String>,
    unrecognized: Option<String>,
}

impl StatusRecord {
    pub fn new(status: InstallStatus) -> Self {
        Self {
            status,
            updated_at: None,
            unrecognized: None,
        }
    }

    /// Record for `status` stamped with the current time
    pub fn updated_now(status: InstallStatus) -> Self {
        Self {
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
            ..Self::new(status)
        }
    }

    /// Status as stored on disk
    pub fn status_text(&self) -> &str {
        match (&self.status, &self.unrecognized) {
            (InstallStatus::Unknown, Some(raw)) => raw.as_str(),
            (status, _) => status.as_str(),
        }
    }
}

/// On-disk shape of a status record
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusRecordFile {
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
}

impl From<StatusRecordFile> for StatusRecord {
    fn from(file: StatusRecordFile) -> Self {
        let status = InstallStatus::from_wire(&file.status);
        let unrecognized = match status {
            InstallStatus::Unknown => Some(file.status),
            _ => None,
        };
        Self {
            status,
            updated_at: file.updated_at,
            unrecognized,
        }
    }
}

impl From<StatusRecord> for StatusRecordFile {
    fn from(record: StatusRecord) -> Self {
        Self {
            status: record.status_text().to_string(),
            updated_at: record.updated_at,
        }
    }
}

/// Registry snapshot: app id -> status record.
///
/// An id with no record is NOT_INSTALLED.
pub type ManagedApps = HashMap<String, StatusRecord>;

// ============================================================================
// CONFIGURATION TYPES
// ============================================================================

/// Catalog configuration (config.json)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Base URL for app icons; icons live at `<base>/<id>.webp`
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,
    /// Remote listing of installable apps
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    #[serde(default = "default_catalog_cache_secs")]
    pub catalog_cache_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            icon_base_url: default_icon_base_url(),
            catalog_url: default_catalog_url(),
            catalog_cache_secs: default_catalog_cache_secs(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
