//! File helpers shared by the config and the managed apps store

use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Serialize `value` as pretty JSON and swap it into `path` in one rename.
///
/// `what` names the file in error messages.
pub fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    what: &str,
) -> Result<(), String> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize {}: {}", what, e))?;
    let parent = path
        .parent()
        .ok_or_else(|| format!("{} path has no parent directory", what))?;
    std::fs::create_dir_all(parent)
        .map_err(|e| format!("Failed to create {} directory: {}", what, e))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("file");
    let mut temp_file = tempfile::Builder::new()
        .prefix(&format!(".{}.tmp-", file_name))
        .tempfile_in(parent)
        .map_err(|e| format!("Failed to create temp {}: {}", what, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| format!("Failed to write temp {}: {}", what, e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| format!("Failed to sync {}: {}", what, e))?;
    temp_file
        .persist(path)
        .map_err(|e| format!("Failed to persist {}: {}", what, e.error))?;

    Ok(())
}

/// Move `path` aside to `<name>.bad-<timestamp>` and return the new path
pub fn move_aside(path: &Path) -> Result<PathBuf, String> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("Cannot back up {:?}: no file name", path))?;
    let backup = path.with_file_name(format!(
        "{}.bad-{}",
        file_name,
        Utc::now().format("%Y%m%d%H%M%S%3f")
    ));
    std::fs::rename(path, &backup)
        .map_err(|e| format!("Failed to back up {:?}: {}", path, e))?;
    Ok(backup)
}
