//! System log utilities
//!
//! Provides access to the application log file for debugging.

#[cfg(feature = "desktop")]
use tauri::{AppHandle, Manager};

/// File name the log plugin writes under the app log dir
pub const LOG_FILE_NAME: &str = "app-catalog.log";
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Last `max` lines of `content`
pub fn tail_lines(content: &str, max: usize) -> Vec<String> {
    let lines: Vec<String> = content.lines().map(|s| s.to_string()).collect();
    if lines.len() > max {
        lines[lines.len() - max..].to_vec()
    } else {
        lines
    }
}

// ============================================================================
// TAURI COMMANDS
// ============================================================================

#[cfg(feature = "desktop")]
fn log_file(app_handle: &AppHandle) -> Result<std::path::PathBuf, String> {
    let log_dir = app_handle
        .path()
        .app_log_dir()
        .map_err(|e| format!("Failed to get log directory: {}", e))?;
    Ok(log_dir.join(LOG_FILE_NAME))
}

/// Get the path to the system log file
#[cfg(feature = "desktop")]
#[tauri::command]
pub fn get_system_log_path(app_handle: AppHandle) -> Result<String, String> {
    Ok(log_file(&app_handle)?.to_string_lossy().to_string())
}

/// Read system logs from the log file
#[cfg(feature = "desktop")]
#[tauri::command]
pub fn get_system_logs(
    app_handle: AppHandle,
    max_lines: Option<usize>,
) -> Result<Vec<String>, String> {
    let log_file = log_file(&app_handle)?;

    if !log_file.exists() {
        return Ok(vec!["No logs yet.".to_string()]);
    }

    let content = std::fs::read_to_string(&log_file)
        .map_err(|e| format!("Failed to read log file: {}", e))?;

    Ok(tail_lines(&content, max_lines.unwrap_or(DEFAULT_MAX_LINES)))
}

// ============================================================================
// TESTS
// ============================================================================
