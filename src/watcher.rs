//! Managed apps file watcher
//!
//! Reloads managed-apps.json into the store when another process (e.g. the
//! installer) edits it, so cards re-resolve their status.

use crate::store::ManagedAppsStore;
use log::{error, info, warn};
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const DEBOUNCE_MS: u64 = 500;

fn is_watched_file(event_path: &Path, watched: &Path) -> bool {
    match (event_path.file_name(), watched.file_name()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Watch the store's backing file on a background thread
pub fn start_managed_apps_watcher(store: Arc<ManagedAppsStore>) {
    let file_path = match store.path() {
        Some(p) => p.to_path_buf(),
        None => {
            warn!("Managed apps store is in-memory, not watching");
            return;
        }
    };

    // Ensure the directory exists
    if let Some(parent) = file_path.parent() {
        if !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                error!("Failed to create managed apps directory: {}", e);
                return;
            }
        }
    }

    std::thread::spawn(move || {
        let (tx, rx) = std::sync::mpsc::channel();

        let mut debouncer = match new_debouncer(Duration::from_millis(DEBOUNCE_MS), tx) {
            Ok(d) => d,
            Err(e) => {
                error!("Failed to create managed apps watcher: {}", e);
                return;
            }
        };

        let watch_path = file_path.parent().unwrap_or(&file_path);
        if let Err(e) = debouncer
            .watcher()
            .watch(watch_path, notify::RecursiveMode::NonRecursive)
        {
            error!("Failed to watch managed apps directory: {}", e);
            return;
        }

        info!("Watching managed apps for changes: {:?}", file_path);

        loop {
            match rx.recv() {
                Ok(Ok(events)) => {
                    let touched = events.iter().any(|e| {
                        e.kind == DebouncedEventKind::Any && is_watched_file(&e.path, &file_path)
                    });
                    if !touched {
                        continue;
                    }

                    match store.reload() {
                        Ok(true) => info!("Managed apps changed on disk, published new snapshot"),
                        Ok(false) => {}
                        Err(e) => warn!("Failed to reload managed apps: {}", e),
                    }
                }
                Ok(Err(e)) => {
                    error!("Managed apps watcher error: {:?}", e);
                }
                Err(e) => {
                    error!("Managed apps watcher channel error: {:?}", e);
                    break;
                }
            }
        }
    });
}
