//! Install status resolution
//!
//! Derives a card's display status from a registry snapshot, and re-derives
//! it whenever the store publishes a new snapshot.

use crate::types::{InstallStatus, ManagedApps};
use std::sync::Arc;
use tokio::sync::watch;

/// Resolve the status of `app_id` against a registry snapshot.
///
/// Apps without a record are `NotInstalled`.
pub fn resolve_status(registry: &ManagedApps, app_id: &str) -> InstallStatus {
    registry
        .get(app_id)
        .map(|record| record.status)
        .unwrap_or_default()
}

/// Reactive status for one app, fed by the store's snapshot subscription
pub struct StatusSelector {
    app_id: String,
    rx: watch::Receiver<Arc<ManagedApps>>,
    last: InstallStatus,
}

impl StatusSelector {
    pub fn new(app_id: impl Into<String>, rx: watch::Receiver<Arc<ManagedApps>>) -> Self {
        let app_id = app_id.into();
        let last = resolve_status(&rx.borrow(), &app_id);
        Self { app_id, rx, last }
    }

    /// Status against the latest published snapshot
    pub fn current(&self) -> InstallStatus {
        resolve_status(&self.rx.borrow(), &self.app_id)
    }

    /// Wait until a registry update changes this app's status.
    ///
    /// Updates touching other apps are skipped. Returns `None` once the
    /// store has been dropped.
    pub async fn changed(&mut self) -> Option<InstallStatus> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            let status = resolve_status(&self.rx.borrow_and_update(), &self.app_id);
            if status != self.last {
                self.last = status;
                return Some(status);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
