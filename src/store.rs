//! Managed apps store
//!
//! Owns the registry of app status records, persists it to
//! managed-apps.json, and publishes an immutable snapshot to subscribers
//! after every change.

use crate::files::{move_aside, write_json_atomic};
use crate::status::{resolve_status, StatusSelector};
use crate::types::{InstallStatus, ManagedApps, StatusRecord};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

struct Registry {
    apps: ManagedApps,
    /// Bumped on every accepted change
    generation: u64,
}

pub struct ManagedAppsStore {
    registry: Mutex<Registry>,
    tx: watch::Sender<Arc<ManagedApps>>,
    path: Option<PathBuf>,
    /// False when the file on disk could not be read nor moved aside
    persist: bool,
}

impl ManagedAppsStore {
    /// Store that is never written to disk
    pub fn in_memory(initial: ManagedApps) -> Self {
        let (tx, _) = watch::channel(Arc::new(initial.clone()));
        Self {
            registry: Mutex::new(Registry {
                apps: initial,
                generation: 0,
            }),
            tx,
            path: None,
            persist: false,
        }
    }

    /// Store backed by `path`.
    ///
    /// A missing file starts empty. A malformed file is moved aside first so
    /// the next write cannot destroy it; if that fails too, changes stay in
    /// memory only.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut persist = true;
        let initial = match read_managed_apps(&path) {
            Ok(apps) => apps,
            Err(e) => {
                warn!("Starting with empty managed apps: {}", e);
                match move_aside(&path) {
                    Ok(backup) => warn!("Moved unreadable managed apps to {:?}", backup),
                    Err(backup_err) => {
                        warn!("Not persisting managed apps: {}", backup_err);
                        persist = false;
                    }
                }
                ManagedApps::new()
            }
        };
        info!("Loaded {} managed app record(s) from {:?}", initial.len(), path);

        let mut store = Self::in_memory(initial);
        store.path = Some(path);
        store.persist = persist;
        store
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn snapshot(&self) -> Arc<ManagedApps> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ManagedApps>> {
        self.tx.subscribe()
    }

    pub fn selector(&self, app_id: impl Into<String>) -> StatusSelector {
        StatusSelector::new(app_id, self.subscribe())
    }

    pub fn status_of(&self, app_id: &str) -> InstallStatus {
        resolve_status(&self.tx.borrow(), app_id)
    }

    /// Changes accepted so far; pass to `replace_from_disk`
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Record a new status for `app_id`.
    ///
    /// Subscribers see the change even if persisting it fails.
    pub fn set_status(&self, app_id: &str, status: InstallStatus) -> Result<(), String> {
        self.mutate(|apps| {
            apps.insert(app_id.to_string(), StatusRecord::updated_now(status));
            true
        })
    }

    /// Forget `app_id`, which makes it NOT_INSTALLED again
    pub fn remove(&self, app_id: &str) -> Result<(), String> {
        self.mutate(|apps| apps.remove(app_id).is_some())
    }

    /// Replace the registry with `next`, read from disk when the store was
    /// at `seen_generation`.
    ///
    /// Rejected if the store changed since then, so a slow reader cannot
    /// roll back a newer status. Nothing is published when unchanged.
    pub fn replace_from_disk(&self, next: ManagedApps, seen_generation: u64) -> bool {
        let mut registry = self.lock();
        if registry.generation != seen_generation {
            debug!(
                "Dropping managed apps read at generation {} (now {})",
                seen_generation, registry.generation
            );
            return false;
        }
        self.apply(&mut registry, next)
    }

    /// Re-read the backing file into the store
    pub fn reload(&self) -> Result<bool, String> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| "Managed apps store has no backing file".to_string())?;
        // Read under the lock so no mutation can land between read and swap
        let mut registry = self.lock();
        let next = read_managed_apps(path)?;
        Ok(self.apply(&mut registry, next))
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        match self.registry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn apply(&self, registry: &mut Registry, next: ManagedApps) -> bool {
        if registry.apps == next {
            return false;
        }
        registry.apps = next;
        registry.generation += 1;
        self.tx.send_replace(Arc::new(registry.apps.clone()));
        true
    }

    fn mutate<F>(&self, f: F) -> Result<(), String>
    where
        F: FnOnce(&mut ManagedApps) -> bool,
    {
        let mut registry = self.lock();
        if !f(&mut registry.apps) {
            return Ok(());
        }
        registry.generation += 1;
        self.tx.send_replace(Arc::new(registry.apps.clone()));

        match &self.path {
            Some(path) if self.persist => {
                write_json_atomic(path, &registry.apps, "managed apps")
            }
            Some(path) => Err(format!(
                "Managed apps change not saved: {:?} could not be backed up",
                path
            )),
            None => Ok(()),
        }
    }
}

// ============================================================================
// PERSISTENCE
// ============================================================================

/// Read managed-apps.json. A missing file is an empty registry.
pub fn read_managed_apps(path: &Path) -> Result<ManagedApps, String> {
    if !path.exists() {
        return Ok(ManagedApps::new());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read managed apps: {}", e))?;
    if content.trim().is_empty() {
        return Ok(ManagedApps::new());
    }

    serde_json::from_str(&content).map_err(|e| format!("Failed to parse managed apps: {}", e))
}

// ============================================================================
// TESTS
// ============================================================================
