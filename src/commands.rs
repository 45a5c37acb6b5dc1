//! Tauri command surface for app cards
//!
//! Intents are emitted to the webview as `dialog-intent` events; process
//! commands go through the command channel and are delivered to the shell
//! as events by `EventCommandHandler`.

use crate::actions::ActionKind;
use crate::card::{AppCard, AppCardView};
use crate::channel::{CommandChannel, CommandHandler, ProcessCommand};
use crate::config::load_config;
use crate::dispatcher::{Intent, IntentDispatcher, INTENT_EVENT};
use crate::store::ManagedAppsStore;
use crate::types::{InstallStatus, ManagedApp, ManagedApps};
use log::{error, info};
use std::sync::Arc;
use tauri::{AppHandle, Emitter, State};

/// Event carrying every new registry snapshot
pub const MANAGED_APPS_CHANGED_EVENT: &str = "managed-apps-changed";

pub struct CatalogState {
    pub store: Arc<ManagedAppsStore>,
    pub commands: Arc<dyn CommandChannel>,
    pub intents: Arc<dyn IntentDispatcher>,
}

impl CatalogState {
    fn card(&self, app: ManagedApp) -> AppCard {
        let selector = self.store.selector(app.id.clone());
        AppCard::new(app, selector, self.commands.clone(), self.intents.clone())
    }
}

/// Emits intents to the webview
pub struct EventDispatcher {
    app_handle: AppHandle,
}

impl EventDispatcher {
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl IntentDispatcher for EventDispatcher {
    fn dispatch(&self, intent: Intent) -> Result<(), String> {
        self.app_handle
            .emit(INTENT_EVENT, &intent)
            .map_err(|e| format!("Failed to emit {}: {}", intent.name(), e))
    }
}

/// Forwards process commands to the shell as events named after the channel
pub struct EventCommandHandler {
    app_handle: AppHandle,
}

impl EventCommandHandler {
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl CommandHandler for EventCommandHandler {
    fn handle(&mut self, command: ProcessCommand) -> Result<(), String> {
        self.app_handle
            .emit(command.channel(), &command)
            .map_err(|e| format!("Failed to emit {}: {}", command.channel(), e))
    }
}

/// Re-emit registry snapshots to the webview until the store goes away
pub fn forward_registry_changes(app_handle: AppHandle, store: Arc<ManagedAppsStore>) {
    let mut rx = store.subscribe();
    drop(store);

    tauri::async_runtime::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            if let Err(e) = app_handle.emit(MANAGED_APPS_CHANGED_EVENT, &*snapshot) {
                error!("Failed to emit {} event: {}", MANAGED_APPS_CHANGED_EVENT, e);
            }
        }
        info!("Managed apps store closed, stopped forwarding changes");
    });
}

// ============================================================================
// TAURI COMMANDS
// ============================================================================

#[tauri::command]
pub fn get_managed_apps(state: State<'_, CatalogState>) -> ManagedApps {
    (*state.store.snapshot()).clone()
}

#[tauri::command]
pub fn set_app_status(
    state: State<'_, CatalogState>,
    app_id: String,
    status: InstallStatus,
) -> Result<(), String> {
    info!("Status of {} set to {}", app_id, status);
    state.store.set_status(&app_id, status)
}

#[tauri::command]
pub fn clear_app_status(state: State<'_, CatalogState>, app_id: String) -> Result<(), String> {
    state.store.remove(&app_id)
}

#[tauri::command]
pub fn get_app_cards(state: State<'_, CatalogState>, apps: Vec<ManagedApp>) -> Vec<AppCardView> {
    let icon_base_url = load_config().icon_base_url;
    let snapshot = state.store.snapshot();
    apps.iter()
        .map(|app| {
            let status = crate::status::resolve_status(&snapshot, &app.id);
            AppCardView::new(app, status, &icon_base_url)
        })
        .collect()
}

#[tauri::command]
pub fn trigger_app_action(
    state: State<'_, CatalogState>,
    app: ManagedApp,
    kind: ActionKind,
) -> bool {
    state.card(app).trigger(kind)
}

#[tauri::command]
pub fn open_app_details(state: State<'_, CatalogState>, app: ManagedApp) -> bool {
    state.card(app).open_details()
}
