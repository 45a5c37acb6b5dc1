//! App Catalog - Main library entry point
//!
//! The view model for managed-app cards (status resolution, action policy,
//! card effects) plus the store and channels it talks to. With the `desktop`
//! feature this module also sets up the Tauri application.

// ============================================================================
// MODULES
// ============================================================================

// Shared types
pub mod types;

// Path helpers
pub mod paths;

// Atomic JSON writes and backups
pub mod files;

// Catalog configuration
pub mod config;

// System logs
pub mod logs;

// Install status resolution
pub mod status;

// Action policy per status
pub mod actions;

// Process command channel
pub mod channel;

// Intent dispatch
pub mod dispatcher;

// Hostname extraction
pub mod hostname;

// Card view model
pub mod card;

// Managed apps registry
pub mod store;

// managed-apps.json watcher
pub mod watcher;

// Remote catalog listing
pub mod catalog;

// Tauri commands
#[cfg(feature = "desktop")]
pub mod commands;

#[cfg(test)]
mod tests;

pub use actions::{actions_for, card_actions, ActionEffect, ActionKind, CardAction};
pub use card::{AppCard, AppCardView};
pub use channel::{CommandChannel, MpscCommandChannel, ProcessCommand};
pub use dispatcher::{Intent, IntentDispatcher, MpscDispatcher};
pub use status::{resolve_status, StatusSelector};
pub use store::ManagedAppsStore;
pub use types::{InstallStatus, ManagedApp, ManagedApps, StatusRecord};

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::{CatalogState, EventCommandHandler, EventDispatcher};
    use log::{error, info};
    use std::sync::Arc;
    use tauri::Manager;
    use tauri_plugin_log::{Target, TargetKind};

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .targets([
                    Target::new(TargetKind::Stdout),
                    Target::new(TargetKind::LogDir {
                        file_name: Some("app-catalog".to_string()),
                    }),
                ])
                .max_file_size(5_000_000)
                .rotation_strategy(tauri_plugin_log::RotationStrategy::KeepOne)
                .build(),
        )
        .invoke_handler(tauri::generate_handler![
            // App cards (from commands module)
            commands::get_managed_apps,
            commands::set_app_status,
            commands::clear_app_status,
            commands::get_app_cards,
            commands::trigger_app_action,
            commands::open_app_details,
            // Catalog listing (from catalog module)
            catalog::fetch_app_catalog,
            // Config (from config module)
            config::get_catalog_config,
            config::set_catalog_config,
            // System logs (from logs module)
            logs::get_system_logs,
            logs::get_system_log_path
        ])
        .setup(|app| {
            let store = match paths::get_managed_apps_path() {
                Ok(path) => Arc::new(ManagedAppsStore::open(path)),
                Err(e) => {
                    error!("Failed to resolve managed apps path, using in-memory store: {}", e);
                    Arc::new(ManagedAppsStore::in_memory(ManagedApps::new()))
                }
            };

            // Keep cards in sync with installers writing managed-apps.json
            watcher::start_managed_apps_watcher(store.clone());
            commands::forward_registry_changes(app.handle().clone(), store.clone());

            let (command_channel, command_rx) = MpscCommandChannel::new();
            let handler = EventCommandHandler::new(app.handle().clone());
            tauri::async_runtime::spawn(channel::run_command_worker(command_rx, handler));

            app.manage(CatalogState {
                store,
                commands: Arc::new(command_channel),
                intents: Arc::new(EventDispatcher::new(app.handle().clone())),
            });

            info!("App catalog ready");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
