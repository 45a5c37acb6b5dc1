//! End-to-end tests for app cards
//!
//! Covers:
//! - Status resolution against registry snapshots
//! - Action sets per status
//! - Effects of triggering each action
//! - Failure handling on the outbound channels
//! - Live status updates from the store

use super::*;
use std::sync::{Arc, Mutex};

// ==================== FIXTURES ====================

#[derive(Default)]
struct RecordingChannel {
    sent: Mutex<Vec<ProcessCommand>>,
}

impl CommandChannel for RecordingChannel {
    fn send(&self, command: ProcessCommand) -> Result<(), String> {
        self.sent.lock().unwrap().push(command);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingDispatcher {
    dispatched: Mutex<Vec<Intent>>,
}

impl IntentDispatcher for RecordingDispatcher {
    fn dispatch(&self, intent: Intent) -> Result<(), String> {
        self.dispatched.lock().unwrap().push(intent);
        Ok(())
    }
}

fn messenger() -> ManagedApp {
    ManagedApp::new("app1", "Messenger", "https://www.messenger.com")
}

fn installed_store() -> ManagedAppsStore {
    let mut registry = ManagedApps::new();
    registry.insert(
        "app1".to_string(),
        StatusRecord::new(InstallStatus::Installed),
    );
    ManagedAppsStore::in_memory(registry)
}

struct Harness {
    card: AppCard,
    channel: Arc<RecordingChannel>,
    dispatcher: Arc<RecordingDispatcher>,
}

fn harness(store: &ManagedAppsStore, app: ManagedApp) -> Harness {
    let channel = Arc::new(RecordingChannel::default());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let card = AppCard::new(
        app.clone(),
        store.selector(app.id.clone()),
        channel.clone(),
        dispatcher.clone(),
    );
    Harness {
        card,
        channel,
        dispatcher,
    }
}

// ==================== SCENARIOS ====================

#[test]
fn test_installed_app_scenario() {
    let store = installed_store();
    let h = harness(&store, messenger());

    assert_eq!(h.card.status(), InstallStatus::Installed);
    assert_eq!(
        h.card.view(types::DEFAULT_ICON_BASE_URL).actions,
        vec![ActionKind::Open, ActionKind::Uninstall]
    );
}

#[test]
fn test_empty_registry_scenario() {
    let store = ManagedAppsStore::in_memory(ManagedApps::new());
    let h = harness(
        &store,
        ManagedApp::new("app2", "Gmail", "https://mail.google.com"),
    );

    assert_eq!(h.card.status(), InstallStatus::NotInstalled);
    assert_eq!(
        h.card.view(types::DEFAULT_ICON_BASE_URL).actions,
        vec![ActionKind::Install]
    );
}

#[test]
fn test_open_sends_one_command_and_no_intents() {
    let store = installed_store();
    let h = harness(&store, messenger());

    assert!(h.card.trigger(ActionKind::Open));

    assert_eq!(
        *h.channel.sent.lock().unwrap(),
        vec![ProcessCommand::OpenApp {
            app_id: "app1".to_string(),
            app_name: "Messenger".to_string(),
        }]
    );
    assert!(h.dispatcher.dispatched.lock().unwrap().is_empty());
}

#[test]
fn test_uninstall_dispatches_one_intent_and_no_command() {
    let store = installed_store();
    let h = harness(&store, messenger());

    assert!(h.card.trigger(ActionKind::Uninstall));

    assert_eq!(
        *h.dispatcher.dispatched.lock().unwrap(),
        vec![Intent::OpenConfirmUninstallAppDialog {
            app_name: "Messenger".to_string(),
        }]
    );
    assert!(h.channel.sent.lock().unwrap().is_empty());
}

#[test]
fn test_install_dispatches_install_intent() {
    let store = ManagedAppsStore::in_memory(ManagedApps::new());
    let h = harness(&store, messenger());

    assert!(h.card.trigger(ActionKind::Install));

    assert_eq!(
        *h.dispatcher.dispatched.lock().unwrap(),
        vec![Intent::RequestInstallApp {
            id: "app1".to_string(),
            name: "Messenger".to_string(),
            url: "https://www.messenger.com".to_string(),
        }]
    );
    assert!(h.channel.sent.lock().unwrap().is_empty());
}

#[test]
fn test_actions_not_offered_are_ignored() {
    let store = ManagedAppsStore::in_memory(ManagedApps::new());
    let h = harness(&store, messenger());

    assert!(!h.card.trigger(ActionKind::Open));
    assert!(!h.card.trigger(ActionKind::Uninstall));
    assert!(h.channel.sent.lock().unwrap().is_empty());
    assert!(h.dispatcher.dispatched.lock().unwrap().is_empty());
}

#[test]
fn test_open_details_dispatches_name_and_url() {
    let store = installed_store();
    let h = harness(&store, messenger());

    assert!(h.card.open_details());

    assert_eq!(
        *h.dispatcher.dispatched.lock().unwrap(),
        vec![Intent::OpenAppDetailsDialog {
            name: "Messenger".to_string(),
            url: "https://www.messenger.com".to_string(),
        }]
    );
}

// ==================== FAILURE HANDLING ====================

#[test]
fn test_closed_channels_are_logged_not_raised() {
    let store = installed_store();
    let (channel, command_rx) = MpscCommandChannel::new();
    let (dispatcher, intent_rx) = MpscDispatcher::new();
    drop(command_rx);
    drop(intent_rx);

    let card = AppCard::new(
        messenger(),
        store.selector("app1"),
        Arc::new(channel),
        Arc::new(dispatcher),
    );

    assert!(!card.trigger(ActionKind::Open));
    assert!(!card.trigger(ActionKind::Uninstall));
    assert!(!card.open_details());
}

#[test]
fn test_mpsc_channels_deliver_effects() {
    let store = installed_store();
    let (channel, mut command_rx) = MpscCommandChannel::new();
    let (dispatcher, mut intent_rx) = MpscDispatcher::new();

    let card = AppCard::new(
        messenger(),
        store.selector("app1"),
        Arc::new(channel),
        Arc::new(dispatcher),
    );

    card.trigger(ActionKind::Open);
    card.trigger(ActionKind::Uninstall);

    assert!(matches!(
        command_rx.try_recv(),
        Ok(ProcessCommand::OpenApp { ref app_id, .. }) if app_id == "app1"
    ));
    assert!(command_rx.try_recv().is_err());
    assert!(matches!(
        intent_rx.try_recv(),
        Ok(Intent::OpenConfirmUninstallAppDialog { ref app_name }) if app_name == "Messenger"
    ));
    assert!(intent_rx.try_recv().is_err());
}

// ==================== LIVE UPDATES ====================

#[tokio::test]
async fn test_card_follows_store_through_install_lifecycle() {
    let store = ManagedAppsStore::in_memory(ManagedApps::new());
    let mut h = harness(&store, messenger());
    assert_eq!(h.card.status(), InstallStatus::NotInstalled);

    store.set_status("app1", InstallStatus::Installing).unwrap();
    assert_eq!(h.card.status_changed().await, Some(InstallStatus::Installing));
    assert_eq!(h.card.view("https://x").actions, vec![ActionKind::Install]);

    store.set_status("app1", InstallStatus::Installed).unwrap();
    assert_eq!(h.card.status_changed().await, Some(InstallStatus::Installed));
    assert!(h.card.trigger(ActionKind::Open));

    store.remove("app1").unwrap();
    assert_eq!(h.card.status_changed().await, Some(InstallStatus::NotInstalled));
    assert!(!h.card.trigger(ActionKind::Open));
    assert_eq!(h.channel.sent.lock().unwrap().len(), 1);
}
