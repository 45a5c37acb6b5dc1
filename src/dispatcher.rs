//! Intent dispatch
//!
//! Intents are opaque requests (open a dialog, start an install) handed to a
//! central consumer. Only the payload shape is a contract.

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Event name intents are emitted under in the desktop build
pub const INTENT_EVENT: &str = "dialog-intent";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Intent {
    #[serde(rename_all = "camelCase")]
    OpenConfirmUninstallAppDialog { app_name: String },
    OpenAppDetailsDialog { name: String, url: String },
    RequestInstallApp { id: String, name: String, url: String },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::OpenConfirmUninstallAppDialog { .. } => "openConfirmUninstallAppDialog",
            Intent::OpenAppDetailsDialog { .. } => "openAppDetailsDialog",
            Intent::RequestInstallApp { .. } => "requestInstallApp",
        }
    }
}

pub trait IntentDispatcher: Send + Sync {
    fn dispatch(&self, intent: Intent) -> Result<(), String>;
}

/// Dispatcher backed by an unbounded tokio mpsc queue
#[derive(Clone)]
pub struct MpscDispatcher {
    tx: mpsc::UnboundedSender<Intent>,
}

impl MpscDispatcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Intent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl IntentDispatcher for MpscDispatcher {
    fn dispatch(&self, intent: Intent) -> Result<(), String> {
        debug!("Dispatching {}", intent.name());
        self.tx
            .send(intent)
            .map_err(|e| format!("Failed to dispatch {}: receiver closed", e.0.name()))
    }
}
