//! Process command channel
//!
//! One-way commands from the catalog UI to the process that owns app
//! windows. Sends never block and there is no reply.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Channel name the shell listens on for `ProcessCommand::OpenApp`
pub const OPEN_APP_CHANNEL: &str = "open-app";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum ProcessCommand {
    #[serde(rename_all = "camelCase")]
    OpenApp { app_id: String, app_name: String },
}

impl ProcessCommand {
    pub fn channel(&self) -> &'static str {
        match self {
            ProcessCommand::OpenApp { .. } => OPEN_APP_CHANNEL,
        }
    }
}

/// Fire-and-forget sink for process commands
pub trait CommandChannel: Send + Sync {
    fn send(&self, command: ProcessCommand) -> Result<(), String>;
}

/// Command channel backed by an unbounded tokio mpsc queue
#[derive(Clone)]
pub struct MpscCommandChannel {
    tx: mpsc::UnboundedSender<ProcessCommand>,
}

impl MpscCommandChannel {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProcessCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CommandChannel for MpscCommandChannel {
    fn send(&self, command: ProcessCommand) -> Result<(), String> {
        debug!("Sending {} command: {:?}", command.channel(), command);
        self.tx
            .send(command)
            .map_err(|e| format!("Failed to send {} command: receiver closed", e.0.channel()))
    }
}

/// Something that carries out process commands (e.g. launches app windows)
pub trait CommandHandler: Send + 'static {
    fn handle(&mut self, command: ProcessCommand) -> Result<(), String>;
}

/// Drain `rx`, handing each command to `handler`.
///
/// Handler failures are logged and the loop continues. Returns once every
/// sender has been dropped.
pub async fn run_command_worker<H: CommandHandler>(
    mut rx: mpsc::UnboundedReceiver<ProcessCommand>,
    mut handler: H,
) {
    info!("Process command worker started");
    while let Some(command) = rx.recv().await {
        let channel = command.channel();
        if let Err(e) = handler.handle(command) {
            warn!("Failed to handle {} command: {}", channel, e);
        }
    }
    info!("Process command worker stopped");
}

// ============================================================================
// TESTS
// ============================================================================
