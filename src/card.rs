//! App card view model
//!
//! Binds one managed app to its live status, builds the view the renderer
//! draws, and carries out the card's actions. Action failures are logged and
//! never reach the caller as errors.

use crate::actions::{actions_for, ActionEffect, ActionKind};
use crate::channel::CommandChannel;
use crate::dispatcher::{Intent, IntentDispatcher};
use crate::hostname::extract_hostname;
use crate::status::StatusSelector;
use crate::types::{InstallStatus, ManagedApp};
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

/// Icon location for `app_id` under `base_url`
pub fn icon_url(base_url: &str, app_id: &str) -> String {
    format!("{}/{}.webp", base_url.trim_end_matches('/'), app_id)
}

/// Everything the renderer needs to draw a card
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppCardView {
    pub id: String,
    pub name: String,
    pub url: String,
    pub hostname: String,
    pub icon_url: String,
    pub status: InstallStatus,
    pub actions: Vec<ActionKind>,
}

impl AppCardView {
    pub fn new(app: &ManagedApp, status: InstallStatus, icon_base_url: &str) -> Self {
        Self {
            id: app.id.clone(),
            name: app.name.clone(),
            url: app.url.clone(),
            hostname: extract_hostname(&app.url),
            icon_url: icon_url(icon_base_url, &app.id),
            status,
            actions: actions_for(status).to_vec(),
        }
    }
}

pub struct AppCard {
    app: ManagedApp,
    status: StatusSelector,
    commands: Arc<dyn CommandChannel>,
    intents: Arc<dyn IntentDispatcher>,
}

impl AppCard {
    pub fn new(
        app: ManagedApp,
        status: StatusSelector,
        commands: Arc<dyn CommandChannel>,
        intents: Arc<dyn IntentDispatcher>,
    ) -> Self {
        Self {
            app,
            status,
            commands,
            intents,
        }
    }

    pub fn status(&self) -> InstallStatus {
        self.status.current()
    }

    pub fn view(&self, icon_base_url: &str) -> AppCardView {
        AppCardView::new(&self.app, self.status(), icon_base_url)
    }

    /// Wait for this card's status to change; `None` once the store is gone
    pub async fn status_changed(&mut self) -> Option<InstallStatus> {
        self.status.changed().await
    }

    /// Run the action of `kind`.
    ///
    /// Returns whether its effect was handed off. Kinds the current status
    /// does not offer are ignored.
    pub fn trigger(&self, kind: ActionKind) -> bool {
        let status = self.status();
        if !actions_for(status).contains(&kind) {
            warn!(
                "Ignoring {} on {}: not offered while {}",
                kind.label(),
                self.app.id,
                status
            );
            return false;
        }

        info!("{} requested for {}", kind.label(), self.app.id);
        match kind.effect(&self.app) {
            ActionEffect::Command(command) => {
                let channel = command.channel();
                match self.commands.send(command) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(
                            "{} for {} not delivered on {}: {}",
                            kind.label(),
                            self.app.id,
                            channel,
                            e
                        );
                        false
                    }
                }
            }
            ActionEffect::Intent(intent) => self.dispatch(intent),
        }
    }

    /// Open the details dialog for this app
    pub fn open_details(&self) -> bool {
        self.dispatch(Intent::OpenAppDetailsDialog {
            name: self.app.name.clone(),
            url: self.app.url.clone(),
        })
    }

    fn dispatch(&self, intent: Intent) -> bool {
        let name = intent.name();
        match self.intents.dispatch(intent) {
            Ok(()) => true,
            Err(e) => {
                warn!("{} for {} not dispatched: {}", name, self.app.id, e);
                false
            }
        }
    }
}
