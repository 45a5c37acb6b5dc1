//! Card action policy
//!
//! Maps an install status to the ordered set of actions a card offers, and
//! each action to the effect it has when triggered.

use crate::channel::ProcessCommand;
use crate::dispatcher::Intent;
use crate::types::{InstallStatus, ManagedApp};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Open,
    Install,
    Uninstall,
}

/// What triggering an action does
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "via", content = "message", rename_all = "camelCase")]
pub enum ActionEffect {
    /// One-way message to the process command channel
    Command(ProcessCommand),
    /// Intent for the central dispatcher
    Intent(Intent),
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CardAction {
    pub kind: ActionKind,
    pub effect: ActionEffect,
}

/// Actions permitted for `status`, in display order.
///
/// Installed apps can be opened or uninstalled (destructive action last).
/// Every other status, including ones this build does not recognize, only
/// offers install.
pub fn actions_for(status: InstallStatus) -> &'static [ActionKind] {
    match status {
        InstallStatus::Installed => &[ActionKind::Open, ActionKind::Uninstall],
        InstallStatus::NotInstalled
        | InstallStatus::Installing
        | InstallStatus::Uninstalling
        | InstallStatus::Unknown => &[ActionKind::Install],
    }
}

impl ActionKind {
    pub fn effect(&self, app: &ManagedApp) -> ActionEffect {
        match self {
            ActionKind::Open => ActionEffect::Command(ProcessCommand::OpenApp {
                app_id: app.id.clone(),
                app_name: app.name.clone(),
            }),
            ActionKind::Uninstall => ActionEffect::Intent(Intent::OpenConfirmUninstallAppDialog {
                app_name: app.name.clone(),
            }),
            ActionKind::Install => ActionEffect::Intent(Intent::RequestInstallApp {
                id: app.id.clone(),
                name: app.name.clone(),
                url: app.url.clone(),
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Open => "Open",
            ActionKind::Install => "Install",
            ActionKind::Uninstall => "Uninstall",
        }
    }
}

/// Actions for `status` bound to `app`
pub fn card_actions(status: InstallStatus, app: &ManagedApp) -> Vec<CardAction> {
    actions_for(status)
        .iter()
        .map(|kind| CardAction {
            kind: *kind,
            effect: kind.effect(app),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> ManagedApp {
        ManagedApp::new("app1", "Messenger", "https://www.messenger.com")
    }

    #[test]
    fn test_installed_offers_open_then_uninstall() {
        assert_eq!(
            actions_for(InstallStatus::Installed),
            &[ActionKind::Open, ActionKind::Uninstall]
        );
    }

    #[test]
    fn test_not_installed_offers_install() {
        assert_eq!(actions_for(InstallStatus::NotInstalled), &[ActionKind::Install]);
    }

    #[test]
    fn test_every_other_status_offers_install() {
        for status in [
            InstallStatus::Installing,
            InstallStatus::Uninstalling,
            InstallStatus::Unknown,
        ] {
            assert_eq!(actions_for(status), &[ActionKind::Install], "{}", status);
        }
    }

    #[test]
    fn test_open_effect_is_a_command() {
        let actions = card_actions(InstallStatus::Installed, &app());
        assert_eq!(
            actions[0].effect,
            ActionEffect::Command(ProcessCommand::OpenApp {
                app_id: "app1".to_string(),
                app_name: "Messenger".to_string(),
            })
        );
    }

    #[test]
    fn test_uninstall_effect_carries_app_name() {
        let actions = card_actions(InstallStatus::Installed, &app());
        assert_eq!(actions[1].kind, ActionKind::Uninstall);
        assert_eq!(
            actions[1].effect,
            ActionEffect::Intent(Intent::OpenConfirmUninstallAppDialog {
                app_name: "Messenger".to_string(),
            })
        );
    }

    #[test]
    fn test_install_effect_is_an_explicit_intent() {
        let actions = card_actions(InstallStatus::NotInstalled, &app());
        assert_eq!(actions.len(), 1);
        assert_eq!(
            actions[0].effect,
            ActionEffect::Intent(Intent::RequestInstallApp {
                id: "app1".to_string(),
                name: "Messenger".to_string(),
                url: "https://www.messenger.com".to_string(),
            })
        );
    }

    #[test]
    fn test_card_action_serializes_for_frontend() {
        let actions = card_actions(InstallStatus::Installed, &app());
        let json = serde_json::to_value(&actions[1]).unwrap();
        assert_eq!(json["kind"], "UNINSTALL");
        assert_eq!(json["effect"]["via"], "intent");
        assert_eq!(
            json["effect"]["message"]["type"],
            "openConfirmUninstallAppDialog"
        );
        assert_eq!(json["effect"]["message"]["payload"]["appName"], "Messenger");
    }
}
