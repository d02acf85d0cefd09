//! The fixed maintenance actions an operator can trigger

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shell command run for [`MaintenanceAction::RestartApplication`]
pub const RESTART_APPLICATION_COMMAND: &str = "sudo restart-application.sh";

/// Shell command run for [`MaintenanceAction::RebootMachine`]
pub const REBOOT_MACHINE_COMMAND: &str = "sudo init 6";

/// A maintenance action, each bound to one fixed shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceAction {
    /// Restart the point-of-sale application
    RestartApplication,
    /// Reboot the whole machine
    RebootMachine,
}

impl MaintenanceAction {
    /// All actions, in the order they are offered to the operator
    pub const ALL: [MaintenanceAction; 2] = [
        MaintenanceAction::RestartApplication,
        MaintenanceAction::RebootMachine,
    ];

    /// The shell command executed on the remote host
    pub fn command(&self) -> &'static str {
        match self {
            MaintenanceAction::RestartApplication => RESTART_APPLICATION_COMMAND,
            MaintenanceAction::RebootMachine => REBOOT_MACHINE_COMMAND,
        }
    }

    /// Button label shown to the operator
    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceAction::RestartApplication => "🚀 Restart App",
            MaintenanceAction::RebootMachine => "♻️ Reboot Machine",
        }
    }
}

impl fmt::Display for MaintenanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceAction::RestartApplication => write!(f, "restart-application"),
            MaintenanceAction::RebootMachine => write!(f, "reboot-machine"),
        }
    }
}
