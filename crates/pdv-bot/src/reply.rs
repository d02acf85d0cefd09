//! What the state machine asks the channel to show
//!
//! Replies carry finished text and keyboards; a channel only decides
//! whether to send a new message, edit the current one or answer inline.

use pdv_core::{ExecutionResult, Fleet, Host};
use pdv_protocol::{Button, CallbackAction, Keyboard, MaintenanceAction};

/// Buttons per row in the host list
pub const HOSTS_PER_ROW: usize = 4;

/// Shown to actors that fail the authorization gate
pub const DENIED_TEXT: &str = "⛔ Access denied. Unauthorized user.";

/// Short form of [`DENIED_TEXT`] for inline alerts
pub const DENIED_ALERT: &str = "Not authorized";

/// Text plus buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Message body
    pub text: String,
    /// Inline buttons under the message
    pub keyboard: Keyboard,
}

/// A single thing to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The actor is not allowed to use the bot
    Denied,
    /// The list of every host
    HostList(View),
    /// One host with its actions
    HostDetail { host: Host, view: View },
    /// An action has started
    Processing { host: Host, action: MaintenanceAction },
    /// An action has finished; the host's actions are offered again
    Report {
        host: Host,
        result: ExecutionResult,
        actions: Keyboard,
    },
}

impl Reply {
    /// Message body for this reply
    pub fn text(&self) -> String {
        match self {
            Reply::Denied => DENIED_TEXT.to_string(),
            Reply::HostList(view) | Reply::HostDetail { view, .. } => view.text.clone(),
            Reply::Processing { host, action } => {
                format!("⏳ Running '{}' on {}...", action.command(), host.address)
            }
            Reply::Report { host, result, .. } => {
                format!("🏁 Result {}:\n{}", host.address, result.output)
            }
        }
    }

    /// Buttons for this reply, if it has any
    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Reply::HostList(view) | Reply::HostDetail { view, .. } => Some(&view.keyboard),
            Reply::Report { actions, .. } => Some(actions),
            Reply::Denied | Reply::Processing { .. } => None,
        }
    }
}

/// Host list: one button per host, [`HOSTS_PER_ROW`] per row
pub fn host_list(fleet: &Fleet) -> View {
    let buttons = fleet
        .hosts()
        .map(|host| Button::new(host.label(), CallbackAction::SelectHost(host.index.get())));

    View {
        text: format!(
            "🛠 Maintenance Panel\nSelect a host ({}):",
            fleet.address_range()
        ),
        keyboard: Keyboard::grid(buttons, HOSTS_PER_ROW),
    }
}

/// One row per action, then back
pub fn host_actions() -> Keyboard {
    MaintenanceAction::ALL
        .iter()
        .fold(Keyboard::new(), |keyboard, action| {
            keyboard.push_row(Button::new(
                action.label(),
                CallbackAction::SelectAction(*action),
            ))
        })
        .push_row(Button::new("⬅️ Back", CallbackAction::Back))
}

/// Host detail: the host's address, the SSH user and [`host_actions`]
pub fn host_detail(host: &Host, username: &str) -> View {
    View {
        text: format!(
            "📍 Selected host: {}\nUser: {}\nWhat do you want to do?",
            host.address, username
        ),
        keyboard: host_actions(),
    }
}

/// Result of an action, keeping the host's actions at hand
pub fn report(host: Host, result: ExecutionResult) -> Reply {
    Reply::Report {
        host,
        result,
        actions: host_actions(),
    }
}
