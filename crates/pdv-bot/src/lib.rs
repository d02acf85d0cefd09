//! pdv-bot: Telegram maintenance bot for the pdv-ops fleet
//!
//! Authorized operators pick a host from an inline keyboard, then an
//! action; the bot runs it over SSH with the day's derived password and
//! reports the output back to the chat.

pub mod auth;
pub mod channel;
pub mod machine;
pub mod reply;
pub mod session;
pub mod state;
pub mod supervisor;

pub use machine::SelectionMachine;
pub use state::BotState;
pub use supervisor::{supervise, RestartPolicy};
