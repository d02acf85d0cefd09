//! Long-polling update loop

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use pdv_core::RemoteExecutor;
use pdv_protocol::{ActorId, InboundEvent};

use super::api::Update;
use super::client::BotApi;
use super::responder::{ReplyTarget, TelegramResponder};
use crate::channel::ChannelError;
use crate::machine::SelectionMachine;

/// Command that opens the host list
const ENTRY_COMMAND: &str = "/start";

/// Feeds Telegram updates into the state machine
pub struct TelegramChannel<E> {
    api: Arc<BotApi>,
    machine: Arc<SelectionMachine<E>>,
    poll_timeout: Duration,
    /// Next update to ask for; survives `run` restarts
    offset: AtomicI64,
}

impl<E> TelegramChannel<E>
where
    E: RemoteExecutor + 'static,
{
    /// Create a channel
    pub fn new(api: Arc<BotApi>, machine: Arc<SelectionMachine<E>>, poll_timeout: Duration) -> Self {
        Self {
            api,
            machine,
            poll_timeout,
            offset: AtomicI64::new(0),
        }
    }

    /// Offset the next `getUpdates` call will use
    pub fn offset(&self) -> i64 {
        self.offset.load(Ordering::Acquire)
    }

    /// Poll until cancelled or until polling itself fails.
    ///
    /// Each update is handled on its own task, so a slow SSH call never
    /// holds up other actors. Errors while handling one update are logged
    /// and do not stop the loop.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), ChannelError> {
        tracing::info!("Polling for updates from offset {}", self.offset());

        loop {
            let updates = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Update polling stopped");
                    return Ok(());
                }
                updates = self.api.get_updates(self.offset(), self.poll_timeout) => updates?,
            };

            for update in updates {
                self.offset.fetch_max(update.update_id + 1, Ordering::AcqRel);
                self.dispatch(update);
            }
        }
    }

    fn dispatch(&self, update: Update) {
        let update_id = update.update_id;
        let Some((event, target)) = route(update) else {
            tracing::trace!("Ignoring update {}", update_id);
            return;
        };

        let machine = Arc::clone(&self.machine);
        let responder = TelegramResponder::new(Arc::clone(&self.api), target);
        tokio::spawn(async move {
            if let Err(e) = machine.handle(event, &responder).await {
                tracing::warn!("Failed to handle update {}: {}", update_id, e);
            }
        });
    }
}

/// Turn an update into an event and a reply target.
///
/// Returns `None` for updates the bot does not act on.
pub fn route(update: Update) -> Option<(InboundEvent, ReplyTarget)> {
    if let Some(query) = update.callback_query {
        let actor = ActorId(query.from.id);
        let (chat_id, message_id) = match &query.message {
            Some(message) => (message.chat.id, Some(message.message_id)),
            None => (query.from.id, None),
        };
        let event = InboundEvent::from_token(actor, query.data.as_deref().unwrap_or_default());
        let target = ReplyTarget::Callback {
            query_id: query.id,
            chat_id,
            message_id,
        };
        return Some((event, target));
    }

    let message = update.message?;
    let actor = ActorId(message.from.as_ref()?.id);
    let text = message.text.as_deref()?;
    if !is_entry_command(text) {
        return None;
    }

    Some((
        InboundEvent::entry(actor),
        ReplyTarget::Chat {
            chat_id: message.chat.id,
        },
    ))
}

/// `/start`, `/start@botname` and `/start payload` all count
fn is_entry_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    let command = command.split('@').next().unwrap_or_default();
    command == ENTRY_COMMAND
}
