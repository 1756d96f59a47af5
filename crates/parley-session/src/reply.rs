//! Deferred assistant replies
//!
//! Sends enqueue a `PendingReply` on an unbounded channel. A single worker
//! drains the queue in FIFO order, waits for each reply's due instant and
//! applies it to the chat it was addressed to. Due instants are
//! non-decreasing, so replies land in the order their sends happened.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use crate::event::StoreEvent;
use crate::responder::Responder;
use crate::state::SessionState;

#[derive(Debug, Clone)]
pub(crate) struct PendingReply {
    pub(crate) chat_id: String,
    pub(crate) prompt: String,
    pub(crate) due: Instant,
}

pub(crate) struct ReplyWorker {
    queue: mpsc::UnboundedReceiver<PendingReply>,
    state: Weak<RwLock<SessionState>>,
    events: broadcast::Sender<StoreEvent>,
    responder: Arc<dyn Responder>,
}

impl ReplyWorker {
    pub(crate) fn new(
        queue: mpsc::UnboundedReceiver<PendingReply>,
        state: Weak<RwLock<SessionState>>,
        events: broadcast::Sender<StoreEvent>,
        responder: Arc<dyn Responder>,
    ) -> Self {
        Self {
            queue,
            state,
            events,
            responder,
        }
    }

    pub(crate) fn spawn(self, handle: &Handle) {
        handle.spawn(self.run());
    }

    /// Runs until every store handle (and so every queue sender) is dropped
    async fn run(mut self) {
        while let Some(pending) = self.queue.recv().await {
            tokio::time::sleep_until(pending.due).await;

            let Some(state) = self.state.upgrade() else {
                break;
            };
            self.deliver(&state, pending);
        }

        tracing::debug!("Reply worker stopped");
    }

    fn deliver(&self, state: &RwLock<SessionState>, pending: PendingReply) {
        let text = self.responder.respond(&pending.prompt);

        // Publish under the lock so subscribers see events in commit order
        let mut state = state.write();
        let appended = state.append_reply(&pending.chat_id, &text);

        match appended {
            Some(message) => {
                tracing::debug!(
                    chat_id = %pending.chat_id,
                    message_id = %message.id,
                    "Delivered assistant reply"
                );
                let _ = self.events.send(StoreEvent::MessageAppended {
                    chat_id: pending.chat_id,
                    message,
                });
            }
            None => {
                tracing::warn!(
                    chat_id = %pending.chat_id,
                    "Dropping reply for deleted chat"
                );
                let _ = self.events.send(StoreEvent::ReplyDropped {
                    chat_id: pending.chat_id,
                });
            }
        }
    }
}
