use crate::output::OutputMsg;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// Number of messages that may wait for the consumer before the producer blocks
pub const MESSAGE_BUFFER: usize = 1;

/// Sending half of the message channel, with an idempotent close
///
/// The channel is closed by dropping the only long-lived sender. The sender
/// sits behind a mutex so that `close` can be called from any number of places
/// and only the first call has an effect.
#[derive(Debug)]
pub struct Outbox {
    sender: Mutex<Option<mpsc::Sender<OutputMsg>>>,
}

/// Creates a message channel
///
/// The receiver yields messages in the order they were sent and returns `None`
/// once the outbox has been closed and drained.
pub fn outbox() -> (Outbox, mpsc::Receiver<OutputMsg>) {
    let (tx, rx) = mpsc::channel(MESSAGE_BUFFER);
    let outbox = Outbox {
        sender: Mutex::new(Some(tx)),
    };
    (outbox, rx)
}

impl Outbox {
    fn lock(&self) -> MutexGuard<'_, Option<mpsc::Sender<OutputMsg>>> {
        self.sender.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends a message, waiting for room in the channel
    ///
    /// Returns false if the message could not be delivered, either because the
    /// outbox is closed or because the receiver is gone.
    pub async fn send(&self, msg: OutputMsg) -> bool {
        // The guard must not be held across the await
        let sender = self.lock().clone();

        match sender {
            Some(sender) => {
                if sender.send(msg).await.is_err() {
                    tracing::warn!("Message receiver dropped; message discarded");
                    return false;
                }
                true
            }
            None => {
                tracing::warn!("Outbox already closed; message discarded: {}", msg.msg);
                false
            }
        }
    }

    /// Closes the outbox; calling it again is a no-op
    pub fn close(&self) {
        if self.lock().take().is_some() {
            tracing::debug!("Message channel closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }
}
