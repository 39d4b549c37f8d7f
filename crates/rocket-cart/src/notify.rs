//! Notification side channel for failed operations.

use tokio::sync::mpsc;

use crate::CartError;

/// Receives each failed cart operation exactly once.
pub trait Notifier: Send + Sync {
    /// Surface `error` to the user.
    fn notify(&self, error: &CartError);
}

/// Forwards failures to an unbounded channel, for a UI loop to drain.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<CartError>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CartError>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, error: &CartError) {
        // A closed receiver means nobody is rendering toasts anymore.
        let _ = self.tx.send(error.clone());
    }
}
