//! Toast sinks.

use std::sync::Mutex;

use tokio::sync::mpsc;

use schoolhub_core::traits::{Notifier, Toast, ToastLevel};

/// Writes toasts to the log. Used when nothing renders them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => tracing::warn!(toast = %toast.message, "Toast"),
            ToastLevel::Success | ToastLevel::Info => {
                tracing::info!(toast = %toast.message, "Toast")
            }
        }
    }
}

/// Forwards toasts to a front end over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Toast>,
}

impl ChannelNotifier {
    /// Create the notifier and the receiving end the front end drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, toast: Toast) {
        if self.tx.send(toast).is_err() {
            tracing::debug!("Toast dropped: receiver closed");
        }
    }
}

/// Buffers toasts until they are drained.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl CollectingNotifier {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *toasts)
    }

    /// Copy of the buffered toasts without draining.
    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(toast);
    }
}
