//! Transient user notifications (toasts).

use serde::{Deserialize, Serialize};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    /// An operation succeeded.
    Success,
    /// Neutral information.
    Info,
    /// An operation failed.
    Error,
}

/// A single non-blocking notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Message shown verbatim.
    pub message: String,
}

impl Toast {
    /// A success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    /// An informational toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    /// An error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for toasts. Implementations must not block.
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Show a toast.
    fn notify(&self, toast: Toast);
}
