//! Driven port for user-facing notifications.

use std::fmt;

/// A message the user must see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A form was rejected before anything was sent.
    Validation {
        /// What to fix.
        message: String,
    },
    /// A gateway call failed.
    Failure {
        /// What went wrong.
        message: String,
        /// Whether trying again may succeed.
        retryable: bool,
    },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "invalid input: {message}"),
            Self::Failure {
                message,
                retryable: true,
            } => write!(f, "failed: {message} (try again)"),
            Self::Failure {
                message,
                retryable: false,
            } => write!(f, "failed: {message}"),
        }
    }
}

/// Port delivering notifications to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show one notification.
    fn notify(&self, notification: Notification);
}
