//! Notifier writing one line per notification to a terminal stream.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::domain::ports::{Notification, Notifier};

/// Writes notifications as plain text lines.
pub struct TerminalNotifier<W> {
    out: Mutex<W>,
}

impl<W> TerminalNotifier<W>
where
    W: Write + Send,
{
    /// Wrap a writer.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TerminalNotifier<io::Stderr> {
    /// Notifier writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W> Notifier for TerminalNotifier<W>
where
    W: Write + Send,
{
    fn notify(&self, notification: Notification) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(out, "{notification}").and_then(|()| out.flush()) {
            warn!(%error, %notification, "notification could not be written");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_notification() {
        let notifier = TerminalNotifier::new(Vec::new());
        notifier.notify(Notification::Validation {
            message: "fill in all fields: age".to_owned(),
        });
        notifier.notify(Notification::Failure {
            message: "could not load people: offline".to_owned(),
            retryable: true,
        });

        let written = String::from_utf8(notifier.into_inner()).expect("utf-8 output");
        assert_eq!(
            written,
            "invalid input: fill in all fields: age\n\
             failed: could not load people: offline (try again)\n"
        );
    }
}
