//! User-facing progress output for pipeline steps.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Sink for user-visible progress and diagnostic messages.
///
/// Messages are fire-and-forget: implementations must swallow their own
/// failures rather than surface them to the step.
pub trait Ui {
    /// Emits one message to the user.
    fn say(&self, message: &str);
}

/// [`Ui`] implementation that writes one line per message to a writer.
#[derive(Debug)]
pub struct WriterUi<W> {
    writer: Mutex<W>,
}

impl<W: Write> WriterUi<W> {
    /// Wraps a writer; concurrent messages are serialised through an
    /// internal mutex.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write> Ui for WriterUi<W> {
    fn say(&self, message: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{message}").ok();
    }
}
