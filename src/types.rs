//! Message types carried on the Delayline channels
//!
//! Both payloads are fixed-capacity and owned by exactly one side at a
//! time: the sender until the channel accepts them, the channel until
//! the receiver drains them.

use core::fmt::Write;

use heapless::String;

use crate::config::REPORT_CAPACITY;

/// Requested delay in milliseconds, carried on the command channel.
pub type DelayMs = u32;

/// Confirmation text sent from the delay task back to the console task.
///
/// The payload never grows past [`REPORT_CAPACITY`]; a value too large
/// to render is truncated rather than allocated for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    body: String<REPORT_CAPACITY>,
}

impl Report {
    /// Build the confirmation for a newly adopted delay value.
    ///
    /// No terminator is appended; the console task writes the text
    /// verbatim.
    pub fn delayed_by(ms: DelayMs) -> Self {
        let mut body = String::new();
        let _ = write!(body, "Delayed by: {}", ms);
        Self { body }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }
}
