//! Tuning constants for Delayline
//! Queue depths, buffer capacities and loop timing in one place

use embassy_time::Duration;

// ===================================================================
// Channel Configuration
// ===================================================================

pub const COMMAND_QUEUE_DEPTH: usize = 5; // Delay commands in flight (console -> delay task)
pub const REPORT_QUEUE_DEPTH: usize = 5; // Confirmations in flight (delay task -> console)

/// How long a producer waits for a free slot before the message is dropped.
pub const SEND_TIMEOUT: Duration = Duration::from_millis(10);

// ===================================================================
// Console Task Configuration
// ===================================================================

pub const LINE_CAPACITY: usize = 255; // Receiving line buffer size
pub const CONSOLE_POLL_INTERVAL: Duration = Duration::from_millis(5); // Per-iteration yield before polling input

/// Command recognized at the start of a completed line. The trailing
/// space is part of the prefix.
pub const COMMAND_PREFIX: &[u8] = b"delay ";

/// Diagnostic printed when the command argument is missing or not numeric.
pub const BAD_ARGUMENT_TEXT: &[u8] = b"ERROR:Parameter not a number\n";

// ===================================================================
// Delay Task Configuration
// ===================================================================

pub const REPORT_CAPACITY: usize = 20; // Confirmation payload size, 19 chars + slack
pub const INITIAL_DELAY_MS: u32 = 0; // Start with no delay; the task yields every cycle
