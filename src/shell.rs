//! Console task: line accumulation and command parsing
//!
//! One side of the two-task loop. Each iteration yields briefly, drains
//! a pending confirmation from the delay task, then polls the console
//! for a single byte: normal bytes are echoed and buffered, a line
//! terminator runs the parser and a recognized `delay <n>` command is
//! forwarded on the command channel.

use embassy_time::Timer;
use log::info;

use crate::channels::{send_or_drop, CommandSender, ReportReceiver};
use crate::config::{BAD_ARGUMENT_TEXT, COMMAND_PREFIX, CONSOLE_POLL_INTERVAL, LINE_CAPACITY};
use crate::console::{Console, StdConsole};
use crate::types::DelayMs;

// ===================================================================
// Line Buffer
// ===================================================================

/// Accumulates one line of console input.
///
/// Bytes past capacity are dropped until the line is terminated; the
/// buffer never wraps or overwrites.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: heapless::Vec<u8, LINE_CAPACITY>,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
        }
    }

    /// Append one byte; a full buffer drops it silently.
    pub fn push(&mut self, byte: u8) {
        let _ = self.buf.push(byte);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

// ===================================================================
// Command Parsing
// ===================================================================

/// Outcome of parsing one completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine {
    /// No command prefix; ordinary console text, ignored.
    Ignored,
    /// A well-formed delay request.
    Delay(DelayMs),
    /// The prefix matched but the argument is missing or not numeric.
    BadArgument,
}

/// Recognize `delay <n>` at the start of a completed line.
///
/// The prefix match is exact byte equality. The argument is an
/// optional ASCII sign followed by at least one digit; the sign is
/// discarded, trailing non-digit bytes are ignored and values past
/// `u32::MAX` saturate.
pub fn parse_line(line: &[u8]) -> ParsedLine {
    let Some(arg) = line.strip_prefix(COMMAND_PREFIX) else {
        return ParsedLine::Ignored;
    };
    let digits = match arg.first() {
        Some(b'-') | Some(b'+') => &arg[1..],
        _ => arg,
    };
    if !digits.first().is_some_and(|b| b.is_ascii_digit()) {
        return ParsedLine::BadArgument;
    }
    let value = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        });
    ParsedLine::Delay(value)
}

// ===================================================================
// Console Task
// ===================================================================

/// One iteration of the console loop: yield, drain one confirmation,
/// poll one input byte.
pub async fn shell_cycle<C: Console>(
    console: &mut C,
    line: &mut LineBuffer,
    commands: CommandSender,
    reports: ReportReceiver,
) {
    // Let the delay task run before this task settles on input, so a
    // confirmation sent just before is visible on this pass.
    Timer::after(CONSOLE_POLL_INTERVAL).await;

    if let Ok(report) = reports.try_receive() {
        console.write(report.as_bytes());
    }

    let Some(byte) = console.poll_byte() else {
        // Nothing available this iteration.
        return;
    };

    match byte {
        b'\n' | b'\r' => {
            console.write(b"\n");
            match parse_line(line.as_bytes()) {
                ParsedLine::Delay(ms) => send_or_drop(commands, ms, "command").await,
                ParsedLine::BadArgument => console.write(BAD_ARGUMENT_TEXT),
                ParsedLine::Ignored => {}
            }
            line.clear();
        }
        byte => {
            line.push(byte);
            console.write(&[byte]);
        }
    }
}

#[embassy_executor::task]
pub async fn shell_task(console: StdConsole, commands: CommandSender, reports: ReportReceiver) {
    info!("Console task started");
    let mut console = console;
    let mut line = LineBuffer::new();
    loop {
        shell_cycle(&mut console, &mut line, commands, reports).await;
    }
}
