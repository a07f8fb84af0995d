//! Inter-task communication channels
//!
//! This module defines the two Embassy channels connecting the console
//! task and the delay task, one per direction. Channel halves are
//! handed to each task at spawn time; nothing reaches for them through
//! ambient globals.
//!
//! Consumers always poll (`try_receive`), so neither task ever stalls
//! on the other. Producers wait a bounded time for a free slot and
//! then give the message up.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::with_timeout;
use log::warn;

use crate::config::{COMMAND_QUEUE_DEPTH, REPORT_QUEUE_DEPTH, SEND_TIMEOUT};
use crate::types::{DelayMs, Report};

/// Channel for delay requests from the console task to the delay task.
/// Buffer size: 5 (commands may queue faster than the delay task drains them)
pub type CommandChannel = Channel<CriticalSectionRawMutex, DelayMs, COMMAND_QUEUE_DEPTH>;
pub type CommandSender = Sender<'static, CriticalSectionRawMutex, DelayMs, COMMAND_QUEUE_DEPTH>;
pub type CommandReceiver = Receiver<'static, CriticalSectionRawMutex, DelayMs, COMMAND_QUEUE_DEPTH>;

/// Channel for confirmations from the delay task back to the console task.
/// Buffer size: 5
pub type ReportChannel = Channel<CriticalSectionRawMutex, Report, REPORT_QUEUE_DEPTH>;
pub type ReportSender = Sender<'static, CriticalSectionRawMutex, Report, REPORT_QUEUE_DEPTH>;
pub type ReportReceiver = Receiver<'static, CriticalSectionRawMutex, Report, REPORT_QUEUE_DEPTH>;

/// Enqueue with a bounded wait.
///
/// A channel that stays full past [`SEND_TIMEOUT`] loses the message
/// and the producer carries on. Neither task treats the loss as an
/// error; the queues are low-rate control paths where the newest
/// message is the expendable one.
pub async fn send_or_drop<T, const N: usize>(
    sender: Sender<'_, CriticalSectionRawMutex, T, N>,
    message: T,
    what: &str,
) {
    if with_timeout(SEND_TIMEOUT, sender.send(message)).await.is_err() {
        warn!("{} channel full, dropping message", what);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_time::Instant;

    #[test]
    fn capacity_is_never_exceeded() {
        static CHANNEL: CommandChannel = CommandChannel::new();
        for n in 0..COMMAND_QUEUE_DEPTH {
            CHANNEL.try_send(n as u32).unwrap();
        }
        assert!(CHANNEL.try_send(99).is_err());
        assert_eq!(CHANNEL.len(), COMMAND_QUEUE_DEPTH);
        // FIFO order survives the rejected send.
        assert_eq!(CHANNEL.try_receive(), Ok(0));
    }

    #[test]
    fn full_channel_drops_newest_after_bounded_wait() {
        static CHANNEL: CommandChannel = CommandChannel::new();
        for n in 0..COMMAND_QUEUE_DEPTH {
            CHANNEL.try_send(n as u32).unwrap();
        }

        let start = Instant::now();
        block_on(send_or_drop(CHANNEL.sender(), 99, "command"));
        assert!(start.elapsed() >= SEND_TIMEOUT);

        let mut drained = Vec::new();
        while let Ok(value) = CHANNEL.try_receive() {
            drained.push(value);
        }
        assert_eq!(drained, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn send_completes_immediately_with_free_slots() {
        static CHANNEL: ReportChannel = ReportChannel::new();
        block_on(send_or_drop(CHANNEL.sender(), Report::delayed_by(5), "report"));
        assert_eq!(CHANNEL.try_receive().unwrap().as_str(), "Delayed by: 5");
    }
}
