//! Delay-control task
//!
//! The self-adjusting periodic side of the loop. Each cycle sleeps the
//! configured interval, then drains at most one pending delay command;
//! a drained value becomes the interval for the next sleep and is
//! confirmed on the report channel. Excess queued commands are handled
//! one per cycle, each with its own confirmation.

use embassy_time::{Duration, Timer};
use log::{debug, info};

use crate::channels::{send_or_drop, CommandReceiver, ReportSender};
use crate::config::INITIAL_DELAY_MS;
use crate::types::{DelayMs, Report};

/// One wake cycle: sleep the current interval, then adopt a pending
/// command if one arrived in the meantime.
///
/// A zero interval is a legal sleep of no duration; the task yields
/// and keeps polling every cycle.
pub async fn wake_cycle(
    interval_ms: &mut DelayMs,
    commands: CommandReceiver,
    reports: ReportSender,
) {
    Timer::after(Duration::from_millis(u64::from(*interval_ms))).await;

    if let Ok(ms) = commands.try_receive() {
        // Takes effect with the next sleep, not the one just finished.
        *interval_ms = ms;
        debug!("Delay updated to {} ms", ms);
        send_or_drop(reports, Report::delayed_by(ms), "report").await;
    }
}

#[embassy_executor::task]
pub async fn delay_control_task(commands: CommandReceiver, reports: ReportSender) {
    info!("Delay control task started");
    let mut interval_ms = INITIAL_DELAY_MS;
    loop {
        wake_cycle(&mut interval_ms, commands, reports).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::{CommandChannel, ReportChannel};
    use embassy_futures::block_on;
    use embassy_time::Instant;

    #[test]
    fn adopts_command_and_confirms_exactly_once() {
        static COMMANDS: CommandChannel = CommandChannel::new();
        static REPORTS: ReportChannel = ReportChannel::new();
        COMMANDS.try_send(100).unwrap();

        let mut interval_ms = 0;
        block_on(wake_cycle(&mut interval_ms, COMMANDS.receiver(), REPORTS.sender()));

        assert_eq!(interval_ms, 100);
        assert_eq!(REPORTS.try_receive().unwrap().as_str(), "Delayed by: 100");
        assert!(REPORTS.try_receive().is_err());
    }

    #[test]
    fn adopted_interval_governs_the_next_sleep() {
        static COMMANDS: CommandChannel = CommandChannel::new();
        static REPORTS: ReportChannel = ReportChannel::new();
        COMMANDS.try_send(100).unwrap();

        let mut interval_ms = 0;
        // Adoption cycle still sleeps the old zero interval.
        block_on(wake_cycle(&mut interval_ms, COMMANDS.receiver(), REPORTS.sender()));
        REPORTS.try_receive().unwrap();

        let start = Instant::now();
        block_on(wake_cycle(&mut interval_ms, COMMANDS.receiver(), REPORTS.sender()));
        assert!(start.elapsed() >= Duration::from_millis(90));
        // No command this cycle, no confirmation.
        assert!(REPORTS.try_receive().is_err());
    }

    #[test]
    fn zero_interval_polls_without_blocking() {
        static COMMANDS: CommandChannel = CommandChannel::new();
        static REPORTS: ReportChannel = ReportChannel::new();

        let mut interval_ms = 0;
        let start = Instant::now();
        for _ in 0..10 {
            block_on(wake_cycle(&mut interval_ms, COMMANDS.receiver(), REPORTS.sender()));
        }
        assert!(start.elapsed() < Duration::from_millis(100));
        assert_eq!(interval_ms, 0);
    }

    #[test]
    fn one_command_drained_per_cycle() {
        static COMMANDS: CommandChannel = CommandChannel::new();
        static REPORTS: ReportChannel = ReportChannel::new();
        COMMANDS.try_send(10).unwrap();
        COMMANDS.try_send(20).unwrap();

        let mut interval_ms = 0;
        block_on(wake_cycle(&mut interval_ms, COMMANDS.receiver(), REPORTS.sender()));
        assert_eq!(interval_ms, 10);
        assert_eq!(REPORTS.try_receive().unwrap().as_str(), "Delayed by: 10");

        block_on(wake_cycle(&mut interval_ms, COMMANDS.receiver(), REPORTS.sender()));
        assert_eq!(interval_ms, 20);
        assert_eq!(REPORTS.try_receive().unwrap().as_str(), "Delayed by: 20");
    }
}
