//! Delayline - console-driven delay control demo
//!
//! Entry point: materializes the two channels, plugs the host console
//! into the console task and starts both tasks on the Embassy
//! executor. Type `delay <milliseconds>` and the delay task confirms
//! with `Delayed by: <n>`.

use embassy_executor::Executor;
use log::info;
use static_cell::StaticCell;

use delayline::channels::{CommandChannel, ReportChannel};
use delayline::config::{COMMAND_QUEUE_DEPTH, REPORT_QUEUE_DEPTH};
use delayline::console::StdConsole;
use delayline::delay::delay_control_task;
use delayline::shell::shell_task;

static EXECUTOR: StaticCell<Executor> = StaticCell::new();
static COMMAND_CHANNEL: StaticCell<CommandChannel> = StaticCell::new();
static REPORT_CHANNEL: StaticCell<ReportChannel> = StaticCell::new();

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    info!("========================================");
    info!("Delayline v0.1 - Delay Control Demo");
    info!("Command: delay <milliseconds>");
    info!(
        "Queues: {} commands / {} reports",
        COMMAND_QUEUE_DEPTH, REPORT_QUEUE_DEPTH
    );
    info!("========================================");

    // Both channels must exist before either task starts; a failure
    // here aborts without entering the run loop.
    let commands: &'static CommandChannel = COMMAND_CHANNEL.init(CommandChannel::new());
    let reports: &'static ReportChannel = REPORT_CHANNEL.init(ReportChannel::new());

    let console = StdConsole::new();

    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        spawner
            .spawn(shell_task(console, commands.sender(), reports.receiver()))
            .unwrap();
        spawner
            .spawn(delay_control_task(commands.receiver(), reports.sender()))
            .unwrap();
    });
}
