//! Console byte I/O
//!
//! The task loops talk to the console through the [`Console`] trait so
//! they stay independent of the host terminal; the binary plugs in
//! [`StdConsole`], tests plug in a scripted stand-in.

use std::io::{Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::debug;

/// Input bytes buffered between the reader thread and the console task.
const INPUT_BACKLOG: usize = 64;

/// One-byte-per-poll console access.
pub trait Console {
    /// Poll for the next input byte. `None` is the end-of-input
    /// sentinel: nothing is available this iteration.
    fn poll_byte(&mut self) -> Option<u8>;

    /// Write raw bytes to the console output.
    fn write(&mut self, bytes: &[u8]);
}

/// Console backed by the process stdin/stdout.
///
/// Input is pumped by a detached reader thread, so the polling side
/// never blocks; the thread parks on stdin instead. Once stdin closes
/// the thread exits and every later poll reports the sentinel.
pub struct StdConsole {
    input: Receiver<u8>,
}

impl StdConsole {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::sync_channel(INPUT_BACKLOG);
        thread::spawn(move || {
            let mut stdin = std::io::stdin().lock();
            let mut byte = [0u8; 1];
            loop {
                match stdin.read(&mut byte) {
                    // End of input, or the console side is gone.
                    Ok(0) | Err(_) => break,
                    Ok(_) => {
                        if tx.send(byte[0]).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("stdin reader finished");
        });
        Self { input: rx }
    }
}

impl Console for StdConsole {
    fn poll_byte(&mut self) -> Option<u8> {
        match self.input.try_recv() {
            Ok(byte) => Some(byte),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(bytes);
        let _ = stdout.flush();
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}
