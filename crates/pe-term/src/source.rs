//! Where keystrokes come from.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// A source of typed characters that can be polled without blocking forever.
pub trait KeySource: Send + 'static {
    /// Wait up to `timeout` for the next character.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<char>>;
}

/// Characters typed on standard input.
///
/// Reading stdin blocks, so a detached forwarding thread does the reading
/// and hands characters over a channel. The terminal stays in its normal
/// line-buffered mode; characters arrive once a line is entered.
#[derive(Debug)]
pub struct StdinSource {
    rx: Receiver<char>,
}

impl StdinSource {
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-forwarder".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                let mut handle = stdin.lock();
                let mut line = String::new();
                loop {
                    line.clear();
                    match handle.read_line(&mut line) {
                        Ok(0) => break,
                        Ok(_) => {
                            for ch in line.chars() {
                                if tx.send(ch).is_err() {
                                    return;
                                }
                            }
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "stopped reading stdin");
                            break;
                        }
                    }
                }
                tracing::debug!("stdin closed");
            })?;
        Ok(Self { rx })
    }
}

impl KeySource for StdinSource {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<char>> {
        match self.rx.recv_timeout(timeout) {
            Ok(ch) => Ok(Some(ch)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            // stdin hit EOF; keep idling so the reader still stops on request.
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                Ok(None)
            }
        }
    }
}
