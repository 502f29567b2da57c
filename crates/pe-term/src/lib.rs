//! Background keystroke reader.
//!
//! A [`KeyReader`] polls a [`KeySource`] on its own thread and queues every
//! character it sees. The control loop drains the queue with
//! [`KeyReader::pop_char`] whenever it likes, without ever blocking on input.
//!
//! # Thread Safety
//!
//! The queue is shared by the polling thread and the control loop, so every
//! push and pop goes through a mutex. Stopping is cooperative: the polling
//! thread checks the stop flag once per poll, so shutdown takes at most one
//! poll interval.

mod source;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

pub use source::{KeySource, StdinSource};

/// Returned by [`KeyQueue::pop`] when no character is waiting.
pub const NO_KEY: char = '\0';

/// Keystroke reader errors.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("failed to spawn key reader thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("key source failed: {0}")]
    Source(#[source] std::io::Error),

    #[error("key reader thread panicked")]
    Panicked,
}

/// FIFO of characters shared between threads.
#[derive(Debug, Clone, Default)]
pub struct KeyQueue {
    inner: Arc<Mutex<VecDeque<char>>>,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<char>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, ch: char) {
        self.lock().push_back(ch);
    }

    /// Oldest queued character, or [`NO_KEY`] if there is none.
    pub fn pop(&self) -> char {
        self.lock().pop_front().unwrap_or(NO_KEY)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Polls a key source on a background thread.
///
/// Dropping a running reader stops it.
#[derive(Debug)]
pub struct KeyReader {
    queue: KeyQueue,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<Result<(), ReaderError>>>,
}

impl KeyReader {
    /// Start polling `source`, waiting at most `poll_interval` per poll.
    pub fn start<S: KeySource>(mut source: S, poll_interval: Duration) -> Result<Self, ReaderError> {
        let queue = KeyQueue::new();
        let stop = Arc::new(AtomicBool::new(false));

        let thread_queue = queue.clone();
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("key-reader".to_string())
            .spawn(move || {
                tracing::debug!(?poll_interval, "key reader started");
                while !thread_stop.load(Ordering::Acquire) {
                    match source.poll_key(poll_interval) {
                        Ok(Some(ch)) => thread_queue.push(ch),
                        Ok(None) => {}
                        Err(err) => {
                            tracing::warn!(error = %err, "key source failed");
                            return Err(ReaderError::Source(err));
                        }
                    }
                }
                tracing::debug!("key reader stopped");
                Ok(())
            })
            .map_err(ReaderError::Spawn)?;

        Ok(Self {
            queue,
            stop,
            handle: Some(handle),
        })
    }

    /// Ask the polling thread to finish and wait for it.
    ///
    /// Calling this more than once is harmless.
    pub fn stop(&mut self) -> Result<(), ReaderError> {
        self.stop.store(true, Ordering::Release);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| ReaderError::Panicked)?,
            None => Ok(()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Queue a character as if it had been typed.
    pub fn push_char(&self, ch: char) {
        self.queue.push(ch);
    }

    /// Oldest typed character, or [`NO_KEY`].
    pub fn pop_char(&self) -> char {
        self.queue.pop()
    }

    /// Handle to the shared queue.
    pub fn queue(&self) -> KeyQueue {
        self.queue.clone()
    }
}

impl Drop for KeyReader {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::warn!(error = %err, "key reader did not stop cleanly");
        }
    }
}
