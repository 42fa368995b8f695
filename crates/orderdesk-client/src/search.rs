//! Search sequencing and debouncing
//!
//! Every search takes a sequence number when it starts. A response is only
//! applied when its number is not lower than the last applied one, so a
//! slow early response can never overwrite a newer result.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Hands out increasing sequence numbers
#[derive(Debug, Default)]
pub struct SearchSequencer {
    issued: AtomicU64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequence number (starts at 1)
    pub fn next(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Tracks the last applied sequence number
#[derive(Debug, Default, Clone, Copy)]
pub struct SequenceGate {
    last_applied: u64,
}

impl SequenceGate {
    /// Admit `seq` if it is not older than the last applied one
    pub fn admit(&mut self, seq: u64) -> bool {
        if seq < self.last_applied {
            return false;
        }
        self.last_applied = seq;
        true
    }

    pub fn last_applied(&self) -> u64 {
        self.last_applied
    }
}

/// Delays work until calls stop arriving for `delay`.
///
/// Each call aborts the previous scheduling task. Once the delay elapses
/// the work runs as its own task, so a later call never cancels a request
/// that is already in flight.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Schedule `work`, replacing anything still waiting
    pub fn schedule<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(work);
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drop whatever is still waiting
    pub fn cancel(&self) {
        if let Some(pending) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }
}
