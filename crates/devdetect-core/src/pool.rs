//! Bounded workset pool.
//!
//! Worksets are pre-allocated once and circulate through a bounded MPMC
//! channel: acquiring receives one, releasing sends it back. The channel
//! makes both operations atomic with respect to concurrent callers, and a
//! blocking receive is exactly the "wait for a free workset" behaviour.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use tracing::warn;

/// Why a workset could not be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AcquireError {
    /// No workset was returned within the timeout.
    Timeout(Duration),
    /// The pool's channel is gone.
    Closed,
}

/// Snapshot of a provider's pool usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    /// Total number of worksets the pool was built with.
    pub capacity: usize,
    /// Worksets currently waiting in the pool.
    pub idle: usize,
    /// Matches currently holding (or waiting for) a workset.
    pub outstanding: usize,
    /// Whether the owning provider has been disposed.
    pub disposed: bool,
}

/// A fixed-size pool of reusable worksets.
pub(crate) struct WorksetPool<W> {
    idle_tx: Sender<W>,
    idle_rx: Receiver<W>,
    capacity: usize,
}

impl<W: Send> WorksetPool<W> {
    /// Build a pool holding `capacity` worksets produced by `factory`.
    pub(crate) fn new(capacity: usize, mut factory: impl FnMut() -> W) -> Self {
        let (idle_tx, idle_rx) = bounded(capacity);
        for _ in 0..capacity {
            // The channel has exactly `capacity` slots and we hold the receiver.
            let _ = idle_tx.try_send(factory());
        }
        Self {
            idle_tx,
            idle_rx,
            capacity,
        }
    }

    /// Take a workset, blocking until one is free or `timeout` elapses.
    pub(crate) fn acquire(&self, timeout: Option<Duration>) -> Result<W, AcquireError> {
        match timeout {
            None => self.idle_rx.recv().map_err(|_| AcquireError::Closed),
            Some(limit) => self.idle_rx.recv_timeout(limit).map_err(|e| match e {
                RecvTimeoutError::Timeout => AcquireError::Timeout(limit),
                RecvTimeoutError::Disconnected => AcquireError::Closed,
            }),
        }
    }

    /// Return a workset to the pool.
    pub(crate) fn release(&self, workset: W) {
        if self.idle_tx.try_send(workset).is_err() {
            // Only reachable if more worksets come back than were handed out.
            warn!(
                capacity = self.capacity,
                "Workset pool is already full; dropping returned workset"
            );
        }
    }

    /// Drop every idle workset, returning how many were freed.
    pub(crate) fn drain(&self) -> usize {
        self.idle_rx.try_iter().count()
    }

    pub(crate) fn idle(&self) -> usize {
        self.idle_rx.len()
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }
}
