//! Cancellable timers owned by the App actor
//!
//! Each timer is a spawned task that sleeps and then reports its kind back
//! on a channel. One task lives per slot; rescheduling a slot aborts the
//! previous task. Everything is aborted on teardown.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What fired
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TimerKind {
    /// End of the startup loading screen
    LoadingGate,
    /// Clear the submission result set under this ticket
    ClearResult(u64),
    /// Restore the CV button label
    CvLabelReset,
}

/// Timer identity, independent of payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TimerSlot {
    LoadingGate,
    ClearResult,
    CvLabelReset,
}

impl TimerKind {
    pub fn slot(&self) -> TimerSlot {
        match self {
            TimerKind::LoadingGate => TimerSlot::LoadingGate,
            TimerKind::ClearResult(_) => TimerSlot::ClearResult,
            TimerKind::CvLabelReset => TimerSlot::CvLabelReset,
        }
    }
}

pub struct Timers {
    fired_tx: mpsc::UnboundedSender<TimerKind>,
    handles: HashMap<TimerSlot, JoinHandle<()>>,
}

impl Timers {
    pub fn new(fired_tx: mpsc::UnboundedSender<TimerKind>) -> Self {
        Timers {
            fired_tx,
            handles: HashMap::new(),
        }
    }

    /// Fire `kind` after `delay`, superseding any pending timer in its slot
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        let tx = self.fired_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(kind);
        });

        if let Some(previous) = self.handles.insert(kind.slot(), handle) {
            previous.abort();
        }
    }

    pub fn cancel(&mut self, slot: TimerSlot) {
        if let Some(handle) = self.handles.remove(&slot) {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(tx);
        timers.schedule(TimerKind::ClearResult(1), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().ok(), Some(TimerKind::ClearResult(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_supersedes_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(tx);
        timers.schedule(TimerKind::ClearResult(1), Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(3)).await;
        timers.schedule(TimerKind::ClearResult(2), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(rx.try_recv().ok(), Some(TimerKind::ClearResult(2)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_abort_pending_timers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(tx);
        timers.schedule(TimerKind::LoadingGate, Duration::from_secs(2));
        timers.schedule(TimerKind::CvLabelReset, Duration::from_secs(1));
        timers.cancel(TimerSlot::CvLabelReset);
        drop(timers);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
