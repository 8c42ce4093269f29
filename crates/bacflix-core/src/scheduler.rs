//! Cancelable periodic signals.
//!
//! Periodic work never touches application state directly. Each
//! [`PeriodicTask`] only pushes a [`Signal`] into a channel; the owner of
//! the [`Planner`](crate::Planner) drains the channel and applies the
//! signals on its own thread. Dropping a task (or the whole [`Scheduler`])
//! aborts it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// Something that became due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// One second elapsed for the interval timer.
    TimerTick,
    /// Time to show another quote.
    RotateQuote,
}

/// Handle to a spawned periodic task. Aborts the task on drop.
#[derive(Debug)]
pub struct PeriodicTask {
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Send `signal` on `tx` every `period`, first after one full period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(period: Duration, signal: Signal, tx: mpsc::UnboundedSender<Signal>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticker.tick().await;
                if tx.send(signal).is_err() {
                    // receiver gone
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Stop the task. Idempotent.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Owns the timer tick and the quote rotation.
pub struct Scheduler {
    rx: mpsc::UnboundedReceiver<Signal>,
    timer: Option<PeriodicTask>,
    quotes: Option<PeriodicTask>,
}

impl Scheduler {
    /// Start both periodic tasks.
    pub fn start(tick_period: Duration, quote_period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = PeriodicTask::spawn(tick_period, Signal::TimerTick, tx.clone());
        let quotes = PeriodicTask::spawn(quote_period, Signal::RotateQuote, tx);
        debug!(?tick_period, ?quote_period, "scheduler started");
        Self {
            rx,
            timer: Some(timer),
            quotes: Some(quotes),
        }
    }

    /// Wait for the next due signal. `None` once every task is stopped.
    pub async fn next(&mut self) -> Option<Signal> {
        self.rx.recv().await
    }

    /// Stop every periodic task. Pending signals can still be drained.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.timer.take() {
            task.cancel();
        }
        if let Some(task) = self.quotes.take() {
            task.cancel();
        }
        debug!("scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some() || self.quotes.is_some()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
