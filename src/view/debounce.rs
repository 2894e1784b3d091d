use std::time::Duration;
use tokio::time::Instant;

/// Trailing-edge debouncer holding at most one pending deadline.
///
/// Each `schedule` replaces the previous deadline, so a burst of input
/// produces a single firing `delay` after the last event.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)arm the timer relative to `now`, discarding any earlier deadline
    pub fn schedule(&mut self, now: Instant) -> Instant {
        let deadline = now + self.delay;
        self.pending = Some(deadline);
        deadline
    }

    /// Drop the pending deadline; returns whether one existed
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the deadline if it has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Resolve once the pending deadline passes; never resolves when idle.
    ///
    /// Meant for `tokio::select!`, where the idle branch simply never wins.
    pub async fn wait(&self) {
        match self.pending {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    }
}
