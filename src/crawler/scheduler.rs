//! Politeness pacing between consecutive fetches
//!
//! A single run fetches sequentially, so the scheduler only has to remember
//! when the previous fetch started and sleep out the remainder of the
//! configured delay. The sleep races the run's cancellation token.

use crate::ReconError;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Enforces a minimum delay between fetches of one run
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Minimum time between the starts of two fetches
    delay: Duration,

    /// When the previous fetch started
    last_fetch: Option<Instant>,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `delay` - The politeness delay; zero disables pacing
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_fetch: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records that a fetch is starting now
    pub fn record_fetch(&mut self) {
        self.last_fetch = Some(Instant::now());
    }

    /// Time left before the next fetch may start
    pub fn remaining(&self) -> Duration {
        match self.last_fetch {
            Some(last) => self.delay.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Waits until the next fetch may start
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The delay has elapsed
    /// * `Err(ReconError::Cancelled)` - The token fired while waiting
    pub async fn wait_turn(&self, cancel: &CancellationToken) -> Result<(), ReconError> {
        if cancel.is_cancelled() {
            return Err(ReconError::Cancelled);
        }

        let remaining = self.remaining();
        if remaining.is_zero() {
            return Ok(());
        }

        tracing::trace!("Waiting {:?} before next fetch", remaining);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ReconError::Cancelled),
            _ = tokio::time::sleep(remaining) => Ok(()),
        }
    }
}
