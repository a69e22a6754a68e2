/// Lifecycle phases of a crawl run
///
/// A run moves `Idle -> Resolving -> Crawling -> Done`. `Failed` is only
/// reachable while the seed is being resolved; `Cancelled` is reachable from
/// any non-terminal phase.
use crate::ReconError;
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlPhase {
    // ===== Active Phases =====
    /// Run has been created but not started
    #[default]
    Idle,

    /// Seed is being fetched and its redirects followed
    Resolving,

    /// Seed resolved; extraction and (optionally) the breadth-first crawl run
    Crawling,

    // ===== Terminal Phases =====
    /// Frontier exhausted or page budget reached
    Done,

    /// Seed could not be fetched
    Failed,

    /// Run was cancelled by the caller
    Cancelled,
}

impl CrawlPhase {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Cancelled)
    }

    /// Returns true if the run is in progress
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Resolving | Self::Crawling)
    }

    /// Returns true if `next` is a legal successor of this phase
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Resolving)
                | (Self::Resolving, Self::Crawling)
                | (Self::Resolving, Self::Failed)
                | (Self::Crawling, Self::Done)
                | (Self::Idle | Self::Resolving | Self::Crawling, Self::Cancelled)
        )
    }

    /// Moves to `next`, rejecting illegal transitions
    pub fn transition(&mut self, next: CrawlPhase) -> Result<(), ReconError> {
        if !self.can_transition_to(next) {
            return Err(ReconError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        tracing::trace!("Crawl phase {} -> {}", self, next);
        *self = next;
        Ok(())
    }

    /// Returns the lowercase name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::Crawling => "crawling",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
