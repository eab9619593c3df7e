//! Classification of remote mirror writes.
//!
//! Every local board mutation is followed by a write to the remote document
//! store. Instead of fire-and-forget, the caller receives one of three
//! outcomes and decides what to do with the optimistic local change.

/// Result of mirroring a local mutation to the remote store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The remote store confirmed the write.
    Success,
    /// The request never completed (transport failure). The local change may
    /// be kept; the next full reload reconciles.
    RetryableFailure(String),
    /// The remote store rejected the write. The local change should be
    /// rolled back or the view will silently diverge from durable storage.
    FatalFailure(String),
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WriteOutcome::Success)
    }

    /// Whether the caller should undo the optimistic local change.
    pub fn should_roll_back(&self) -> bool {
        matches!(self, WriteOutcome::FatalFailure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fatal_failures_roll_back() {
        assert!(!WriteOutcome::Success.should_roll_back());
        assert!(!WriteOutcome::RetryableFailure("timeout".into()).should_roll_back());
        assert!(WriteOutcome::FatalFailure("rejected".into()).should_roll_back());
    }
}
