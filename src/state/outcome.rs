//! Lifecycle of one optimization request

/// Result area state for a console.
///
/// Every dispatched request carries a sequence number, and a settlement is
/// applied only when the console is still waiting on that exact sequence.
/// Submitting again supersedes the in-flight request, so its settlement
/// arrives stale and is dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome<T> {
    #[default]
    Idle,
    Pending {
        seq: u64,
    },
    Success(T),
    Failure,
}

impl<T> Outcome<T> {
    /// Enter the pending state for a freshly dispatched request
    pub fn begin(&mut self, seq: u64) {
        *self = Outcome::Pending { seq };
    }

    /// Apply a successful settlement. Returns false when it is stale.
    pub fn settle_success(&mut self, seq: u64, value: T) -> bool {
        if self.awaits(seq) {
            *self = Outcome::Success(value);
            true
        } else {
            false
        }
    }

    /// Apply a failed settlement. Returns false when it is stale.
    pub fn settle_failure(&mut self, seq: u64) -> bool {
        if self.awaits(seq) {
            *self = Outcome::Failure;
            true
        } else {
            false
        }
    }

    fn awaits(&self, seq: u64) -> bool {
        matches!(self, Outcome::Pending { seq: waiting } if *waiting == seq)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_idle() {
        let outcome: Outcome<u32> = Outcome::default();
        assert_eq!(outcome, Outcome::Idle);
        assert!(outcome.success().is_none());
    }

    #[test]
    fn test_begin_then_settle_success() {
        let mut outcome = Outcome::default();
        outcome.begin(1);
        assert!(outcome.is_pending());
        assert!(outcome.settle_success(1, 42));
        assert_eq!(outcome.success(), Some(&42));
    }

    #[test]
    fn test_begin_then_settle_failure() {
        let mut outcome: Outcome<u32> = Outcome::default();
        outcome.begin(1);
        assert!(outcome.settle_failure(1));
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_resubmit_supersedes_previous_request() {
        let mut outcome: Outcome<u32> = Outcome::default();
        outcome.begin(1);
        outcome.begin(2);
        assert_eq!(outcome, Outcome::Pending { seq: 2 });
    }

    #[test]
    fn test_stale_success_is_dropped() {
        let mut outcome = Outcome::default();
        outcome.begin(1);
        outcome.begin(2);
        assert!(!outcome.settle_success(1, 7));
        assert!(outcome.is_pending());
        assert!(outcome.settle_success(2, 9));
        assert_eq!(outcome.success(), Some(&9));
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut outcome = Outcome::default();
        outcome.begin(1);
        outcome.begin(2);
        assert!(!outcome.settle_failure(1));
        assert!(outcome.settle_success(2, 3));
        assert_eq!(outcome.success(), Some(&3));
    }

    #[test]
    fn test_settlement_after_success_is_dropped() {
        let mut outcome = Outcome::default();
        outcome.begin(1);
        assert!(outcome.settle_success(1, 5));
        assert!(!outcome.settle_failure(1));
        assert_eq!(outcome.success(), Some(&5));
    }

    #[test]
    fn test_settlement_while_idle_is_dropped() {
        let mut outcome: Outcome<u32> = Outcome::default();
        assert!(!outcome.settle_success(1, 5));
        assert_eq!(outcome, Outcome::Idle);
    }

    #[test]
    fn test_new_submission_replaces_shown_success() {
        let mut outcome = Outcome::default();
        outcome.begin(1);
        outcome.settle_success(1, 5);
        outcome.begin(2);
        assert!(outcome.is_pending());
        assert!(outcome.success().is_none());
    }
}
