/// Work item state definitions for tracking crawl progress
///
/// Every index section and every profile page walks the same lifecycle:
/// `Pending -> Fetching -> Parsing -> (Accumulated | Skipped)`. A crawler
/// reaches `Done` once its work list is exhausted.
use crate::HoopstatError;
use std::fmt;

/// Represents the current state of a work item in a crawl phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemState {
    // ===== Active States =====
    /// Item is waiting for its turn
    Pending,

    /// Item's page is being requested
    Fetching,

    /// Item's page arrived and is being parsed
    Parsing,

    // ===== Terminal States =====
    /// Item produced output that was added to the buffer
    Accumulated,

    /// Item produced no output (transport failure or rejected page)
    Skipped,

    /// The work list is exhausted
    Done,
}

impl ItemState {
    /// Returns true if this is a terminal state for a single item
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accumulated | Self::Skipped | Self::Done)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: ItemState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Pending, Self::Skipped)
                | (Self::Pending, Self::Done)
                | (Self::Fetching, Self::Parsing)
                | (Self::Fetching, Self::Skipped)
                | (Self::Parsing, Self::Accumulated)
                | (Self::Parsing, Self::Skipped)
                | (Self::Accumulated, Self::Pending)
                | (Self::Skipped, Self::Pending)
                | (Self::Accumulated, Self::Done)
                | (Self::Skipped, Self::Done)
        )
    }

    /// Moves to `next`, failing on an illegal transition
    pub fn advance(self, next: ItemState) -> Result<ItemState, HoopstatError> {
        if self.can_transition_to(next) {
            tracing::trace!("Item state {} -> {}", self, next);
            Ok(next)
        } else {
            Err(HoopstatError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Lowercase name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Accumulated => "accumulated",
            Self::Skipped => "skipped",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!ItemState::Pending.is_terminal());
        assert!(!ItemState::Fetching.is_terminal());
        assert!(!ItemState::Parsing.is_terminal());

        assert!(ItemState::Accumulated.is_terminal());
        assert!(ItemState::Skipped.is_terminal());
        assert!(ItemState::Done.is_terminal());
    }

    #[test]
    fn test_happy_path() {
        let state = ItemState::Pending
            .advance(ItemState::Fetching)
            .and_then(|s| s.advance(ItemState::Parsing))
            .and_then(|s| s.advance(ItemState::Accumulated))
            .and_then(|s| s.advance(ItemState::Pending))
            .and_then(|s| s.advance(ItemState::Done))
            .unwrap();
        assert_eq!(state, ItemState::Done);
    }

    #[test]
    fn test_fetch_failure_skips() {
        let state = ItemState::Pending
            .advance(ItemState::Fetching)
            .and_then(|s| s.advance(ItemState::Skipped))
            .unwrap();
        assert_eq!(state, ItemState::Skipped);
        assert!(state.can_transition_to(ItemState::Pending));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(ItemState::Pending.advance(ItemState::Parsing).is_err());
        assert!(ItemState::Fetching.advance(ItemState::Accumulated).is_err());
        assert!(ItemState::Done.advance(ItemState::Pending).is_err());

        match ItemState::Parsing.advance(ItemState::Fetching) {
            Err(HoopstatError::InvalidTransition { from, to }) => {
                assert_eq!(from, ItemState::Parsing);
                assert_eq!(to, ItemState::Fetching);
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ItemState::Accumulated.to_string(), "accumulated");
        assert_eq!(format!("{}", ItemState::Skipped), "skipped");
    }
}
