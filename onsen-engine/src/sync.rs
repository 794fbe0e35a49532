//! Turn sequencing: decide how an incoming snapshot relates to the session.
use serde::{Deserialize, Serialize};

use crate::constants::FIRST_TURN;

/// Relationship between the recorded current turn and an incoming snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnTransition {
    /// First turn of a session; all state starts over.
    Restart,
    /// The expected next turn.
    Advance,
    /// The same turn delivered again.
    Repeat,
    /// A gap, rewind, or a session picked up mid-way.
    Anomaly { previous: Option<u32>, current: u32 },
}

impl TurnTransition {
    /// Classify `next` against the last recorded turn.
    #[must_use]
    pub fn classify(previous: Option<u32>, next: u32) -> Self {
        if next == FIRST_TURN {
            return Self::Restart;
        }
        match previous {
            Some(prev) if next == prev.saturating_add(1) => Self::Advance,
            Some(prev) if next == prev => Self::Repeat,
            _ => Self::Anomaly {
                previous,
                current: next,
            },
        }
    }

    #[must_use]
    pub const fn is_repeat(self) -> bool {
        matches!(self, Self::Repeat)
    }

    #[must_use]
    pub const fn is_anomaly(self) -> bool {
        matches!(self, Self::Anomaly { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_turn_advances() {
        assert_eq!(TurnTransition::classify(Some(4), 5), TurnTransition::Advance);
    }

    #[test]
    fn same_turn_repeats() {
        assert_eq!(TurnTransition::classify(Some(9), 9), TurnTransition::Repeat);
    }

    #[test]
    fn turn_one_always_restarts() {
        assert_eq!(TurnTransition::classify(None, 1), TurnTransition::Restart);
        assert_eq!(TurnTransition::classify(Some(1), 1), TurnTransition::Restart);
        assert_eq!(TurnTransition::classify(Some(50), 1), TurnTransition::Restart);
    }

    #[test]
    fn gaps_rewinds_and_late_starts_are_anomalies() {
        assert_eq!(
            TurnTransition::classify(Some(4), 7),
            TurnTransition::Anomaly {
                previous: Some(4),
                current: 7
            }
        );
        assert!(TurnTransition::classify(Some(10), 8).is_anomaly());
        assert_eq!(
            TurnTransition::classify(None, 30),
            TurnTransition::Anomaly {
                previous: None,
                current: 30
            }
        );
    }
}
