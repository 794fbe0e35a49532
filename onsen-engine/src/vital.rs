//! Session-wide vital expenditure ledger.
use serde::{Deserialize, Serialize};

use crate::constants::{FIRST_TURN, VITAL_COUNT_FROM_TURN};

/// Accumulates every vital decrease from turn 3 on; gains are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalLedger {
    last_vital: i32,
    consumed: u32,
}

impl VitalLedger {
    /// Record the vital observed on an accepted turn.
    pub fn record(&mut self, turn: u32, vital: i32) {
        if turn == FIRST_TURN {
            self.consumed = 0;
        } else if turn >= VITAL_COUNT_FROM_TURN && vital < self.last_vital {
            let spent = u32::try_from(self.last_vital - vital).unwrap_or(0);
            self.consumed = self.consumed.saturating_add(spent);
        }
        self.last_vital = vital;
    }

    /// Total spent so far.
    #[must_use]
    pub const fn consumed(&self) -> u32 {
        self.consumed
    }

    /// Total spent, or `None` while the turn is too early to count.
    #[must_use]
    pub const fn consumed_at(&self, turn: u32) -> Option<u32> {
        if turn >= VITAL_COUNT_FROM_TURN {
            Some(self.consumed)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn last_vital(&self) -> i32 {
        self.last_vital
    }
}
