//! Per-session state: one record per observed turn.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::TrainStats;
use crate::sync::TurnTransition;
use crate::training::{ChoiceOutcome, Discipline, TrainLevel};
use crate::vital::VitalLedger;

/// Everything derived for one turn. Frozen once the session moves past it,
/// except for `choice`, which only the following turn can reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub motivation: u8,
    pub levels: [TrainLevel; 5],
    pub stats: [TrainStats; 5],
    /// Revised attribute values observed on this turn.
    pub attributes: [i32; 5],
    pub vital: i32,
    #[serde(default)]
    pub choice: Option<ChoiceOutcome>,
}

impl TurnRecord {
    #[must_use]
    pub const fn level(&self, discipline: Discipline) -> TrainLevel {
        self.levels[discipline.index()]
    }

    #[must_use]
    pub const fn stats(&self, discipline: Discipline) -> &TrainStats {
        &self.stats[discipline.index()]
    }
}

/// Session store owned by the caller and threaded through every turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    records: BTreeMap<u32, TurnRecord>,
    current_turn: Option<u32>,
    full_session: bool,
    vital: VitalLedger,
    active_onsen: Option<u32>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything and start a fully observed session.
    pub fn reset(&mut self) {
        *self = Self {
            full_session: true,
            ..Self::default()
        };
    }

    /// Apply the lifecycle side of a transition.
    pub fn apply_transition(&mut self, transition: TurnTransition) {
        match transition {
            TurnTransition::Restart => self.reset(),
            TurnTransition::Anomaly { .. } => self.full_session = false,
            TurnTransition::Advance | TurnTransition::Repeat => {}
        }
    }

    /// Store a turn's record and move the turn pointer to it.
    pub fn commit(&mut self, record: TurnRecord) {
        self.current_turn = Some(record.turn);
        self.records.insert(record.turn, record);
    }

    /// Attach the retrospectively known choice to an earlier turn.
    pub fn set_choice(&mut self, turn: u32, choice: Option<ChoiceOutcome>) {
        if let Some(record) = self.records.get_mut(&turn) {
            record.choice = choice;
        }
    }

    /// Remember which onsen is being dug; returns true when it differs from before.
    pub fn observe_onsen(&mut self, onsen_id: Option<u32>) -> bool {
        let Some(id) = onsen_id else {
            return false;
        };
        let discovered = self.active_onsen != Some(id);
        self.active_onsen = Some(id);
        discovered
    }

    #[must_use]
    pub fn record(&self, turn: u32) -> Option<&TurnRecord> {
        self.records.get(&turn)
    }

    /// Records in turn order.
    pub fn records(&self) -> impl Iterator<Item = &TurnRecord> {
        self.records.values()
    }

    #[must_use]
    pub const fn current_turn(&self) -> Option<u32> {
        self.current_turn
    }

    #[must_use]
    pub const fn is_full_session(&self) -> bool {
        self.full_session
    }

    #[must_use]
    pub const fn vital(&self) -> &VitalLedger {
        &self.vital
    }

    pub const fn vital_mut(&mut self) -> &mut VitalLedger {
        &mut self.vital
    }

    #[must_use]
    pub const fn active_onsen(&self) -> Option<u32> {
        self.active_onsen
    }
}
