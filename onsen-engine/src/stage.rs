//! Screen stage classification and calendar helpers.
use serde::{Deserialize, Serialize};

use crate::constants::{
    PLAYING_STATE_EVENT, PLAYING_STATE_NORMAL, STORY_BUFF_SELECTION, STORY_TEAM_CARD_EVENT,
    TURNS_PER_YEAR,
};
use crate::snapshot::TurnSnapshot;

/// Which command screen a snapshot was captured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing worth analysing (cutscene, race, pending story event).
    Idle,
    /// Regular training turn with no pending events.
    NormalTraining,
    /// Team card event awaiting a decision.
    TeamCardEvent,
    /// Onsen buff selection awaiting a decision.
    BuffSelection,
}

impl Stage {
    #[must_use]
    pub fn classify(snapshot: &TurnSnapshot) -> Self {
        let state = snapshot.chara_info.playing_state;
        if state == PLAYING_STATE_NORMAL && !snapshot.has_unchecked_events() {
            Self::NormalTraining
        } else if state == PLAYING_STATE_EVENT && snapshot.has_pending_story(STORY_BUFF_SELECTION)
        {
            Self::BuffSelection
        } else if state == PLAYING_STATE_EVENT && snapshot.has_pending_story(STORY_TEAM_CARD_EVENT)
        {
            Self::TeamCardEvent
        } else {
            Self::Idle
        }
    }

    /// Ground truth training levels are only trustworthy on this stage.
    #[must_use]
    pub const fn is_normal_training(self) -> bool {
        matches!(self, Self::NormalTraining)
    }
}

/// Which half of the month a turn falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthHalf {
    Early,
    Late,
}

/// In-game date of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub year: u32,
    pub month: u32,
    pub half: MonthHalf,
}

impl Calendar {
    #[must_use]
    pub const fn from_turn(turn: u32) -> Self {
        let index = turn.saturating_sub(1);
        let within_year = index % TURNS_PER_YEAR;
        Self {
            year: index / TURNS_PER_YEAR + 1,
            month: within_year / 2 + 1,
            half: if within_year % 2 == 0 {
                MonthHalf::Early
            } else {
                MonthHalf::Late
            },
        }
    }
}
