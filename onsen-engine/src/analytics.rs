//! Per-turn analytics produced by the engine.
use serde::{Deserialize, Serialize};

use crate::dig::DigProjection;
use crate::i18n::{Diagnostic, Diagnostics};
use crate::snapshot::BathingInfo;
use crate::stage::{Calendar, Stage};
use crate::stats::TrainStats;
use crate::sync::TurnTransition;
use crate::training::{ChoiceOutcome, Discipline, TrainLevel};

/// Predicted level and projected gains for one discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineAnalytics {
    pub discipline: Discipline,
    pub level: TrainLevel,
    pub stats: TrainStats,
}

/// Projection for one selectable training command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandProjection {
    pub command_id: u32,
    pub discipline: Discipline,
    pub enabled: bool,
    pub failure_rate: u32,
    /// Displayed level: the predicted level of the discipline.
    pub level: u8,
    /// Revised value of the discipline's own attribute.
    pub current: i32,
    /// Revised headroom to the attribute cap.
    pub to_max: i32,
    pub vital_after: i32,
    pub dig: DigProjection,
    pub score: i32,
    pub pt_gain: i32,
    /// Highest score among enabled commands this turn.
    pub best: bool,
}

/// Everything derived for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAnalytics {
    pub turn: u32,
    pub calendar: Calendar,
    pub stage: Stage,
    pub transition: TurnTransition,
    /// False for repeats and non-training screens; nothing was committed.
    pub accepted: bool,
    pub full_session: bool,
    pub motivation: u8,
    pub total_attributes: i32,
    pub total_with_pt: i32,
    pub disciplines: [DisciplineAnalytics; 5],
    pub commands: Vec<CommandProjection>,
    pub bathing: Option<BathingInfo>,
    /// Spent vital so far; hidden before turn 3.
    pub vital_consumed: Option<u32>,
    /// What the player did on the previous turn, when it could be told.
    pub previous_choice: Option<ChoiceOutcome>,
    pub diagnostics: Diagnostics,
    /// `diagnostics` rendered through the configured localizer.
    pub messages: Vec<String>,
    pub event_perf: Vec<String>,
    /// Some optional snapshot block was missing, so zeros may not be genuine.
    pub degraded: bool,
}

impl TurnAnalytics {
    #[must_use]
    pub const fn discipline(&self, discipline: Discipline) -> &DisciplineAnalytics {
        &self.disciplines[discipline.index()]
    }

    /// True when this snapshot broke the turn sequence.
    #[must_use]
    pub fn is_anomaly(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::WrongTurn { .. }))
    }

    /// The best-scoring enabled command, if any.
    #[must_use]
    pub fn best_command(&self) -> Option<&CommandProjection> {
        self.commands.iter().find(|c| c.best)
    }
}
