//! Hidden training level progression.
//!
//! Every discipline carries a level (1..=5) and a sub-counter that fills up
//! with qualifying turns. The game only exposes the level during normal
//! training, so the counter has to be predicted turn by turn.
use serde::{Deserialize, Serialize};

use crate::constants::{
    BLACKOUT_WINDOWS, COMMAND_GUTS, COMMAND_POWER, COMMAND_SPEED, COMMAND_STAMINA,
    COMMAND_WISDOM, FIRST_TURN, MILESTONE_TURNS, SUMMER_COMMAND_GUTS, SUMMER_COMMAND_POWER,
    SUMMER_COMMAND_SPEED, SUMMER_COMMAND_STAMINA, SUMMER_COMMAND_WISDOM, TRAIN_COUNTER_THRESHOLD,
    TRAIN_LEVEL_MAX, TRAIN_LEVEL_MIN,
};
use crate::error::RulesError;

/// One of the five trainable attribute categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    Speed,
    Stamina,
    Power,
    Guts,
    Wisdom,
}

impl Discipline {
    /// All disciplines in attribute order.
    pub const ALL: [Self; 5] = [
        Self::Speed,
        Self::Stamina,
        Self::Power,
        Self::Guts,
        Self::Wisdom,
    ];

    /// Position in attribute vectors.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Speed => 0,
            Self::Stamina => 1,
            Self::Power => 2,
            Self::Guts => 3,
            Self::Wisdom => 4,
        }
    }

    /// Regular command id; training level ground truth is keyed by it.
    #[must_use]
    pub const fn command_id(self) -> u32 {
        match self {
            Self::Speed => COMMAND_SPEED,
            Self::Stamina => COMMAND_STAMINA,
            Self::Power => COMMAND_POWER,
            Self::Guts => COMMAND_GUTS,
            Self::Wisdom => COMMAND_WISDOM,
        }
    }

    /// Command id of the summer camp variant.
    #[must_use]
    pub const fn summer_command_id(self) -> u32 {
        match self {
            Self::Speed => SUMMER_COMMAND_SPEED,
            Self::Stamina => SUMMER_COMMAND_STAMINA,
            Self::Power => SUMMER_COMMAND_POWER,
            Self::Guts => SUMMER_COMMAND_GUTS,
            Self::Wisdom => SUMMER_COMMAND_WISDOM,
        }
    }

    /// Resolve either a regular or summer camp command id.
    #[must_use]
    pub fn from_command_id(command_id: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.command_id() == command_id || d.summer_command_id() == command_id)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Stamina => "stamina",
            Self::Power => "power",
            Self::Guts => "guts",
            Self::Wisdom => "wisdom",
        }
    }
}

/// Level and sub-counter of one discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainLevel {
    pub level: u8,
    pub counter: u8,
}

impl TrainLevel {
    /// Session baseline.
    pub const BASELINE: Self = Self {
        level: TRAIN_LEVEL_MIN,
        counter: 0,
    };

    /// Ground-truth level with an unknown counter.
    #[must_use]
    pub const fn reported(level: u8) -> Self {
        Self { level, counter: 0 }
    }
}

impl Default for TrainLevel {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// The training the player confirmed on a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    pub discipline: Discipline,
    pub failed: bool,
}

/// What happened on the previous turn, as far as one discipline is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreviousTurn {
    pub level: TrainLevel,
    pub chose_this: bool,
    pub failed: bool,
}

impl PreviousTurn {
    /// View of the previous turn from `discipline`'s perspective.
    #[must_use]
    pub fn for_discipline(
        discipline: Discipline,
        level: TrainLevel,
        choice: Option<ChoiceOutcome>,
    ) -> Self {
        let chosen = choice.filter(|c| c.discipline == discipline);
        Self {
            level,
            chose_this: chosen.is_some(),
            failed: chosen.is_some_and(|c| c.failed),
        }
    }
}

/// Scenario calendar driving progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRules {
    #[serde(default = "ProgressionRules::default_milestones")]
    pub milestones: Vec<u32>,
    #[serde(default = "ProgressionRules::default_blackout_windows")]
    pub blackout_windows: Vec<(u32, u32)>,
    #[serde(default = "ProgressionRules::default_counter_threshold")]
    pub counter_threshold: u8,
    #[serde(default = "ProgressionRules::default_max_level")]
    pub max_level: u8,
}

impl ProgressionRules {
    fn default_milestones() -> Vec<u32> {
        MILESTONE_TURNS.to_vec()
    }

    fn default_blackout_windows() -> Vec<(u32, u32)> {
        BLACKOUT_WINDOWS.to_vec()
    }

    const fn default_counter_threshold() -> u8 {
        TRAIN_COUNTER_THRESHOLD
    }

    const fn default_max_level() -> u8 {
        TRAIN_LEVEL_MAX
    }

    /// Load rules from JSON; missing fields take the scenario defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the rules are inconsistent.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let rules: Self =
            serde_json::from_str(json).map_err(|err| RulesError::Parse(err.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.counter_threshold == 0 {
            return Err(RulesError::CounterThreshold);
        }
        if self.max_level < TRAIN_LEVEL_MIN {
            return Err(RulesError::LevelCap {
                min: TRAIN_LEVEL_MIN,
                max: self.max_level,
            });
        }
        if let Some(&turn) = self.milestones.iter().find(|&&t| t <= FIRST_TURN) {
            return Err(RulesError::MilestoneTurn { turn });
        }
        if let Some(&(start, end)) = self.blackout_windows.iter().find(|(s, e)| s > e) {
            return Err(RulesError::WindowBounds { start, end });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_milestone(&self, turn: u32) -> bool {
        self.milestones.contains(&turn)
    }

    #[must_use]
    pub fn in_blackout(&self, turn: u32) -> bool {
        self.blackout_windows
            .iter()
            .any(|&(start, end)| (start..=end).contains(&turn))
    }

    /// Predict the discipline's level for `current_turn`.
    ///
    /// A milestone bump applies even when the previous turn sits in a
    /// blackout window: the window only suppresses credit from play.
    #[must_use]
    pub fn advance(&self, previous: PreviousTurn, current_turn: u32) -> TrainLevel {
        if current_turn <= FIRST_TURN {
            return TrainLevel::BASELINE;
        }

        let mut level = previous.level.level;
        let mut counter = previous.level.counter;
        let previous_turn = current_turn - 1;

        if previous.chose_this && !previous.failed && !self.in_blackout(previous_turn) {
            counter = counter.saturating_add(1);
        }
        self.carry(&mut level, &mut counter);

        if self.is_milestone(current_turn) {
            counter = counter.saturating_add(self.counter_threshold);
        }
        self.carry(&mut level, &mut counter);

        if level >= self.max_level {
            return TrainLevel {
                level: self.max_level,
                counter: 0,
            };
        }
        TrainLevel { level, counter }
    }

    fn carry(&self, level: &mut u8, counter: &mut u8) {
        while *counter >= self.counter_threshold {
            *counter -= self.counter_threshold;
            *level = level.saturating_add(1);
        }
    }
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            milestones: Self::default_milestones(),
            blackout_windows: Self::default_blackout_windows(),
            counter_threshold: Self::default_counter_threshold(),
            max_level: Self::default_max_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prev(level: u8, counter: u8, chose_this: bool, failed: bool) -> PreviousTurn {
        PreviousTurn {
            level: TrainLevel { level, counter },
            chose_this,
            failed,
        }
    }

    #[test]
    fn first_turn_is_baseline() {
        let rules = ProgressionRules::default();
        assert_eq!(rules.advance(prev(4, 3, true, false), 1), TrainLevel::BASELINE);
    }

    #[test]
    fn chosen_training_increments_and_carries() {
        let rules = ProgressionRules::default();
        assert_eq!(
            rules.advance(prev(1, 2, true, false), 10),
            TrainLevel {
                level: 1,
                counter: 3
            }
        );
        assert_eq!(
            rules.advance(prev(1, 3, true, false), 10),
            TrainLevel {
                level: 2,
                counter: 0
            }
        );
    }

    #[test]
    fn failure_or_other_choice_earns_nothing() {
        let rules = ProgressionRules::default();
        let level = TrainLevel {
            level: 2,
            counter: 1,
        };
        assert_eq!(rules.advance(prev(2, 1, true, true), 10), level);
        assert_eq!(rules.advance(prev(2, 1, false, false), 10), level);
    }

    #[test]
    fn blackout_window_suppresses_credit() {
        let rules = ProgressionRules::default();
        for current in [38, 41, 62, 65] {
            assert_eq!(
                rules.advance(prev(2, 1, true, false), current),
                TrainLevel {
                    level: 2,
                    counter: 1
                },
                "turn {current}"
            );
        }
        assert_eq!(
            rules.advance(prev(2, 1, true, false), 42),
            TrainLevel {
                level: 2,
                counter: 2
            }
        );
    }

    #[test]
    fn milestone_adds_a_level_with_double_carry() {
        let rules = ProgressionRules::default();
        // 3 + 1 carries once, the scripted bump carries again
        assert_eq!(
            rules.advance(prev(2, 3, true, false), 25),
            TrainLevel {
                level: 3,
                counter: 0
            }
        );
        assert_eq!(
            rules.advance(prev(2, 3, true, false), 37),
            TrainLevel {
                level: 4,
                counter: 0
            }
        );
    }

    #[test]
    fn milestone_applies_without_choice() {
        let rules = ProgressionRules::default();
        assert_eq!(
            rules.advance(prev(1, 2, false, false), 49),
            TrainLevel {
                level: 2,
                counter: 2
            }
        );
    }

    #[test]
    fn max_level_clamps_counter() {
        let rules = ProgressionRules::default();
        assert_eq!(
            rules.advance(prev(4, 3, true, false), 12),
            TrainLevel {
                level: 5,
                counter: 0
            }
        );
        assert_eq!(
            rules.advance(prev(5, 0, true, false), 25),
            TrainLevel {
                level: 5,
                counter: 0
            }
        );
    }

    #[test]
    fn invariants_hold_over_exhaustive_inputs() {
        let rules = ProgressionRules::default();
        for turn in 1..=78 {
            for level in 1..=5 {
                let counters = if level == 5 { 0..=0 } else { 0..=3 };
                for counter in counters {
                    for (chose, failed) in [(true, false), (true, true), (false, false)] {
                        let next = rules.advance(prev(level, counter, chose, failed), turn);
                        assert!((1..=5).contains(&next.level));
                        assert!(next.counter <= 3);
                        assert!(next.level < 5 || next.counter == 0);
                    }
                }
            }
        }
    }

    #[test]
    fn rules_load_and_validate() {
        let rules = ProgressionRules::from_json(r#"{ "milestones": [13] }"#).unwrap();
        assert_eq!(rules.milestones, vec![13]);
        assert_eq!(rules.blackout_windows, BLACKOUT_WINDOWS.to_vec());

        assert_eq!(
            ProgressionRules::from_json(r#"{ "blackout_windows": [[10, 5]] }"#),
            Err(RulesError::WindowBounds { start: 10, end: 5 })
        );
        assert_eq!(
            ProgressionRules::from_json(r#"{ "milestones": [1] }"#),
            Err(RulesError::MilestoneTurn { turn: 1 })
        );
        assert_eq!(
            ProgressionRules::from_json(r#"{ "counter_threshold": 0 }"#),
            Err(RulesError::CounterThreshold)
        );
        assert!(matches!(
            ProgressionRules::from_json("nope"),
            Err(RulesError::Parse(_))
        ));
    }

    #[test]
    fn previous_turn_tracks_only_own_choice() {
        let choice = Some(ChoiceOutcome {
            discipline: Discipline::Guts,
            failed: true,
        });
        let guts = PreviousTurn::for_discipline(Discipline::Guts, TrainLevel::BASELINE, choice);
        assert!(guts.chose_this && guts.failed);
        let wiz = PreviousTurn::for_discipline(Discipline::Wisdom, TrainLevel::BASELINE, choice);
        assert!(!wiz.chose_this && !wiz.failed);
        let none = PreviousTurn::for_discipline(Discipline::Guts, TrainLevel::BASELINE, None);
        assert_eq!(none, PreviousTurn::default());
    }

    #[test]
    fn disciplines_map_both_command_families() {
        assert_eq!(Discipline::from_command_id(105), Some(Discipline::Stamina));
        assert_eq!(Discipline::from_command_id(603), Some(Discipline::Power));
        assert_eq!(Discipline::from_command_id(106), Some(Discipline::Wisdom));
        assert_eq!(Discipline::from_command_id(605), Some(Discipline::Wisdom));
        assert_eq!(Discipline::from_command_id(701), None);
        for (idx, d) in Discipline::ALL.into_iter().enumerate() {
            assert_eq!(d.index(), idx);
        }
    }
}
