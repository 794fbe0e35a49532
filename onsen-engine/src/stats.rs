//! Per-discipline training projections.
use serde::{Deserialize, Serialize};

use crate::constants::STAT_REVISION_THRESHOLD;
use crate::snapshot::{ParamDelta, TurnSnapshot};
use crate::training::Discipline;

/// Converts a raw attribute value to its real value before summation.
pub trait StatReviser {
    fn revise(&self, value: i32) -> i32;
}

impl<F> StatReviser for F
where
    F: Fn(i32) -> i32,
{
    fn revise(&self, value: i32) -> i32 {
        self(value)
    }
}

/// Values above 1200 are transmitted at half scale; restore them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviseOver1200;

impl StatReviser for ReviseOver1200 {
    fn revise(&self, value: i32) -> i32 {
        if value > STAT_REVISION_THRESHOLD {
            value.saturating_mul(2).saturating_sub(STAT_REVISION_THRESHOLD)
        } else {
            value
        }
    }
}

/// Apply a reviser to all five attributes.
#[must_use]
pub fn revise_all(values: [i32; 5], reviser: &dyn StatReviser) -> [i32; 5] {
    values.map(|v| reviser.revise(v))
}

/// Projected outcome of training one discipline this turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainStats {
    pub five_value_gain: [i32; 5],
    pub vital_gain: i32,
    pub pt_gain: i32,
    pub failure_rate: u32,
}

impl TrainStats {
    /// Sum of revised attribute gains.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.five_value_gain.iter().sum()
    }
}

#[derive(Debug, Default)]
struct ParamTotals {
    attributes: [i32; 5],
    vital: i32,
    pt: i32,
}

impl ParamTotals {
    fn add(&mut self, delta: ParamDelta) {
        if let Some(idx) = delta.attribute_index() {
            self.attributes[idx] += delta.value;
        } else if delta.is_vital() {
            self.vital += delta.value;
        } else if delta.is_skill_point() {
            self.pt += delta.value;
        }
    }
}

/// Project a discipline's gains from the home commands and scenario bonuses.
#[must_use]
pub fn project_train_stats(
    snapshot: &TurnSnapshot,
    discipline: Discipline,
    reviser: &dyn StatReviser,
) -> TrainStats {
    let chara = &snapshot.chara_info;
    let mut totals = ParamTotals::default();
    let mut failure_rate = 0;
    let mut seen_command = false;

    for command in snapshot
        .commands()
        .iter()
        .filter(|c| Discipline::from_command_id(c.command_id) == Some(discipline))
    {
        if !seen_command {
            failure_rate = command.failure_rate;
            seen_command = true;
        }
        for delta in &command.params_inc_dec_info_array {
            totals.add(*delta);
        }
    }

    let mut vital_gain = totals.vital;
    if chara.vital + vital_gain > chara.max_vital {
        vital_gain = chara.max_vital - chara.vital;
    }
    if vital_gain < -chara.vital {
        vital_gain = -chara.vital;
    }

    let bonus = snapshot
        .onsen_data_set
        .as_ref()
        .and_then(|d| d.command_info_array.as_ref())
        .and_then(|commands| {
            commands.iter().find(|c| {
                c.command_id == discipline.command_id()
                    || c.command_id == discipline.summer_command_id()
            })
        });
    if let Some(bonus) = bonus {
        for delta in &bonus.params_inc_dec_info_array {
            if delta.is_skill_point() {
                totals.pt += delta.value;
            } else if let Some(idx) = delta.attribute_index() {
                totals.attributes[idx] += delta.value;
            }
        }
    }

    let current = chara.attributes();
    let mut five_value_gain = [0; 5];
    for (j, gain) in five_value_gain.iter_mut().enumerate() {
        *gain = reviser.revise(current[j] + totals.attributes[j]) - reviser.revise(current[j]);
    }

    TrainStats {
        five_value_gain,
        vital_gain,
        pt_gain: totals.pt,
        failure_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{CharaInfo, CommandInfo, HomeInfo, OnsenDataSet, ScenarioCommandInfo};

    fn delta(target_type: u32, value: i32) -> ParamDelta {
        ParamDelta { target_type, value }
    }

    fn snapshot_with(commands: Vec<CommandInfo>, bonus: Vec<ScenarioCommandInfo>) -> TurnSnapshot {
        TurnSnapshot {
            chara_info: CharaInfo {
                turn: 5,
                playing_state: 1,
                speed: 1190,
                stamina: 300,
                vital: 40,
                max_vital: 100,
                ..CharaInfo::default()
            },
            home_info: HomeInfo {
                command_info_array: Some(commands),
            },
            onsen_data_set: Some(OnsenDataSet {
                command_info_array: Some(bonus),
                ..OnsenDataSet::default()
            }),
            ..TurnSnapshot::default()
        }
    }

    #[test]
    fn revise_over_1200_restores_half_scale() {
        let reviser = ReviseOver1200;
        assert_eq!(reviser.revise(1000), 1000);
        assert_eq!(reviser.revise(1200), 1200);
        assert_eq!(reviser.revise(1250), 1300);
    }

    #[test]
    fn closures_are_revisers() {
        let doubled = |v: i32| v * 2;
        assert_eq!(revise_all([1, 2, 3, 4, 5], &doubled), [2, 4, 6, 8, 10]);
    }

    #[test]
    fn gains_cross_revision_threshold() {
        let commands = vec![CommandInfo {
            command_id: 101,
            failure_rate: 12,
            params_inc_dec_info_array: vec![
                delta(1, 20),
                delta(2, 5),
                delta(10, -25),
                delta(30, 4),
            ],
            ..CommandInfo::default()
        }];
        let bonus = vec![ScenarioCommandInfo {
            command_id: 101,
            params_inc_dec_info_array: vec![delta(1, 2), delta(30, 3)],
        }];
        let snapshot = snapshot_with(commands, bonus);
        let stats = project_train_stats(&snapshot, Discipline::Speed, &ReviseOver1200);

        // 1190 + 22 = 1212 revises to 1224
        assert_eq!(stats.five_value_gain, [34, 5, 0, 0, 0]);
        assert_eq!(stats.vital_gain, -25);
        assert_eq!(stats.pt_gain, 7);
        assert_eq!(stats.failure_rate, 12);
        assert_eq!(stats.score(), 39);
    }

    #[test]
    fn vital_gain_is_clamped_to_bar() {
        let commands = vec![
            CommandInfo {
                command_id: 106,
                params_inc_dec_info_array: vec![delta(10, 80)],
                ..CommandInfo::default()
            },
            CommandInfo {
                command_id: 103,
                params_inc_dec_info_array: vec![delta(10, -70)],
                ..CommandInfo::default()
            },
        ];
        let snapshot = snapshot_with(commands, Vec::new());
        let wiz = project_train_stats(&snapshot, Discipline::Wisdom, &ReviseOver1200);
        assert_eq!(wiz.vital_gain, 60);
        let guts = project_train_stats(&snapshot, Discipline::Guts, &ReviseOver1200);
        assert_eq!(guts.vital_gain, -40);
    }

    #[test]
    fn summer_commands_count_for_their_discipline() {
        let commands = vec![CommandInfo {
            command_id: 602,
            params_inc_dec_info_array: vec![delta(2, 15)],
            ..CommandInfo::default()
        }];
        let bonus = vec![ScenarioCommandInfo {
            command_id: 602,
            params_inc_dec_info_array: vec![delta(2, 1)],
        }];
        let snapshot = snapshot_with(commands, bonus);
        let stats = project_train_stats(&snapshot, Discipline::Stamina, &ReviseOver1200);
        assert_eq!(stats.five_value_gain[1], 16);
    }

    #[test]
    fn missing_commands_project_zero() {
        let snapshot = TurnSnapshot::default();
        let stats = project_train_stats(&snapshot, Discipline::Power, &ReviseOver1200);
        assert_eq!(stats, TrainStats::default());
    }
}
