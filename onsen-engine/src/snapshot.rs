//! Per-turn snapshot data model as delivered by the capture layer.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    ONSEN_STATE_DIGGING, PLAYING_STATE_NORMAL, TARGET_ATTRIBUTE_LAST, TARGET_SKILL_POINT,
    TARGET_VITAL,
};
use crate::error::SnapshotError;

/// Identifiers (character plus attached support cards) present this turn.
pub type PresentIds = SmallVec<[u32; 8]>;

/// A single parameter change predicted for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDelta {
    pub target_type: u32,
    pub value: i32,
}

impl ParamDelta {
    /// Index into the five-attribute vector, when this delta targets an attribute.
    #[must_use]
    pub fn attribute_index(self) -> Option<usize> {
        if (1..=TARGET_ATTRIBUTE_LAST).contains(&self.target_type) {
            usize::try_from(self.target_type - 1).ok()
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_vital(self) -> bool {
        self.target_type == TARGET_VITAL
    }

    #[must_use]
    pub const fn is_skill_point(self) -> bool {
        self.target_type == TARGET_SKILL_POINT
    }
}

/// A partner standing on a training facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrainingPartner {
    pub position: u32,
    #[serde(default)]
    pub is_npc: bool,
    #[serde(default)]
    pub shining: bool,
}

/// A selectable command on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CommandInfo {
    pub command_id: u32,
    #[serde(default)]
    pub is_enable: u32,
    #[serde(default)]
    pub failure_rate: u32,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub training_partners: Vec<TrainingPartner>,
    #[serde(default)]
    pub params_inc_dec_info_array: Vec<ParamDelta>,
}

impl CommandInfo {
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.is_enable == 1
    }
}

/// Ground-truth training level reported by the game for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingLevelInfo {
    pub command_id: u32,
    pub level: u8,
}

/// Support card slot attached to the trainee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportCardSlot {
    pub position: u32,
    pub support_card_id: u32,
}

/// Trainee status block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CharaInfo {
    pub turn: u32,
    #[serde(default)]
    pub scenario_id: u32,
    #[serde(default)]
    pub playing_state: u32,
    #[serde(default)]
    pub card_id: u32,
    #[serde(default)]
    pub chara_id: u32,
    #[serde(default)]
    pub motivation: u8,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub stamina: i32,
    #[serde(default)]
    pub power: i32,
    #[serde(default)]
    pub guts: i32,
    #[serde(default)]
    pub wiz: i32,
    #[serde(default)]
    pub max_speed: i32,
    #[serde(default)]
    pub max_stamina: i32,
    #[serde(default)]
    pub max_power: i32,
    #[serde(default)]
    pub max_guts: i32,
    #[serde(default)]
    pub max_wiz: i32,
    #[serde(default)]
    pub vital: i32,
    #[serde(default)]
    pub max_vital: i32,
    #[serde(default)]
    pub skill_point: i32,
    #[serde(default)]
    pub support_card_array: Vec<SupportCardSlot>,
    #[serde(default)]
    pub training_level_info_array: Vec<TrainingLevelInfo>,
}

impl CharaInfo {
    /// Raw attribute values in discipline order.
    #[must_use]
    pub const fn attributes(&self) -> [i32; 5] {
        [self.speed, self.stamina, self.power, self.guts, self.wiz]
    }

    /// Raw attribute caps in discipline order.
    #[must_use]
    pub const fn max_attributes(&self) -> [i32; 5] {
        [
            self.max_speed,
            self.max_stamina,
            self.max_power,
            self.max_guts,
            self.max_wiz,
        ]
    }

    /// Character id, derived from the card id when the capture omits it.
    #[must_use]
    pub const fn character_id(&self) -> u32 {
        if self.chara_id != 0 {
            self.chara_id
        } else {
            self.card_id / 100
        }
    }

    /// Ground-truth level for a command, if the game reported it.
    #[must_use]
    pub fn reported_level(&self, command_id: u32) -> Option<u8> {
        self.training_level_info_array
            .iter()
            .find(|info| info.command_id == command_id)
            .map(|info| info.level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HomeInfo {
    #[serde(default)]
    pub command_info_array: Option<Vec<CommandInfo>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncheckedEvent {
    pub story_id: u32,
}

/// A single stratum (segment) of an onsen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StratumInfo {
    pub stratum_id: u32,
    pub rest_volume: u32,
}

/// A hot spring and its strata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OnsenInfo {
    #[serde(default)]
    pub onsen_id: u32,
    #[serde(default)]
    pub state: u32,
    #[serde(default)]
    pub stratum_info_array: Option<Vec<StratumInfo>>,
}

impl OnsenInfo {
    #[must_use]
    pub const fn is_digging(&self) -> bool {
        self.state == ONSEN_STATE_DIGGING
    }
}

/// Dig power granted for a stratum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigEffectInfo {
    pub stratum_type: u8,
    pub dig_effect_value: u32,
}

/// Scenario-specific bonus params attached to a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScenarioCommandInfo {
    pub command_id: u32,
    #[serde(default)]
    pub params_inc_dec_info_array: Vec<ParamDelta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BathingInfo {
    #[serde(default)]
    pub ticket_num: u32,
    #[serde(default)]
    pub onsen_effect_remain_count: u32,
    #[serde(default)]
    pub superior_state: u32,
}

/// Onsen scenario block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OnsenDataSet {
    #[serde(default)]
    pub onsen_info_array: Option<Vec<OnsenInfo>>,
    #[serde(default)]
    pub dig_effect_info_array: Option<Vec<DigEffectInfo>>,
    #[serde(default)]
    pub command_info_array: Option<Vec<ScenarioCommandInfo>>,
    #[serde(default)]
    pub bathing_info: Option<BathingInfo>,
}

impl OnsenDataSet {
    /// The onsen currently being dug, if any.
    #[must_use]
    pub fn active_onsen(&self) -> Option<&OnsenInfo> {
        self.onsen_info_array
            .as_ref()?
            .iter()
            .find(|onsen| onsen.is_digging())
    }

    /// Dig power for a stratum type; zero when the table lacks the entry.
    #[must_use]
    pub fn dig_power(&self, stratum_type: u8) -> u32 {
        self.dig_effect_info_array
            .as_ref()
            .and_then(|effects| effects.iter().find(|e| e.stratum_type == stratum_type))
            .map_or(0, |e| e.dig_effect_value)
    }
}

/// Command the capture layer saw the player confirm on the previous turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceReport {
    pub command_id: u32,
    #[serde(default)]
    pub failed: bool,
}

/// Complete per-turn snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TurnSnapshot {
    pub chara_info: CharaInfo,
    #[serde(default)]
    pub home_info: HomeInfo,
    #[serde(default)]
    pub unchecked_event_array: Option<Vec<UncheckedEvent>>,
    #[serde(default)]
    pub onsen_data_set: Option<OnsenDataSet>,
    #[serde(default)]
    pub last_command: Option<ChoiceReport>,
}

impl TurnSnapshot {
    /// Parse a single snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Parse)
    }

    /// Parse a recorded session: either a JSON array or one snapshot per line.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first line that fails to parse.
    pub fn session_from_json(input: &str) -> Result<Vec<Self>, SnapshotError> {
        let trimmed = input.trim_start();
        if trimmed.starts_with('[') {
            return serde_json::from_str(trimmed).map_err(SnapshotError::Parse);
        }
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|source| SnapshotError::Line {
                    line: idx + 1,
                    source,
                })
            })
            .collect()
    }

    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.chara_info.turn
    }

    #[must_use]
    pub const fn is_normal_play(&self) -> bool {
        self.chara_info.playing_state == PLAYING_STATE_NORMAL
    }

    /// Home commands; empty when the capture layer dropped the array.
    #[must_use]
    pub fn commands(&self) -> &[CommandInfo] {
        self.home_info.command_info_array.as_deref().unwrap_or(&[])
    }

    #[must_use]
    pub fn has_pending_story(&self, story_id: u32) -> bool {
        self.unchecked_event_array
            .as_ref()
            .is_some_and(|events| events.iter().any(|e| e.story_id == story_id))
    }

    #[must_use]
    pub fn has_unchecked_events(&self) -> bool {
        self.unchecked_event_array
            .as_ref()
            .is_some_and(|events| !events.is_empty())
    }

    /// Character id plus every attached support card id.
    #[must_use]
    pub fn present_ids(&self) -> PresentIds {
        let mut ids = PresentIds::new();
        ids.push(self.chara_info.character_id());
        ids.extend(
            self.chara_info
                .support_card_array
                .iter()
                .map(|slot| slot.support_card_id),
        );
        ids
    }
}
