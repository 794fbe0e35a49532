//! Centralized scenario constants for onsen analytics.
//!
//! These values reproduce the game-internal tables the engine depends on.

// Message keys ---------------------------------------------------------------
pub(crate) const MSG_WRONG_TURN: &str = "alert.wrong-turn";
pub(crate) const MSG_REPEAT_TURN: &str = "alert.repeat-turn";
pub(crate) const MSG_TRAIN_LEVEL_MISMATCH: &str = "alert.train-level-mismatch";
pub(crate) const MSG_NON_TRAINING_TURN: &str = "alert.non-training-turn";
pub(crate) const MSG_NEW_ONSEN: &str = "alert.new-onsen";

// Session -------------------------------------------------------------------
/// Turn number that opens a session.
pub const FIRST_TURN: u32 = 1;
/// First turn whose vital decrease counts toward the expenditure total.
pub const VITAL_COUNT_FROM_TURN: u32 = 3;
/// Turns per in-game year (two halves per month).
pub const TURNS_PER_YEAR: u32 = 24;

// Playing state & stage ------------------------------------------------------
pub(crate) const PLAYING_STATE_NORMAL: u32 = 1;
pub(crate) const PLAYING_STATE_EVENT: u32 = 5;
pub(crate) const STORY_BUFF_SELECTION: u32 = 400_010_112;
pub(crate) const STORY_TEAM_CARD_EVENT: u32 = 830_241_003;

// Training progression ---------------------------------------------------------
pub const TRAIN_LEVEL_MIN: u8 = 1;
pub const TRAIN_LEVEL_MAX: u8 = 5;
/// Qualifying turns needed to carry one training level.
pub const TRAIN_COUNTER_THRESHOLD: u8 = 4;
/// Turns at which every discipline receives a scripted level bump.
pub const MILESTONE_TURNS: [u32; 3] = [25, 37, 49];
/// Inclusive windows (by previous turn) in which normal play earns no credit.
pub const BLACKOUT_WINDOWS: [(u32, u32); 2] = [(37, 40), (61, 64)];

// Command ids -----------------------------------------------------------------
pub(crate) const COMMAND_SPEED: u32 = 101;
pub(crate) const COMMAND_STAMINA: u32 = 105;
pub(crate) const COMMAND_POWER: u32 = 102;
pub(crate) const COMMAND_GUTS: u32 = 103;
pub(crate) const COMMAND_WISDOM: u32 = 106;
pub(crate) const SUMMER_COMMAND_SPEED: u32 = 601;
pub(crate) const SUMMER_COMMAND_STAMINA: u32 = 602;
pub(crate) const SUMMER_COMMAND_POWER: u32 = 603;
pub(crate) const SUMMER_COMMAND_GUTS: u32 = 604;
pub(crate) const SUMMER_COMMAND_WISDOM: u32 = 605;

// Parameter target types --------------------------------------------------------
pub(crate) const TARGET_ATTRIBUTE_LAST: u32 = 5;
pub(crate) const TARGET_VITAL: u32 = 10;
pub(crate) const TARGET_SKILL_POINT: u32 = 30;

// Stat revision -------------------------------------------------------------------
/// Raw attribute values above this threshold are reported at half scale.
pub const STAT_REVISION_THRESHOLD: i32 = 1200;

// Digging -----------------------------------------------------------------------
/// Onsen state code for the hot spring currently being dug.
pub(crate) const ONSEN_STATE_DIGGING: u32 = 2;
/// Dig capacity every training starts with before partners are counted.
pub const DIG_BASE_CAPACITY: u32 = 25;
/// Position id of the director NPC, never counted as dig headcount.
pub(crate) const DIRECTOR_POSITION: u32 = 102;
/// Position id of the reporter NPC, never counted as dig headcount.
pub(crate) const REPORTER_POSITION: u32 = 103;
/// Percentage added to dig power when a link character is present.
pub const LINK_BONUS_PCT: u32 = 10;

pub(crate) const SAND_STRATUM_IDS: [u32; 4] = [4, 7, 9, 13];
pub(crate) const SOIL_STRATUM_IDS: [u32; 4] = [5, 8, 11, 14];
pub(crate) const ROCK_STRATUM_IDS: [u32; 4] = [6, 10, 12, 15];

// Link identifiers ------------------------------------------------------------------
pub(crate) const TOKAI_TEIO_IDS: [u32; 9] = [
    1003, 10003, 20047, 30003, 30058, 30111, 30140, 30213, 30275,
];
pub(crate) const CHUANG_SHENG_IDS: [u32; 3] = [1080, 10125, 30249];
pub(crate) const MIHONO_BOURBON_IDS: [u32; 8] =
    [1026, 30277, 10032, 20009, 30059, 30066, 30121, 30141];
pub(crate) const KITASAN_BLACK_IDS: [u32; 4] = [1100, 10093, 30156, 30212];

// Display thresholds ----------------------------------------------------------------
/// A turn with this many enabled commands or fewer offers no real training.
pub(crate) const NON_TRAINING_MAX_ENABLED: usize = 1;
