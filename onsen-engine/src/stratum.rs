//! Stratum (dig segment) classification.
use serde::{Deserialize, Serialize};

use crate::constants::{ROCK_STRATUM_IDS, SAND_STRATUM_IDS, SOIL_STRATUM_IDS};

/// Category of a stratum; drives dig power and link bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StratumType {
    /// Unknown stratum id; no bonus category.
    #[default]
    None,
    Sand,
    Soil,
    Rock,
}

impl StratumType {
    /// Numeric code used by the game's dig effect table.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Sand => 1,
            Self::Soil => 2,
            Self::Rock => 3,
        }
    }
}

const STRATUM_TABLE: [(&[u32], StratumType); 3] = [
    (&SAND_STRATUM_IDS, StratumType::Sand),
    (&SOIL_STRATUM_IDS, StratumType::Soil),
    (&ROCK_STRATUM_IDS, StratumType::Rock),
];

/// Map a stratum id to its type. Total: unknown ids map to [`StratumType::None`].
#[must_use]
pub fn stratum_type(stratum_id: u32) -> StratumType {
    STRATUM_TABLE
        .iter()
        .find(|(ids, _)| ids.contains(&stratum_id))
        .map_or(StratumType::None, |(_, kind)| *kind)
}
