//! Link (synergy) bonuses between present characters and stratum types.
use crate::constants::{
    CHUANG_SHENG_IDS, KITASAN_BLACK_IDS, LINK_BONUS_PCT, MIHONO_BOURBON_IDS, TOKAI_TEIO_IDS,
};
use crate::stratum::StratumType;

/// Each entry grants the bonus for its stratum type when any id is present.
/// Soil has two alternative sets; either satisfies it.
const LINK_TABLE: [(StratumType, &[u32]); 4] = [
    (StratumType::Sand, &TOKAI_TEIO_IDS),
    (StratumType::Soil, &CHUANG_SHENG_IDS),
    (StratumType::Soil, &MIHONO_BOURBON_IDS),
    (StratumType::Rock, &KITASAN_BLACK_IDS),
];

/// Dig power percentage granted by link characters for a stratum type.
#[must_use]
pub fn link_bonus(present: &[u32], stratum: StratumType) -> u32 {
    let linked = LINK_TABLE
        .iter()
        .filter(|(kind, _)| *kind == stratum)
        .any(|(_, ids)| present.iter().any(|id| ids.contains(id)));
    if linked { LINK_BONUS_PCT } else { 0 }
}
