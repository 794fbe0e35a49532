//! Dig accounting: how much stratum volume a training will remove.
//!
//! All arithmetic is integer floor/ceiling division, truncating the way the
//! game does.
use serde::{Deserialize, Serialize};

use crate::constants::{DIG_BASE_CAPACITY, DIRECTOR_POSITION, REPORTER_POSITION};
use crate::link::link_bonus;
use crate::snapshot::{OnsenDataSet, StratumInfo, TrainingPartner};
use crate::stratum::{StratumType, stratum_type};

/// Base dig power per stratum type, indexed by [`StratumType::code`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigPowerTable([u32; 4]);

impl DigPowerTable {
    #[must_use]
    pub const fn new(sand: u32, soil: u32, rock: u32) -> Self {
        Self([0, sand, soil, rock])
    }

    /// Build the table from the scenario's dig effect list; absent entries are zero.
    #[must_use]
    pub fn from_dataset(dataset: &OnsenDataSet) -> Self {
        Self::new(
            dataset.dig_power(StratumType::Sand.code()),
            dataset.dig_power(StratumType::Soil.code()),
            dataset.dig_power(StratumType::Rock.code()),
        )
    }

    #[must_use]
    pub const fn get(&self, stratum: StratumType) -> u32 {
        self.0[stratum.code() as usize]
    }
}

/// Partners that count toward dig capacity: everyone except the director and reporter NPCs.
#[must_use]
pub fn support_headcount(partners: &[TrainingPartner]) -> u32 {
    let count = partners
        .iter()
        .filter(|p| {
            !p.is_npc || (p.position != DIRECTOR_POSITION && p.position != REPORTER_POSITION)
        })
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Dig capacity of a training before dig power is applied.
#[must_use]
pub const fn base_capacity(headcount: u32) -> u32 {
    DIG_BASE_CAPACITY.saturating_add(headcount)
}

/// Effective dig power for a stratum: table value plus link bonus.
#[must_use]
pub fn dig_power(stratum: &StratumInfo, present: &[u32], table: &DigPowerTable) -> u32 {
    let kind = stratum_type(stratum.stratum_id);
    table.get(kind) + link_bonus(present, kind)
}

/// `floor(base * (100 + power) / 100)`
fn scaled(base: u32, power: u32) -> u32 {
    let value = u64::from(base) * (100 + u64::from(power)) / 100;
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// `ceil(rest / ((100 + power) / 100))`: the base units that exactly exhaust `rest`.
fn base_needed(rest: u32, power: u32) -> u32 {
    let value = (u64::from(rest) * 100).div_ceil(100 + u64::from(power));
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Volume a training removes, spilling into the next stratum when the current one runs out.
///
/// Returns 0 when no stratum has volume left.
#[must_use]
pub fn compute_consumption(
    base_capacity: u32,
    strata: &[StratumInfo],
    present: &[u32],
    table: &DigPowerTable,
) -> u32 {
    let mut live = strata.iter().filter(|s| s.rest_volume > 0);
    let Some(current) = live.next() else {
        return 0;
    };
    let power = dig_power(current, present, table);
    let amount = scaled(base_capacity, power);
    if amount <= current.rest_volume {
        return amount;
    }
    let Some(next) = live.next() else {
        return amount;
    };

    let needed = base_needed(current.rest_volume, power);
    let next_power = dig_power(next, present, table);
    let overflow = scaled(base_capacity.saturating_sub(needed), next_power);
    current.rest_volume.saturating_add(overflow)
}

/// Progress of the active onsen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigProgress {
    pub onsen_id: u32,
    pub remaining_layers: usize,
    pub total_layers: usize,
    pub rest_volume: u32,
}

/// Why a dig projection could not be made, or what it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DigProjection {
    /// Snapshot lacked the onsen block or its strata; nothing is known.
    Unavailable,
    /// The scenario reports no onsen under construction.
    NoActiveOnsen,
    /// The active onsen has no volume left.
    Completed,
    Digging {
        amount: u32,
        remaining_layers: usize,
        total_layers: usize,
        rest_volume: u32,
    },
}

impl DigProjection {
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// Outcome of looking up the active onsen in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigState<'a> {
    Unavailable,
    NoActiveOnsen,
    Active {
        progress: DigProgress,
        strata: &'a [StratumInfo],
    },
}

/// Locate the active onsen and summarize its strata.
#[must_use]
pub fn dig_state(dataset: Option<&OnsenDataSet>) -> DigState<'_> {
    let Some(onsens) = dataset.and_then(|d| d.onsen_info_array.as_ref()) else {
        return DigState::Unavailable;
    };
    let Some(active) = onsens.iter().find(|o| o.is_digging()) else {
        return DigState::NoActiveOnsen;
    };
    let Some(strata) = active.stratum_info_array.as_deref() else {
        return DigState::Unavailable;
    };
    let progress = DigProgress {
        onsen_id: active.onsen_id,
        remaining_layers: strata.iter().filter(|s| s.rest_volume > 0).count(),
        total_layers: strata.len(),
        rest_volume: strata
            .iter()
            .fold(0, |total: u32, s| total.saturating_add(s.rest_volume)),
    };
    DigState::Active { progress, strata }
}

/// Project the dig amount of one training command.
#[must_use]
pub fn project_dig(
    dataset: Option<&OnsenDataSet>,
    partners: &[TrainingPartner],
    present: &[u32],
) -> DigProjection {
    match dig_state(dataset) {
        DigState::Unavailable => DigProjection::Unavailable,
        DigState::NoActiveOnsen => DigProjection::NoActiveOnsen,
        DigState::Active { progress, .. } if progress.remaining_layers == 0 => {
            DigProjection::Completed
        }
        DigState::Active { progress, strata } => {
            let table = dataset.map(DigPowerTable::from_dataset).unwrap_or_default();
            let amount = compute_consumption(
                base_capacity(support_headcount(partners)),
                strata,
                present,
                &table,
            );
            DigProjection::Digging {
                amount,
                remaining_layers: progress.remaining_layers,
                total_layers: progress.total_layers,
                rest_volume: progress.rest_volume,
            }
        }
    }
}
