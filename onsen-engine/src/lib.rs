//! Onsen Analytics Engine
//!
//! Platform-agnostic turn analytics for the onsen hot-spring training scenario.
//! The crate consumes per-turn snapshots and derives what no single snapshot
//! shows: hidden training level counters, stratum dig consumption across
//! segment boundaries, and session-wide vital expenditure. It performs no I/O.

pub mod analytics;
pub mod choice;
pub mod config;
pub mod constants;
pub mod dig;
pub mod engine;
pub mod error;
pub mod i18n;
pub mod link;
pub mod logger;
pub mod session;
pub mod snapshot;
pub mod stage;
pub mod stats;
pub mod stratum;
pub mod sync;
pub mod training;
pub mod vital;

// Re-export commonly used types
pub use analytics::{CommandProjection, DisciplineAnalytics, TurnAnalytics};
pub use choice::infer_choice;
pub use config::EngineConfig;
pub use dig::{
    DigPowerTable, DigProgress, DigProjection, base_capacity, compute_consumption, project_dig,
    support_headcount,
};
pub use engine::AnalyticsEngine;
pub use error::{ConfigError, LoggerError, RulesError, SnapshotError};
pub use i18n::{Catalog, Diagnostic, Localizer};
pub use link::link_bonus;
pub use logger::{EventLogger, NullEventLogger, StoryEventCounter};
pub use session::{SessionState, TurnRecord};
pub use snapshot::TurnSnapshot;
pub use stage::{Calendar, MonthHalf, Stage};
pub use stats::{ReviseOver1200, StatReviser, TrainStats, project_train_stats};
pub use stratum::{StratumType, stratum_type};
pub use sync::TurnTransition;
pub use training::{ChoiceOutcome, Discipline, PreviousTurn, ProgressionRules, TrainLevel};
pub use vital::VitalLedger;
