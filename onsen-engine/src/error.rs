//! Error types shared across the engine.
use thiserror::Error;

/// Failures while reading recorded snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot json: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid snapshot on line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of an optional event logger call that could not run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoggerError {
    /// The logger never saw a session start (e.g. the tool was opened mid-session).
    #[error("event logger has not been initialized for this session")]
    Uninitialized,
    /// No logger is attached.
    #[error("event logger unavailable")]
    Unavailable,
}

/// Errors raised when progression rule invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("blackout window invalid (start {start} > end {end})")]
    WindowBounds { start: u32, end: u32 },
    #[error("milestone turn {turn} must be after the first turn")]
    MilestoneTurn { turn: u32 },
    #[error("level cap {max} must be at least {min}")]
    LevelCap { min: u8, max: u8 },
    #[error("counter threshold must be positive")]
    CounterThreshold,
    #[error("invalid rules json: {0}")]
    Parse(String),
}

/// Errors raised while loading an engine configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported locale '{0}'")]
    UnknownLocale(String),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("invalid config json: {0}")]
    Parse(String),
}
