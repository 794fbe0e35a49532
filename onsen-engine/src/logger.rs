//! Contract for the optional per-session event logger.
use crate::error::LoggerError;
use crate::snapshot::TurnSnapshot;

/// Records story events across a session and reports per-card event performance.
///
/// Every call is fallible: a logger that missed the session start returns
/// [`LoggerError::Uninitialized`] and the engine carries on without its output.
pub trait EventLogger {
    /// Start a new session from its first snapshot.
    fn init(&mut self, snapshot: &TurnSnapshot);

    /// Feed a later snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the logger was never initialized or cannot run.
    fn update(&mut self, snapshot: &TurnSnapshot) -> Result<(), LoggerError>;

    /// Display rows describing support-card event performance so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the logger was never initialized or cannot run.
    fn card_event_perf(&self, _scenario_id: u32) -> Result<Vec<String>, LoggerError> {
        Ok(Vec::new())
    }
}

/// Logger used when none is attached; every call reports `Unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventLogger;

impl EventLogger for NullEventLogger {
    fn init(&mut self, _snapshot: &TurnSnapshot) {}

    fn update(&mut self, _snapshot: &TurnSnapshot) -> Result<(), LoggerError> {
        Err(LoggerError::Unavailable)
    }

    fn card_event_perf(&self, _scenario_id: u32) -> Result<Vec<String>, LoggerError> {
        Err(LoggerError::Unavailable)
    }
}

/// Counts story events per session; enough to show the contract end to end.
#[derive(Debug, Default, Clone)]
pub struct StoryEventCounter {
    started: bool,
    events_seen: u32,
    turns_seen: u32,
}

impl StoryEventCounter {
    #[must_use]
    pub const fn events_seen(&self) -> u32 {
        self.events_seen
    }
}

impl EventLogger for StoryEventCounter {
    fn init(&mut self, snapshot: &TurnSnapshot) {
        *self = Self {
            started: true,
            ..Self::default()
        };
        self.observe(snapshot);
    }

    fn update(&mut self, snapshot: &TurnSnapshot) -> Result<(), LoggerError> {
        if !self.started {
            return Err(LoggerError::Uninitialized);
        }
        self.observe(snapshot);
        Ok(())
    }

    fn card_event_perf(&self, scenario_id: u32) -> Result<Vec<String>, LoggerError> {
        if !self.started {
            return Err(LoggerError::Uninitialized);
        }
        Ok(vec![format!(
            "scenario {scenario_id}: {} events over {} turns",
            self.events_seen, self.turns_seen
        )])
    }
}

impl StoryEventCounter {
    fn observe(&mut self, snapshot: &TurnSnapshot) {
        self.turns_seen += 1;
        let pending = snapshot.unchecked_event_array.as_ref().map_or(0, Vec::len);
        self.events_seen += u32::try_from(pending).unwrap_or(u32::MAX);
    }
}
