//! Turn-by-turn analytics driver.
//!
//! [`AnalyticsEngine`] owns the session state and is fed one snapshot at a
//! time. Each call classifies the turn, predicts training levels from the
//! previous record, checks them against whatever ground truth the game shows,
//! projects every command and commits the turn.
use log::{debug, info, warn};

use crate::analytics::{CommandProjection, DisciplineAnalytics, TurnAnalytics};
use crate::choice::infer_choice;
use crate::config::EngineConfig;
use crate::constants::{FIRST_TURN, NON_TRAINING_MAX_ENABLED};
use crate::dig::{DigState, dig_state, project_dig};
use crate::error::ConfigError;
use crate::i18n::{Catalog, Diagnostic, Diagnostics, Localizer};
use crate::logger::EventLogger;
use crate::session::{SessionState, TurnRecord};
use crate::snapshot::TurnSnapshot;
use crate::stage::{Calendar, Stage};
use crate::stats::{ReviseOver1200, StatReviser, TrainStats, project_train_stats, revise_all};
use crate::sync::TurnTransition;
use crate::training::{ChoiceOutcome, Discipline, PreviousTurn, TrainLevel};

/// Stateful engine for a single game session at a time.
pub struct AnalyticsEngine {
    config: EngineConfig,
    session: SessionState,
    reviser: Box<dyn StatReviser>,
    localizer: Box<dyn Localizer>,
    event_logger: Option<Box<dyn EventLogger>>,
}

impl AnalyticsEngine {
    /// Build an engine with the default reviser and the configured locale.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let localizer = Catalog::new(&config.locale);
        Ok(Self {
            config,
            session: SessionState::new(),
            reviser: Box::new(ReviseOver1200),
            localizer: Box::new(localizer),
            event_logger: None,
        })
    }

    #[must_use]
    pub fn with_reviser(mut self, reviser: impl StatReviser + 'static) -> Self {
        self.reviser = Box::new(reviser);
        self
    }

    #[must_use]
    pub fn with_localizer(mut self, localizer: impl Localizer + 'static) -> Self {
        self.localizer = Box::new(localizer);
        self
    }

    #[must_use]
    pub fn with_event_logger(mut self, logger: impl EventLogger + 'static) -> Self {
        self.event_logger = Some(Box::new(logger));
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Drop all session state, as if no snapshot had been seen.
    pub fn reset(&mut self) {
        self.session = SessionState::new();
    }

    /// Process one snapshot.
    pub fn process(&mut self, snapshot: &TurnSnapshot) -> TurnAnalytics {
        let turn = snapshot.turn();
        let transition = TurnTransition::classify(self.session.current_turn(), turn);
        let stage = Stage::classify(snapshot);
        let mut diagnostics = Diagnostics::new();

        // Idle screens never touch session state.
        let idle = stage == Stage::Idle;
        if idle {
            debug!("turn {turn}: idle screen ignored ({transition:?})");
        } else {
            self.session.apply_transition(transition);
            match transition {
                TurnTransition::Restart => info!("session started at turn {turn}"),
                TurnTransition::Anomaly { previous, current } => {
                    warn!("turn sequence broken: previous {previous:?}, current {current}");
                    diagnostics.push(Diagnostic::WrongTurn { previous, current });
                }
                TurnTransition::Advance | TurnTransition::Repeat => {
                    debug!("turn {turn}: {transition:?}, stage {stage:?}");
                }
            }
        }

        let accepted = !idle && !transition.is_repeat() && snapshot.is_normal_play();
        let stats =
            Discipline::ALL.map(|d| project_train_stats(snapshot, d, self.reviser.as_ref()));
        let revised = revise_all(snapshot.chara_info.attributes(), self.reviser.as_ref());

        let (levels, previous_choice) = if accepted {
            let (levels, choice) =
                self.predict_levels(snapshot, stage, revised, &mut diagnostics);
            self.session.commit(TurnRecord {
                turn,
                motivation: snapshot.chara_info.motivation,
                levels,
                stats,
                attributes: revised,
                vital: snapshot.chara_info.vital,
                choice: None,
            });
            self.session.vital_mut().record(turn, snapshot.chara_info.vital);
            self.track_onsen(snapshot, &mut diagnostics);
            (levels, choice)
        } else {
            if !idle {
                debug!(
                    "turn {turn} not committed (playing state {})",
                    snapshot.chara_info.playing_state
                );
                diagnostics.push(Diagnostic::RepeatTurn);
            }
            (self.known_levels(turn), None)
        };

        let mut degraded = snapshot.home_info.command_info_array.is_none();
        let enabled = snapshot.commands().iter().filter(|c| c.is_enabled()).count();
        if accepted && !degraded && enabled <= NON_TRAINING_MAX_ENABLED {
            diagnostics.push(Diagnostic::NonTrainingTurn);
        }

        let commands = self.project_commands(snapshot, &levels, &stats, revised);
        degraded |=
            snapshot.onsen_data_set.is_none() || commands.iter().any(|c| c.dig.is_unavailable());

        let event_perf = if accepted {
            self.feed_event_logger(snapshot, transition)
        } else {
            Vec::new()
        };

        let messages = diagnostics
            .iter()
            .map(|d| d.render(self.localizer.as_ref()))
            .collect();
        let total_attributes: i32 = revised.iter().sum();

        TurnAnalytics {
            turn,
            calendar: Calendar::from_turn(turn),
            stage,
            transition,
            accepted,
            full_session: self.session.is_full_session(),
            motivation: snapshot.chara_info.motivation,
            total_attributes,
            total_with_pt: total_attributes + snapshot.chara_info.skill_point,
            disciplines: Discipline::ALL.map(|discipline| DisciplineAnalytics {
                discipline,
                level: levels[discipline.index()],
                stats: stats[discipline.index()],
            }),
            commands,
            bathing: snapshot
                .onsen_data_set
                .as_ref()
                .and_then(|d| d.bathing_info),
            vital_consumed: self.session.vital().consumed_at(turn),
            previous_choice,
            diagnostics,
            messages,
            event_perf,
            degraded,
        }
    }

    /// Predict every discipline's level for an accepted turn and correct it
    /// against the game's own numbers where they are shown.
    fn predict_levels(
        &mut self,
        snapshot: &TurnSnapshot,
        stage: Stage,
        revised: [i32; 5],
        diagnostics: &mut Diagnostics,
    ) -> ([TrainLevel; 5], Option<ChoiceOutcome>) {
        let turn = snapshot.turn();
        let previous = turn
            .checked_sub(1)
            .and_then(|t| self.session.record(t))
            .cloned();
        let choice = previous
            .as_ref()
            .and_then(|prev| infer_choice(prev, revised, snapshot.last_command));
        if let Some(prev) = &previous {
            debug!("turn {}: inferred choice {choice:?}", prev.turn);
            self.session.set_choice(prev.turn, choice);
        }

        let rules = &self.config.rules;
        let levels = Discipline::ALL.map(|discipline| {
            let before = previous
                .as_ref()
                .map_or(TrainLevel::BASELINE, |r| r.level(discipline));
            let predicted = rules.advance(
                PreviousTurn::for_discipline(discipline, before, choice),
                turn,
            );
            if !stage.is_normal_training() || turn == FIRST_TURN {
                return predicted;
            }
            match snapshot.chara_info.reported_level(discipline.command_id()) {
                Some(reported) if reported != predicted.level => {
                    warn!(
                        "turn {turn}: {} level predicted {}, reported {reported}",
                        discipline.label(),
                        predicted.level
                    );
                    diagnostics.push(Diagnostic::TrainLevelMismatch {
                        discipline,
                        predicted: predicted.level,
                        reported,
                    });
                    TrainLevel::reported(reported)
                }
                _ => predicted,
            }
        });
        (levels, choice)
    }

    /// Levels to show for a turn that is not committed.
    fn known_levels(&self, turn: u32) -> [TrainLevel; 5] {
        self.session
            .record(turn)
            .or_else(|| self.session.current_turn().and_then(|t| self.session.record(t)))
            .map_or([TrainLevel::BASELINE; 5], |r| r.levels)
    }

    fn track_onsen(&mut self, snapshot: &TurnSnapshot, diagnostics: &mut Diagnostics) {
        let DigState::Active { progress, .. } = dig_state(snapshot.onsen_data_set.as_ref()) else {
            return;
        };
        if progress.remaining_layers == 0 {
            return;
        }
        if self.session.observe_onsen(Some(progress.onsen_id)) {
            info!(
                "digging onsen {} ({} layers, {} volume)",
                progress.onsen_id, progress.total_layers, progress.rest_volume
            );
            diagnostics.push(Diagnostic::NewOnsen {
                onsen_id: progress.onsen_id,
            });
        }
    }

    fn project_commands(
        &self,
        snapshot: &TurnSnapshot,
        levels: &[TrainLevel; 5],
        stats: &[TrainStats; 5],
        revised: [i32; 5],
    ) -> Vec<CommandProjection> {
        let chara = &snapshot.chara_info;
        let revised_max = revise_all(chara.max_attributes(), self.reviser.as_ref());
        let present = snapshot.present_ids();
        let dataset = snapshot.onsen_data_set.as_ref();

        let mut projections: Vec<CommandProjection> = snapshot
            .commands()
            .iter()
            .filter_map(|command| {
                let discipline = Discipline::from_command_id(command.command_id)?;
                let idx = discipline.index();
                let projected = &stats[idx];
                Some(CommandProjection {
                    command_id: command.command_id,
                    discipline,
                    enabled: command.is_enabled(),
                    failure_rate: command.failure_rate,
                    level: levels[idx].level,
                    current: revised[idx],
                    to_max: revised_max[idx] - revised[idx],
                    vital_after: chara.vital + projected.vital_gain,
                    dig: project_dig(dataset, &command.training_partners, &present),
                    score: projected.score(),
                    pt_gain: projected.pt_gain,
                    best: false,
                })
            })
            .collect();

        let best = projections
            .iter()
            .filter(|c| c.enabled)
            .map(|c| c.score)
            .max()
            .filter(|&score| score > 0);
        if let Some(best) = best {
            for projection in projections.iter_mut().filter(|c| c.enabled) {
                projection.best = projection.score == best;
            }
        }
        projections
    }

    /// Logger failures never interrupt analytics.
    fn feed_event_logger(
        &mut self,
        snapshot: &TurnSnapshot,
        transition: TurnTransition,
    ) -> Vec<String> {
        let Some(logger) = self.event_logger.as_mut() else {
            return Vec::new();
        };
        if matches!(
            transition,
            TurnTransition::Restart | TurnTransition::Anomaly { .. }
        ) {
            logger.init(snapshot);
        } else if let Err(err) = logger.update(snapshot) {
            debug!("event logger skipped: {err}");
            return Vec::new();
        }
        logger
            .card_event_perf(snapshot.chara_info.scenario_id)
            .unwrap_or_else(|err| {
                debug!("event performance unavailable: {err}");
                Vec::new()
            })
    }
}

impl std::fmt::Debug for AnalyticsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsEngine")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("event_logger", &self.event_logger.is_some())
            .finish_non_exhaustive()
    }
}
