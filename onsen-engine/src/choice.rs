//! Retrospective detection of the training chosen on the previous turn.
use crate::session::TurnRecord;
use crate::snapshot::ChoiceReport;
use crate::training::{ChoiceOutcome, Discipline};

/// Work out what the player did on `previous`, given this turn's revised attributes.
///
/// An explicit report from the capture layer wins. Otherwise the attribute
/// delta is matched against each discipline's projection; a lone drop in a
/// discipline's own attribute with nothing gained reads as a failed training.
#[must_use]
pub fn infer_choice(
    previous: &TurnRecord,
    attributes: [i32; 5],
    report: Option<ChoiceReport>,
) -> Option<ChoiceOutcome> {
    if let Some(report) = report {
        return Discipline::from_command_id(report.command_id).map(|discipline| ChoiceOutcome {
            discipline,
            failed: report.failed,
        });
    }

    let mut observed = [0; 5];
    for (j, delta) in observed.iter_mut().enumerate() {
        *delta = attributes[j] - previous.attributes[j];
    }

    if let Some(discipline) = best_match(previous, observed) {
        return Some(ChoiceOutcome {
            discipline,
            failed: false,
        });
    }

    if observed.iter().all(|&d| d <= 0) {
        let mut dropped = Discipline::ALL
            .into_iter()
            .filter(|d| observed[d.index()] < 0);
        if let (Some(discipline), None) = (dropped.next(), dropped.next()) {
            return Some(ChoiceOutcome {
                discipline,
                failed: true,
            });
        }
    }
    None
}

fn best_match(previous: &TurnRecord, observed: [i32; 5]) -> Option<Discipline> {
    Discipline::ALL
        .into_iter()
        .filter_map(|discipline| {
            let projected = previous.stats(discipline);
            let score = projected.score();
            if score <= 0 {
                return None;
            }
            let distance: i32 = projected
                .five_value_gain
                .iter()
                .zip(observed)
                .map(|(p, o)| (p - o).abs())
                .sum();
            (distance * 2 <= score).then_some((discipline, distance))
        })
        .min_by_key(|&(_, distance)| distance)
        .map(|(discipline, _)| discipline)
}
