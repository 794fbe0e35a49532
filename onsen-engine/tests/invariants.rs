use onsen_engine::snapshot::StratumInfo;
use onsen_engine::{
    ChoiceOutcome, DigPowerTable, Discipline, PreviousTurn, ProgressionRules, TrainLevel,
    TurnTransition, VitalLedger, compute_consumption,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SESSIONS: usize = 200;
const FINAL_TURN: u32 = 78;

#[test]
fn progression_stays_in_range_over_random_sessions() {
    let rules = ProgressionRules::default();
    let mut rng = SmallRng::seed_from_u64(0x0A5E);
    for _ in 0..SESSIONS {
        let mut level = TrainLevel::BASELINE;
        for turn in 2..=FINAL_TURN {
            let previous = PreviousTurn {
                level,
                chose_this: rng.gen_bool(0.4),
                failed: rng.gen_bool(0.1),
            };
            let next = rules.advance(previous, turn);
            assert!((1..=5).contains(&next.level), "turn {turn}: {next:?}");
            assert!(next.counter <= 3, "turn {turn}: {next:?}");
            if next.level == 5 {
                assert_eq!(next.counter, 0);
            }
            assert!(
                (next.level, next.counter) >= (level.level, level.counter) || next.level == 5,
                "turn {turn}: {level:?} -> {next:?}"
            );
            level = next;
        }
    }
}

#[test]
fn milestones_alone_raise_three_levels() {
    let rules = ProgressionRules::default();
    let mut level = TrainLevel::BASELINE;
    for turn in 2..=FINAL_TURN {
        level = rules.advance(
            PreviousTurn {
                level,
                ..PreviousTurn::default()
            },
            turn,
        );
    }
    assert_eq!(level, TrainLevel { level: 4, counter: 0 });
}

#[test]
fn blackout_turns_never_earn_credit() {
    let rules = ProgressionRules::default();
    for (start, end) in [(37, 40), (61, 64)] {
        for previous_turn in start..=end {
            let current = previous_turn + 1;
            let base = TrainLevel { level: 2, counter: 1 };
            let trained = rules.advance(
                PreviousTurn::for_discipline(
                    Discipline::Guts,
                    base,
                    Some(ChoiceOutcome {
                        discipline: Discipline::Guts,
                        failed: false,
                    }),
                ),
                current,
            );
            let idle = rules.advance(
                PreviousTurn::for_discipline(Discipline::Guts, base, None),
                current,
            );
            assert_eq!(trained, idle, "previous turn {previous_turn}");
        }
    }
}

#[test]
fn consumption_is_monotone_in_capacity() {
    let mut rng = SmallRng::seed_from_u64(77);
    for _ in 0..500 {
        let table = DigPowerTable::new(
            rng.gen_range(0..60),
            rng.gen_range(0..60),
            rng.gen_range(0..60),
        );
        let strata: Vec<StratumInfo> = (0..rng.gen_range(1..4))
            .map(|_| StratumInfo {
                stratum_id: rng.gen_range(4..16),
                rest_volume: rng.gen_range(0..80),
            })
            .collect();
        let present = [1003, 30_249];
        let mut last = 0;
        for base in 25..=31 {
            let amount = compute_consumption(base, &strata, &present, &table);
            assert!(amount >= last, "{strata:?} base {base}: {amount} < {last}");
            last = amount;
        }
        if strata.iter().all(|s| s.rest_volume == 0) {
            assert_eq!(last, 0);
        }
    }
}

#[test]
fn consumption_matches_reference_cases() {
    let table = DigPowerTable::new(10, 20, 0);
    let sand = |rest| StratumInfo {
        stratum_id: 4,
        rest_volume: rest,
    };
    let soil = |rest| StratumInfo {
        stratum_id: 5,
        rest_volume: rest,
    };
    assert_eq!(compute_consumption(30, &[sand(20), soil(50)], &[], &table), 33);
    assert_eq!(compute_consumption(30, &[sand(40)], &[], &table), 33);
    assert_eq!(compute_consumption(30, &[sand(33), soil(50)], &[], &table), 33);
    assert_eq!(compute_consumption(30, &[sand(0), sand(0)], &[], &table), 0);
}

#[test]
fn vital_total_never_decreases() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut ledger = VitalLedger::default();
    let mut last = 0;
    for turn in 1..=FINAL_TURN {
        ledger.record(turn, rng.gen_range(0..=100));
        if turn < 3 {
            assert_eq!(ledger.consumed(), 0);
        }
        assert!(ledger.consumed() >= last);
        last = ledger.consumed();
    }
}

#[test]
fn transitions_cover_every_relation() {
    for previous in 1..FINAL_TURN {
        for next in 1..=FINAL_TURN {
            let transition = TurnTransition::classify(Some(previous), next);
            let expected = if next == 1 {
                TurnTransition::Restart
            } else if next == previous + 1 {
                TurnTransition::Advance
            } else if next == previous {
                TurnTransition::Repeat
            } else {
                TurnTransition::Anomaly {
                    previous: Some(previous),
                    current: next,
                }
            };
            assert_eq!(transition, expected);
        }
    }
}
