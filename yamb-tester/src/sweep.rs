//! Random invariant sweeps: hammer a session with mixed valid and
//! invalid traffic and check the bookkeeping after every step.
//!
//! The sweep keeps its own shadow copy of the sequential-column cursors
//! and compares it to the engine continuously, so a cursor that drifts
//! or rewinds is caught on the exact step that broke it.

use std::time::Instant;

use anyhow::{Context, Result, ensure};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use yamb_game::{Column, GameSession, ROW_COUNT, RowId, SessionError, player_total, rank};

use crate::script::ScenarioResult;

/// Counters reported by a completed sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SweepStats {
    pub seed: u64,
    pub steps: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub round_trips: usize,
}

/// Independent cursor bookkeeping for one seat.
#[derive(Debug, Clone, Copy)]
struct SeatShadow {
    up_next: Option<usize>,
    down_next: Option<usize>,
}

impl SeatShadow {
    const fn fresh() -> Self {
        Self {
            up_next: Some(0),
            down_next: Some(ROW_COUNT - 1),
        }
    }

    fn record_fill(&mut self, column: Column) {
        match column {
            Column::Up => {
                self.up_next = match self.up_next {
                    Some(index) if index + 1 < ROW_COUNT => Some(index + 1),
                    _ => None,
                };
            }
            Column::Down => {
                self.down_next = self.down_next.and_then(|index| index.checked_sub(1));
            }
            Column::Predicted | Column::Free => {}
        }
    }
}

/// Run one seeded sweep. The result slots into the scenario reporting;
/// stats are only returned for a clean run.
pub fn run_sweep(seed: u64, steps: usize, verbose: bool) -> (ScenarioResult, Option<SweepStats>) {
    let start = Instant::now();
    let mut stats = SweepStats {
        seed,
        steps: 0,
        accepted: 0,
        rejected: 0,
        round_trips: 0,
    };
    let outcome = drive(seed, steps, verbose, &mut stats);

    let result = ScenarioResult {
        scenario_name: format!("sweep-{seed}"),
        passed: outcome.is_ok(),
        steps_run: stats.steps,
        failures: match outcome {
            Ok(()) => Vec::new(),
            Err(error) => vec![format!("step {}: {error:#}", stats.steps + 1)],
        },
        duration: start.elapsed(),
    };
    let stats = result.passed.then_some(stats);
    (result, stats)
}

fn drive(seed: u64, steps: usize, verbose: bool, stats: &mut SweepStats) -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let roster = ["Vesna", "Marko", "Iva"];
    let mut session = GameSession::start(&roster).context("start sweep session")?;
    let mut shadows = vec![SeatShadow::fresh(); roster.len()];

    for _ in 0..steps {
        mutate(&mut session, &mut shadows, &mut rng, stats)?;
        stats.steps += 1;

        check_cursors(&session, &shadows)?;
        if stats.steps % 32 == 0 {
            check_standings(&session)?;
        }
        if stats.steps % 64 == 0 {
            let json = session.to_json().context("snapshot for round-trip")?;
            let restored = GameSession::from_json(&json).context("restore round-trip")?;
            ensure!(restored == session, "round-trip produced a different session");
            stats.round_trips += 1;
        }
        if verbose && stats.steps % 100 == 0 {
            println!(
                "  ... {} steps, {} accepted, {} rejected",
                stats.steps, stats.accepted, stats.rejected
            );
        }
    }
    Ok(())
}

/// Pick and apply one random operation, counting it as accepted or
/// rejected. Exactly one counter moves per call.
fn mutate(
    session: &mut GameSession,
    shadows: &mut [SeatShadow],
    rng: &mut SmallRng,
    stats: &mut SweepStats,
) -> Result<()> {
    let seat = random_seat(rng, session.player_count());
    let column = Column::ALL[rng.gen_range(0..Column::ALL.len())];
    let row = RowId::ALL[rng.gen_range(0..RowId::ALL.len())];

    match rng.gen_range(0..100) {
        0..=59 => {
            let raw = random_entry(rng, row);
            checked_write(session, shadows, stats, seat, column, row, |s| {
                s.enter_score(seat, column, row, &raw)
            })
        }
        60..=69 => checked_write(session, shadows, stats, seat, column, row, |s| {
            s.cross_out(seat, column, row)
        }),
        70..=79 => {
            let enabled = rng.gen_bool(0.5);
            checked_write(session, shadows, stats, seat, column, row, |s| {
                s.set_one_roll(seat, column, row, enabled)
            })
        }
        80..=84 => checked_write(session, shadows, stats, seat, column, row, |s| {
            s.mark_predicted(seat, row)
        }),
        85..=94 => {
            session.advance_turn();
            stats.accepted += 1;
            Ok(())
        }
        95..=98 => {
            let name = RENAME_POOL[rng.gen_range(0..RENAME_POOL.len())];
            checked_write(session, shadows, stats, seat, column, row, |s| {
                s.rename_player(seat, name)
            })
        }
        _ => {
            session.reset_scores();
            for shadow in shadows.iter_mut() {
                *shadow = SeatShadow::fresh();
            }
            stats.accepted += 1;
            Ok(())
        }
    }
}

/// Last entry trims to empty, which the engine must bounce.
const RENAME_POOL: [&str; 5] = ["Vesna", "Marko", "Iva", "Luka", " "];

/// Apply one fallible write. A rejection must leave the snapshot
/// byte-identical; an accepted fresh fill moves the shadow cursor.
fn checked_write(
    session: &mut GameSession,
    shadows: &mut [SeatShadow],
    stats: &mut SweepStats,
    seat: usize,
    column: Column,
    row: RowId,
    op: impl FnOnce(&mut GameSession) -> Result<(), SessionError>,
) -> Result<()> {
    let before = session.to_json().context("snapshot before a write")?;
    let was_filled = session
        .player(seat)
        .is_some_and(|player| player.cell(column, row).is_filled());

    match op(session) {
        Ok(()) => {
            stats.accepted += 1;
            let now_filled = session
                .player(seat)
                .is_some_and(|player| player.cell(column, row).is_filled());
            if !was_filled && now_filled {
                if let Some(shadow) = shadows.get_mut(seat) {
                    shadow.record_fill(column);
                }
            }
            Ok(())
        }
        Err(_) => {
            stats.rejected += 1;
            let after = session.to_json().context("snapshot after a rejection")?;
            ensure!(
                before == after,
                "a rejected write at {column}/{row} for seat {seat} changed the session"
            );
            Ok(())
        }
    }
}

fn check_cursors(session: &GameSession, shadows: &[SeatShadow]) -> Result<()> {
    for (seat, shadow) in shadows.iter().enumerate() {
        let player = session.player(seat).context("seat vanished mid-sweep")?;
        let up = player.next_up_row().map(RowId::index);
        let down = player.next_down_row().map(RowId::index);
        ensure!(
            up == shadow.up_next,
            "seat {seat} up cursor drifted: engine {up:?}, shadow {:?}",
            shadow.up_next
        );
        ensure!(
            down == shadow.down_next,
            "seat {seat} down cursor drifted: engine {down:?}, shadow {:?}",
            shadow.down_next
        );

        // Nothing at or past an open sequential row may be filled.
        if let Some(position) = up {
            for index in position..ROW_COUNT {
                let row = RowId::from_index(index).context("row index out of range")?;
                ensure!(
                    !player.cell(Column::Up, row).is_filled(),
                    "up column for seat {seat} has {row} filled past the open row"
                );
            }
        }
        if let Some(position) = down {
            for index in 0..=position {
                let row = RowId::from_index(index).context("row index out of range")?;
                ensure!(
                    !player.cell(Column::Down, row).is_filled(),
                    "down column for seat {seat} has {row} filled past the open row"
                );
            }
        }
    }
    Ok(())
}

fn check_standings(session: &GameSession) -> Result<()> {
    let standings = session.standings();
    ensure!(
        standings.len() == session.player_count(),
        "standings list {} entries for {} players",
        standings.len(),
        session.player_count()
    );
    for pair in standings.windows(2) {
        ensure!(
            pair[0].total >= pair[1].total,
            "standings are not sorted by total"
        );
    }
    for standing in &standings {
        let computed = 1 + standings
            .iter()
            .filter(|other| other.total > standing.total)
            .count();
        ensure!(
            standing.rank == computed,
            "rank {} listed for total {}, expected {computed}",
            standing.rank,
            standing.total
        );
    }
    for player in session.players() {
        let total = player_total(player);
        let expected = 1 + session
            .players()
            .iter()
            .filter(|other| player_total(other) > total)
            .count();
        ensure!(
            rank(session.players(), player) == expected,
            "rank for {:?} disagrees with its total",
            player.name
        );
    }
    Ok(())
}

fn random_seat(rng: &mut SmallRng, count: usize) -> usize {
    if rng.gen_bool(0.05) {
        count + rng.gen_range(0..3)
    } else {
        rng.gen_range(0..count)
    }
}

/// Raw text for an entry attempt: mostly plausible scores, with crosses,
/// clears, garbage and negatives mixed in.
fn random_entry(rng: &mut SmallRng, row: RowId) -> String {
    match rng.gen_range(0..10) {
        0 => "x".to_string(),
        1 => {
            if rng.gen_bool(0.5) {
                "-".to_string()
            } else {
                String::new()
            }
        }
        2 => "five".to_string(),
        3 => {
            let magnitude: i32 = rng.gen_range(1..=20);
            (-magnitude).to_string()
        }
        _ => plausible_value(rng, row).to_string(),
    }
}

fn plausible_value(rng: &mut SmallRng, row: RowId) -> i32 {
    if let Some(die) = row.die_value() {
        // 0..=6 dice of the face; six overshoots the cap on purpose.
        let value = die * rng.gen_range(0..=6);
        if rng.gen_bool(0.2) { value + 1 } else { value }
    } else if let Some(target) = row.straight_target() {
        match rng.gen_range(0..4) {
            0 => 0,
            1 | 2 => target,
            _ => target + 3,
        }
    } else {
        rng.gen_range(0..=60)
    }
}
