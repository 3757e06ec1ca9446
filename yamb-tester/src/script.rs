//! Scripted scenarios: a step language over the scoring engine and the
//! interpreter that drives a fresh session through it.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail, ensure};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use yamb_game::{
    Column, GameSession, Player, RowId, ScoreCell, ScoreError, Scorekeeper, SessionError,
    column_total, player_total, rank,
};

use crate::render;
use crate::store::FileStore;

/// One scripted action or expectation.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Write raw text into a cell and expect it to be accepted.
    Enter {
        seat: usize,
        column: Column,
        row: RowId,
        raw: &'static str,
    },
    /// Cross a cell out through the forfeit action.
    CrossOut {
        seat: usize,
        column: Column,
        row: RowId,
    },
    /// Announce a predicted-column row.
    MarkPredicted { seat: usize, row: RowId },
    /// Set or clear the one-roll doubling flag.
    OneRoll {
        seat: usize,
        column: Column,
        row: RowId,
        enabled: bool,
    },
    AdvanceTurn,
    ResetScores,
    Rename { seat: usize, name: &'static str },
    /// Persist the session to the scenario's store.
    Save,
    /// Replace the session with whatever the store holds.
    Reload,
    /// Expect a write to bounce with the given rejection class and to
    /// leave the session untouched.
    ExpectRejected {
        seat: usize,
        column: Column,
        row: RowId,
        raw: &'static str,
        reason: Reason,
    },
    ExpectCell {
        seat: usize,
        column: Column,
        row: RowId,
        value: Option<i32>,
        crossed: bool,
    },
    ExpectOpen {
        seat: usize,
        column: Column,
        row: RowId,
    },
    ExpectClosed {
        seat: usize,
        column: Column,
        row: RowId,
    },
    ExpectColumnTotal {
        seat: usize,
        column: Column,
        total: i32,
    },
    ExpectTotal { seat: usize, total: i32 },
    ExpectRank { seat: usize, rank: usize },
    ExpectActive { seat: usize },
    ExpectName { seat: usize, name: &'static str },
}

/// Rejection classes a script can assert on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    InvalidNumber,
    Negative,
    AboveMaximum,
    NotMultiple,
    WrongStraight,
    NotEligible,
    BadSeat,
}

impl Reason {
    fn matches(self, error: &SessionError) -> bool {
        matches!(
            (self, error),
            (
                Self::InvalidNumber,
                SessionError::Score(ScoreError::InvalidNumber { .. })
            ) | (
                Self::Negative,
                SessionError::Score(ScoreError::NegativeScore { .. })
            ) | (
                Self::AboveMaximum,
                SessionError::Score(ScoreError::AboveMaximum { .. })
            ) | (
                Self::NotMultiple,
                SessionError::Score(ScoreError::NotMultiple { .. })
            ) | (
                Self::WrongStraight,
                SessionError::Score(ScoreError::InvalidFigureValue { .. })
            ) | (
                Self::NotEligible,
                SessionError::Score(ScoreError::RowNotEligible { .. })
            ) | (Self::BadSeat, SessionError::PlayerOutOfRange { .. })
        )
    }
}

/// A named, deterministic walk through the engine.
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub players: &'static [&'static str],
    pub steps: Vec<Step>,
}

/// Outcome of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

pub struct ScriptRunner {
    verbose: bool,
}

impl ScriptRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Run one scenario against a fresh session backed by `store`.
    /// Stops at the first failed step; the remaining steps would only
    /// report knock-on noise.
    pub fn run(&self, scenario: &Scenario, store: FileStore) -> ScenarioResult {
        let start = Instant::now();
        let keeper = Scorekeeper::new(store);

        if self.verbose {
            println!(
                "🧪 Scenario: {} ({} steps)",
                scenario.key.bright_white(),
                scenario.steps.len()
            );
        }

        let mut session = match GameSession::start(scenario.players) {
            Ok(session) => session,
            Err(error) => {
                return ScenarioResult {
                    scenario_name: scenario.key.to_string(),
                    passed: false,
                    steps_run: 0,
                    failures: vec![format!("setup: {error}")],
                    duration: start.elapsed(),
                };
            }
        };

        let mut steps_run = 0;
        let mut failures = Vec::new();
        for (index, step) in scenario.steps.iter().enumerate() {
            match apply_step(&mut session, &keeper, *step) {
                Ok(()) => {
                    steps_run += 1;
                    if self.verbose {
                        println!("  ✅ step {:>3}: {step:?}", index + 1);
                    }
                }
                Err(error) => {
                    failures.push(format!("step {} {step:?}: {error:#}", index + 1));
                    if self.verbose {
                        println!("  ❌ step {:>3}: {}", index + 1, format!("{error:#}").red());
                        if let Some(player) = session.active_player() {
                            println!("{}", render::render_sheet(player));
                        }
                    }
                    break;
                }
            }
        }

        ScenarioResult {
            scenario_name: scenario.key.to_string(),
            passed: failures.is_empty(),
            steps_run,
            failures,
            duration: start.elapsed(),
        }
    }
}

fn apply_step(
    session: &mut GameSession,
    keeper: &Scorekeeper<FileStore>,
    step: Step,
) -> Result<()> {
    match step {
        Step::Enter {
            seat,
            column,
            row,
            raw,
        } => session
            .enter_score(seat, column, row, raw)
            .with_context(|| format!("enter {raw:?} at {column}/{row} for seat {seat}")),
        Step::CrossOut { seat, column, row } => session
            .cross_out(seat, column, row)
            .with_context(|| format!("cross out {column}/{row} for seat {seat}")),
        Step::MarkPredicted { seat, row } => session
            .mark_predicted(seat, row)
            .with_context(|| format!("announce {row} for seat {seat}")),
        Step::OneRoll {
            seat,
            column,
            row,
            enabled,
        } => session
            .set_one_roll(seat, column, row, enabled)
            .with_context(|| format!("set one-roll {enabled} at {column}/{row} for seat {seat}")),
        Step::AdvanceTurn => {
            session.advance_turn();
            Ok(())
        }
        Step::ResetScores => {
            session.reset_scores();
            Ok(())
        }
        Step::Rename { seat, name } => session
            .rename_player(seat, name)
            .with_context(|| format!("rename seat {seat} to {name:?}")),
        Step::Save => keeper.save(session).context("save snapshot"),
        Step::Reload => {
            let restored = keeper
                .load()
                .context("load snapshot")?
                .context("no snapshot in the store")?;
            *session = restored;
            Ok(())
        }
        Step::ExpectRejected {
            seat,
            column,
            row,
            raw,
            reason,
        } => {
            let before = session.clone();
            match session.enter_score(seat, column, row, raw) {
                Ok(()) => bail!("entry {raw:?} at {column}/{row} was accepted, expected {reason:?}"),
                Err(error) => {
                    ensure!(
                        reason.matches(&error),
                        "entry {raw:?} at {column}/{row} bounced with \"{error}\", expected {reason:?}"
                    );
                    ensure!(
                        *session == before,
                        "rejected entry {raw:?} at {column}/{row} changed the session"
                    );
                    Ok(())
                }
            }
        }
        Step::ExpectCell {
            seat,
            column,
            row,
            value,
            crossed,
        } => {
            let cell = cell_at(session, seat, column, row)?;
            ensure!(
                cell.value == value && cell.crossed == crossed,
                "cell {column}/{row} for seat {seat} holds {:?} crossed {}, expected {value:?} crossed {crossed}",
                cell.value,
                cell.crossed
            );
            Ok(())
        }
        Step::ExpectOpen { seat, column, row } => {
            ensure!(
                session.is_eligible(seat, column, row),
                "{column}/{row} should be open for seat {seat}"
            );
            Ok(())
        }
        Step::ExpectClosed { seat, column, row } => {
            ensure!(
                !session.is_eligible(seat, column, row),
                "{column}/{row} should be closed for seat {seat}"
            );
            Ok(())
        }
        Step::ExpectColumnTotal { seat, column, total } => {
            let actual = column_total(player_at(session, seat)?, column);
            ensure!(
                actual == total,
                "column {column} for seat {seat} totals {actual}, expected {total}"
            );
            Ok(())
        }
        Step::ExpectTotal { seat, total } => {
            let actual = player_total(player_at(session, seat)?);
            ensure!(actual == total, "seat {seat} totals {actual}, expected {total}");
            Ok(())
        }
        Step::ExpectRank { seat, rank: expected } => {
            let actual = rank(session.players(), player_at(session, seat)?);
            ensure!(
                actual == expected,
                "seat {seat} ranks {actual}, expected {expected}"
            );
            Ok(())
        }
        Step::ExpectActive { seat } => {
            ensure!(
                session.active_player_index() == seat,
                "active seat is {}, expected {seat}",
                session.active_player_index()
            );
            Ok(())
        }
        Step::ExpectName { seat, name } => {
            let actual = &player_at(session, seat)?.name;
            ensure!(actual == name, "seat {seat} is named {actual:?}, expected {name:?}");
            Ok(())
        }
    }
}

pub(crate) fn player_at(session: &GameSession, seat: usize) -> Result<&Player> {
    session
        .player(seat)
        .with_context(|| format!("no player at seat {seat}"))
}

fn cell_at(session: &GameSession, seat: usize, column: Column, row: RowId) -> Result<&ScoreCell> {
    Ok(player_at(session, seat)?.cell(column, row))
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}
