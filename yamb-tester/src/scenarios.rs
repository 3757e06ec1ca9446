//! The scenario catalog: deterministic scripts covering entry order,
//! validation, scoring, standings, turns and persistence.

use yamb_game::{Column, RowId};

use crate::script::{Reason, Scenario, Step};

const fn enter(seat: usize, column: Column, row: RowId, raw: &'static str) -> Step {
    Step::Enter {
        seat,
        column,
        row,
        raw,
    }
}

const fn cross(seat: usize, column: Column, row: RowId) -> Step {
    Step::CrossOut { seat, column, row }
}

const fn announce(seat: usize, row: RowId) -> Step {
    Step::MarkPredicted { seat, row }
}

const fn one_roll(seat: usize, column: Column, row: RowId, enabled: bool) -> Step {
    Step::OneRoll {
        seat,
        column,
        row,
        enabled,
    }
}

const fn rejected(
    seat: usize,
    column: Column,
    row: RowId,
    raw: &'static str,
    reason: Reason,
) -> Step {
    Step::ExpectRejected {
        seat,
        column,
        row,
        raw,
        reason,
    }
}

const fn cell(seat: usize, column: Column, row: RowId, value: Option<i32>, crossed: bool) -> Step {
    Step::ExpectCell {
        seat,
        column,
        row,
        value,
        crossed,
    }
}

const fn open(seat: usize, column: Column, row: RowId) -> Step {
    Step::ExpectOpen { seat, column, row }
}

const fn closed(seat: usize, column: Column, row: RowId) -> Step {
    Step::ExpectClosed { seat, column, row }
}

const fn col_total(seat: usize, column: Column, total: i32) -> Step {
    Step::ExpectColumnTotal {
        seat,
        column,
        total,
    }
}

const fn total(seat: usize, total: i32) -> Step {
    Step::ExpectTotal { seat, total }
}

const fn rank_is(seat: usize, rank: usize) -> Step {
    Step::ExpectRank { seat, rank }
}

/// Every scenario the harness knows, in presentation order.
#[must_use]
pub fn all_scenarios() -> Vec<Scenario> {
    vec![
        smoke(),
        sequential_ordering(),
        entry_validation(),
        scoring_blocks(),
        predicted_column(),
        standings(),
        turn_rotation(),
        persistence(),
        full_sheet(),
    ]
}

/// Look a scenario up by key.
#[must_use]
pub fn get_scenario(key: &str) -> Option<Scenario> {
    all_scenarios().into_iter().find(|s| s.key == key)
}

/// Keys and descriptions for `--list-scenarios`.
#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    all_scenarios()
        .iter()
        .map(|s| (s.key, s.description))
        .collect()
}

/// All keys, for expanding the "all" selector.
#[must_use]
pub fn scenario_keys() -> Vec<&'static str> {
    all_scenarios().iter().map(|s| s.key).collect()
}

fn smoke() -> Scenario {
    use Column::{Down, Free, Up};
    Scenario {
        key: "smoke",
        description: "A short two-player game touching every subsystem once",
        players: &["Ana", "Bo"],
        steps: vec![
            enter(0, Up, RowId::Ones, "3"),
            cell(0, Up, RowId::Ones, Some(3), false),
            open(0, Up, RowId::Twos),
            enter(0, Free, RowId::Poker, "24"),
            one_roll(0, Free, RowId::Poker, true),
            col_total(0, Free, 24 * 2 + 50),
            cross(1, Down, RowId::Poker),
            cell(1, Down, RowId::Poker, Some(0), true),
            Step::AdvanceTurn,
            Step::ExpectActive { seat: 1 },
            Step::Rename {
                seat: 1,
                name: "Bobo",
            },
            Step::ExpectName {
                seat: 1,
                name: "Bobo",
            },
            Step::Save,
            enter(0, Free, RowId::Karta, "40"),
            Step::Reload,
            cell(0, Free, RowId::Karta, None, false),
            total(0, 3 + 98),
            total(1, 50),
            rank_is(0, 1),
            rank_is(1, 2),
        ],
    }
}

fn sequential_ordering() -> Scenario {
    use Column::{Down, Free, Predicted, Up};
    Scenario {
        key: "sequential-ordering",
        description: "Up and down cursors open one row at a time and never rewind",
        players: &["Solo"],
        steps: vec![
            open(0, Up, RowId::Ones),
            closed(0, Up, RowId::Twos),
            rejected(0, Up, RowId::Twos, "4", Reason::NotEligible),
            enter(0, Up, RowId::Ones, "2"),
            open(0, Up, RowId::Twos),
            closed(0, Up, RowId::Threes),
            // Editing in place must not advance the cursor again.
            enter(0, Up, RowId::Ones, "5"),
            open(0, Up, RowId::Twos),
            closed(0, Up, RowId::Threes),
            // Clearing leaves a permanent gap.
            enter(0, Up, RowId::Ones, "-"),
            closed(0, Up, RowId::Ones),
            open(0, Up, RowId::Twos),
            rejected(0, Up, RowId::Ones, "5", Reason::NotEligible),
            // The down column mirrors the walk from the bottom.
            open(0, Down, RowId::Poker),
            rejected(0, Down, RowId::Karta, "30", Reason::NotEligible),
            cross(0, Down, RowId::Poker),
            open(0, Down, RowId::Karta),
            // Predicted and free never gate on order.
            open(0, Predicted, RowId::Ones),
            open(0, Predicted, RowId::Poker),
            open(0, Free, RowId::Sixes),
        ],
    }
}

fn entry_validation() -> Scenario {
    use Column::Free;
    Scenario {
        key: "entry-validation",
        description: "Every rejection class bounces and leaves the sheet untouched",
        players: &["Solo"],
        steps: vec![
            rejected(0, Free, RowId::Threes, "7", Reason::NotMultiple),
            rejected(0, Free, RowId::Threes, "-3", Reason::Negative),
            rejected(0, Free, RowId::Threes, "16", Reason::AboveMaximum),
            rejected(0, Free, RowId::Threes, "abc", Reason::InvalidNumber),
            rejected(0, Free, RowId::Threes, "1.5", Reason::InvalidNumber),
            rejected(0, Free, RowId::BigStraight15, "12", Reason::WrongStraight),
            rejected(0, Free, RowId::BigStraight26, "15", Reason::WrongStraight),
            Step::ExpectRejected {
                seat: 7,
                column: Free,
                row: RowId::Ones,
                raw: "1",
                reason: Reason::BadSeat,
            },
            // Minimum, maximum and the free-value figures take anything.
            enter(0, Free, RowId::Minimum, "-10"),
            enter(0, Free, RowId::Maximum, "9000"),
            enter(0, Free, RowId::Full, "38"),
            // A rejected edit keeps the previous committed value.
            enter(0, Free, RowId::Fours, "16"),
            rejected(0, Free, RowId::Fours, "17", Reason::NotMultiple),
            cell(0, Free, RowId::Fours, Some(16), false),
            // Straight targets themselves are accepted.
            enter(0, Free, RowId::BigStraight15, "15"),
            enter(0, Free, RowId::BigStraight26, "0"),
        ],
    }
}

fn scoring_blocks() -> Scenario {
    use Column::Free;
    Scenario {
        key: "scoring-blocks",
        description: "Numbers, min/max modifier and figure bonuses compose the column total",
        players: &["Solo"],
        steps: vec![
            enter(0, Free, RowId::Ones, "4"),
            enter(0, Free, RowId::Twos, "8"),
            col_total(0, Free, 12),
            // The modifier waits for both minimum and maximum.
            enter(0, Free, RowId::Maximum, "28"),
            col_total(0, Free, 12),
            enter(0, Free, RowId::Minimum, "7"),
            col_total(0, Free, 12 + (28 - 7) * 4),
            // A crossed minimum counts as zero inside the modifier.
            cross(0, Free, RowId::Minimum),
            col_total(0, Free, 12 + 28 * 4),
            enter(0, Free, RowId::Full, "33"),
            col_total(0, Free, 124 + 33 + 15),
            one_roll(0, Free, RowId::Full, true),
            col_total(0, Free, 124 + 33 * 2 + 15),
            one_roll(0, Free, RowId::Full, false),
            col_total(0, Free, 172),
            // Crossed figures still earn their flat bonus.
            cross(0, Free, RowId::BigStraight15),
            col_total(0, Free, 177),
        ],
    }
}

fn predicted_column() -> Scenario {
    use Column::Predicted;
    Scenario {
        key: "predicted-column",
        description: "Announcements are one-way and crossing announces automatically",
        players: &["Solo"],
        steps: vec![
            announce(0, RowId::Poker),
            cell(0, Predicted, RowId::Poker, None, false),
            enter(0, Predicted, RowId::Poker, "24"),
            cell(0, Predicted, RowId::Poker, Some(24), false),
            // Crossing an unannounced row announces it on the way.
            cross(0, Predicted, RowId::Full),
            cell(0, Predicted, RowId::Full, Some(0), true),
            // Typed entries never need an announcement.
            enter(0, Predicted, RowId::Karta, "35"),
            col_total(0, Predicted, (24 + 50) + 15 + (35 + 25)),
        ],
    }
}

fn standings() -> Scenario {
    use Column::Free;
    Scenario {
        key: "standings",
        description: "Ties share a rank and push the next total down",
        players: &["Ana", "Bo", "Cy"],
        steps: vec![
            enter(0, Free, RowId::Poker, "24"),
            enter(1, Free, RowId::Poker, "24"),
            rank_is(0, 1),
            rank_is(1, 1),
            rank_is(2, 3),
            // Cy overtakes by a single point.
            enter(2, Free, RowId::Karta, "50"),
            rank_is(2, 1),
            rank_is(0, 2),
            rank_is(1, 2),
        ],
    }
}

fn turn_rotation() -> Scenario {
    use Column::Free;
    Scenario {
        key: "turn-rotation",
        description: "Turns wrap around the table and reset rewinds everything but names",
        players: &["Ana", "Bo", "Cy"],
        steps: vec![
            Step::ExpectActive { seat: 0 },
            Step::AdvanceTurn,
            Step::ExpectActive { seat: 1 },
            Step::AdvanceTurn,
            Step::AdvanceTurn,
            Step::ExpectActive { seat: 0 },
            enter(0, Free, RowId::Poker, "24"),
            Step::AdvanceTurn,
            Step::ResetScores,
            Step::ExpectActive { seat: 0 },
            total(0, 0),
            open(0, Column::Up, RowId::Ones),
            Step::ExpectName {
                seat: 2,
                name: "Cy",
            },
        ],
    }
}

fn persistence() -> Scenario {
    use Column::{Free, Up};
    Scenario {
        key: "persistence",
        description: "Snapshots replace the whole session and reload what was saved",
        players: &["Ana", "Bo"],
        steps: vec![
            enter(0, Up, RowId::Ones, "3"),
            Step::Save,
            // Everything after the save must vanish on reload.
            enter(0, Free, RowId::Karta, "40"),
            Step::Rename {
                seat: 1,
                name: "Zoe",
            },
            Step::AdvanceTurn,
            Step::Reload,
            cell(0, Up, RowId::Ones, Some(3), false),
            cell(0, Free, RowId::Karta, None, false),
            Step::ExpectName { seat: 1, name: "Bo" },
            Step::ExpectActive { seat: 0 },
            // Saving again is idempotent.
            Step::Save,
            Step::Reload,
            total(0, 3),
            open(0, Up, RowId::Twos),
        ],
    }
}

fn full_sheet() -> Scenario {
    use Column::{Down, Free, Predicted, Up};
    let mut steps = vec![
        // Up, top to bottom.
        enter(0, Up, RowId::Ones, "3"),
        enter(0, Up, RowId::Twos, "6"),
        enter(0, Up, RowId::Threes, "9"),
        enter(0, Up, RowId::Fours, "12"),
        enter(0, Up, RowId::Fives, "15"),
        enter(0, Up, RowId::Sixes, "18"),
        enter(0, Up, RowId::Minimum, "8"),
        enter(0, Up, RowId::Maximum, "26"),
        enter(0, Up, RowId::BigStraight15, "15"),
        enter(0, Up, RowId::BigStraight26, "20"),
        enter(0, Up, RowId::Full, "28"),
        enter(0, Up, RowId::Karta, "33"),
        enter(0, Up, RowId::Poker, "24"),
        col_total(0, Up, 342),
        // Down, bottom to top.
        enter(0, Down, RowId::Poker, "X"),
        enter(0, Down, RowId::Karta, "30"),
        enter(0, Down, RowId::Full, "x"),
        enter(0, Down, RowId::BigStraight26, "20"),
        enter(0, Down, RowId::BigStraight15, "X"),
        enter(0, Down, RowId::Maximum, "27"),
        enter(0, Down, RowId::Minimum, "9"),
        enter(0, Down, RowId::Sixes, "30"),
        enter(0, Down, RowId::Fives, "20"),
        enter(0, Down, RowId::Fours, "16"),
        enter(0, Down, RowId::Threes, "9"),
        enter(0, Down, RowId::Twos, "4"),
        enter(0, Down, RowId::Ones, "5"),
        col_total(0, Down, 329),
    ];
    // Predicted, any order.
    steps.extend([
        enter(0, Predicted, RowId::Poker, "24"),
        cross(0, Predicted, RowId::Full),
        enter(0, Predicted, RowId::Karta, "35"),
        enter(0, Predicted, RowId::BigStraight15, "15"),
        cross(0, Predicted, RowId::BigStraight26),
        enter(0, Predicted, RowId::Minimum, "6"),
        enter(0, Predicted, RowId::Maximum, "29"),
        enter(0, Predicted, RowId::Ones, "5"),
        enter(0, Predicted, RowId::Twos, "10"),
        enter(0, Predicted, RowId::Threes, "15"),
        enter(0, Predicted, RowId::Fours, "20"),
        enter(0, Predicted, RowId::Fives, "25"),
        enter(0, Predicted, RowId::Sixes, "30"),
        col_total(0, Predicted, 399),
    ]);
    // Free, with a doubled karta.
    steps.extend([
        enter(0, Free, RowId::Ones, "4"),
        enter(0, Free, RowId::Twos, "8"),
        enter(0, Free, RowId::Threes, "12"),
        enter(0, Free, RowId::Fours, "16"),
        enter(0, Free, RowId::Fives, "20"),
        enter(0, Free, RowId::Sixes, "24"),
        enter(0, Free, RowId::Minimum, "8"),
        enter(0, Free, RowId::Maximum, "27"),
        enter(0, Free, RowId::BigStraight15, "X"),
        enter(0, Free, RowId::BigStraight26, "20"),
        enter(0, Free, RowId::Full, "38"),
        enter(0, Free, RowId::Karta, "40"),
        one_roll(0, Free, RowId::Karta, true),
        enter(0, Free, RowId::Poker, "X"),
        col_total(0, Free, 403),
        total(0, 1473),
        rank_is(0, 1),
    ]);
    Scenario {
        key: "full-sheet",
        description: "One player completes all four columns to a known grand total",
        players: &["Champ"],
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptRunner;
    use crate::store::FileStore;
    use std::collections::HashSet;

    #[test]
    fn scenario_keys_are_unique() {
        let keys = scenario_keys();
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn get_scenario_finds_known_keys_only() {
        assert!(get_scenario("smoke").is_some());
        assert!(get_scenario("full-sheet").is_some());
        assert!(get_scenario("does-not-exist").is_none());
    }

    #[test]
    fn every_catalog_scenario_passes() {
        let runner = ScriptRunner::new(false);
        for scenario in all_scenarios() {
            let store = FileStore::temp_for(scenario.key);
            let result = runner.run(&scenario, store);
            assert!(
                result.passed,
                "{} failed: {:?}",
                scenario.key, result.failures
            );
            assert_eq!(result.steps_run, scenario.steps.len(), "{}", scenario.key);
        }
    }
}
