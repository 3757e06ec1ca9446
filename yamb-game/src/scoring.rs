//! Score computation: block subtotals, column and grand totals, rank.
//!
//! Everything here is a pure read over a player's grid, recomputed on
//! demand. Arithmetic saturates so absurd free-figure entries cannot
//! wrap a total.

use serde::{Deserialize, Serialize};

use crate::catalog::{Column, RowCategory, RowId};
use crate::player::Player;

/// Sum of the committed values in the ones through sixes block.
#[must_use]
pub fn numbers_subtotal(player: &Player, column: Column) -> i32 {
    RowId::in_category(RowCategory::Number)
        .filter_map(|row| player.cell(column, row).value)
        .fold(0i32, i32::saturating_add)
}

/// The min/max modifier: `(maximum - minimum) * ones`.
///
/// Scores only once both minimum and maximum are committed; a crossed
/// cell counts as zero, an empty ones row as zero. The raw minimum and
/// maximum values never score on their own.
#[must_use]
pub fn min_max_modifier(player: &Player, column: Column) -> i32 {
    let minimum = player.cell(column, RowId::Minimum).value;
    let maximum = player.cell(column, RowId::Maximum).value;
    let (Some(minimum), Some(maximum)) = (minimum, maximum) else {
        return 0;
    };
    let ones = player.cell(column, RowId::Ones).value.unwrap_or(0);
    maximum.saturating_sub(minimum).saturating_mul(ones)
}

/// Figure block subtotal.
///
/// Each committed figure row scores its value (doubled when the one-roll
/// flag is set) plus the row's flat bonus. Untouched rows score nothing;
/// crossed rows score zero but still earn the bonus.
#[must_use]
pub fn figures_subtotal(player: &Player, column: Column) -> i32 {
    RowId::in_category(RowCategory::Figure).fold(0i32, |total, row| {
        let cell = player.cell(column, row);
        let Some(value) = cell.value else {
            return total;
        };
        let multiplier = if cell.one_roll { 2 } else { 1 };
        total
            .saturating_add(value.saturating_mul(multiplier))
            .saturating_add(row.bonus())
    })
}

/// Column total: numbers block plus min/max modifier plus figures block.
#[must_use]
pub fn column_total(player: &Player, column: Column) -> i32 {
    numbers_subtotal(player, column)
        .saturating_add(min_max_modifier(player, column))
        .saturating_add(figures_subtotal(player, column))
}

/// Grand total across all four columns.
#[must_use]
pub fn player_total(player: &Player) -> i32 {
    Column::ALL
        .iter()
        .fold(0i32, |total, &column| total.saturating_add(column_total(player, column)))
}

/// Competition rank of a player among the field: one plus the number of
/// strictly greater totals. Equal totals share a rank and push the next
/// distinct total down (1, 1, 3).
#[must_use]
pub fn rank(players: &[Player], player: &Player) -> usize {
    let total = player_total(player);
    1 + players
        .iter()
        .filter(|other| player_total(other) > total)
        .count()
}

/// One line of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub total: i32,
    pub rank: usize,
}

/// The results table, descending by total with competition ranks.
/// Seating order breaks ties between equal totals.
#[must_use]
pub fn standings(players: &[Player]) -> Vec<Standing> {
    let mut rows: Vec<Standing> = players
        .iter()
        .map(|player| Standing {
            name: player.name.clone(),
            total: player_total(player),
            rank: 0,
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));

    let mut previous: Option<(i32, usize)> = None;
    for (position, row) in rows.iter_mut().enumerate() {
        row.rank = match previous {
            Some((total, rank)) if total == row.total => rank,
            _ => position + 1,
        };
        previous = Some((row.total, row.rank));
    }
    rows
}

/// English ordinal for a rank: 1st, 2nd, 3rd, 4th, with 11th through
/// 13th kept on "th".
#[must_use]
pub fn ordinal(rank: usize) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (1, hundreds) if hundreds != 11 => "st",
        (2, hundreds) if hundreds != 12 => "nd",
        (3, hundreds) if hundreds != 13 => "rd",
        _ => "th",
    };
    format!("{rank}{suffix}")
}
