//! Per-player sheet state: the cell grid and the sequential cursors.

use serde::{Deserialize, Serialize};

use crate::catalog::{COLUMN_COUNT, Column, ROW_COUNT, RowId};
use crate::cell::ScoreCell;

/// Fixed-size grid covering every (column, row) slot exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreGrid([[ScoreCell; ROW_COUNT]; COLUMN_COUNT]);

impl ScoreGrid {
    /// The cell at the given slot.
    #[must_use]
    pub fn cell(&self, column: Column, row: RowId) -> &ScoreCell {
        &self.0[column.index()][row.index()]
    }

    pub(crate) fn cell_mut(&mut self, column: Column, row: RowId) -> &mut ScoreCell {
        &mut self.0[column.index()][row.index()]
    }
}

/// One player's sheet: a name, the grid, and the two sequential cursors.
///
/// The cursors are the sole record of the next open row. They advance
/// once per fresh fill and never rewind, so clearing a cell afterwards
/// leaves a permanent gap rather than reopening the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name shown on the sheet and in standings.
    pub name: String,
    grid: ScoreGrid,
    next_up_row: Option<RowId>,
    next_down_row: Option<RowId>,
}

impl Player {
    /// Fresh sheet for the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grid: ScoreGrid::default(),
            next_up_row: Some(RowId::ALL[0]),
            next_down_row: Some(RowId::ALL[ROW_COUNT - 1]),
        }
    }

    /// Wipe the sheet and rewind both cursors, keeping the name.
    pub fn reset(&mut self) {
        self.grid = ScoreGrid::default();
        self.next_up_row = Some(RowId::ALL[0]);
        self.next_down_row = Some(RowId::ALL[ROW_COUNT - 1]);
    }

    /// The cell at the given slot.
    #[must_use]
    pub fn cell(&self, column: Column, row: RowId) -> &ScoreCell {
        self.grid.cell(column, row)
    }

    pub(crate) fn cell_mut(&mut self, column: Column, row: RowId) -> &mut ScoreCell {
        self.grid.cell_mut(column, row)
    }

    /// Next row open for a fresh fill in the up column, walking ones
    /// towards poker. `None` once the column is complete.
    #[must_use]
    pub const fn next_up_row(&self) -> Option<RowId> {
        self.next_up_row
    }

    /// Next row open for a fresh fill in the down column, walking poker
    /// towards ones. `None` once the column is complete.
    #[must_use]
    pub const fn next_down_row(&self) -> Option<RowId> {
        self.next_down_row
    }

    /// Advance the column's cursor after a fresh fill. Called exactly
    /// once per not-filled to filled transition; edits and clears do not
    /// come through here.
    pub(crate) fn record_fill(&mut self, column: Column) {
        match column {
            Column::Up => {
                self.next_up_row = self
                    .next_up_row
                    .and_then(|row| RowId::from_index(row.index() + 1));
            }
            Column::Down => {
                self.next_down_row = self
                    .next_down_row
                    .and_then(|row| row.index().checked_sub(1))
                    .and_then(RowId::from_index);
            }
            Column::Predicted | Column::Free => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::ScoreEntry;

    #[test]
    fn fresh_player_opens_the_sheet_at_both_ends() {
        let player = Player::new("Ana");
        assert_eq!(player.next_up_row(), Some(RowId::Ones));
        assert_eq!(player.next_down_row(), Some(RowId::Poker));
    }

    #[test]
    fn up_cursor_walks_down_the_sheet() {
        let mut player = Player::new("Ana");
        player.record_fill(Column::Up);
        assert_eq!(player.next_up_row(), Some(RowId::Twos));
        for _ in 0..(ROW_COUNT - 1) {
            player.record_fill(Column::Up);
        }
        assert_eq!(player.next_up_row(), None);
    }

    #[test]
    fn down_cursor_walks_up_the_sheet() {
        let mut player = Player::new("Ana");
        player.record_fill(Column::Down);
        assert_eq!(player.next_down_row(), Some(RowId::Karta));
        for _ in 0..(ROW_COUNT - 1) {
            player.record_fill(Column::Down);
        }
        assert_eq!(player.next_down_row(), None);
    }

    #[test]
    fn free_and_predicted_fills_leave_the_cursors_alone() {
        let mut player = Player::new("Ana");
        player.record_fill(Column::Free);
        player.record_fill(Column::Predicted);
        assert_eq!(player.next_up_row(), Some(RowId::Ones));
        assert_eq!(player.next_down_row(), Some(RowId::Poker));
    }

    #[test]
    fn reset_wipes_cells_and_rewinds_cursors() {
        let mut player = Player::new("Ana");
        player.cell_mut(Column::Free, RowId::Sixes).apply(ScoreEntry::Value(18));
        player.record_fill(Column::Up);
        player.reset();
        assert_eq!(player.name, "Ana");
        assert!(!player.cell(Column::Free, RowId::Sixes).is_filled());
        assert_eq!(player.next_up_row(), Some(RowId::Ones));
    }
}
