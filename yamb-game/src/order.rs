//! Entry-order rules: which cell accepts a write right now.

use crate::catalog::{Column, RowId};
use crate::player::Player;

/// Whether `(column, row)` accepts a write for this player.
///
/// Sequential columns admit already-filled cells (edits in place) plus
/// the single cursor row; the predicted and free columns admit every
/// row at any time.
#[must_use]
pub fn is_eligible(player: &Player, column: Column, row: RowId) -> bool {
    if player.cell(column, row).is_filled() {
        return true;
    }
    match column {
        Column::Up => player.next_up_row() == Some(row),
        Column::Down => player.next_down_row() == Some(row),
        Column::Predicted | Column::Free => true,
    }
}
