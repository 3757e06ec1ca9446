//! Plain-text rendering of sheets and standings for console output.

use std::fmt::Write;

use yamb_game::{
    Column, GameSession, Player, RowId, column_total, figures_subtotal, min_max_modifier,
    numbers_subtotal, ordinal, player_total,
};

const LABEL_WIDTH: usize = 20;
const CELL_WIDTH: usize = 10;

/// One player's sheet as a fixed-width table, with `x2` marking a
/// doubled figure and `!` an announced predicted cell.
#[must_use]
pub fn render_sheet(player: &Player) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$}",
        player.name,
        Column::Up.label(),
        Column::Down.label(),
        Column::Predicted.label(),
        Column::Free.label(),
    );
    let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + 4 * CELL_WIDTH));

    for row in RowId::ALL {
        let _ = write!(out, "{:<LABEL_WIDTH$}", row.label());
        for column in Column::ALL {
            let _ = write!(out, "{:>CELL_WIDTH$}", cell_text(player, column, row));
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + 4 * CELL_WIDTH));
    render_block(&mut out, "Numbers", player, numbers_subtotal);
    render_block(&mut out, "Min/max", player, min_max_modifier);
    render_block(&mut out, "Figures", player, figures_subtotal);
    render_block(&mut out, "Column total", player, column_total);
    let _ = writeln!(out, "{:<LABEL_WIDTH$}{}", "Grand total", player_total(player));
    out
}

fn cell_text(player: &Player, column: Column, row: RowId) -> String {
    let cell = player.cell(column, row);
    let mut text = cell.display_text();
    if cell.is_filled() && cell.one_roll {
        text.push_str(" x2");
    }
    if column == Column::Predicted && cell.predicted {
        text.push('!');
    }
    text
}

fn render_block(out: &mut String, label: &str, player: &Player, f: fn(&Player, Column) -> i32) {
    let _ = write!(out, "{label:<LABEL_WIDTH$}");
    for column in Column::ALL {
        let _ = write!(out, "{:>CELL_WIDTH$}", f(player, column));
    }
    let _ = writeln!(out);
}

/// The results table with ordinal ranks, best total first.
#[must_use]
pub fn render_standings(session: &GameSession) -> String {
    let mut out = String::new();
    for standing in session.standings() {
        let _ = writeln!(
            out,
            "{:>5}  {:<LABEL_WIDTH$}{:>8}",
            ordinal(standing.rank),
            standing.name,
            standing.total
        );
    }
    out
}
