//! The game session: players in seating order, the active turn, and the
//! write entry points the interface calls.
//!
//! The session is also the unit of persistence. Its serialized form is
//! the snapshot contract; two sessions compare equal exactly when their
//! snapshots do.

use serde::{Deserialize, Serialize};

use crate::catalog::{Column, RowId};
use crate::cell::{ScoreEntry, validate_value};
use crate::constants::{DEFAULT_NAME_PREFIX, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::{ScoreError, SessionError};
use crate::order;
use crate::player::Player;
use crate::scoring::{self, Standing};

/// A whole game in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    players: Vec<Player>,
    #[serde(default)]
    active_player_index: usize,
}

impl GameSession {
    /// Start a game with the given names. Blank names fall back to
    /// "Player N" by seat.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPlayerCount`] when `names` is empty
    /// or longer than six.
    pub fn start<S: AsRef<str>>(names: &[S]) -> Result<Self, SessionError> {
        let count = names.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(SessionError::InvalidPlayerCount { count });
        }
        let players = names
            .iter()
            .enumerate()
            .map(|(seat, name)| {
                let trimmed = name.as_ref().trim();
                if trimmed.is_empty() {
                    Player::new(format!("{DEFAULT_NAME_PREFIX} {}", seat + 1))
                } else {
                    Player::new(trimmed)
                }
            })
            .collect();
        Ok(Self {
            players,
            active_player_index: 0,
        })
    }

    /// The players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player at the given seat, if any.
    #[must_use]
    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Number of seats at the table.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat whose turn it is.
    #[must_use]
    pub const fn active_player_index(&self) -> usize {
        self.active_player_index
    }

    /// The player whose turn it is, if the table is not empty.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.active_player_index)
    }

    /// Whether the cell currently accepts input for that player.
    #[must_use]
    pub fn is_eligible(&self, index: usize, column: Column, row: RowId) -> bool {
        self.players
            .get(index)
            .is_some_and(|player| order::is_eligible(player, column, row))
    }

    /// Pass the turn to the next seat, wrapping around. No-op on an
    /// empty session.
    pub fn advance_turn(&mut self) {
        if self.players.is_empty() {
            return;
        }
        self.active_player_index = (self.active_player_index + 1) % self.players.len();
    }

    /// Wipe every sheet and hand the turn back to the first seat.
    /// Names and seating stay.
    pub fn reset_scores(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        self.active_player_index = 0;
    }

    /// Rename the player at a seat. The new name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PlayerOutOfRange`] for a bad seat and
    /// [`SessionError::InvalidName`] when the name trims to nothing.
    pub fn rename_player(&mut self, index: usize, name: &str) -> Result<(), SessionError> {
        let player = self.player_mut(index)?;
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SessionError::InvalidName);
        }
        player.name = trimmed.to_string();
        Ok(())
    }

    /// Write raw text into a cell: a number, `X` to cross out, blank or
    /// `-` to clear. The eligibility check, the parse and the row's
    /// validation all run before anything mutates, so a rejected entry
    /// leaves the cell exactly as it was. A fresh fill advances the
    /// column's cursor once; edits and clears never move it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PlayerOutOfRange`] for a bad seat,
    /// otherwise the [`ScoreError`] describing the rejected entry.
    pub fn enter_score(
        &mut self,
        index: usize,
        column: Column,
        row: RowId,
        raw: &str,
    ) -> Result<(), SessionError> {
        let player = self.player_mut(index)?;
        if !order::is_eligible(player, column, row) {
            return Err(ScoreError::RowNotEligible { row, column }.into());
        }
        let entry = ScoreEntry::parse(raw)?;
        if let ScoreEntry::Value(value) = entry {
            validate_value(row, value)?;
        }
        let was_filled = player.cell(column, row).is_filled();
        player.cell_mut(column, row).apply(entry);
        if !was_filled && player.cell(column, row).is_filled() {
            player.record_fill(column);
        }
        Ok(())
    }

    /// Cross out a cell through the forfeit action. Same eligibility rule
    /// as a fill; on the predicted column the cell is announced first, so
    /// a direct cross never trips over a missing announcement.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PlayerOutOfRange`] for a bad seat and
    /// [`ScoreError::RowNotEligible`] for a closed row.
    pub fn cross_out(&mut self, index: usize, column: Column, row: RowId) -> Result<(), SessionError> {
        let player = self.player_mut(index)?;
        if !order::is_eligible(player, column, row) {
            return Err(ScoreError::RowNotEligible { row, column }.into());
        }
        if column == Column::Predicted {
            player.cell_mut(column, row).mark_predicted();
        }
        let was_filled = player.cell(column, row).is_filled();
        player.cell_mut(column, row).apply(ScoreEntry::Cross);
        if !was_filled {
            player.record_fill(column);
        }
        Ok(())
    }

    /// Set or clear the one-roll doubling flag on a cell. The flag is
    /// stored anywhere but only read back on figure rows.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PlayerOutOfRange`] for a bad seat.
    pub fn set_one_roll(
        &mut self,
        index: usize,
        column: Column,
        row: RowId,
        enabled: bool,
    ) -> Result<(), SessionError> {
        let player = self.player_mut(index)?;
        player.cell_mut(column, row).set_one_roll(enabled);
        Ok(())
    }

    /// Announce a row in the predicted column. The mark is one-way.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PlayerOutOfRange`] for a bad seat.
    pub fn mark_predicted(&mut self, index: usize, row: RowId) -> Result<(), SessionError> {
        let player = self.player_mut(index)?;
        player.cell_mut(Column::Predicted, row).mark_predicted();
        Ok(())
    }

    /// The results table for the current totals.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        scoring::standings(&self.players)
    }

    /// Serialize the whole session to its JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a session from a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a valid session.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn player_mut(&mut self, index: usize) -> Result<&mut Player, SessionError> {
        let len = self.players.len();
        self.players
            .get_mut(index)
            .ok_or(SessionError::PlayerOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{column_total, player_total};

    fn two_player_session() -> GameSession {
        GameSession::start(&["Ana", "Bo"]).unwrap()
    }

    #[test]
    fn start_rejects_bad_player_counts() {
        let none: [&str; 0] = [];
        assert_eq!(
            GameSession::start(&none),
            Err(SessionError::InvalidPlayerCount { count: 0 })
        );
        let seven = ["a", "b", "c", "d", "e", "f", "g"];
        assert_eq!(
            GameSession::start(&seven),
            Err(SessionError::InvalidPlayerCount { count: 7 })
        );
    }

    #[test]
    fn start_fills_blank_names_by_seat() {
        let session = GameSession::start(&["  ", "Bo", ""]).unwrap();
        assert_eq!(session.player(0).unwrap().name, "Player 1");
        assert_eq!(session.player(1).unwrap().name, "Bo");
        assert_eq!(session.player(2).unwrap().name, "Player 3");
    }

    #[test]
    fn default_session_is_empty() {
        let session = GameSession::default();
        assert_eq!(session.player_count(), 0);
        assert_eq!(session.active_player(), None);
    }

    #[test]
    fn enter_score_commits_and_advances_the_cursor() {
        let mut session = two_player_session();
        session.enter_score(0, Column::Up, RowId::Ones, "3").unwrap();
        let player = session.player(0).unwrap();
        assert_eq!(player.cell(Column::Up, RowId::Ones).value, Some(3));
        assert_eq!(player.next_up_row(), Some(RowId::Twos));
    }

    #[test]
    fn editing_a_filled_cell_does_not_advance_again() {
        let mut session = two_player_session();
        session.enter_score(0, Column::Up, RowId::Ones, "3").unwrap();
        session.enter_score(0, Column::Up, RowId::Ones, "5").unwrap();
        let player = session.player(0).unwrap();
        assert_eq!(player.cell(Column::Up, RowId::Ones).value, Some(5));
        assert_eq!(player.next_up_row(), Some(RowId::Twos));
    }

    #[test]
    fn clearing_does_not_rewind_the_cursor() {
        let mut session = two_player_session();
        session.enter_score(0, Column::Up, RowId::Ones, "3").unwrap();
        session.enter_score(0, Column::Up, RowId::Ones, "").unwrap();
        let player = session.player(0).unwrap();
        assert!(!player.cell(Column::Up, RowId::Ones).is_filled());
        assert_eq!(player.next_up_row(), Some(RowId::Twos));
    }

    #[test]
    fn rejected_entries_leave_the_cell_untouched() {
        let mut session = two_player_session();
        session.enter_score(0, Column::Free, RowId::Fours, "16").unwrap();
        let before = *session.player(0).unwrap().cell(Column::Free, RowId::Fours);
        let err = session.enter_score(0, Column::Free, RowId::Fours, "7");
        assert!(matches!(
            err,
            Err(SessionError::Score(ScoreError::NotMultiple { .. }))
        ));
        assert_eq!(
            *session.player(0).unwrap().cell(Column::Free, RowId::Fours),
            before
        );
    }

    #[test]
    fn sequential_columns_reject_rows_out_of_order() {
        let mut session = two_player_session();
        let err = session.enter_score(0, Column::Up, RowId::Twos, "4");
        assert_eq!(
            err,
            Err(SessionError::Score(ScoreError::RowNotEligible {
                row: RowId::Twos,
                column: Column::Up
            }))
        );
        let err = session.enter_score(0, Column::Down, RowId::Ones, "1");
        assert!(matches!(
            err,
            Err(SessionError::Score(ScoreError::RowNotEligible { .. }))
        ));
    }

    #[test]
    fn crossing_through_enter_score_advances_the_cursor() {
        let mut session = two_player_session();
        session.enter_score(0, Column::Down, RowId::Poker, "X").unwrap();
        let player = session.player(0).unwrap();
        assert!(player.cell(Column::Down, RowId::Poker).crossed);
        assert_eq!(player.next_down_row(), Some(RowId::Karta));
    }

    #[test]
    fn cross_out_on_predicted_column_announces_first() {
        let mut session = two_player_session();
        session.cross_out(0, Column::Predicted, RowId::Full).unwrap();
        let cell = session.player(0).unwrap().cell(Column::Predicted, RowId::Full);
        assert!(cell.predicted);
        assert!(cell.crossed);
        assert_eq!(cell.value, Some(0));
    }

    #[test]
    fn cross_out_respects_sequential_order() {
        let mut session = two_player_session();
        let err = session.cross_out(0, Column::Up, RowId::Sixes);
        assert!(matches!(
            err,
            Err(SessionError::Score(ScoreError::RowNotEligible { .. }))
        ));
    }

    #[test]
    fn mark_predicted_is_one_way() {
        let mut session = two_player_session();
        session.mark_predicted(0, RowId::Karta).unwrap();
        session.mark_predicted(0, RowId::Karta).unwrap();
        assert!(session.player(0).unwrap().cell(Column::Predicted, RowId::Karta).predicted);
    }

    #[test]
    fn one_roll_flag_feeds_the_figure_subtotal() {
        let mut session = two_player_session();
        session.enter_score(0, Column::Free, RowId::Karta, "30").unwrap();
        session.set_one_roll(0, Column::Free, RowId::Karta, true).unwrap();
        let player = session.player(0).unwrap();
        assert_eq!(column_total(player, Column::Free), 30 * 2 + 25);
    }

    #[test]
    fn advance_turn_wraps_and_skips_nothing() {
        let mut session = two_player_session();
        assert_eq!(session.active_player_index(), 0);
        session.advance_turn();
        assert_eq!(session.active_player_index(), 1);
        session.advance_turn();
        assert_eq!(session.active_player_index(), 0);
    }

    #[test]
    fn advance_turn_on_empty_session_is_a_no_op() {
        let mut session = GameSession::default();
        session.advance_turn();
        assert_eq!(session.active_player_index(), 0);
    }

    #[test]
    fn reset_scores_keeps_names_and_rewinds_the_turn() {
        let mut session = two_player_session();
        session.enter_score(0, Column::Free, RowId::Poker, "24").unwrap();
        session.advance_turn();
        session.reset_scores();
        assert_eq!(session.active_player_index(), 0);
        let player = session.player(0).unwrap();
        assert_eq!(player.name, "Ana");
        assert_eq!(player_total(player), 0);
    }

    #[test]
    fn rename_trims_and_rejects_empty_names() {
        let mut session = two_player_session();
        session.rename_player(1, "  Bobo  ").unwrap();
        assert_eq!(session.player(1).unwrap().name, "Bobo");
        assert_eq!(session.rename_player(1, "   "), Err(SessionError::InvalidName));
        assert_eq!(
            session.rename_player(9, "Zed"),
            Err(SessionError::PlayerOutOfRange { index: 9, len: 2 })
        );
    }

    #[test]
    fn operations_against_bad_seats_are_rejected() {
        let mut session = two_player_session();
        assert!(matches!(
            session.enter_score(5, Column::Free, RowId::Ones, "1"),
            Err(SessionError::PlayerOutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            session.cross_out(5, Column::Free, RowId::Ones),
            Err(SessionError::PlayerOutOfRange { .. })
        ));
    }

    #[test]
    fn snapshots_round_trip_exactly() {
        let mut session = two_player_session();
        session.enter_score(0, Column::Up, RowId::Ones, "4").unwrap();
        session.enter_score(1, Column::Free, RowId::Poker, "X").unwrap();
        session.set_one_roll(1, Column::Free, RowId::Poker, true).unwrap();
        session.advance_turn();
        let json = session.to_json().unwrap();
        let restored = GameSession::from_json(&json).unwrap();
        assert_eq!(restored, session);
    }
}
