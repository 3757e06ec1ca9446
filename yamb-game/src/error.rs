//! Typed rejection reasons for score entries and session operations.
//!
//! Every rejection leaves the session untouched; callers surface the
//! message and keep the previous cell contents on screen.

use thiserror::Error;

use crate::catalog::{Column, RowId};

/// Why a raw score entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Input was neither a number, a cross, nor a clear token.
    #[error("invalid entry {input:?}: enter a number, \"X\" to cross out, or \"-\" to clear")]
    InvalidNumber { input: String },

    /// Number rows never score below zero.
    #[error("score cannot be negative (got {value})")]
    NegativeScore { value: i32 },

    /// Number rows cap at five dice showing the row's face.
    #[error("maximum score for {row} is {max} (got {value})")]
    AboveMaximum { row: RowId, max: i32, value: i32 },

    /// Number rows only score whole dice of their face.
    #[error("score for {row} must be a multiple of {die} (got {value})")]
    NotMultiple { row: RowId, die: i32, value: i32 },

    /// Straight rows score exactly their target or nothing.
    #[error("{} must be {target} or \"X\" (got {value})", .row.label())]
    InvalidFigureValue { row: RowId, target: i32, value: i32 },

    /// Sequential columns only open one row at a time.
    #[error("row {row} is not open yet in the {column} column")]
    RowNotEligible { row: RowId, column: Column },
}

/// Why a session-level operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Setup accepts one to six players.
    #[error("player count must be between 1 and 6 (got {count})")]
    InvalidPlayerCount { count: usize },

    /// Renames must keep at least one visible character.
    #[error("player name cannot be empty")]
    InvalidName,

    /// The session has no player at the given seat.
    #[error("no player at index {index} (session has {len})")]
    PlayerOutOfRange { index: usize, len: usize },

    /// A score entry was rejected; the cell keeps its previous contents.
    #[error(transparent)]
    Score(#[from] ScoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_row() {
        let err = ScoreError::NotMultiple {
            row: RowId::Fours,
            die: 4,
            value: 7,
        };
        assert_eq!(err.to_string(), "score for fours must be a multiple of 4 (got 7)");
    }

    #[test]
    fn straight_messages_use_the_printed_label() {
        let err = ScoreError::InvalidFigureValue {
            row: RowId::BigStraight15,
            target: 15,
            value: 12,
        };
        assert_eq!(err.to_string(), "Big Straight (1-5) must be 15 or \"X\" (got 12)");
    }

    #[test]
    fn score_errors_convert_into_session_errors() {
        let err: SessionError = ScoreError::NegativeScore { value: -3 }.into();
        assert_eq!(
            err,
            SessionError::Score(ScoreError::NegativeScore { value: -3 })
        );
    }
}
