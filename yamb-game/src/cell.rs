//! One sheet slot and the rules for writing to it.
//!
//! A cell is "filled" once it carries a committed value, crossed cells
//! included: crossing stores an explicit zero so a crossed row is
//! distinguishable from one never attempted. Filled cells stay editable.

use serde::{Deserialize, Serialize};

use crate::catalog::RowId;
use crate::constants::DICE_PER_ROLL;
use crate::error::ScoreError;

/// One slot on the score sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCell {
    /// Committed score, if any. Crossed cells hold `Some(0)`.
    #[serde(default)]
    pub value: Option<i32>,
    /// Explicitly forfeited for zero. Distinct from "not yet attempted".
    #[serde(default)]
    pub crossed: bool,
    /// Doubles a figure row's raw value before its bonus.
    #[serde(default)]
    pub one_roll: bool,
    /// Announcement mark; only meaningful on the predicted column.
    #[serde(default)]
    pub predicted: bool,
}

impl ScoreCell {
    /// Whether the cell carries a committed value (crossed counts).
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.value.is_some()
    }

    /// Text shown in the cell: `X` when crossed, the value when present,
    /// empty otherwise.
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.crossed {
            "X".to_string()
        } else {
            self.value.map_or_else(String::new, |value| value.to_string())
        }
    }

    /// Commit a parsed entry. Validation happens before this is called;
    /// the flags survive value edits but a clear resets the cross.
    pub(crate) fn apply(&mut self, entry: ScoreEntry) {
        match entry {
            ScoreEntry::Cross => {
                self.value = Some(0);
                self.crossed = true;
            }
            ScoreEntry::Clear => {
                self.value = None;
                self.crossed = false;
            }
            ScoreEntry::Value(value) => {
                self.value = Some(value);
                self.crossed = false;
            }
        }
    }

    /// Set or clear the one-roll doubling flag.
    pub(crate) fn set_one_roll(&mut self, enabled: bool) {
        self.one_roll = enabled;
    }

    /// Mark the cell as announced. One-way and idempotent.
    pub(crate) fn mark_predicted(&mut self) {
        self.predicted = true;
    }
}

/// A raw text entry parsed into its meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEntry {
    /// Forfeit the row for zero (`x` or `X`).
    Cross,
    /// Empty the cell (blank or `-`).
    Clear,
    /// A concrete score, not yet validated against the row.
    Value(i32),
}

impl ScoreEntry {
    /// Parse raw user text, trimming surrounding whitespace first.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidNumber`] when the text is neither a
    /// cross, a clear token, nor an integer.
    pub fn parse(raw: &str) -> Result<Self, ScoreError> {
        let text = raw.trim();
        if text.is_empty() || text == "-" {
            return Ok(Self::Clear);
        }
        if text.eq_ignore_ascii_case("x") {
            return Ok(Self::Cross);
        }
        text.parse::<i32>()
            .map(Self::Value)
            .map_err(|_| ScoreError::InvalidNumber {
                input: text.to_string(),
            })
    }
}

/// Check a numeric value against the row's scoring rules.
///
/// Number rows take zero or a whole number of dice of their face; the
/// straights take zero or their fixed target. Minimum, maximum, full,
/// karta and poker accept any integer the sheet-keeper writes down.
///
/// # Errors
///
/// Returns the first rule the value breaks, checked in the order
/// negative, above maximum, not a multiple.
pub fn validate_value(row: RowId, value: i32) -> Result<(), ScoreError> {
    if let Some(die) = row.die_value() {
        if value < 0 {
            return Err(ScoreError::NegativeScore { value });
        }
        let max = die * DICE_PER_ROLL;
        if value > max {
            return Err(ScoreError::AboveMaximum { row, max, value });
        }
        if value % die != 0 {
            return Err(ScoreError::NotMultiple { row, die, value });
        }
        return Ok(());
    }
    if let Some(target) = row.straight_target() {
        if value != 0 && value != target {
            return Err(ScoreError::InvalidFigureValue { row, target, value });
        }
    }
    Ok(())
}
