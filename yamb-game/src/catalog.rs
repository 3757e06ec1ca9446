//! Static catalog of score-sheet rows and columns.
//!
//! Row order is load-bearing: the sequential columns walk the sheet by
//! row index, so [`RowId::ALL`] doubles as the cursor order. Serialized
//! names are part of the snapshot contract and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DICE_PER_ROLL;

/// Number of scoring rows on the sheet.
pub const ROW_COUNT: usize = 13;

/// Number of scoring columns on the sheet.
pub const COLUMN_COUNT: usize = 4;

/// Identifier for one of the thirteen scoring rows, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowId {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    Minimum,
    Maximum,
    BigStraight15,
    BigStraight26,
    Full,
    Karta,
    Poker,
}

/// Broad scoring behavior of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowCategory {
    /// Ones through sixes; validated against the die face.
    Number,
    /// Minimum and maximum; only score through the min/max modifier.
    Special,
    /// Straights, full, karta and poker; carry a flat fill bonus.
    Figure,
}

impl RowId {
    /// Every row, top to bottom as printed on the sheet.
    pub const ALL: [Self; ROW_COUNT] = [
        Self::Ones,
        Self::Twos,
        Self::Threes,
        Self::Fours,
        Self::Fives,
        Self::Sixes,
        Self::Minimum,
        Self::Maximum,
        Self::BigStraight15,
        Self::BigStraight26,
        Self::Full,
        Self::Karta,
        Self::Poker,
    ];

    /// Position of the row on the sheet (0 = ones, 12 = poker).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row at the given sheet position, if any.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < ROW_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Which scoring block the row belongs to.
    #[must_use]
    pub const fn category(self) -> RowCategory {
        match self {
            Self::Ones | Self::Twos | Self::Threes | Self::Fours | Self::Fives | Self::Sixes => {
                RowCategory::Number
            }
            Self::Minimum | Self::Maximum => RowCategory::Special,
            Self::BigStraight15 | Self::BigStraight26 | Self::Full | Self::Karta | Self::Poker => {
                RowCategory::Figure
            }
        }
    }

    /// Die face counted by a number row.
    #[must_use]
    pub const fn die_value(self) -> Option<i32> {
        match self {
            Self::Ones => Some(1),
            Self::Twos => Some(2),
            Self::Threes => Some(3),
            Self::Fours => Some(4),
            Self::Fives => Some(5),
            Self::Sixes => Some(6),
            _ => None,
        }
    }

    /// Largest value a number row accepts.
    #[must_use]
    pub const fn max_value(self) -> Option<i32> {
        match self.die_value() {
            Some(die) => Some(die * DICE_PER_ROLL),
            None => None,
        }
    }

    /// Flat bonus a figure row adds once it is filled, crossed out or not.
    #[must_use]
    pub const fn bonus(self) -> i32 {
        match self {
            Self::BigStraight15 => 5,
            Self::BigStraight26 => 10,
            Self::Full => 15,
            Self::Karta => 25,
            Self::Poker => 50,
            _ => 0,
        }
    }

    /// The only non-zero score a straight row accepts.
    #[must_use]
    pub const fn straight_target(self) -> Option<i32> {
        match self {
            Self::BigStraight15 => Some(15),
            Self::BigStraight26 => Some(20),
            _ => None,
        }
    }

    /// Human-readable label as printed on the sheet.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ones => "Ones",
            Self::Twos => "Twos",
            Self::Threes => "Threes",
            Self::Fours => "Fours",
            Self::Fives => "Fives",
            Self::Sixes => "Sixes",
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
            Self::BigStraight15 => "Big Straight (1-5)",
            Self::BigStraight26 => "Big Straight (2-6)",
            Self::Full => "Full House",
            Self::Karta => "Karta",
            Self::Poker => "Poker",
        }
    }

    /// Stable identifier used in snapshots and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ones => "ones",
            Self::Twos => "twos",
            Self::Threes => "threes",
            Self::Fours => "fours",
            Self::Fives => "fives",
            Self::Sixes => "sixes",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::BigStraight15 => "bigStraight15",
            Self::BigStraight26 => "bigStraight26",
            Self::Full => "full",
            Self::Karta => "karta",
            Self::Poker => "poker",
        }
    }

    /// Rows of one category, in sheet order.
    pub fn in_category(category: RowCategory) -> impl Iterator<Item = Self> {
        Self::ALL
            .into_iter()
            .filter(move |row| row.category() == category)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RowId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|row| row.as_str() == s)
            .ok_or(())
    }
}

/// One of the four scoring columns, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Filled top to bottom, one open row at a time.
    Up,
    /// Filled bottom to top, one open row at a time.
    Down,
    /// Any row, but it must be announced before it can be crossed out.
    Predicted,
    /// Any row, any time.
    Free,
}

impl Column {
    /// Every column, left to right as printed on the sheet.
    pub const ALL: [Self; COLUMN_COUNT] = [Self::Up, Self::Down, Self::Predicted, Self::Free];

    /// Position of the column on the sheet.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the column constrains which row may be newly filled.
    #[must_use]
    pub const fn is_sequential(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Human-readable label as printed on the sheet.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Predicted => "Predicted",
            Self::Free => "Free",
        }
    }

    /// Stable identifier used in snapshots and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Predicted => "predicted",
            Self::Free => "free",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Column {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_order_matches_indices() {
        for (index, row) in RowId::ALL.iter().enumerate() {
            assert_eq!(row.index(), index);
            assert_eq!(RowId::from_index(index), Some(*row));
        }
        assert_eq!(RowId::from_index(ROW_COUNT), None);
    }

    #[test]
    fn categories_partition_the_sheet() {
        assert_eq!(RowId::in_category(RowCategory::Number).count(), 6);
        assert_eq!(RowId::in_category(RowCategory::Special).count(), 2);
        assert_eq!(RowId::in_category(RowCategory::Figure).count(), 5);
    }

    #[test]
    fn number_rows_cap_at_five_dice() {
        assert_eq!(RowId::Ones.max_value(), Some(5));
        assert_eq!(RowId::Fours.max_value(), Some(20));
        assert_eq!(RowId::Sixes.max_value(), Some(30));
        assert_eq!(RowId::Minimum.max_value(), None);
        assert_eq!(RowId::Poker.max_value(), None);
    }

    #[test]
    fn figure_bonuses_match_the_sheet() {
        assert_eq!(RowId::BigStraight15.bonus(), 5);
        assert_eq!(RowId::BigStraight26.bonus(), 10);
        assert_eq!(RowId::Full.bonus(), 15);
        assert_eq!(RowId::Karta.bonus(), 25);
        assert_eq!(RowId::Poker.bonus(), 50);
        assert_eq!(RowId::Ones.bonus(), 0);
        assert_eq!(RowId::Maximum.bonus(), 0);
    }

    #[test]
    fn straight_targets_are_fixed() {
        assert_eq!(RowId::BigStraight15.straight_target(), Some(15));
        assert_eq!(RowId::BigStraight26.straight_target(), Some(20));
        assert_eq!(RowId::Full.straight_target(), None);
    }

    #[test]
    fn row_ids_round_trip_through_strings() {
        for row in RowId::ALL {
            assert_eq!(row.as_str().parse::<RowId>(), Ok(row));
        }
        assert_eq!("yahtzee".parse::<RowId>(), Err(()));
    }

    #[test]
    fn column_ids_round_trip_through_strings() {
        for column in Column::ALL {
            assert_eq!(column.as_str().parse::<Column>(), Ok(column));
        }
        assert_eq!("sideways".parse::<Column>(), Err(()));
    }

    #[test]
    fn serde_names_match_stable_identifiers() {
        let json = serde_json::to_string(&RowId::BigStraight15).unwrap();
        assert_eq!(json, "\"bigStraight15\"");
        let json = serde_json::to_string(&Column::Predicted).unwrap();
        assert_eq!(json, "\"predicted\"");
    }

    #[test]
    fn only_up_and_down_are_sequential() {
        assert!(Column::Up.is_sequential());
        assert!(Column::Down.is_sequential());
        assert!(!Column::Predicted.is_sequential());
        assert!(!Column::Free.is_sequential());
    }
}
