//! Centralized limits and fixed identifiers for the score sheet.
//!
//! Everything tunable about a session lives here; the row catalog itself
//! is in [`crate::catalog`].

// Player limits ----------------------------------------------------------

/// Smallest session the setup screen accepts.
pub const MIN_PLAYERS: usize = 1;

/// Largest session the setup screen accepts.
pub const MAX_PLAYERS: usize = 6;

// Dice -------------------------------------------------------------------

/// Five dice per roll; caps a number row at five times its die face.
pub const DICE_PER_ROLL: i32 = 5;

// Persistence ------------------------------------------------------------

/// Fixed key under which the whole session snapshot is stored.
pub const STORAGE_KEY: &str = "yamb.session";

// Naming -----------------------------------------------------------------

/// Prefix for the fallback names given to blank player-name inputs.
pub(crate) const DEFAULT_NAME_PREFIX: &str = "Player";
