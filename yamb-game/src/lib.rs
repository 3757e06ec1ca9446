//! Yamb score-keeping engine
//!
//! Platform-agnostic core for a four-column Yamb score sheet: the row
//! catalog, per-cell entry rules, sequential-column ordering, scoring,
//! standings, and the session snapshot contract. No UI and no storage
//! backend live here; hosts plug persistence in through [`SessionStore`].

pub mod catalog;
pub mod cell;
pub mod constants;
pub mod error;
pub mod order;
pub mod player;
pub mod scoring;
pub mod session;

pub use catalog::{COLUMN_COUNT, Column, ROW_COUNT, RowCategory, RowId};
pub use cell::{ScoreCell, ScoreEntry, validate_value};
pub use constants::{MAX_PLAYERS, MIN_PLAYERS, STORAGE_KEY};
pub use error::{ScoreError, SessionError};
pub use order::is_eligible;
pub use player::{Player, ScoreGrid};
pub use scoring::{
    Standing, column_total, figures_subtotal, min_max_modifier, numbers_subtotal, ordinal,
    player_total, rank, standings,
};
pub use session::GameSession;

/// Trait for abstracting session snapshot persistence.
/// Platform-specific implementations provide this.
pub trait SessionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the full session snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, session: &GameSession) -> Result<(), Self::Error>;

    /// Load the stored snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or holds a snapshot that
    /// cannot be decoded.
    fn load(&self) -> Result<Option<GameSession>, Self::Error>;

    /// Remove the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to delete it.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Engine tying a session store to the recoverable load path.
pub struct Scorekeeper<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> Scorekeeper<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a session snapshot.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write fails.
    pub fn save(&self, session: &GameSession) -> Result<(), S::Error> {
        self.store.save(session)
    }

    /// Load the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the read fails.
    pub fn load(&self) -> Result<Option<GameSession>, S::Error> {
        self.store.load()
    }

    /// Load the stored session, falling back to an empty one. A missing
    /// snapshot is a normal first run; a failed load is logged and the
    /// broken snapshot abandoned, since there is no older state to keep.
    #[must_use]
    pub fn load_or_default(&self) -> GameSession {
        match self.store.load() {
            Ok(Some(session)) => session,
            Ok(None) => GameSession::default(),
            Err(error) => {
                log::warn!("failed to load saved session, starting fresh: {error}");
                GameSession::default()
            }
        }
    }

    /// Drop the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the delete fails.
    pub fn clear(&self) -> Result<(), S::Error> {
        self.store.clear()
    }
}
