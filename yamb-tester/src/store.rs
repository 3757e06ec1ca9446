//! File-backed session store used by the persistence steps.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use yamb_game::{GameSession, SessionStore};

/// Errors from the file-backed store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot io failed: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Keeps the session snapshot in a single JSON file, the way a browser
/// host keeps it under one storage key.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Unique temp-dir store for one scenario run, so parallel runs
    /// never clobber each other.
    #[must_use]
    pub fn temp_for(label: &str) -> Self {
        let file = format!("yamb-tester-{label}-{}.json", std::process::id());
        Self::new(std::env::temp_dir().join(file))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    type Error = StoreError;

    fn save(&self, session: &GameSession) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, session.to_json()?)?;
        log::debug!("snapshot written to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<GameSession>, Self::Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        Ok(Some(GameSession::from_json(&text)?))
    }

    fn clear(&self) -> Result<(), Self::Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamb_game::{Column, RowId, Scorekeeper};

    #[test]
    fn missing_file_loads_as_none() {
        let store = FileStore::temp_for("missing");
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn snapshots_survive_a_save_load_cycle() {
        let store = FileStore::temp_for("cycle");
        let mut session = GameSession::start(&["Ana", "Bo"]).unwrap();
        session.enter_score(0, Column::Free, RowId::Poker, "24").unwrap();
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_files_surface_a_decode_error_and_fall_back() {
        let store = FileStore::temp_for("corrupt");
        fs::write(store.path(), "{definitely not json").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Decode(_))));

        let keeper = Scorekeeper::new(store);
        assert_eq!(keeper.load_or_default(), GameSession::default());
    }
}
