//! # Saved games
//!
//! The current game is kept as a single JSON blob under a fixed storage key
//! (`<save_dir>/<key>.json`). Writes go through a `.tmp` file and a rename so
//! a crash never leaves a half-written save behind.

mod saved;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::game::GameState;

pub use saved::SavedGame;

/// File-backed store for the one saved game.
#[derive(Debug, Clone)]
pub struct GameStore {
    path: PathBuf,
}

impl GameStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self::at(config.save_dir.join(format!("{}.json", config.key)))
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        GameStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `state`, replacing any previous save.
    pub fn save(&self, state: &GameState) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&SavedGame::from_state(state))?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        debug!(
            "saved game with {} moves to {}",
            state.moves().len(),
            self.path.display()
        );
        Ok(())
    }

    /// Load the saved game, or `None` when nothing has been saved.
    pub fn load(&self) -> Result<Option<GameState>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        let saved: SavedGame =
            serde_json::from_str(&json).map_err(|e| StorageError::Parse {
                path: self.path.clone(),
                source: e,
            })?;
        let state = GameState::try_from(saved)?;
        info!(
            "loaded saved game from {} ({} moves)",
            self.path.display(),
            state.moves().len()
        );
        Ok(Some(state))
    }

    /// Remove the saved game. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("cleared saved game at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::play;

    #[test]
    fn test_store_path_uses_key() {
        let config = StorageConfig {
            save_dir: PathBuf::from("saves"),
            key: "myGame".to_string(),
            autosave: true,
        };
        assert_eq!(GameStore::new(&config).path(), Path::new("saves/myGame.json"));
    }

    #[test]
    fn test_load_without_save_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::at(dir.path().join("game.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::at(dir.path().join("nested").join("game.json"));
        let state = play(&GameState::initial(), &[3, 2, 3, 2]);

        store.save(&state).unwrap();
        assert!(store.path().exists());
        assert!(!store.path().with_extension("tmp").exists());
        assert_eq!(store.load().unwrap(), Some(state));
    }

    #[test]
    fn test_save_overwrites_previous() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::at(dir.path().join("game.json"));
        store.save(&play(&GameState::initial(), &[0])).unwrap();
        let later = play(&GameState::initial(), &[0, 1, 2]);
        store.save(&later).unwrap();
        assert_eq!(store.load().unwrap().unwrap().moves(), &[0, 1, 2]);
    }

    #[test]
    fn test_clear_removes_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::at(dir.path().join("game.json"));
        store.save(&GameState::initial()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing again is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        fs::write(&path, "{ not json").unwrap();
        let err = GameStore::at(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_malformed_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        fs::write(
            &path,
            r#"{"board": [[null]], "currentPlayer": "Player1", "isGameOver": false, "winner": null}"#,
        )
        .unwrap();
        let err = GameStore::at(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Malformed(_)));
    }

    #[test]
    fn test_load_blob_without_steps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        let mut rows = vec![vec![serde_json::Value::Null; 7]; 6];
        rows[5][3] = serde_json::json!("Player1");
        let blob = serde_json::json!({
            "board": rows,
            "currentPlayer": "Player2",
            "isGameOver": false,
            "winner": null,
            "winningPositions": []
        });
        fs::write(&path, blob.to_string()).unwrap();

        let state = GameStore::at(&path).load().unwrap().unwrap();
        assert!(state.moves().is_empty());
        assert_eq!(state.board().occupied(), 1);
        assert_eq!(state.current_player(), crate::game::Player::Player2);
    }
}
