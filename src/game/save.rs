//! Persistence of the game progress as one JSON document in a key/value store.

use crate::game::consts;
use crate::game::lang::Language;
use crate::game::GameError;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything needed to resume a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub stage: usize,
    pub player: [f32; 3],
    /// Positions of the tracked boxes, in configuration order.
    pub cubes: Vec<[f32; 3]>,
    pub has_key: bool,
    pub camera_offset_x: f32,
    pub language: Language,
}

/// String key/value store, e.g. a directory of files or the browser's local storage.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, GameError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), GameError>;
}

/// Volatile storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use self::file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::Storage;
    use crate::game::GameError;

    use std::fs;
    use std::io::ErrorKind;
    use std::path::PathBuf;

    /// One file per key inside a directory.
    #[derive(Debug)]
    pub struct FileStorage {
        dir: PathBuf,
    }

    impl FileStorage {
        pub fn new(dir: PathBuf) -> Self {
            FileStorage { dir }
        }

        /// Storage under the platform's local data directory, e.g. `~/.local/share/cuboid`.
        pub fn in_data_dir() -> Result<Self, GameError> {
            let mut dir = dirs::data_local_dir()
                .ok_or_else(|| GameError::Storage("no local data directory".to_string()))?;
            dir.push("cuboid");
            Ok(Self::new(dir))
        }

        fn path(&self, key: &str) -> PathBuf {
            self.dir.join(format!("{}.json", key))
        }
    }

    impl Storage for FileStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, GameError> {
            match fs::read_to_string(self.path(key)) {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), GameError> {
            fs::create_dir_all(&self.dir)?;
            let path = self.path(key);
            fs::write(&path, value)?;
            debug!("wrote {}", path.display());
            Ok(())
        }
    }
}

pub fn save_game(storage: &mut dyn Storage, state: &SaveState) -> Result<(), GameError> {
    let json = serde_json::to_string(state)?;
    storage.set_item(consts::SAVE_KEY, &json)
}

/// `Ok(None)` if nothing has been saved yet.
pub fn load_game(storage: &dyn Storage) -> Result<Option<SaveState>, GameError> {
    match storage.get_item(consts::SAVE_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
