//! Accessors for the handful of preferences the game client persists:
//! player name, path to the game executable, and the two save-password
//! checkboxes. The query engine never touches these; they only ship with it.
//!
//! The backing store is abstracted as an opaque string key/value store so a
//! launcher can plug in whatever it keeps its state in. A flat TOML file
//! store is provided.

use std::{collections::BTreeMap, fs, io, path::PathBuf};

use thiserror::Error;

const PLAYER_NAME: &str = "PlayerName";
const GAME_EXECUTABLE: &str = "gta_sa_exe";
const SAVE_RCON_PASSWORDS: &str = "SaveRconPasses";
const SAVE_SERVER_PASSWORDS: &str = "SaveServPasses";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to persist settings: {0}")]
    Io(#[from] io::Error),

    #[error("settings file is not valid toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Opaque key/value store behind [`ClientSettings`]. Values are plain
/// strings; nothing is validated beyond what the store itself does.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError>;
}

/// Store backed by a flat TOML file of string keys.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSettingsStore {
    /// Loads the store, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(FileSettingsStore { path, values })
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        let contents = toml::to_string(&self.values)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// Typed view over the four known client settings.
pub struct ClientSettings<S> {
    store: S,
}

impl<S: SettingsStore> ClientSettings<S> {
    pub fn new(store: S) -> Self {
        ClientSettings { store }
    }

    pub fn player_name(&self) -> Option<String> {
        self.store.get(PLAYER_NAME)
    }

    pub fn set_player_name(&mut self, name: &str) -> Result<(), SettingsError> {
        self.store.set(PLAYER_NAME, name.to_string())
    }

    pub fn game_executable(&self) -> Option<String> {
        self.store.get(GAME_EXECUTABLE)
    }

    pub fn set_game_executable(&mut self, path: &str) -> Result<(), SettingsError> {
        self.store.set(GAME_EXECUTABLE, path.to_string())
    }

    pub fn save_rcon_passwords(&self) -> Option<bool> {
        self.store.get(SAVE_RCON_PASSWORDS).map(|v| coerce_bool(&v))
    }

    pub fn set_save_rcon_passwords(&mut self, save: bool) -> Result<(), SettingsError> {
        self.store.set(SAVE_RCON_PASSWORDS, save.to_string())
    }

    pub fn save_server_passwords(&self) -> Option<bool> {
        self.store
            .get(SAVE_SERVER_PASSWORDS)
            .map(|v| coerce_bool(&v))
    }

    pub fn set_save_server_passwords(&mut self, save: bool) -> Result<(), SettingsError> {
        self.store.set(SAVE_SERVER_PASSWORDS, save.to_string())
    }
}

// the original client stores these as registry strings, so "1" and "true"
// both count
fn coerce_bool(value: &str) -> bool {
    matches!(value, "true" | "1")
}
