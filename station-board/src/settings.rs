//! Persisted user preferences.
//!
//! Settings live in a JSON file under the platform config directory.
//! The store is a plain value to be constructed once and passed to
//! whatever needs it; there is deliberately no process-wide singleton.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Errors that can occur while loading or persisting settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// No platform config directory could be determined
    #[error("could not determine a config directory")]
    NoConfigDir,

    /// Reading or writing the settings file failed
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the settings failed
    #[error("settings serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User preferences.
///
/// Values are stored as-is, with no validation, and unknown or missing
/// fields fall back to defaults on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether the arrivals view is preferred over departures.
    pub show_arrivals_preferred: bool,

    /// The station shown last, restored on the next start.
    pub last_station: Option<String>,
}

/// In-memory settings with write-through persistence to disk.
pub struct SettingsStore {
    settings: RwLock<Settings>,
    file_path: PathBuf,
}

impl SettingsStore {
    /// Open the store at the platform config location, creating the
    /// file with defaults if it does not exist yet.
    pub fn open() -> Result<Self, SettingsError> {
        let config_dir = directories::ProjectDirs::from("org", "stationboard", "station-board")
            .ok_or(SettingsError::NoConfigDir)?
            .config_dir()
            .to_path_buf();
        fs::create_dir_all(&config_dir)?;

        Self::open_at(config_dir.join("settings.json"))
    }

    /// Open the store at an explicit file path.
    ///
    /// Used by tests and by callers that manage their own locations.
    pub fn open_at(file_path: PathBuf) -> Result<Self, SettingsError> {
        debug!(path = %file_path.display(), "opening settings");

        let settings = if file_path.exists() {
            read_settings(&file_path)?
        } else {
            Settings::default()
        };

        let store = Self {
            settings: RwLock::new(settings),
            file_path,
        };

        if !store.file_path.exists() {
            store.persist()?;
        }

        Ok(store)
    }

    /// A snapshot of the current settings.
    pub fn get(&self) -> Settings {
        self.settings.read().unwrap().clone()
    }

    /// Whether the arrivals view is preferred.
    pub fn show_arrivals_preferred(&self) -> bool {
        self.settings.read().unwrap().show_arrivals_preferred
    }

    /// Set the arrivals preference and persist.
    pub fn set_show_arrivals_preferred(&self, preferred: bool) -> Result<(), SettingsError> {
        {
            let mut settings = self.settings.write().unwrap();
            settings.show_arrivals_preferred = preferred;
        }
        self.persist()
    }

    /// The station shown last, if any.
    pub fn last_station(&self) -> Option<String> {
        self.settings.read().unwrap().last_station.clone()
    }

    /// Remember the station shown last and persist.
    pub fn set_last_station(&self, station: impl Into<String>) -> Result<(), SettingsError> {
        {
            let mut settings = self.settings.write().unwrap();
            settings.last_station = Some(station.into());
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), SettingsError> {
        let settings = self.settings.read().unwrap();
        let content = serde_json::to_string_pretty(&*settings)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}

/// Read settings from disk, falling back to defaults if the file does
/// not parse. A corrupt settings file should never keep the
/// application from starting.
fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
        Settings::default()
    }))
}
