//! Persisted settings: the default browse directory
//!
//! Stored as flat JSON in `<settings dir>/config.json`. Read failures are
//! never fatal; they send the caller back to asking the user.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_FILE: &str = "config.json";
const SETTINGS_DIR: &str = "settings";

/// The settings record written to disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_directory: String,
}

/// Location of the settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `settings/` next to the running executable, or under the working
    /// directory when the executable path is unavailable.
    pub fn beside_executable() -> Self {
        let base = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(SETTINGS_DIR))
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Read the settings file; `None` if it is missing or unreadable.
    pub fn load(&self) -> Option<Settings> {
        let path = self.config_path();
        if !path.exists() {
            return None;
        }
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<Settings>(&text) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!("Ignoring malformed {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write the settings file, creating the settings directory if needed
    pub fn save(&self, settings: &Settings) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string(settings)?;
        fs::write(self.config_path(), text)?;
        Ok(())
    }
}

/// Return the default browse directory.
///
/// A readable config wins. Otherwise `prompt` is asked for a directory; a
/// picked directory is saved and returned, a cancelled prompt yields `""`.
pub fn resolve_default_directory<F>(store: &SettingsStore, prompt: F) -> String
where
    F: FnOnce() -> Option<PathBuf>,
{
    if let Some(settings) = store.load() {
        info!("Default directory from config: {:?}", settings.default_directory);
        return settings.default_directory;
    }

    let Some(picked) = prompt() else {
        info!("No default directory chosen");
        return String::new();
    };

    let directory = picked.to_string_lossy().into_owned();
    let settings = Settings {
        default_directory: directory.clone(),
    };
    match store.save(&settings) {
        Ok(()) => info!("Saved default directory {:?}", directory),
        Err(e) => warn!("Could not save {}: {}", store.config_path().display(), e),
    }
    directory
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn stored_directory_returned_without_prompt() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(tmp.path());
        fs::write(store.config_path(), r#"{"default_directory": "/data/tracks"}"#).unwrap();

        let asked = Cell::new(false);
        let dir = resolve_default_directory(&store, || {
            asked.set(true);
            None
        });
        assert_eq!(dir, "/data/tracks");
        assert!(!asked.get());
    }

    #[test]
    fn missing_field_is_empty_string() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(tmp.path());
        fs::write(store.config_path(), "{}").unwrap();
        assert_eq!(resolve_default_directory(&store, || None), "");
    }

    #[test]
    fn corrupt_config_falls_back_to_prompt() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(tmp.path());
        fs::write(store.config_path(), "{ not json").unwrap();

        let dir = resolve_default_directory(&store, || Some(PathBuf::from("/picked")));
        assert_eq!(dir, "/picked");
        assert_eq!(
            store.load(),
            Some(Settings {
                default_directory: "/picked".to_string()
            })
        );
    }

    #[test]
    fn cancelled_prompt_returns_empty_and_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("settings"));
        assert_eq!(resolve_default_directory(&store, || None), "");
        assert!(!store.config_path().exists());
    }

    #[test]
    fn save_creates_settings_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("nested").join("settings"));
        let dir = resolve_default_directory(&store, || Some(PathBuf::from("/srv/geo")));
        assert_eq!(dir, "/srv/geo");
        let text = fs::read_to_string(store.config_path()).unwrap();
        assert_eq!(text, r#"{"default_directory":"/srv/geo"}"#);
    }
}
