//! Persisted UI preferences, stored in `~/.uibo/ui_prefs.json`.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UiPrefs {
    /// Whether the sidebar is collapsed to the icon rail.
    #[serde(default)]
    pub sidebar_collapsed: bool,
}

impl UiPrefs {
    pub(crate) fn load() -> Self {
        Self::load_from(&Self::file_path())
    }

    pub(crate) fn load_from(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    pub(crate) fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::file_path())
    }

    pub(crate) fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Atomic write: temp file first, then rename.
        let temp_path = path.with_extension("tmp");
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&temp_path, content)?;
        fs::rename(temp_path, path)?;

        Ok(())
    }

    fn file_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".uibo")
            .join("ui_prefs.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.json");

        let prefs = UiPrefs {
            sidebar_collapsed: true,
        };
        prefs.save_to(&path).unwrap();

        assert_eq!(UiPrefs::load_from(&path), prefs);
    }

    #[test]
    fn missing_or_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(UiPrefs::load_from(&missing), UiPrefs::default());

        let corrupt = dir.path().join("bad.json");
        fs::write(&corrupt, "not json").unwrap();
        assert_eq!(UiPrefs::load_from(&corrupt), UiPrefs::default());
    }
}
