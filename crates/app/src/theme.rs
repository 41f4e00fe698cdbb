//! Theme preference, persisted as a single small file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use specdex_core::{APP_DIR_NAME, CONFIG_DIR_ENV, THEME_FILE_NAME};

/// Color theme choice. Absence of a stored preference means light.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Errors from persisting the theme preference.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed store for the theme preference: read once at startup, written
/// on every toggle.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    /// Store at the platform config location, honoring the directory
    /// override env var (used by tests and sandboxed runs).
    #[must_use]
    pub fn default_path() -> PathBuf {
        let base = std::env::var(CONFIG_DIR_ENV).map_or_else(
            |_| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(APP_DIR_NAME)
            },
            PathBuf::from,
        );
        base.join(THEME_FILE_NAME)
    }

    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored theme; missing or unreadable files mean the default.
    #[must_use]
    pub fn load(&self) -> Theme {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_default()
    }

    /// Persist the theme choice.
    ///
    /// # Errors
    /// Returns an error if the preference directory or file cannot be written.
    pub fn save(&self, theme: Theme) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, theme.as_str())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("theme"));
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("nested").join("theme"));
        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Theme::Dark);
        store.save(Theme::Light).unwrap();
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn garbage_content_defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        std::fs::write(&path, "solarized").unwrap();
        assert_eq!(ThemeStore::new(path).load(), Theme::Light);
    }

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
