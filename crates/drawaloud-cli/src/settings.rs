//! Settings file for the command-line tool.
//!
//! Stored as `settings.toml` in the platform config directory:
//! - macOS: ~/Library/Application Support/org.drawaloud.Drawaloud/
//! - Windows: %APPDATA%/drawaloud/Drawaloud/config/
//! - Linux: ~/.config/drawaloud/
//!
//! A missing or unparsable file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use drawaloud_fhir::ExportOptions;
use drawaloud_store::DEFAULT_STORE_KEY;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "drawaloud";
const APP_NAME: &str = "Drawaloud";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub store: StoreSettings,
    pub export: ExportOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// JSON prompt catalog. The built-in catalog is used when unset.
    pub path: Option<PathBuf>,
    /// Markdown file with one `## <prompt id>` section per prompt.
    pub descriptions: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory of the file store. Defaults to the platform data directory.
    pub dir: Option<PathBuf>,
    pub key: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            dir: None,
            key: DEFAULT_STORE_KEY.to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

pub fn default_store_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("responses"))
}

/// Load from `explicit`, or from [`settings_path`] when no path is given.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("could not determine settings path, using defaults");
                return Settings::default();
            }
        },
    };
    load_settings_from(&path)
}

pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to parse settings, using defaults");
                Settings::default()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "failed to read settings, using defaults");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawaloud_fhir::ReflectionPlacement;

    #[test]
    fn settings_round_trip() {
        let mut settings = Settings::default();
        settings.catalog.path = Some(PathBuf::from("/srv/prompts.json"));
        settings.export.reflection = ReflectionPlacement::SessionItem;
        settings.export.include_canvas = true;

        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let parsed: Settings = toml::from_str("[export]\nreflection = \"session-item\"\n").unwrap();
        assert_eq!(parsed.export.reflection, ReflectionPlacement::SessionItem);
        assert!(!parsed.export.include_canvas);
        assert_eq!(parsed.store.key, DEFAULT_STORE_KEY);
        assert_eq!(parsed.catalog, CatalogSettings::default());
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        assert_eq!(load_settings_from(&path), Settings::default());

        fs::write(&path, "store = [").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }
}
