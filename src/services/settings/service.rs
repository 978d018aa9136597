use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

/// Location of the settings file in the platform config directory.
pub fn default_settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Ken24T", "CalendarGrid") {
        proj_dirs.config_dir().join("settings.toml")
    } else {
        PathBuf::from("calendar-grid.toml")
    }
}

/// Reads settings from a TOML file. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::debug!("No settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    let settings: Settings = toml::from_str(&data)
        .with_context(|| format!("failed to parse settings from {}", path.display()))?;
    Ok(settings)
}

/// Writes settings as TOML, creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write settings to {}", path.display()))?;
    Ok(())
}
