//! Settings loading functionality
//!
//! This module contains functions for locating, loading and validating the
//! settings file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use log::{debug, info};
use serde_yaml::from_str;

use crate::constants::{APPLICATION, DEFAULT_SETTINGS_FILE, ORGANIZATION, QUALIFIER};

use super::model::Settings;

/// Loads settings from a file
///
/// # Arguments
/// * `file` - Path to the settings file
///
/// # Returns
/// * `Result<Settings>` - The loaded settings or an error
///
/// # Errors
/// Returns an error if the file cannot be read or if the settings are invalid
pub fn load_settings(file: &Path) -> Result<Settings> {
    let file_content = fs::read(file)
        .map_err(|e| anyhow!("Failed to read settings file {}: {}", file.display(), e))?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        anyhow!(
            "Settings file {} contains invalid UTF-8 characters: {}",
            file.display(),
            e
        )
    })?;

    parse_settings(&content_str).map_err(|e| anyhow!("{}: {}", file.display(), e))
}

/// Parses and validates settings from YAML text
///
/// An empty document yields the default settings.
pub fn parse_settings(content: &str) -> Result<Settings> {
    let settings: Settings = if content.trim().is_empty() {
        Settings::default()
    } else {
        from_str(content).map_err(|e| {
            anyhow!("Failed to parse settings: {}\nPlease check the YAML syntax.", e)
        })?
    };

    settings.validate()?;

    Ok(settings)
}

/// Resolves the settings for a run
///
/// An explicitly given file must exist. Without one, the settings file in
/// the standard configuration folder is used when present, otherwise the
/// built-in defaults apply.
///
/// # Errors
/// * Returns an error if an explicit file is missing or any file is invalid
pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(anyhow!("Settings file {} does not exist", path.display()));
        }
        info!("Using settings from {}", path.display());
        return load_settings(path);
    }

    match default_settings_path() {
        Some(path) if path.exists() => {
            info!("Using settings from {}", path.display());
            load_settings(&path)
        }
        _ => {
            debug!("No settings file found, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Location of the settings file in the platform configuration folder
pub fn default_settings_path() -> Option<PathBuf> {
    project_folder().map(|folder| folder.config_dir().join(DEFAULT_SETTINGS_FILE))
}

pub(crate) fn project_folder() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Returns the configuration folder, creating it if necessary
pub(crate) fn find_project_folder() -> Result<ProjectDirs> {
    let folder =
        project_folder().ok_or_else(|| anyhow!("Failed to determine project directories"))?;

    if !folder.config_dir().exists() {
        fs::create_dir_all(folder.config_dir())?;
    }
    Ok(folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_partial_settings() {
        let settings = parse_settings("csv_delimiter: ';'\nsheet: Totals\n").unwrap();
        assert_eq!(settings.csv_delimiter, ';');
        assert_eq!(settings.sheet.as_deref(), Some("Totals"));
        assert_eq!(settings.text_encoding, "utf-8");
    }

    #[test]
    fn test_parse_empty_settings() {
        assert_eq!(parse_settings("").unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = parse_settings("delimiter: ';'\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.yaml");
        let error = resolve_settings(Some(&missing)).unwrap_err();
        assert!(error.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_settings_from_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        fs::write(&path, "text_encoding: windows-1252\npdf_font_size: 10\n").unwrap();

        let settings = resolve_settings(Some(&path)).unwrap();
        assert_eq!(settings.text_encoding, "windows-1252");
        assert_eq!(settings.pdf_font_size, 10.0);
    }
}
