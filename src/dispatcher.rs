//! Format dispatcher
//!
//! Maps a path to its format and forwards the call to that format's handler.
//! Every call is independent; the dispatcher only carries the settings.

use std::path::Path;

use log::{debug, info};

use crate::config::Settings;
use crate::errors::{Result, dependency_missing_error, not_found_error, read_failure_message};
use crate::format::{Format, FormatHandler};

/// Reads and writes files of any recognised format as flat text
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    settings: Settings,
}

impl Dispatcher {
    pub fn new(settings: Settings) -> Self {
        Dispatcher { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Extracts the text content of `path`
    ///
    /// # Errors
    /// * `UnsupportedFormat` if the extension is missing or unknown
    /// * `NotFound` if the path does not exist
    /// * `DependencyMissing` if the format's library was not compiled in
    /// * `ReadFailure` if the file cannot be opened or decoded
    pub fn read(&self, path: &Path) -> Result<String> {
        let format = Format::from_path(path)?;

        if !path.exists() {
            return Err(not_found_error(path.to_path_buf()));
        }
        if path.is_dir() {
            return Err(read_failure_message(path.to_path_buf(), "path is a directory"));
        }

        let handler = available_handler(format)?;
        debug!("Reading {} as {format}", path.display());

        let content = handler.read(path, &self.settings)?;
        info!(
            "Read {} characters from {}",
            content.chars().count(),
            path.display()
        );
        Ok(content)
    }

    /// Overwrites `path` with `content` in the format given by its extension
    ///
    /// The destination is replaced unconditionally; there is no backup.
    ///
    /// # Errors
    /// * `UnsupportedFormat` if the extension is missing, unknown or read only
    /// * `DependencyMissing` if the format's library was not compiled in
    /// * `NotFound` if the parent directory does not exist
    /// * `InvalidContent` if the text does not parse into the format
    /// * `WriteFailure` if the file cannot be created or written
    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        let format = Format::from_path(path)?;
        let handler = available_handler(format)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(not_found_error(parent.to_path_buf()));
        }

        debug!("Writing {} as {format}", path.display());
        handler.write(path, content, &self.settings)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Returns the handler for `format` once its backing library is known to exist
fn available_handler(format: Format) -> Result<&'static dyn FormatHandler> {
    let handler = format.handler();
    ensure_available(handler)?;
    Ok(handler)
}

fn ensure_available(handler: &dyn FormatHandler) -> Result<()> {
    if handler.is_available() {
        return Ok(());
    }

    let feature = handler.feature().unwrap_or_default();
    Err(dependency_missing_error(handler.name(), feature))
}

/// Reads `path` with the default settings
pub fn read_file(path: &Path) -> Result<String> {
    Dispatcher::default().read(path)
}

/// Writes `content` to `path` with the default settings
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    Dispatcher::default().write(path, content)
}
