//! Format table and handlers
//!
//! Every recognised extension maps to exactly one [`Format`] variant, and
//! every variant has one [`FormatHandler`] doing the actual reading and
//! writing. Handlers whose backing library sits behind a cargo feature report
//! whether it was compiled in through [`FormatHandler::is_available`].

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::config::Settings;
use crate::errors::{Result, unsupported_format_error};

mod delimited;
mod document;
mod json;
mod pdf;
mod plain_text;
mod raster;
mod spreadsheet;
mod yaml;

pub use delimited::DelimitedHandler;
pub use document::DocumentHandler;
pub use json::JsonHandler;
pub use pdf::PdfHandler;
pub use plain_text::PlainTextHandler;
pub use raster::ImageHandler;
pub use spreadsheet::SpreadsheetHandler;
pub use yaml::YamlHandler;

/// A container format the dispatcher knows how to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    PlainText,
    Json,
    Csv,
    Yaml,
    /// Office Open XML workbook (`.xlsx`)
    Spreadsheet,
    /// Legacy binary workbook (`.xls`), read only
    LegacySpreadsheet,
    Pdf,
    /// Word processing document (`.docx`)
    Document,
    Image,
}

/// Extension lookup table, keyed by lowercase extension without the dot
static EXTENSIONS: Lazy<HashMap<&'static str, Format>> = Lazy::new(|| {
    Format::ALL
        .iter()
        .flat_map(|format| {
            format
                .extensions()
                .iter()
                .map(move |extension| (*extension, *format))
        })
        .collect()
});

impl Format {
    /// Every format, in the order they are listed to users
    pub const ALL: [Format; 9] = [
        Format::PlainText,
        Format::Json,
        Format::Csv,
        Format::Yaml,
        Format::Spreadsheet,
        Format::LegacySpreadsheet,
        Format::Pdf,
        Format::Document,
        Format::Image,
    ];

    /// Extensions mapped to this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::PlainText => &["txt"],
            Format::Json => &["json"],
            Format::Csv => &["csv"],
            Format::Yaml => &["yaml", "yml"],
            Format::Spreadsheet => &["xlsx"],
            Format::LegacySpreadsheet => &["xls"],
            Format::Pdf => &["pdf"],
            Format::Document => &["docx"],
            Format::Image => &["png", "jpg", "jpeg"],
        }
    }

    /// Human readable name used in messages
    pub fn name(&self) -> &'static str {
        self.handler().name()
    }

    /// Looks up an extension, ignoring case and an optional leading dot
    pub fn from_extension(extension: &str) -> Option<Format> {
        let normalised = extension.trim_start_matches('.').to_lowercase();
        EXTENSIONS.get(normalised.as_str()).copied()
    }

    /// Resolves the format of a path from its extension
    ///
    /// # Errors
    /// * `UnsupportedFormat` when the path has no extension or the extension
    ///   is not in the table. File contents are never inspected.
    pub fn from_path(path: &Path) -> Result<Format> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| unsupported_format_error(path.to_path_buf(), "no file extension"))?;

        Format::from_extension(extension).ok_or_else(|| {
            unsupported_format_error(
                path.to_path_buf(),
                &format!("unknown extension '.{extension}'"),
            )
        })
    }

    /// The handler implementing this format
    pub fn handler(&self) -> &'static dyn FormatHandler {
        match self {
            Format::PlainText => &PlainTextHandler,
            Format::Json => &JsonHandler,
            Format::Csv => &DelimitedHandler,
            Format::Yaml => &YamlHandler,
            Format::Spreadsheet => &SpreadsheetHandler { legacy: false },
            Format::LegacySpreadsheet => &SpreadsheetHandler { legacy: true },
            Format::Pdf => &PdfHandler,
            Format::Document => &DocumentHandler,
            Format::Image => &ImageHandler,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads and writes one container format as flat text
pub trait FormatHandler: Sync {
    /// Human readable format name
    fn name(&self) -> &'static str;

    /// Cargo feature gating the backing library, if any
    fn feature(&self) -> Option<&'static str> {
        None
    }

    /// Whether the backing library was compiled in
    fn is_available(&self) -> bool {
        true
    }

    /// Whether the format can be written at all
    fn is_writable(&self) -> bool {
        true
    }

    /// Extracts the text content of `path`
    fn read(&self, path: &Path, settings: &Settings) -> Result<String>;

    /// Replaces `path` with a file of this format holding `content`
    fn write(&self, path: &Path, content: &str, settings: &Settings) -> Result<()>;
}

/// What the current build can do with one format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub format: Format,
    pub extensions: &'static [&'static str],
    pub feature: Option<&'static str>,
    pub available: bool,
    pub writable: bool,
}

/// Lists every format with the capability of this build
pub fn capabilities() -> Vec<Capability> {
    Format::ALL
        .iter()
        .map(|format| {
            let handler = format.handler();
            Capability {
                format: *format,
                extensions: format.extensions(),
                feature: handler.feature(),
                available: handler.is_available(),
                writable: handler.is_writable(),
            }
        })
        .collect()
}
