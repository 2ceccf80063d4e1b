//! Settings data structures
//!
//! This module contains the tunables the format handlers read.

use anyhow::{Result, anyhow};
use encoding_rs::Encoding;
use serde::Deserialize;

use crate::constants::{DEFAULT_CSV_DELIMITER, DEFAULT_PDF_FONT_SIZE, DEFAULT_TEXT_ENCODING};

/// Settings shared by every read and write operation
///
/// Every field is optional in the YAML file; missing fields take their
/// defaults.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Encoding label used for plain text files
    pub text_encoding: String,
    /// Field delimiter for CSV files and spreadsheet text output
    pub csv_delimiter: char,
    /// Worksheet to read from spreadsheets; the first sheet when unset
    pub sheet: Option<String>,
    /// Font size, in points, used when generating PDF documents
    pub pdf_font_size: f32,
    /// Log file name, used when no log file is given on the command line
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            text_encoding: DEFAULT_TEXT_ENCODING.to_string(),
            csv_delimiter: DEFAULT_CSV_DELIMITER,
            sheet: None,
            pdf_font_size: DEFAULT_PDF_FONT_SIZE,
            log_file: None,
        }
    }
}

impl Settings {
    /// Validates the settings
    ///
    /// # Errors
    /// Returns an error with a helpful message when the encoding label is
    /// unknown, the delimiter is not a single ASCII character, or the font
    /// size is outside the printable range.
    pub fn validate(&self) -> Result<()> {
        if Encoding::for_label(self.text_encoding.as_bytes()).is_none() {
            return Err(anyhow!(
                "Unknown text encoding '{}'. Use a WHATWG label such as 'utf-8' or 'windows-1252'.",
                self.text_encoding
            ));
        }

        if !self.csv_delimiter.is_ascii() || self.csv_delimiter == '\n' {
            return Err(anyhow!(
                "CSV delimiter must be a single ASCII character other than a newline, got {:?}",
                self.csv_delimiter
            ));
        }

        if !(4.0..=72.0).contains(&self.pdf_font_size) {
            return Err(anyhow!(
                "PDF font size must be between 4 and 72 points, got {}",
                self.pdf_font_size
            ));
        }

        Ok(())
    }

    /// Returns the encoding matching `text_encoding`, falling back to UTF-8
    pub fn encoding(&self) -> &'static Encoding {
        Encoding::for_label(self.text_encoding.as_bytes()).unwrap_or(encoding_rs::UTF_8)
    }

    /// Returns the CSV delimiter as the byte the csv crate expects
    pub fn delimiter_byte(&self) -> u8 {
        if self.csv_delimiter.is_ascii() {
            self.csv_delimiter as u8
        } else {
            DEFAULT_CSV_DELIMITER as u8
        }
    }
}
