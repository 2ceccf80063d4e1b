//! Plain text handler
//!
//! Also hosts the byte level helpers shared by the other text based formats.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use log::warn;

use crate::config::Settings;
use crate::errors::{Result, io_read_error, io_write_error, read_failure_error};

use super::FormatHandler;

pub struct PlainTextHandler;

impl FormatHandler for PlainTextHandler {
    fn name(&self) -> &'static str {
        "plain text"
    }

    fn read(&self, path: &Path, settings: &Settings) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| io_read_error(e, path.to_path_buf()))?;
        decode(bytes, settings.encoding(), path)
    }

    fn write(&self, path: &Path, content: &str, settings: &Settings) -> Result<()> {
        write_bytes(path, &encode(content, settings.encoding(), path))
    }
}

/// Reads a file that must hold UTF-8 text
pub(crate) fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| io_read_error(e, path.to_path_buf()))?;
    decode(bytes, UTF_8, path)
}

/// Creates or truncates `path` and writes `bytes` to it
pub(crate) fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| io_write_error(e, path.to_path_buf()))
}

/// Decodes raw bytes with the given encoding
///
/// UTF-8 is strict so that UTF-8 files round-trip byte for byte. Other
/// encodings substitute U+FFFD for malformed sequences.
pub(crate) fn decode(bytes: Vec<u8>, encoding: &'static Encoding, path: &Path) -> Result<String> {
    if encoding == UTF_8 {
        return String::from_utf8(bytes).map_err(|e| {
            read_failure_error(e, path.to_path_buf(), "file is not valid UTF-8 text")
        });
    }

    let (decoded, had_errors) = encoding.decode_without_bom_handling(&bytes);
    if had_errors {
        warn!(
            "{} contains bytes that are not valid {}; they were replaced",
            path.display(),
            encoding.name()
        );
    }
    Ok(decoded.into_owned())
}

/// Encodes text with the given encoding
///
/// encoding_rs only encodes into ASCII compatible encodings, so UTF-16 is
/// emitted here as raw code units without a byte order mark.
pub(crate) fn encode(content: &str, encoding: &'static Encoding, path: &Path) -> Vec<u8> {
    if encoding == UTF_16LE {
        return content.encode_utf16().flat_map(u16::to_le_bytes).collect();
    }
    if encoding == UTF_16BE {
        return content.encode_utf16().flat_map(u16::to_be_bytes).collect();
    }

    let (encoded, _, had_errors) = encoding.encode(content);
    if had_errors {
        warn!(
            "Some characters cannot be represented in {}; they were written to {} as numeric character references",
            encoding.name(),
            path.display()
        );
    }
    encoded.into_owned()
}
