//! CSV handler
//!
//! The record helpers here are shared with the spreadsheet handler, which
//! renders worksheets as CSV text and parses CSV text into worksheets.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::config::Settings;
use crate::errors::{
    Result, generic_error, invalid_content_error, io_write_error, read_failure_error,
    write_failure_error,
};

use super::FormatHandler;
use super::plain_text::read_utf8;

pub struct DelimitedHandler;

impl FormatHandler for DelimitedHandler {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn read(&self, path: &Path, settings: &Settings) -> Result<String> {
        let text = read_utf8(path)?;
        let delimiter = settings.delimiter_byte();
        let records = parse_records(&text, delimiter)
            .map_err(|e| read_failure_error(e, path.to_path_buf(), "file is not valid CSV"))?;
        render_rows(records.iter(), delimiter)
    }

    fn write(&self, path: &Path, content: &str, settings: &Settings) -> Result<()> {
        let delimiter = settings.delimiter_byte();
        let records = parse_records(content, delimiter)
            .map_err(|e| invalid_content_error(e, "CSV", "cannot parse content"))?;

        let file = File::create(path).map_err(|e| io_write_error(e, path.to_path_buf()))?;
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(file);

        for record in &records {
            writer
                .write_record(record)
                .map_err(|e| write_failure_error(e, path.to_path_buf(), "cannot write record"))?;
        }
        writer
            .flush()
            .map_err(|e| io_write_error(e, path.to_path_buf()))
    }
}

/// Parses delimited text into records
///
/// There is no header row and records may have different lengths.
pub(crate) fn parse_records(text: &str, delimiter: u8) -> csv::Result<Vec<StringRecord>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes())
        .records()
        .collect()
}

/// Renders rows as delimited text, one line per row, without a final newline
pub(crate) fn render_rows<R, F>(rows: impl IntoIterator<Item = R>, delimiter: u8) -> Result<String>
where
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| generic_error(&format!("Failed to render row: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| generic_error(&format!("Failed to render rows: {e}")))?;
    let mut text =
        String::from_utf8(bytes).map_err(|e| generic_error(&format!("Rendered text is not UTF-8: {e}")))?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
