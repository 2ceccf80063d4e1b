//! Spreadsheet handler
//!
//! Workbooks are read with calamine and written with rust_xlsxwriter. One
//! worksheet is exchanged as CSV text; other sheets and all formatting are
//! dropped.

use std::path::Path;

use crate::config::Settings;
use crate::errors::{Result, unsupported_format_error};

use super::FormatHandler;

const FEATURE: &str = "spreadsheet";

pub struct SpreadsheetHandler {
    /// Legacy `.xls` workbooks can be read but not written
    pub legacy: bool,
}

impl FormatHandler for SpreadsheetHandler {
    fn name(&self) -> &'static str {
        if self.legacy {
            "legacy spreadsheet"
        } else {
            "spreadsheet"
        }
    }

    fn feature(&self) -> Option<&'static str> {
        Some(FEATURE)
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "spreadsheet")
    }

    fn is_writable(&self) -> bool {
        !self.legacy
    }

    fn read(&self, path: &Path, settings: &Settings) -> Result<String> {
        #[cfg(feature = "spreadsheet")]
        {
            backend::read_sheet(path, settings)
        }
        #[cfg(not(feature = "spreadsheet"))]
        {
            let _ = (path, settings);
            Err(crate::errors::dependency_missing_error(
                self.name(),
                FEATURE,
            ))
        }
    }

    fn write(&self, path: &Path, content: &str, settings: &Settings) -> Result<()> {
        if self.legacy {
            return Err(unsupported_format_error(
                path.to_path_buf(),
                "legacy .xls workbooks cannot be written; use .xlsx instead",
            ));
        }

        #[cfg(feature = "spreadsheet")]
        {
            backend::write_sheet(path, content, settings)
        }
        #[cfg(not(feature = "spreadsheet"))]
        {
            let _ = (content, settings);
            Err(crate::errors::dependency_missing_error(
                self.name(),
                FEATURE,
            ))
        }
    }
}

#[cfg(feature = "spreadsheet")]
mod backend {
    use std::path::Path;

    use calamine::{Reader, open_workbook_auto};
    use log::{debug, warn};
    use rust_xlsxwriter::Workbook;

    use crate::config::Settings;
    use crate::errors::{
        Result, invalid_content_error, read_failure_error, read_failure_message,
        write_failure_error,
    };
    use crate::format::delimited::{parse_records, render_rows};

    /// Renders the configured (or first) worksheet as CSV text
    pub(super) fn read_sheet(path: &Path, settings: &Settings) -> Result<String> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| read_failure_error(e, path.to_path_buf(), "cannot open workbook"))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = match &settings.sheet {
            Some(name) => {
                if !sheet_names.contains(name) {
                    return Err(read_failure_message(
                        path.to_path_buf(),
                        &format!(
                            "workbook has no sheet named '{name}' (available: {})",
                            sheet_names.join(", ")
                        ),
                    ));
                }
                name.clone()
            }
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| read_failure_message(path.to_path_buf(), "workbook has no sheets"))?,
        };

        if sheet_names.len() > 1 {
            debug!(
                "Reading sheet '{sheet_name}' of {} from {}",
                sheet_names.len(),
                path.display()
            );
        }

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            read_failure_error(e, path.to_path_buf(), &format!("cannot read sheet '{sheet_name}'"))
        })?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
        render_rows(rows, settings.delimiter_byte())
    }

    /// Writes CSV text into a single worksheet
    ///
    /// Fields that parse as finite numbers are stored as numbers.
    pub(super) fn write_sheet(path: &Path, content: &str, settings: &Settings) -> Result<()> {
        let records = parse_records(content, settings.delimiter_byte())
            .map_err(|e| invalid_content_error(e, "CSV", "cannot parse content"))?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (row_index, record) in records.iter().enumerate() {
            let row = u32::try_from(row_index).unwrap_or(u32::MAX);
            for (column_index, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                let column = u16::try_from(column_index).unwrap_or(u16::MAX);
                let written = match field.trim().parse::<f64>() {
                    Ok(number) if number.is_finite() => {
                        worksheet.write_number(row, column, number).map(|_| ())
                    }
                    _ => worksheet.write_string(row, column, field).map(|_| ()),
                };
                written.map_err(|e| invalid_content_error(e, "spreadsheet", "cannot store cell"))?;
            }
        }

        if records.is_empty() {
            warn!("Writing an empty worksheet to {}", path.display());
        }

        workbook
            .save(path)
            .map_err(|e| write_failure_error(e, path.to_path_buf(), "cannot save workbook"))
    }
}
