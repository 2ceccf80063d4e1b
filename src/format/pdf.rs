//! PDF handler
//!
//! Reading extracts the text operators of every page with lopdf. Writing lays
//! the content out line by line in Helvetica on A4 pages; the text is encoded
//! as Windows-1252, so characters outside that code page are lost.

use std::path::Path;

use crate::config::Settings;
use crate::errors::Result;

use super::FormatHandler;

const FEATURE: &str = "pdf";

pub struct PdfHandler;

impl FormatHandler for PdfHandler {
    fn name(&self) -> &'static str {
        "PDF"
    }

    fn feature(&self) -> Option<&'static str> {
        Some(FEATURE)
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "pdf")
    }

    fn read(&self, path: &Path, settings: &Settings) -> Result<String> {
        #[cfg(feature = "pdf")]
        {
            let _ = settings;
            backend::extract_text(path)
        }
        #[cfg(not(feature = "pdf"))]
        {
            let _ = (path, settings);
            Err(crate::errors::dependency_missing_error(self.name(), FEATURE))
        }
    }

    fn write(&self, path: &Path, content: &str, settings: &Settings) -> Result<()> {
        #[cfg(feature = "pdf")]
        {
            backend::render_text(path, content, settings.pdf_font_size)
        }
        #[cfg(not(feature = "pdf"))]
        {
            let _ = (path, content, settings);
            Err(crate::errors::dependency_missing_error(self.name(), FEATURE))
        }
    }
}

#[cfg(feature = "pdf")]
mod backend {
    use std::path::Path;

    use encoding_rs::WINDOWS_1252;
    use log::{debug, warn};
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    use crate::errors::{Result, generic_error, read_failure_error, write_failure_error};

    const PAGE_WIDTH: i64 = 595;
    const PAGE_HEIGHT: i64 = 842;
    const LEFT_MARGIN: f32 = 40.0;
    const FIRST_BASELINE: f32 = 800.0;
    const BOTTOM_MARGIN: f32 = 40.0;
    const LINE_SPACING: f32 = 1.2;

    /// Text of every page, pages joined by a newline, empty pages skipped
    pub(super) fn extract_text(path: &Path) -> Result<String> {
        let document = Document::load(path)
            .map_err(|e| read_failure_error(e, path.to_path_buf(), "not a readable PDF"))?;

        let mut pages = Vec::new();
        for page_number in document.get_pages().keys() {
            let text = document.extract_text(&[*page_number]).map_err(|e| {
                read_failure_error(
                    e,
                    path.to_path_buf(),
                    &format!("cannot extract text of page {page_number}"),
                )
            })?;
            let text = text.trim_end_matches('\n');
            if text.is_empty() {
                debug!("Page {page_number} of {} has no text", path.display());
                continue;
            }
            pages.push(text.to_string());
        }

        Ok(pages.join("\n"))
    }

    /// Number of lines fitting between the first baseline and the bottom margin
    pub(super) fn lines_per_page(font_size: f32) -> usize {
        let leading = font_size * LINE_SPACING;
        (((FIRST_BASELINE - BOTTOM_MARGIN) / leading).floor() as usize + 1).max(1)
    }

    /// Writes `content` as a new PDF, one text line per content line
    pub(super) fn render_text(path: &Path, content: &str, font_size: f32) -> Result<()> {
        let leading = font_size * LINE_SPACING;
        let lines: Vec<&str> = content.lines().collect();
        let chunks: Vec<&[&str]> = if lines.is_empty() {
            vec![&[]]
        } else {
            lines.chunks(lines_per_page(font_size)).collect()
        };

        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut lossy = false;
        let mut kids: Vec<Object> = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let mut operations = Vec::new();
            for (index, line) in chunk.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let (encoded, _, had_errors) = WINDOWS_1252.encode(line);
                lossy |= had_errors;
                let baseline = FIRST_BASELINE - leading * index as f32;
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), font_size.into()]));
                operations.push(Operation::new(
                    "Td",
                    vec![LEFT_MARGIN.into(), baseline.into()],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encoded.into_owned())],
                ));
                operations.push(Operation::new("ET", vec![]));
            }

            let encoded = Content { operations }
                .encode()
                .map_err(|e| generic_error(&format!("Failed to encode page content: {e}")))?;
            let content_id = document.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        if lossy {
            warn!(
                "Some characters cannot be represented in the PDF font and were replaced in {}",
                path.display()
            );
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        document.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);
        document.compress();

        debug!("Saving {page_count} page(s) to {}", path.display());
        document
            .save(path)
            .map(|_| ())
            .map_err(|e| write_failure_error(e, path.to_path_buf(), "cannot save PDF"))
    }
}
