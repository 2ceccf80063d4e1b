//! Word processing document handler
//!
//! A `.docx` file is a zip package; the body text lives in
//! `word/document.xml`. Reading walks that part with quick-xml and keeps one
//! line per paragraph. Writing produces the smallest package Word accepts,
//! with one paragraph per content line.

use std::path::Path;

use crate::config::Settings;
use crate::errors::Result;

use super::FormatHandler;

const FEATURE: &str = "document";

pub struct DocumentHandler;

impl FormatHandler for DocumentHandler {
    fn name(&self) -> &'static str {
        "DOCX"
    }

    fn feature(&self) -> Option<&'static str> {
        Some(FEATURE)
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "document")
    }

    fn read(&self, path: &Path, _settings: &Settings) -> Result<String> {
        #[cfg(feature = "document")]
        {
            backend::read_paragraphs(path)
        }
        #[cfg(not(feature = "document"))]
        {
            let _ = path;
            Err(crate::errors::dependency_missing_error(self.name(), FEATURE))
        }
    }

    fn write(&self, path: &Path, content: &str, _settings: &Settings) -> Result<()> {
        #[cfg(feature = "document")]
        {
            backend::write_paragraphs(path, content)
        }
        #[cfg(not(feature = "document"))]
        {
            let _ = (path, content);
            Err(crate::errors::dependency_missing_error(self.name(), FEATURE))
        }
    }
}

#[cfg(feature = "document")]
mod backend {
    use std::fs::File;
    use std::io::{Read, Write};
    use std::path::Path;

    use quick_xml::Reader;
    use quick_xml::escape::escape;
    use quick_xml::events::Event;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipArchive, ZipWriter};

    use crate::errors::{Result, io_read_error, io_write_error, read_failure_error, write_failure_error};

    const DOCUMENT_PART: &str = "word/document.xml";
    const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
    const RELATIONSHIPS_PART: &str = "_rels/.rels";

    const CONTENT_TYPES: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"</Types>"#
    );

    const RELATIONSHIPS: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        r#"</Relationships>"#
    );

    const DOCUMENT_HEADER: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        r#"<w:body>"#
    );

    const DOCUMENT_FOOTER: &str = "</w:body></w:document>";

    pub(super) fn read_paragraphs(path: &Path) -> Result<String> {
        let file = File::open(path).map_err(|e| io_read_error(e, path.to_path_buf()))?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| read_failure_error(e, path.to_path_buf(), "not a DOCX package"))?;

        let mut xml = String::new();
        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            read_failure_error(e, path.to_path_buf(), &format!("package has no {DOCUMENT_PART}"))
        })?;
        part.read_to_string(&mut xml)
            .map_err(|e| read_failure_error(e, path.to_path_buf(), "cannot decompress document body"))?;

        paragraphs_from_xml(&xml)
            .map_err(|e| read_failure_error(e, path.to_path_buf(), "malformed document body"))
    }

    /// Collects paragraph texts from a WordprocessingML body
    ///
    /// Tabs become `\t`, explicit breaks become `\n`, paragraphs are joined
    /// with `\n`.
    pub(super) fn paragraphs_from_xml(xml: &str) -> quick_xml::Result<String> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;
        let mut run_depth = 0usize;
        let mut in_text = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:p" => {
                        if depth == 0 {
                            current.clear();
                        }
                        depth += 1;
                    }
                    b"w:r" => run_depth += 1,
                    b"w:t" => in_text = true,
                    _ => {}
                },
                // w:tab inside w:pPr is a tab stop definition, not a character
                Event::Empty(e) => match e.name().as_ref() {
                    b"w:p" if depth == 0 => paragraphs.push(String::new()),
                    b"w:tab" if run_depth > 0 => current.push('\t'),
                    b"w:br" | b"w:cr" if run_depth > 0 => current.push('\n'),
                    _ => {}
                },
                Event::Text(text) if in_text => current.push_str(&text.unescape()?),
                Event::End(e) => match e.name().as_ref() {
                    b"w:r" => run_depth = run_depth.saturating_sub(1),
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            paragraphs.push(std::mem::take(&mut current));
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs.join("\n"))
    }

    /// Builds the body part, one paragraph per line
    pub(super) fn document_xml(content: &str) -> String {
        let mut xml = String::from(DOCUMENT_HEADER);
        for line in content.lines() {
            if line.is_empty() {
                xml.push_str("<w:p/>");
                continue;
            }
            xml.push_str("<w:p><w:r>");
            for (index, segment) in line.split('\t').enumerate() {
                if index > 0 {
                    xml.push_str("<w:tab/>");
                }
                if !segment.is_empty() {
                    xml.push_str(r#"<w:t xml:space="preserve">"#);
                    xml.push_str(&escape(segment));
                    xml.push_str("</w:t>");
                }
            }
            xml.push_str("</w:r></w:p>");
        }
        xml.push_str(DOCUMENT_FOOTER);
        xml
    }

    pub(super) fn write_paragraphs(path: &Path, content: &str) -> Result<()> {
        let file = File::create(path).map_err(|e| io_write_error(e, path.to_path_buf()))?;
        let mut package = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let body = document_xml(content);
        let parts = [
            (CONTENT_TYPES_PART, CONTENT_TYPES),
            (RELATIONSHIPS_PART, RELATIONSHIPS),
            (DOCUMENT_PART, body.as_str()),
        ];

        for (name, data) in parts {
            package
                .start_file(name, options)
                .map_err(|e| write_failure_error(e, path.to_path_buf(), &format!("cannot add {name}")))?;
            package
                .write_all(data.as_bytes())
                .map_err(|e| io_write_error(e, path.to_path_buf()))?;
        }

        package
            .finish()
            .map(|_| ())
            .map_err(|e| write_failure_error(e, path.to_path_buf(), "cannot finish package"))
    }
}
