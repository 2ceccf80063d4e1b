use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::config::Settings;
use crate::errors::{Result, generic_error, invalid_content_error, read_failure_error};

use super::FormatHandler;
use super::plain_text::{read_utf8, write_bytes};

/// JSON documents, normalised to two-space indentation
///
/// Key order and non-ASCII characters are kept as they are.
pub struct JsonHandler;

impl FormatHandler for JsonHandler {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn read(&self, path: &Path, _settings: &Settings) -> Result<String> {
        let text = read_utf8(path)?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| read_failure_error(e, path.to_path_buf(), "file is not valid JSON"))?;
        pretty(&value)
    }

    fn write(&self, path: &Path, content: &str, _settings: &Settings) -> Result<()> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| invalid_content_error(e, "JSON", "cannot parse content"))?;
        debug!("Parsed JSON content for {}", path.display());
        write_bytes(path, pretty(&value)?.as_bytes())
    }
}

fn pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| generic_error(&format!("Failed to serialise JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_pretty_prints_and_keeps_key_order() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, r#"{"zeta":1,"alpha":["ü",true]}"#).unwrap();

        let text = JsonHandler.read(&path, &Settings::default()).unwrap();
        assert_eq!(
            text,
            "{\n  \"zeta\": 1,\n  \"alpha\": [\n    \"ü\",\n    true\n  ]\n}"
        );
    }

    #[test]
    fn test_write_normalises_content() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.json");

        JsonHandler
            .write(&path, "{ \"a\" :  [1,2] }\n", &Settings::default())
            .unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );
    }

    #[test]
    fn test_write_rejects_invalid_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.json");

        let error = JsonHandler
            .write(&path, "{not json", &Settings::default())
            .unwrap_err();
        assert_eq!(error.exit_code(), 7);
        assert_eq!(
            error.to_string(),
            "Content is not valid JSON: cannot parse content"
        );
        assert!(std::error::Error::source(&error).is_some());
        assert!(!path.exists());
    }

    #[test]
    fn test_read_rejects_invalid_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "[1, 2").unwrap();

        let error = JsonHandler.read(&path, &Settings::default()).unwrap_err();
        assert_eq!(error.exit_code(), 6);
    }
}
