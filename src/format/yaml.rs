use std::path::Path;

use serde_yaml::Value;

use crate::config::Settings;
use crate::errors::{Result, generic_error, invalid_content_error, read_failure_error};

use super::FormatHandler;
use super::plain_text::{read_utf8, write_bytes};

pub struct YamlHandler;

impl FormatHandler for YamlHandler {
    fn name(&self) -> &'static str {
        "YAML"
    }

    fn read(&self, path: &Path, _settings: &Settings) -> Result<String> {
        let text = read_utf8(path)?;
        let value: Value = serde_yaml::from_str(&text)
            .map_err(|e| read_failure_error(e, path.to_path_buf(), "file is not valid YAML"))?;
        dump(&value)
    }

    fn write(&self, path: &Path, content: &str, _settings: &Settings) -> Result<()> {
        let value: Value = serde_yaml::from_str(content)
            .map_err(|e| invalid_content_error(e, "YAML", "cannot parse content"))?;
        write_bytes(path, dump(&value)?.as_bytes())
    }
}

fn dump(value: &Value) -> Result<String> {
    serde_yaml::to_string(value)
        .map_err(|e| generic_error(&format!("Failed to serialise YAML: {e}")))
}
