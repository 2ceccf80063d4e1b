use docshift::{Dispatcher, Format, Settings, read_file, write_file};
use std::fs;
use tempfile::tempdir;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("notes.txt");

        write_file(&path, "hello world").unwrap();

        assert_eq!(read_file(&path).unwrap(), "hello world");
    }

    #[test]
    fn test_plain_text_round_trip_keeps_every_character() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("poem.txt");
        let content = "  indented\r\nčeština ✓\n\ttrailing newline\n\n";

        write_file(&path, content).unwrap();

        assert_eq!(read_file(&path).unwrap(), content);
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let error = read_file(&path).unwrap_err();

        assert!(error.is_not_found());
        assert!(error.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.xyz");
        fs::write(&path, "anything").unwrap();

        assert!(read_file(&path).unwrap_err().is_unsupported_format());
        assert!(write_file(&path, "anything").unwrap_err().is_unsupported_format());
    }

    #[test]
    fn test_extension_less_file_is_unsupported() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("README");
        fs::write(&path, "plain words").unwrap();

        assert!(read_file(&path).unwrap_err().is_unsupported_format());
    }

    #[test]
    fn test_extension_lookup_ignores_case() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("LOUD.TXT");

        write_file(&path, "shout").unwrap();

        assert_eq!(read_file(&path).unwrap(), "shout");
    }

    #[test]
    fn test_write_onto_directory_is_write_failure() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("dir.txt");
        fs::create_dir(&path).unwrap();

        let error = write_file(&path, "x").unwrap_err();

        assert!(error.is_write_failure());
        assert_eq!(error.exit_code(), 5);
        assert!(path.is_dir());
    }

    #[test]
    fn test_json_is_normalised_on_write() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        write_file(&path, r#"{"b": 1, "a": [true, null]}"#).unwrap();

        assert_eq!(
            read_file(&path).unwrap(),
            "{\n  \"b\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn test_invalid_json_leaves_destination_untouched() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let error = write_file(&path, "{ not json").unwrap_err();

        assert_eq!(error.exit_code(), 7);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_csv_with_custom_delimiter() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("table.csv");
        let dispatcher = Dispatcher::new(Settings {
            csv_delimiter: ';',
            ..Settings::default()
        });

        dispatcher.write(&path, "name;qty\napple;3").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "name;qty\napple;3\n");
        assert_eq!(dispatcher.read(&path).unwrap(), "name;qty\napple;3");
    }

    #[test]
    fn test_latin1_text_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("legacy.txt");
        let dispatcher = Dispatcher::new(Settings {
            text_encoding: "windows-1252".to_string(),
            ..Settings::default()
        });

        dispatcher.write(&path, "café").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"caf\xe9");
        assert_eq!(dispatcher.read(&path).unwrap(), "café");
    }

    #[test]
    fn test_every_format_is_reachable_by_extension() {
        for format in Format::ALL {
            for extension in format.extensions() {
                assert_eq!(Format::from_extension(extension), Some(format));
            }
        }
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn test_pdf_without_support_is_dependency_missing() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("report.pdf");

        let error = write_file(&path, "some text").unwrap_err();

        assert!(error.is_dependency_missing());
        assert!(!path.exists());
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_pdf_write_then_read() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("report.pdf");

        write_file(&path, "some text").unwrap();

        assert!(read_file(&path).unwrap().contains("some text"));
    }

    #[cfg(feature = "spreadsheet")]
    #[test]
    fn test_spreadsheet_write_then_read() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("stock.xlsx");

        write_file(&path, "item,count\nbolts,12\nnuts,7.5").unwrap();

        assert_eq!(read_file(&path).unwrap(), "item,count\nbolts,12\nnuts,7.5");
    }

    #[cfg(feature = "document")]
    #[test]
    fn test_document_write_then_read() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("memo.docx");

        write_file(&path, "First paragraph\nSecond paragraph").unwrap();

        assert_eq!(
            read_file(&path).unwrap(),
            "First paragraph\nSecond paragraph"
        );
    }
}
