use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Runs the binary with its configuration folder pointed into `home`
fn docshift(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docshift").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_from_stdin_then_read() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("notes.txt");

        docshift(temp_dir.path())
            .arg("write")
            .arg(&path)
            .write_stdin("hello world")
            .assert()
            .success()
            .stdout("");

        docshift(temp_dir.path())
            .arg("read")
            .arg(&path)
            .assert()
            .success()
            .stdout("hello world\n");
    }

    #[test]
    fn test_write_from_input_file() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("draft.txt");
        let path = temp_dir.path().join("final.yaml");
        fs::write(&input, "name: docshift\ntags: [a, b]\n").unwrap();

        docshift(temp_dir.path())
            .arg("write")
            .arg(&path)
            .arg(&input)
            .assert()
            .success();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "name: docshift\ntags:\n- a\n- b\n"
        );
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = tempdir().unwrap();

        docshift(temp_dir.path())
            .arg("read")
            .arg(temp_dir.path().join("missing.txt"))
            .assert()
            .code(2)
            .stdout("")
            .stderr(predicate::str::contains("missing.txt"));
    }

    #[test]
    fn test_read_unknown_extension() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.xyz");
        fs::write(&path, "anything").unwrap();

        docshift(temp_dir.path())
            .arg("read")
            .arg(&path)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("unknown extension"));
    }

    #[test]
    fn test_write_invalid_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.json");

        let result = docshift(temp_dir.path())
            .arg("write")
            .arg(&path)
            .write_stdin("{ \"open\": ")
            .assert()
            .code(7);

        let stderr = String::from_utf8(result.get_output().stderr.clone()).unwrap();
        assert!(stderr.contains("Content is not valid JSON"));
        assert_eq!(stderr.matches("EOF while parsing").count(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_onto_directory() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("dir.txt");
        fs::create_dir(&path).unwrap();

        docshift(temp_dir.path())
            .arg("write")
            .arg(&path)
            .write_stdin("x")
            .assert()
            .code(5)
            .stderr(predicate::str::contains("dir.txt"));
    }

    #[test]
    fn test_settings_file_changes_delimiter() {
        let temp_dir = tempdir().unwrap();
        let settings = temp_dir.path().join("custom.yaml");
        let path = temp_dir.path().join("table.csv");
        fs::write(&settings, "csv_delimiter: ';'\n").unwrap();
        fs::write(&path, "a;b\n1;2\n").unwrap();

        docshift(temp_dir.path())
            .arg("--config")
            .arg(&settings)
            .arg("read")
            .arg(&path)
            .assert()
            .success()
            .stdout("a;b\n1;2\n");
    }

    #[test]
    fn test_missing_settings_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "text").unwrap();

        docshift(temp_dir.path())
            .arg("read")
            .arg(&path)
            .arg("-c")
            .arg(temp_dir.path().join("absent.yaml"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("does not exist"));
    }

    #[test]
    fn test_encoding_override() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("legacy.txt");
        fs::write(&path, b"na\xefve").unwrap();

        docshift(temp_dir.path())
            .args(["--encoding", "windows-1252", "read"])
            .arg(&path)
            .assert()
            .success()
            .stdout("naïve\n");
    }

    #[test]
    fn test_unknown_encoding_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "text").unwrap();

        docshift(temp_dir.path())
            .args(["-e", "klingon", "read"])
            .arg(&path)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("klingon"));
    }

    #[test]
    fn test_formats_lists_extensions() {
        let temp_dir = tempdir().unwrap();

        docshift(temp_dir.path())
            .arg("formats")
            .assert()
            .success()
            .stdout(predicate::str::contains(".txt"))
            .stdout(predicate::str::contains(".xlsx"))
            .stdout(predicate::str::contains("read only"));
    }

    #[test]
    fn test_no_subcommand_shows_usage() {
        let temp_dir = tempdir().unwrap();

        docshift(temp_dir.path())
            .assert()
            .code(64)
            .stderr(predicate::str::contains("Usage"));
    }

    #[test]
    fn test_help_exits_successfully() {
        let temp_dir = tempdir().unwrap();

        docshift(temp_dir.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("formats"));
    }
}
