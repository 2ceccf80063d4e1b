use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the docshift library
#[derive(Debug)]
pub enum Error {
    /// The path to read (or a path the operation depends on) does not exist
    NotFound { path: PathBuf },
    /// The extension is missing or not part of the dispatch table
    UnsupportedFormat { path: PathBuf, detail: String },
    /// The backing library for a format was not compiled in
    DependencyMissing { format: String, feature: String },
    /// The destination could not be created or written
    WriteFailure {
        source: Option<Box<dyn StdError + Send + Sync>>,
        path: PathBuf,
        detail: String,
    },
    /// The file exists but could not be opened or decoded
    ReadFailure {
        source: Option<Box<dyn StdError + Send + Sync>>,
        path: PathBuf,
        detail: String,
    },
    /// The content handed to a writer does not parse into the target structure
    InvalidContent {
        source: Option<Box<dyn StdError + Send + Sync>>,
        format: String,
        detail: String,
    },
    /// Generic error with a message
    Generic { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            Error::UnsupportedFormat { path, detail } => {
                write!(f, "Unsupported file format for {}: {detail}", path.display())
            }
            Error::DependencyMissing { format, feature } => {
                write!(
                    f,
                    "Support for {format} files is not available; rebuild with the '{feature}' feature"
                )
            }
            Error::WriteFailure { path, detail, .. } => {
                write!(f, "Failed to write {}: {detail}", path.display())
            }
            Error::ReadFailure { path, detail, .. } => {
                write!(f, "Failed to read {}: {detail}", path.display())
            }
            Error::InvalidContent { format, detail, .. } => {
                write!(f, "Content is not valid {format}: {detail}")
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::WriteFailure { source, .. }
            | Error::ReadFailure { source, .. }
            | Error::InvalidContent { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn StdError + 'static)),
            _ => None,
        }
    }
}

impl Error {
    /// Process exit code reported by the binary for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NotFound { .. } => 2,
            Error::UnsupportedFormat { .. } => 3,
            Error::DependencyMissing { .. } => 4,
            Error::WriteFailure { .. } => 5,
            Error::ReadFailure { .. } => 6,
            Error::InvalidContent { .. } => 7,
            Error::Generic { .. } => 1,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Error::UnsupportedFormat { .. })
    }

    pub fn is_dependency_missing(&self) -> bool {
        matches!(self, Error::DependencyMissing { .. })
    }

    pub fn is_write_failure(&self) -> bool {
        matches!(self, Error::WriteFailure { .. })
    }
}

/// Custom Result type for the docshift library
///
/// # Examples
/// ```
/// use docshift::prelude::{Result, generic_error};
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
///
///     // Or return an error
///     // Err(generic_error("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a not-found error
pub fn not_found_error(path: PathBuf) -> Error {
    Error::NotFound { path }
}

/// Helper function to create an unsupported format error
pub fn unsupported_format_error(path: PathBuf, detail: &str) -> Error {
    Error::UnsupportedFormat {
        path,
        detail: detail.to_string(),
    }
}

/// Helper function to create a missing dependency error
pub fn dependency_missing_error(format: &str, feature: &str) -> Error {
    Error::DependencyMissing {
        format: format.to_string(),
        feature: feature.to_string(),
    }
}

/// Helper function to create a write failure carrying its cause
pub fn write_failure_error<E: StdError + Send + Sync + 'static>(
    err: E,
    path: PathBuf,
    detail: &str,
) -> Error {
    Error::WriteFailure {
        source: Some(Box::new(err)),
        path,
        detail: detail.to_string(),
    }
}

/// Helper function to create a read failure carrying its cause
pub fn read_failure_error<E: StdError + Send + Sync + 'static>(
    err: E,
    path: PathBuf,
    detail: &str,
) -> Error {
    Error::ReadFailure {
        source: Some(Box::new(err)),
        path,
        detail: detail.to_string(),
    }
}

/// Helper function to create a read failure without an underlying cause
pub fn read_failure_message(path: PathBuf, detail: &str) -> Error {
    Error::ReadFailure {
        source: None,
        path,
        detail: detail.to_string(),
    }
}

/// Helper function to create an invalid content error
pub fn invalid_content_error<E: StdError + Send + Sync + 'static>(
    err: E,
    format: &str,
    detail: &str,
) -> Error {
    Error::InvalidContent {
        source: Some(Box::new(err)),
        format: format.to_string(),
        detail: detail.to_string(),
    }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}

/// Maps an I/O error raised while opening a file for reading
///
/// `NotFound` keeps its own category, everything else is a read failure.
pub fn io_read_error(err: io::Error, path: PathBuf) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        not_found_error(path)
    } else {
        read_failure_error(err, path, "cannot open file")
    }
}

/// Maps an I/O error raised while creating or writing a destination
///
/// A missing parent directory is reported as `NotFound`.
pub fn io_write_error(err: io::Error, path: PathBuf) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        not_found_error(path)
    } else {
        write_failure_error(err, path, "cannot write file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = not_found_error(PathBuf::from("/test/missing.txt"));

        let error_string = format!("{error}");
        assert!(error_string.contains("/test/missing.txt"));
        assert_eq!(error.exit_code(), 2);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_unsupported_format_error() {
        let error = unsupported_format_error(PathBuf::from("notes.xyz"), "unknown extension 'xyz'");

        let error_string = format!("{error}");
        assert!(error_string.contains("notes.xyz"));
        assert!(error_string.contains("xyz"));
        assert!(error.is_unsupported_format());
    }

    #[test]
    fn test_dependency_missing_error() {
        let error = dependency_missing_error("PDF", "pdf");

        let error_string = format!("{error}");
        assert!(error_string.contains("PDF"));
        assert!(error_string.contains("'pdf' feature"));
        assert_eq!(error.exit_code(), 4);
    }

    #[test]
    fn test_write_failure_keeps_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let error = write_failure_error(io_error, PathBuf::from("/ro/out.txt"), "read-only");

        assert!(error.source().is_some());
        assert!(format!("{error}").contains("/ro/out.txt"));
        assert!(error.is_write_failure());
    }

    #[test]
    fn test_io_error_mapping() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(io_read_error(missing, PathBuf::from("a.txt")).is_not_found());

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = io_read_error(denied, PathBuf::from("a.txt"));
        assert_eq!(error.exit_code(), 6);

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(io_write_error(denied, PathBuf::from("a.txt")).is_write_failure());

        let missing_parent = io::Error::new(io::ErrorKind::NotFound, "no such directory");
        assert!(io_write_error(missing_parent, PathBuf::from("x/a.txt")).is_not_found());
    }

    #[test]
    fn test_io_error_cause_is_only_in_source() {
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error = io_write_error(denied, PathBuf::from("out.txt"));

        assert_eq!(format!("{error}"), "Failed to write out.txt: cannot write file");
        assert_eq!(error.source().unwrap().to_string(), "access denied");
    }

    #[test]
    fn test_generic_error() {
        let error = generic_error("Something went wrong");

        assert_eq!(format!("{error}"), "Something went wrong");
        assert_eq!(error.exit_code(), 1);
    }
}
