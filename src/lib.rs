//! Read and overwrite files of many formats through one text interface
//!
//! The format is chosen from the file extension. Reading returns the file's
//! content as flat text; writing turns text back into the format and replaces
//! the file.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let text = docshift::read_file(Path::new("report.json"))?;
//! docshift::write_file(Path::new("report.yaml"), &text)?;
//! # Ok::<(), docshift::Error>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
mod constants;
pub mod dispatcher;
pub mod errors;
pub mod format;
pub mod logging;

pub use config::Settings;
pub use dispatcher::{Dispatcher, read_file, write_file};
pub use errors::{Error, Result};
pub use format::{Capability, Format, FormatHandler, capabilities};

pub mod prelude {
    pub use crate::dispatcher::{Dispatcher, read_file, write_file};
    pub use crate::errors::{
        dependency_missing_error, generic_error, invalid_content_error, not_found_error,
        read_failure_error, unsupported_format_error, write_failure_error,
    };
    pub use crate::errors::{Error, Result};
    pub use crate::format::Format;
    pub use crate::logging::{LogLevel, init_default_logger, init_logger};
}
