/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Qualifier string used for application identification
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
pub const ORGANIZATION: &str = "Ondřej Vágner";

/// Application name used for identification
///
/// This is the name used for the configuration folder.
pub const APPLICATION: &str = "docshift";

/// Name of the settings file looked up in the configuration folder
pub const DEFAULT_SETTINGS_FILE: &str = "settings.yaml";

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read settings from a specific YAML file";

/// Help text for the encoding command-line option
pub const ENCODING_HELP: &str = "Text encoding used for plain text files (e.g. utf-8, windows-1252)";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the log file command-line option
pub const LOG_FILE_HELP: &str = "Also write log messages to this file in the configuration folder";

/// Help text for the local logging command-line option
pub const LOCAL_LOGGING_HELP: &str = "Place the log file in the current directory instead";

pub const READ_HELP: &str = "Read a file and print its text content";
pub const READ_PATH_HELP: &str = "File to read";
pub const WRITE_HELP: &str = "Overwrite a file with new text content";
pub const WRITE_PATH_HELP: &str = "File to modify";
pub const WRITE_INPUT_HELP: &str = "File containing new contents; stdin if omitted";
pub const FORMATS_HELP: &str = "List recognised formats and whether their support is compiled in";

/// Default text encoding label
pub const DEFAULT_TEXT_ENCODING: &str = "utf-8";

/// Default CSV field delimiter
pub const DEFAULT_CSV_DELIMITER: char = ',';

/// Default font size, in points, for generated PDF documents
pub const DEFAULT_PDF_FONT_SIZE: f32 = 12.0;

/// Exit code for command-line usage errors (sysexits `EX_USAGE`)
pub const USAGE_EXIT_CODE: u8 = 64;
