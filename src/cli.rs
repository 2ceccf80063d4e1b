use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{
    Arg, ArgMatches, Command, command, crate_authors, crate_description, crate_name,
    crate_version,
};

use crate::config::{Settings, find_project_folder};
use crate::constants::{
    CONFIG_HELP, ENCODING_HELP, FORMATS_HELP, LOCAL_LOGGING_HELP, LOG_FILE_HELP, READ_HELP,
    READ_PATH_HELP, USAGE_EXIT_CODE, VERBOSE_HELP, WRITE_HELP, WRITE_INPUT_HELP, WRITE_PATH_HELP,
};
use crate::logging::LogLevel;

/// The subcommand chosen on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the text content of a file
    Read { path: PathBuf },
    /// Overwrite a file with the contents of `input`, or of stdin when `None`
    Write {
        path: PathBuf,
        input: Option<PathBuf>,
    },
    /// Print the capability report
    Formats,
}

/// Builds the command-line interface
///
/// Defines the following global arguments:
/// - `config`: Path to the settings file
/// - `encoding`: Text encoding for plain text files
/// - `log_file` / `log_locally`: Where to write a log file
/// - `verbose`: Increase verbosity level
///
/// and the `read`, `write` and `formats` subcommands.
pub fn build_command() -> Command {
    // define arg for reading settings from a specific file
    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .help(CONFIG_HELP)
        .global(true);

    // define arg for overriding the text encoding
    let arg_encoding = Arg::new("encoding")
        .short('e')
        .long("encoding")
        .help(ENCODING_HELP)
        .global(true);

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(clap::ArgAction::Count)
        .global(true);

    // define arg for log file
    let log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP)
        .global(true);

    // define arg for local logging
    let log_locally = Arg::new("log_locally")
        .short('L')
        .long("log-locally")
        .help(LOCAL_LOGGING_HELP)
        .action(clap::ArgAction::SetTrue)
        .global(true);

    let read = Command::new("read")
        .about(READ_HELP)
        .arg(Arg::new("path").required(true).help(READ_PATH_HELP));

    let write = Command::new("write")
        .about(WRITE_HELP)
        .arg(Arg::new("path").required(true).help(WRITE_PATH_HELP))
        .arg(Arg::new("input").required(false).help(WRITE_INPUT_HELP));

    let formats = Command::new("formats").about(FORMATS_HELP);

    command!()
        .author(crate_authors!())
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(arg_config)
        .arg(arg_encoding)
        .arg(log_file)
        .arg(log_locally)
        .arg(arg_verbose)
        .subcommand(read)
        .subcommand(write)
        .subcommand(formats)
}

/// Parses the process arguments
///
/// # Errors
/// Returns clap's error for usage problems and for `--help`/`--version`,
/// which the caller prints and maps through [`usage_exit_code`].
pub fn try_get_matches() -> std::result::Result<ArgMatches, clap::Error> {
    build_command().try_get_matches()
}

/// Exit code for a clap error
///
/// Help and version output are successes. Real usage errors get a code
/// distinct from every library error kind.
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { USAGE_EXIT_CODE } else { 0 }
}

/// Gets the subcommand and its paths from the command-line arguments
///
/// Paths have `~` expanded.
///
/// # Errors
/// Returns an error if no known subcommand was given
pub fn get_action(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("read", sub)) => Ok(Action::Read {
            path: required_path(sub, "path")?,
        }),
        Some(("write", sub)) => Ok(Action::Write {
            path: required_path(sub, "path")?,
            input: sub.get_one::<String>("input").map(|raw| expand_path(raw)),
        }),
        Some(("formats", _)) => Ok(Action::Formats),
        Some((other, _)) => Err(anyhow!("Unknown command: {other}")),
        None => Err(anyhow!("No command given")),
    }
}

fn required_path(matches: &ArgMatches, name: &str) -> Result<PathBuf> {
    matches
        .get_one::<String>(name)
        .map(|raw| expand_path(raw))
        .ok_or_else(|| anyhow!("Missing required argument <{name}>"))
}

/// Expands a leading `~` to the home directory
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Gets the settings file given with `--config`, if any
pub fn get_config_path(matches: &ArgMatches) -> Option<PathBuf> {
    matches
        .get_one::<String>("config")
        .map(|raw| expand_path(raw))
}

/// Gets the encoding override given with `--encoding`, if any
pub fn get_encoding(matches: &ArgMatches) -> Option<String> {
    matches.get_one::<String>("encoding").cloned()
}

/// Gets the verbosity level from the command-line arguments
///
/// Counts the occurrences of the "verbose" flag and converts it to a
/// `LogLevel`.
///
/// # Examples
/// ```
/// # use clap::ArgMatches;
/// # use docshift::cli::get_verbosity;
/// # use docshift::logging::LogLevel;
/// # fn example(matches: &ArgMatches) {
/// let verbosity = get_verbosity(matches);
///
/// match verbosity {
///     LogLevel::Warning => println!("Running quietly"),
///     LogLevel::Debug => println!("Running with debug output"),
///     _ => {}
/// }
/// # }
/// ```
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    let verbose_count = matches.get_count("verbose");
    LogLevel::from_occurrences(verbose_count)
}

/// Resolves where to write the log file, if anywhere
///
/// The command line wins over the settings file. Unless `--log-locally` is
/// given, the file is placed in the configuration folder.
pub fn get_log_file(matches: &ArgMatches, settings: &Settings) -> Result<Option<String>> {
    let Some(filename) = matches
        .get_one::<String>("log_file")
        .cloned()
        .or_else(|| settings.log_file.clone())
    else {
        return Ok(None);
    };

    if matches.get_flag("log_locally") {
        Ok(Some(filename))
    } else {
        let folder = find_project_folder()?;
        let path = folder.config_dir().join(filename);
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("Failed to convert path to string: {:?}", path))?;
        Ok(Some(path_str.to_string()))
    }
}
