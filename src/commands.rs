//! Command execution
//!
//! Runs one parsed [`Action`] against a [`Dispatcher`]. Output streams are
//! passed in so the commands can be exercised without a terminal.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use atty::Stream;
use log::{debug, info};

use crate::cli::Action;
use crate::dispatcher::Dispatcher;
use crate::errors::{Result, generic_error, io_read_error, read_failure_error};
use crate::format::{Capability, capabilities};

/// Runs an action using the process' standard streams
pub fn run_action(action: &Action, dispatcher: &Dispatcher) -> Result<()> {
    match action {
        Action::Read { path } => read_command(dispatcher, path, &mut std::io::stdout().lock()),
        Action::Write { path, input } => {
            if input.is_none() && atty::is(Stream::Stdin) {
                info!("Reading new contents from standard input; end with Ctrl-D");
            }
            write_command(dispatcher, path, input.as_deref(), std::io::stdin().lock())
        }
        Action::Formats => formats_command(&mut std::io::stdout().lock()),
    }
}

/// Prints the text content of `path`, followed by a newline
pub fn read_command(dispatcher: &Dispatcher, path: &Path, out: &mut impl Write) -> Result<()> {
    let content = dispatcher.read(path)?;
    writeln!(out, "{content}")
        .and_then(|_| out.flush())
        .map_err(|e| generic_error(&format!("Failed to print content: {e}")))
}

/// Overwrites `path` with the contents of `input`, or of `stdin` without one
pub fn write_command(
    dispatcher: &Dispatcher,
    path: &Path,
    input: Option<&Path>,
    stdin: impl Read,
) -> Result<()> {
    let content = load_input(input, stdin)?;
    debug!("Loaded {} bytes of new contents", content.len());
    dispatcher.write(path, &content)
}

/// Loads the new contents for a write as UTF-8 text
pub fn load_input(input: Option<&Path>, mut stdin: impl Read) -> Result<String> {
    match input {
        Some(input) => {
            let bytes = fs::read(input).map_err(|e| io_read_error(e, input.to_path_buf()))?;
            String::from_utf8(bytes).map_err(|e| {
                read_failure_error(e, input.to_path_buf(), "input is not valid UTF-8 text")
            })
        }
        None => {
            let mut content = String::new();
            stdin.read_to_string(&mut content).map_err(|e| {
                read_failure_error(e, "<stdin>".into(), "cannot read standard input")
            })?;
            Ok(content)
        }
    }
}

/// Prints the capability report
pub fn formats_command(out: &mut impl Write) -> Result<()> {
    write!(out, "{}", render_capabilities(&capabilities()))
        .and_then(|_| out.flush())
        .map_err(|e| generic_error(&format!("Failed to print formats: {e}")))
}

/// Renders capabilities as an aligned table
pub fn render_capabilities(report: &[Capability]) -> String {
    let rows: Vec<[String; 4]> = report
        .iter()
        .map(|capability| {
            let extensions = capability
                .extensions
                .iter()
                .map(|extension| format!(".{extension}"))
                .collect::<Vec<_>>()
                .join(" ");
            let status = match (capability.available, capability.feature) {
                (true, _) => "available".to_string(),
                (false, Some(feature)) => format!("missing (enable feature '{feature}')"),
                (false, None) => "missing".to_string(),
            };
            let access = if capability.writable {
                "read/write"
            } else {
                "read only"
            };
            [
                capability.format.name().to_string(),
                extensions,
                access.to_string(),
                status,
            ]
        })
        .collect();

    let name_width = rows.iter().map(|row| row[0].len()).max().unwrap_or(0);
    let extension_width = rows.iter().map(|row| row[1].len()).max().unwrap_or(0);
    let access_width = rows.iter().map(|row| row[2].len()).max().unwrap_or(0);

    rows.iter()
        .map(|[name, extensions, access, status]| {
            format!(
                "{name:<name_width$}  {extensions:<extension_width$}  {access:<access_width$}  {status}\n"
            )
        })
        .collect()
}
