use std::process::ExitCode;

use anyhow::Result;
use atty::Stream;
use clap::ArgMatches;
use colored::Colorize;
use human_panic::setup_panic;
use log::debug;

use docshift::cli::{
    get_action, get_config_path, get_encoding, get_log_file, get_verbosity, try_get_matches,
    usage_exit_code,
};
use docshift::commands::run_action;
use docshift::config::resolve_settings;
use docshift::logging::init_logger;
use docshift::{Dispatcher, Error};

fn run(matches: &ArgMatches) -> Result<()> {
    let mut settings = resolve_settings(get_config_path(matches).as_deref())?;
    if let Some(encoding) = get_encoding(matches) {
        settings.text_encoding = encoding;
        settings.validate()?;
    }

    let log_file = get_log_file(matches, &settings)?;
    init_logger(get_verbosity(matches), log_file.as_deref())?;
    debug!("Effective settings: {settings:?}");

    let action = get_action(matches)?;
    run_action(&action, &Dispatcher::new(settings))?;
    Ok(())
}

fn main() -> ExitCode {
    setup_panic!();

    let matches = match try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let prefix = if atty::is(Stream::Stderr) {
                "error:".red().bold().to_string()
            } else {
                "error:".to_string()
            };
            eprintln!("{prefix} {err:#}");

            let code = err.downcast_ref::<Error>().map_or(1, Error::exit_code);
            ExitCode::from(code)
        }
    }
}
