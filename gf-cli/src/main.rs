//! Command-line interface for gf
//! Runs the "open file under cursor" lookup outside an editor, for scripts and editor glue.
//!
//! Usage:
//!   gf word `<line>` `<index>` [--filename]                         - Print the word around a char index
//!   gf open `<document>` --line `<n>` --column `<c>` [--selection `<text>`] - Print the file under the cursor
//!
//! Exit status: 0 when something was found, 1 when nothing was, 2 on errors.

mod host;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use gf_config::{GfConfig, Loader};
use gf_core::{filename_around, find_word_around, OpenUnderCursor, Outcome, SeparatorSet};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::host::FileHost;

/// Environment variable naming a config file layered under `--config`, skipped when absent.
const CONFIG_ENV: &str = "GF_CONFIG";

const EXIT_NOT_FOUND: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn cli() -> Command {
    Command::new("gf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find the file named under a cursor position")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v for info, -vv for debug)"),
        )
        .subcommand(
            Command::new("word")
                .about("Print the word around a char index of a line")
                .arg(Arg::new("line").required(true).help("Text of the line"))
                .arg(
                    Arg::new("index")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Char index, 0 up to and including the line length"),
                )
                .arg(
                    Arg::new("filename")
                        .long("filename")
                        .action(ArgAction::SetTrue)
                        .help("Use filename separators and drop a trailing '.'"),
                ),
        )
        .subcommand(
            Command::new("open")
                .about("Print the existing file named under the cursor of a document")
                .arg(
                    Arg::new("document")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Document the cursor is in"),
                )
                .arg(
                    Arg::new("line")
                        .long("line")
                        .short('l')
                        .default_value("0")
                        .value_parser(value_parser!(usize))
                        .help("0-based line of the cursor"),
                )
                .arg(
                    Arg::new("column")
                        .long("column")
                        .short('C')
                        .default_value("0")
                        .value_parser(value_parser!(usize))
                        .help("0-based char column of the cursor"),
                )
                .arg(
                    Arg::new("selection")
                        .long("selection")
                        .short('s')
                        .help("Selected text, used instead of the word under the cursor"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the outcome as JSON"),
                ),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        unreachable!("clap requires a subcommand");
    };

    // Global args are read from the subcommand, where clap propagates them.
    let config = match load_config(sub) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(EXIT_ERROR);
        }
    };
    init_logging(&config);

    let result = match name {
        "word" => handle_word_command(sub, &config),
        "open" => handle_open_command(sub, &config),
        _ => unreachable!("unknown subcommand {name}"),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_NOT_FOUND),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn load_config(matches: &ArgMatches) -> Result<GfConfig> {
    let mut loader = Loader::new();
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        loader = loader.with_optional_file(PathBuf::from(path));
    }
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(level) = verbosity_level(matches.get_count("verbose")) {
        loader = loader.set_override("log.level", level)?;
    }
    loader.build().context("failed to load configuration")
}

/// `-v` flags win over any configured log level.
fn verbosity_level(count: u8) -> Option<&'static str> {
    match count {
        0 => None,
        1 => Some("info"),
        _ => Some("debug"),
    }
}

fn init_logging(config: &GfConfig) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str())),
        )
        .init();
}

/// Handle the word command
fn handle_word_command(matches: &ArgMatches, config: &GfConfig) -> Result<bool> {
    let line = matches
        .get_one::<String>("line")
        .context("line is required")?;
    let index = *matches
        .get_one::<usize>("index")
        .context("index is required")?;

    let word = if matches.get_flag("filename") {
        filename_around(line, index, config.open.candidate_options())?.map(|found| found.name)
    } else {
        find_word_around(line, index, &SeparatorSet::whitespace())?.map(str::to_string)
    };

    match word {
        Some(word) => {
            println!("{word}");
            Ok(true)
        }
        None => Ok(false),
    }
}

#[derive(Serialize)]
struct OpenReport {
    outcome: &'static str,
    path: Option<PathBuf>,
}

/// Handle the open command
fn handle_open_command(matches: &ArgMatches, config: &GfConfig) -> Result<bool> {
    let document = matches
        .get_one::<PathBuf>("document")
        .context("document is required")?;
    let line = matches.get_one::<usize>("line").copied().unwrap_or(0);
    let column = matches.get_one::<usize>("column").copied().unwrap_or(0);
    let selection = matches.get_one::<String>("selection").cloned();
    debug!(document = %document.display(), line, column, "looking up file under cursor");

    let host = FileHost::load(document, line, column)?.with_selection(selection);
    let action = OpenUnderCursor::new(config.open.candidate_options());
    let outcome = action.run(&host)?;

    let report = match &outcome {
        Outcome::Opened(path) => OpenReport {
            outcome: "opened",
            path: Some(path.clone()),
        },
        Outcome::Missing(path) => OpenReport {
            outcome: "missing",
            path: Some(path.clone()),
        },
        Outcome::NoCandidate => OpenReport {
            outcome: "no-candidate",
            path: None,
        },
    };

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        for path in host.opened() {
            println!("{}", path.display());
        }
    }
    Ok(matches!(outcome, Outcome::Opened(_)))
}
