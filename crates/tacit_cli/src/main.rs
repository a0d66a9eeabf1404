//! tacit: Tokenize, parse and pretty-print tacit source.
//!
//! Usage:
//!   tacit [options] [FILE]
//!
//! Reads FILE, or stdin when no file is given. Exits with 0 on success, 1 on
//! a syntax error and 2 when input or configuration cannot be read.

use clap::Parser as ClapParser;
use log::{debug, info};
use miette::{NamedSource, Report};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tacit_diagnostics::SyntaxError;
use tacit_options::{load_config_in, parse_config_file, ConfigError, ParseOptions};
use thiserror::Error;

#[derive(ClapParser, Debug)]
#[command(name = "tacit", version, about = "tacit - a parser for a terse expression language")]
struct Cli {
    /// Source file to parse; stdin when omitted.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the token stream as JSON.
    #[arg(long)]
    tokens: bool,

    /// Print the concrete syntax tree as JSON.
    #[arg(long)]
    cst: bool,

    /// Print the abstract syntax tree as JSON (the default output).
    #[arg(long)]
    ast: bool,

    /// Print the program in canonical form.
    #[arg(long)]
    print: bool,

    /// Accept tokens left over after the program.
    #[arg(long = "allow-trailing")]
    allow_trailing: bool,

    /// Maximum grammar rule nesting.
    #[arg(long = "max-depth", value_name = "N")]
    max_depth: Option<u32>,

    /// Path to tacit.json; defaults to ./tacit.json when present.
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

const EXIT_SYNTAX_ERROR: i32 = 1;
const EXIT_IO_ERROR: i32 = 2;

// ANSI color codes
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Already rendered against its source text.
    #[error("{0}")]
    Syntax(Report),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(CliError::Syntax(report)) => {
            eprintln!("{:?}", report);
            EXIT_SYNTAX_ERROR
        }
        Err(err) => {
            print_error(&err.to_string());
            EXIT_IO_ERROR
        }
    };
    process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let start = Instant::now();
    let (name, source) = read_input(cli)?;
    let options = resolve_options(cli)?;
    debug!("options: {:?}", options);

    let scanned = tacit_scanner::tokenize(&source)
        .map_err(|err| syntax_error(err.into(), &name, &source))?;
    if cli.tokens {
        println!("{}", serde_json::to_string_pretty(&scanned.tokens)?);
    }

    let output = tacit_parser::parse_tokens(scanned.into_tokens(), &options)
        .map_err(|err| syntax_error(err.into(), &name, &source))?;
    info!(
        "parsed {} in {:.2}ms",
        name,
        start.elapsed().as_secs_f64() * 1000.0
    );

    if cli.cst {
        println!("{}", serde_json::to_string_pretty(&output.cst)?);
    }
    if cli.ast || !(cli.tokens || cli.cst || cli.print) {
        println!("{}", serde_json::to_string_pretty(&output.program)?);
    }
    if cli.print {
        println!("{}", tacit_printer::print_program(&output.program));
    }
    Ok(())
}

fn read_input(cli: &Cli) -> Result<(String, String), CliError> {
    match &cli.file {
        Some(path) => {
            let name = path.display().to_string();
            match std::fs::read_to_string(path) {
                Ok(source) => Ok((name, source)),
                Err(source) => Err(CliError::Read { name, source }),
            }
        }
        None => {
            let mut source = String::new();
            match std::io::stdin().read_to_string(&mut source) {
                Ok(_) => Ok(("<stdin>".to_string(), source)),
                Err(source) => Err(CliError::Read {
                    name: "<stdin>".to_string(),
                    source,
                }),
            }
        }
    }
}

/// Config file options, with command-line flags taking precedence.
fn resolve_options(cli: &Cli) -> Result<ParseOptions, CliError> {
    let config = match &cli.config {
        Some(path) => parse_config_file(path)?,
        None => {
            let cwd = std::env::current_dir().map_err(|source| CliError::Read {
                name: ".".to_string(),
                source,
            })?;
            load_config_in(cwd)?
        }
    };

    let mut options = config.parse_options;
    if cli.allow_trailing {
        options.allow_trailing_tokens = true;
    }
    if let Some(depth) = cli.max_depth {
        options.max_nesting_depth = depth;
    }
    Ok(options)
}

fn syntax_error(err: SyntaxError, name: &str, source: &str) -> CliError {
    CliError::Syntax(Report::new(err).with_source_code(NamedSource::new(name, source.to_string())))
}

fn print_error(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}
