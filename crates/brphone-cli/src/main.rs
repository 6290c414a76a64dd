mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, convert, inspect, matching, Context};
use crate::error::{exit_code_for, report_error};
use brphone_config::{self as config, OutputForm as Form};

#[derive(Debug, Parser)]
#[command(name = "brphone", version, about = "Brazilian mobile number normalizer")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Canonical matching key (5531991156109)
    Key(convert::PhonesArgs),
    /// Legacy database form (553191156109)
    Storage(convert::PhonesArgs),
    /// Spreadsheet form of a storage-form number (+5531991156109)
    Spreadsheet(convert::PhonesArgs),
    /// Display form ((31) 99115-6109)
    Display(convert::PhonesArgs),
    /// Spreadsheet cell value ('+5531991156109)
    Persist(convert::PhonesArgs),
    /// Every stored representation of a number, for joins
    Variants(inspect::PhoneArgs),
    /// Check that numbers are valid Brazilian mobile numbers
    Validate(convert::PhonesArgs),
    /// Show every form derived from one number
    Inspect(inspect::PhoneArgs),
    /// Convert one number per line from a file or stdin
    Convert(convert::ConvertArgs),
    /// Join conversation phones against a spreadsheet export
    Match(matching::MatchArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config =
                config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let ctx = Context {
                json,
                config: &app_config,
            };

            match command {
                Command::Key(args) => convert::convert_each(&ctx, args, Form::Key),
                Command::Storage(args) => convert::convert_each(&ctx, args, Form::Storage),
                Command::Spreadsheet(args) => convert::convert_each(&ctx, args, Form::Spreadsheet),
                Command::Display(args) => convert::convert_each(&ctx, args, Form::Display),
                Command::Persist(args) => convert::convert_each(&ctx, args, Form::Persistence),
                Command::Variants(args) => inspect::variants(&ctx, args),
                Command::Validate(args) => inspect::validate(&ctx, args),
                Command::Inspect(args) => inspect::inspect(&ctx, args),
                Command::Convert(args) => convert::convert_lines(&ctx, args),
                Command::Match(args) => matching::match_phones(&ctx, args),
                Command::Completions(_) => {
                    unreachable!("completions command handled before config load")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
