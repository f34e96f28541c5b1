mod canon;
mod commands;
mod config;
mod diagnostics;
mod error;
mod logging;
mod strongs;
mod tsk;
mod types;
mod xref;

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::{Config, MalformedPolicy};
use crate::logging::LogConfig;

#[derive(Parser)]
#[command(
    name = "scriptref",
    version,
    about = "Convert Bible cross-reference and Strong's-number data into JSONL and CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract verses tagged with Strong's numbers into <FIRST_NUMBER>.csv
    Strongs {
        /// Verse store (SQLite, table `bible`).
        #[arg(long, value_name = "PATH")]
        database: Option<PathBuf>,
        /// Lexicon JSON mapping numbers to original/transliteration/definition.
        #[arg(long, value_name = "PATH")]
        lexicon: Option<PathBuf>,
        /// One or more Strong's numbers, e.g. H25 or H356,G217,G875.
        #[arg(required = true, value_name = "NUMBER")]
        numbers: Vec<String>,
        /// Directory to write the CSV into.
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Convert a Treasury of Scripture Knowledge dump into tsk_xrefs.jsonl
    Tsk {
        /// Tab-separated TSK file.
        file: PathBuf,
        /// What to do with an unparseable reference token (overrides .scriptref.toml).
        #[arg(long = "on-malformed", value_enum, value_name = "POLICY")]
        on_malformed: Option<MalformedPolicy>,
    },
    /// Convert a vote-weighted from,to,votes CSV into out.jsonl
    Xref {
        /// Comma-separated vote file with a header row.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(
        &LogConfig::from_verbosity(cli.verbose, cli.quiet).with_ansi(std::io::stderr().is_terminal()),
    );

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            // Usage errors exit 2, like clap's own argument errors.
            if e.is_usage() { ExitCode::from(2) } else { ExitCode::FAILURE }
        },
    }
}

/// Load config and dispatch to the chosen command.
///
/// # Errors
///
/// Returns config loading errors or the command's own error.
fn run(cli: Cli) -> Result<(), error::Error> {
    let config = Config::load(Path::new("."))?;

    return match cli.command {
        Commands::Strongs { database, lexicon, numbers, output } => {
            commands::strongs(&commands::StrongsOptions {
                database: database.unwrap_or_else(|| return config.strongs_database.clone()),
                lexicon: lexicon.unwrap_or_else(|| return config.strongs_lexicon.clone()),
                numbers,
                output_dir: output,
            })
        },
        Commands::Tsk { file, on_malformed } => {
            commands::tsk(&file, &config, on_malformed.unwrap_or(config.on_malformed))
        },
        Commands::Xref { file } => commands::xref(&file, &config),
    };
}
