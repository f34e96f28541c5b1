//! CLI commands for scriptref: tsk, xref, strongs.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::config::{Config, MalformedPolicy};
use crate::error;
use crate::strongs;
use crate::tsk;
use crate::types::Edge;
use crate::xref;

/// Extensions accepted for TSK input. The dump is tab-separated but ships as `.csv`.
const TSK_EXTENSIONS: &[&str] = &["csv", "tsv"];

/// Extensions accepted for vote CSV input.
const XREF_EXTENSIONS: &[&str] = &["csv"];

/// Options for the Strong's extractor, after CLI and config are merged.
pub struct StrongsOptions {
    /// SQLite verse store.
    pub database: PathBuf,
    /// JSON lexicon.
    pub lexicon: PathBuf,
    /// Raw number arguments, possibly comma-separated.
    pub numbers: Vec<String>,
    /// Directory for the CSV; the working directory when `None`.
    pub output_dir: Option<PathBuf>,
}

/// Verify an input path exists and has one of the expected extensions.
///
/// # Errors
///
/// Returns `Error::FileNotFound` or `Error::WrongExtension`.
pub fn check_input(path: &Path, extensions: &[&str], expected: &'static str) -> Result<(), error::Error> {
    if !path.is_file() {
        return Err(error::Error::FileNotFound { path: path.to_path_buf() });
    }
    let ext = path.extension().and_then(|e| return e.to_str()).unwrap_or("");
    if !extensions.iter().any(|e| return *e == ext) {
        return Err(error::Error::WrongExtension { expected, path: path.to_path_buf() });
    }
    return Ok(());
}

/// Write edges as JSON Lines, one object per edge.
///
/// # Errors
///
/// Returns `Error::Io` or `Error::Json` if the file cannot be written.
pub fn write_jsonl(path: &Path, edges: &[Edge]) -> Result<(), error::Error> {
    let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);
    for edge in edges {
        serde_json::to_writer(&mut out, edge)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    return Ok(());
}

/// Convert a TSK file into `tsk_xrefs.jsonl` (or the configured output).
///
/// # Errors
///
/// Returns input validation, parse, or write errors. Nothing is written on error.
pub fn tsk(input: &Path, config: &Config, policy: MalformedPolicy) -> Result<(), error::Error> {
    check_input(input, TSK_EXTENSIONS, "tab-separated .csv/.tsv")?;

    tracing::info!(path = %input.display(), ?policy, "reading TSK file");
    let edges = tsk::convert_file(input, policy)?;

    tracing::info!(path = %config.tsk_output.display(), "writing edges");
    write_jsonl(&config.tsk_output, &edges)?;

    println!("Wrote {} edges to {}", edges.len(), config.tsk_output.display());
    return Ok(());
}

/// Convert a vote CSV into `out.jsonl` (or the configured output).
///
/// # Errors
///
/// Returns input validation, parse, or write errors. Nothing is written on error.
pub fn xref(input: &Path, config: &Config) -> Result<(), error::Error> {
    check_input(input, XREF_EXTENSIONS, ".csv")?;

    tracing::info!(path = %input.display(), "reading vote file");
    let edges = xref::convert_file(input)?;

    tracing::info!(path = %config.xref_output.display(), "writing edges");
    write_jsonl(&config.xref_output, &edges)?;

    println!("Wrote {} edges to {}", edges.len(), config.xref_output.display());
    return Ok(());
}

/// Extract verses tagged with the given Strong's numbers into `<FIRST>.csv`.
///
/// # Errors
///
/// Returns `Error::NoStrongsNumbers`, data-source errors, or write errors.
pub fn strongs(options: &StrongsOptions) -> Result<(), error::Error> {
    let numbers = strongs::parse_numbers(&options.numbers)?;
    let Some(first) = numbers.first() else {
        return Err(error::Error::NoStrongsNumbers);
    };

    let lexicon = strongs::Lexicon::load(&options.lexicon)?;
    tracing::info!(path = %options.database.display(), "reading verse store");
    let verses = strongs::read_verses(&options.database)?;
    let matched = strongs::extract_all(&verses, &numbers, &lexicon);
    let total = matched.len();

    if let Some(dir) = &options.output_dir {
        std::fs::create_dir_all(dir)?;
    }
    let path = strongs::output_path(options.output_dir.as_deref(), first);
    strongs::write_csv(&path, matched)?;

    println!("CSV Generated: {}", path.display());
    println!("Total entries: {total}");
    return Ok(());
}
