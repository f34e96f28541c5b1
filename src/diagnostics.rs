use std::fmt::Write as _;

use crate::config::CONFIG_FILE;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened,
/// where, and how to fix it when there is an obvious fix.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::InRow { line, source } => render_in_row(*line, source),
        Error::MalformedReference { token, reason } => render_malformed_reference(token, reason),
        Error::UnknownBook { abbreviation, token } => render_unknown_book(abbreviation, token),
        Error::WrongExtension { path, expected } => format!("\
# Error: Wrong File Type

`{}` is not a {expected} file.
", path.display()),
        Error::NoStrongsNumbers => render_no_strongs_numbers(),
        Error::DataSourceNotFound { path } => render_data_source(&format!("`{}` does not exist.", path.display())),
        Error::MissingTable { path, table } => {
            render_data_source(&format!("`{}` has no `{table}` table.", path.display()))
        },
        _ => render_generic(e),
    }
}

fn render_data_source(problem: &str) -> String {
    format!("\
# Error: Data Source Not Found

{problem}

## Fix

Point to the verse store and lexicon with a flag or in `{CONFIG_FILE}`:

    [strongs]
    database = \"path/to/av1769s.bib\"
    lexicon = \"path/to/strongs.json\"
")
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::FileNotFound { path } => format!("\
# Error: File Not Found

`{}` does not exist.
", path.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid {CONFIG_FILE}

{e}
"),

        Error::Database(e) => format!("\
# Error: Database

{e}

The verse store must be SQLite with a `bible` table.
"),

        _ => format!("\
# Error

{e}
"),
    }
}

/// Row errors keep the inner diagnostic and add where it happened.
fn render_in_row(line: u64, source: &Error) -> String {
    let mut out = render_error(source);
    let _ = write!(out, "\nInput line {line}.\n");
    out
}

fn render_malformed_reference(token: &str, reason: &str) -> String {
    format!("\
# Error: Malformed Reference

`{token}`: {reason}

## Fix

Correct the token, or drop malformed tokens and keep going:

    scriptref tsk --on-malformed skip <FILE>
")
}

fn render_unknown_book(abbreviation: &str, token: &str) -> String {
    format!("\
# Error: Unknown Book

`{abbreviation}` in `{token}` is not a TSK book abbreviation.

## Fix

Correct the abbreviation, or drop unresolvable tokens:

    scriptref tsk --on-malformed skip <FILE>
")
}

fn render_no_strongs_numbers() -> String {
    "\
# Error: No Strong's Numbers

Enter one or more Strong's numbers, separately or comma separated:

    scriptref strongs H25
    scriptref strongs H356,G217,G875
"
    .to_string()
}
