//! Crate-level error types for scriptref diagnostics.
use std::path::PathBuf;

/// All errors in scriptref carry enough context to produce a useful diagnostic
/// without a debugger. Each variant names the file, token, or row that failed.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A canon index column fell outside 1..=66.
    #[error("book index {index} is outside the 66-book canon")]
    BookIndexOutOfRange {
        /// The offending 1-based index.
        index: u32,
    },

    /// Underlying CSV/TSV reader or writer error.
    #[error("csv: {0}")]
    Csv(
        /// The wrapped csv error.
        #[from]
        csv::Error,
    ),

    /// SQLite failed while reading the verse store.
    #[error("database: {0}")]
    Database(
        /// The wrapped SQLite error.
        #[from]
        rusqlite::Error,
    ),

    /// A backing data file (verse store, lexicon) does not exist.
    #[error("data source not found: {}", path.display())]
    DataSourceNotFound {
        /// Path to the missing data file.
        path: PathBuf,
    },

    /// The input file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Wraps an error with the 1-based line of the input row it came from.
    #[error("line {line}: {source}")]
    InRow {
        /// 1-based line number in the input file.
        line: u64,
        /// The underlying row error.
        source: Box<Error>,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization or lexicon deserialization failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// A reference token does not match any known locus shape.
    #[error("malformed reference `{token}`: {reason}")]
    MalformedReference {
        /// Description of what was wrong.
        reason: String,
        /// The raw token as it appeared in the input.
        token: String,
    },

    /// An input row is missing columns or carries non-numeric indices.
    #[error("malformed row: {reason}")]
    MalformedRow {
        /// Description of what was wrong.
        reason: String,
    },

    /// A range was built from one chapter locus and one verse locus.
    #[error("range mixes locus shapes: `{start}` - `{end}`")]
    MismatchedRange {
        /// Formatted end locus.
        end: String,
        /// Formatted start locus.
        start: String,
    },

    /// The verse store opened but lacks the table verses are read from.
    #[error("data source {} has no `{table}` table", path.display())]
    MissingTable {
        /// Path to the verse store.
        path: PathBuf,
        /// Name of the absent table.
        table: &'static str,
    },

    /// None of the supplied Strong's numbers had a valid `H123`/`G123` shape.
    #[error("no valid Strong's numbers found")]
    NoStrongsNumbers,

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// A book abbreviation is not in the fixed TSK abbreviation table.
    #[error("unknown book abbreviation `{abbreviation}` in `{token}`")]
    UnknownBook {
        /// The abbreviation that failed to resolve.
        abbreviation: String,
        /// The raw token containing it.
        token: String,
    },

    /// The input file has the wrong extension for the chosen converter.
    #[error("{} is not a {expected} file", path.display())]
    WrongExtension {
        /// Human-readable list of accepted extensions.
        expected: &'static str,
        /// The rejected input path.
        path: PathBuf,
    },
}

impl Error {
    /// Attach a 1-based row line to an error. Already-wrapped errors are left alone.
    pub fn in_row(self, line: u64) -> Self {
        if matches!(self, Self::InRow { .. }) {
            return self;
        }
        return Self::InRow { line, source: Box::new(self) };
    }

    /// Whether this error is a malformed-reference condition, the only class
    /// the `skip` policy may recover from.
    pub const fn is_malformed_reference(&self) -> bool {
        return matches!(
            self,
            Self::MalformedReference { .. } | Self::MismatchedRange { .. } | Self::UnknownBook { .. }
        );
    }

    /// Whether this error stems from how the tool was invoked rather than from data.
    pub fn is_usage(&self) -> bool {
        return match self {
            Self::FileNotFound { .. } | Self::NoStrongsNumbers | Self::WrongExtension { .. } => true,
            Self::InRow { source, .. } => source.is_usage(),
            _ => false,
        };
    }
}
