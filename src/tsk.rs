//! Treasury of Scripture Knowledge conversion: reference-notation parsing,
//! source id formatting, and row-to-edge transformation.
//!
//! A TSK reference token is a book abbreviation and a locus expression
//! separated by whitespace:
//!
//!     ge 3:1          single verse
//!     ex 20           whole chapter
//!     ex 20-24        chapter range
//!     ps 51:1,3-5     verse list, each piece a verse or verse range
//!     isa 1:1-2:3     verse range crossing a chapter boundary

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::canon::Book;
use crate::config::MalformedPolicy;
use crate::error::Error;
use crate::types::{ChapterLocus, Edge, EdgeKind, Locus, Reference, VerseLocus};

/// Columns every TSK row must carry.
const TSK_COLUMNS: usize = 6;

/// `a-b`: a chapter range with no colon, or a verse range inside a verse list.
static NUMBER_RANGE: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"^(\d+)-(\d+)$").expect("valid regex"));

/// `c1:v1-c2:v2`, a verse range spanning chapters.
static CROSS_CHAPTER_RANGE: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"^(\d+):(\d+)-(\d+):(\d+)$").expect("valid regex"));

/// The locus half of a token, parsed before the book is resolved.
#[derive(Debug, PartialEq, Eq)]
enum LocusExpr {
    Chapter(u32),
    ChapterRange(u32, u32),
    CrossChapter { end: (u32, u32), start: (u32, u32) },
    Verses { chapter: u32, pieces: Vec<VersePiece> },
}

#[derive(Debug, PartialEq, Eq)]
enum VersePiece {
    Range(u32, u32),
    Single(u32),
}

/// One TSK input row, as read from the tab-separated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TskRow {
    /// 1-based canon position of the source book.
    pub book_index: u32,
    /// Source chapter.
    pub chapter: u32,
    /// Semicolon-delimited reference tokens.
    pub references: String,
    /// Free-text annotation on the source verse.
    pub source_text: String,
    /// Source verse.
    pub verse: u32,
}

impl TskRow {
    /// Build a row from a raw record. Column 3 is unused by the dataset.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedRow` when a column is missing or an index is not numeric.
    pub fn from_record(record: &csv::StringRecord) -> Result<Self, Error> {
        if record.len() < TSK_COLUMNS {
            return Err(Error::MalformedRow {
                reason: format!("expected {TSK_COLUMNS} columns, found {}", record.len()),
            });
        }
        return Ok(Self {
            book_index: parse_index_column(record, 0, "book index")?,
            chapter: parse_index_column(record, 1, "chapter index")?,
            references: record.get(5).unwrap_or_default().to_string(),
            source_text: record.get(4).unwrap_or_default().to_string(),
            verse: parse_index_column(record, 2, "verse index")?,
        });
    }
}

/// Parse one numeric index column of a TSK record.
fn parse_index_column(record: &csv::StringRecord, column: usize, name: &str) -> Result<u32, Error> {
    let raw = record.get(column).unwrap_or_default().trim();
    return parse_number(raw).ok_or_else(|| return Error::MalformedRow {
        reason: format!("{name} `{raw}` is not a non-negative integer"),
    });
}

/// Parse a run of ASCII digits. Signs, whitespace and overflow are rejected.
fn parse_number(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| return b.is_ascii_digit()) {
        return None;
    }
    return raw.parse().ok();
}

/// Parse a captured digit group, reporting overflow against the token.
fn parse_capture(raw: &str, token: &str) -> Result<u32, Error> {
    return parse_number(raw).ok_or_else(|| return Error::MalformedReference {
        reason: format!("`{raw}` is not a representable number"),
        token: token.to_string(),
    });
}

/// Parse the locus expression of a token into its shape.
fn parse_locus_expression(expr: &str, token: &str) -> Result<LocusExpr, Error> {
    let malformed = |reason: String| {
        return Error::MalformedReference { reason, token: token.to_string() };
    };

    if let Some(caps) = NUMBER_RANGE.captures(expr) {
        return Ok(LocusExpr::ChapterRange(parse_capture(&caps[1], token)?, parse_capture(&caps[2], token)?));
    }
    if let Some(caps) = CROSS_CHAPTER_RANGE.captures(expr) {
        return Ok(LocusExpr::CrossChapter {
            end: (parse_capture(&caps[3], token)?, parse_capture(&caps[4], token)?),
            start: (parse_capture(&caps[1], token)?, parse_capture(&caps[2], token)?),
        });
    }

    let Some((chapter_part, verse_part)) = expr.split_once(':') else {
        return parse_number(expr)
            .map(LocusExpr::Chapter)
            .ok_or_else(|| return malformed(format!("`{expr}` is not a chapter, range, or chapter:verse")));
    };
    if verse_part.contains(':') {
        return Err(malformed(format!("`{expr}` has more than one colon")));
    }
    let chapter = parse_number(chapter_part)
        .ok_or_else(|| return malformed(format!("chapter `{chapter_part}` is not a non-negative integer")))?;

    // A bare verse is just a one-piece list, so both share this path.
    let pieces = verse_part
        .split(',')
        .map(|piece| return parse_verse_piece(piece, token))
        .collect::<Result<Vec<_>, _>>()?;

    return Ok(LocusExpr::Verses { chapter, pieces });
}

/// Parse one comma-separated piece of a verse list.
fn parse_verse_piece(piece: &str, token: &str) -> Result<VersePiece, Error> {
    if let Some(verse) = parse_number(piece) {
        return Ok(VersePiece::Single(verse));
    }
    if let Some(caps) = NUMBER_RANGE.captures(piece) {
        return Ok(VersePiece::Range(parse_capture(&caps[1], token)?, parse_capture(&caps[2], token)?));
    }
    return Err(Error::MalformedReference {
        reason: format!("verse piece `{piece}` is neither a verse nor a verse range"),
        token: token.to_string(),
    });
}

/// Expand a parsed locus expression into references within `book`.
/// Ranges go through `Reference::range`, which rejects mixed shapes.
fn build_references(book: Book, expr: LocusExpr) -> Result<Vec<Reference>, Error> {
    let chapter = |chapter| return Locus::Chapter(ChapterLocus::new(book, chapter));
    let verse = |chapter, verse| return Locus::Verse(VerseLocus::new(book, chapter, verse));

    return match expr {
        LocusExpr::Chapter(c) => Ok(vec![Reference::single(chapter(c))]),
        LocusExpr::ChapterRange(start, end) => Ok(vec![Reference::range(chapter(start), chapter(end))?]),
        LocusExpr::CrossChapter { start, end } => {
            Ok(vec![Reference::range(verse(start.0, start.1), verse(end.0, end.1))?])
        },
        LocusExpr::Verses { chapter: c, pieces } => pieces
            .into_iter()
            .map(|piece| {
                return match piece {
                    VersePiece::Range(start, end) => Reference::range(verse(c, start), verse(c, end)),
                    VersePiece::Single(v) => Ok(Reference::single(verse(c, v))),
                };
            })
            .collect(),
    };
}

/// Parse one TSK reference token into one or more references, in written order.
///
/// # Errors
///
/// Returns `Error::MalformedReference` if the token is not `<book> <locus>` or the
/// locus matches no known shape, and `Error::UnknownBook` if the abbreviation is
/// not in the TSK table. The locus is checked before the book.
pub fn parse_reference_token(token: &str) -> Result<Vec<Reference>, Error> {
    let trimmed = token.trim();
    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let [abbreviation, locus] = fields.as_slice() else {
        return Err(Error::MalformedReference {
            reason: format!("expected `<book> <locus>`, found {} field(s)", fields.len()),
            token: trimmed.to_string(),
        });
    };

    let expr = parse_locus_expression(locus, trimmed)?;
    let book = Book::from_tsk_abbreviation(abbreviation).ok_or_else(|| return Error::UnknownBook {
        abbreviation: (*abbreviation).to_string(),
        token: trimmed.to_string(),
    })?;

    return build_references(book, expr);
}

/// Format a source verse from its canon index, chapter and verse columns.
///
/// # Errors
///
/// Returns `Error::BookIndexOutOfRange` for an index outside 1..=66.
pub fn format_source_id(book_index: u32, chapter: u32, verse: u32) -> Result<String, Error> {
    let book = Book::from_canon_index(book_index).ok_or(Error::BookIndexOutOfRange { index: book_index })?;
    return Ok(VerseLocus::new(book, chapter, verse).to_string());
}

/// Turn one TSK row into its output edge.
///
/// Under `MalformedPolicy::Skip` a bad token is logged and dropped while the
/// rest of the row converts; under `Abort` it is returned as the error.
///
/// # Errors
///
/// Returns `Error::BookIndexOutOfRange` for a bad source index, or the
/// malformed-reference error of the first bad token under `Abort`.
pub fn transform_row(row: &TskRow, line: u64, policy: MalformedPolicy) -> Result<Edge, Error> {
    let source = format_source_id(row.book_index, row.chapter, row.verse)?;
    let mut targets = Vec::new();

    for token in row.references.split(';').filter(|t| return !t.trim().is_empty()) {
        match parse_reference_token(token) {
            Ok(references) => targets.extend(references.iter().map(ToString::to_string)),
            Err(e) if policy == MalformedPolicy::Skip && e.is_malformed_reference() => {
                tracing::warn!(line, %source, error = %e, "skipping malformed reference");
            },
            Err(e) => return Err(e),
        }
    }

    return Ok(Edge {
        kind: EdgeKind::Directed,
        source,
        source_text: Some(row.source_text.clone()),
        targets,
    });
}

/// Read a TSK file and convert every row, preserving input order.
///
/// # Errors
///
/// Returns reader errors, or the first row error wrapped with its line number.
pub fn convert_file(path: &Path, policy: MalformedPolicy) -> Result<Vec<Edge>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .has_headers(false)
        .from_path(path)?;

    let mut edges = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let edge = TskRow::from_record(&record)
            .and_then(|row| return transform_row(&row, line, policy))
            .map_err(|e| return e.in_row(line))?;
        edges.push(edge);
    }

    tracing::debug!(rows = edges.len(), "converted TSK rows");
    return Ok(edges);
}
