//! Strong's-number extraction: find verses tagged with the requested numbers
//! in a SQLite verse store and tabulate them with lexicon data as CSV.

use std::collections::HashMap;
use std::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use rusqlite::types::ValueRef;
use serde::Deserialize;

use crate::error::Error;

/// Header row of the generated CSV. Written unquoted, unlike data rows.
pub const CSV_HEADER: &str = "Idx,Book,Ref.,KJB Verse,KJB Word,Original,Transliteration,Definition";

/// Table of the verse store holding `(id, reference, text)` rows.
const VERSE_TABLE: &str = "bible";

/// A Strong's identifier: `H` (Hebrew) or `G` (Greek) followed by digits.
static STRONGS_NUMBER: LazyLock<Regex> = LazyLock::new(|| return Regex::new(r"^[HG]\d+$").expect("valid regex"));

/// Morphology tags like `[(H8799)]`, footnotes, markup and line breaks.
static VERSE_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"\[\([GH]\d+\)\]|<fn>\d+</fn>|<.+?>|[\r\n]").expect("valid regex");
});

/// A word group: everything up to and including the next `]`.
static WORD_GROUP: LazyLock<Regex> = LazyLock::new(|| return Regex::new(r"[^\]]+\]").expect("valid regex"));

/// Splits a word group into its leading separator and the bolded remainder.
static GROUP_BODY: LazyLock<Regex> = LazyLock::new(|| return Regex::new(r"(\W?\s?)(.+)").expect("valid regex"));

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| return Regex::new(r"[^\w\s]").expect("valid regex"));

static STRONGS_TAG: LazyLock<Regex> = LazyLock::new(|| return Regex::new(r"\[[GH]\d+\]").expect("valid regex"));

/// A validated Strong's number such as `H25`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrongsNumber(
    /// The bare identifier without brackets.
    String,
);

impl StrongsNumber {
    /// Validate one identifier, tolerating surrounding whitespace and brackets.
    pub fn parse(raw: &str) -> Option<Self> {
        let clean = raw.trim().trim_matches(|c: char| return c == '[' || c == ']');
        if STRONGS_NUMBER.is_match(clean) {
            return Some(Self(clean.to_string()));
        }
        return None;
    }

    /// The identifier as a lexicon key, e.g. `H25`.
    pub fn as_str(&self) -> &str {
        return &self.0;
    }

    /// The identifier as it is tagged in verse text, e.g. `[H25]`.
    pub fn tag(&self) -> String {
        return format!("[{}]", self.as_str());
    }
}

impl fmt::Display for StrongsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

/// Collect Strong's numbers from positional arguments, each of which may be a
/// comma-separated list. Invalid entries are warned about and skipped.
///
/// # Errors
///
/// Returns `Error::NoStrongsNumbers` if nothing valid remains.
pub fn parse_numbers(args: &[String]) -> Result<Vec<StrongsNumber>, Error> {
    let mut numbers = Vec::new();
    for raw in args.iter().flat_map(|arg| return arg.split(',')) {
        if raw.trim().is_empty() {
            continue;
        }
        match StrongsNumber::parse(raw) {
            Some(number) => numbers.push(number),
            None => tracing::warn!(number = raw.trim(), "invalid Strong's number format"),
        }
    }

    if numbers.is_empty() {
        return Err(Error::NoStrongsNumbers);
    }
    return Ok(numbers);
}

/// Lexicon data for one Strong's number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LexiconEntry {
    /// Gloss or short definition.
    pub definition: String,
    /// Word in the original script.
    pub original: String,
    /// Latin-script transliteration.
    pub transliteration: String,
}

/// Strong's number to lexicon entry, loaded from a JSON object file.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    /// Entries keyed by bare identifier (`H25`).
    entries: HashMap<String, LexiconEntry>,
}

impl Lexicon {
    /// Load the lexicon from disk.
    ///
    /// # Errors
    ///
    /// Returns `Error::DataSourceNotFound` if the file is missing,
    /// `Error::Io` for other read failures, or `Error::Json` if it is not a valid lexicon.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::DataSourceNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Ok(serde_json::from_str(&content)?);
    }

    /// Look up one identifier.
    pub fn get(&self, number: &str) -> Option<&LexiconEntry> {
        return self.entries.get(number);
    }
}

/// One verse from the `bible` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRow {
    /// Reference string such as `Gen 1:1`.
    pub reference: String,
    /// Verse text with `word[H1234]` annotations.
    pub text: String,
}

/// One CSV data row, before its index is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedVerse {
    /// First whitespace-delimited token of the reference.
    pub book: String,
    /// Lexicon definitions, deduplicated.
    pub definitions: Vec<String>,
    /// `"<number> <original>"` pairs, deduplicated.
    pub originals: Vec<String>,
    /// Full reference string.
    pub reference: String,
    /// Transliterations, deduplicated.
    pub transliterations: Vec<String>,
    /// Cleaned verse text with matched word groups in `**bold**`.
    pub verse: String,
    /// English words carrying a requested number, in verse order.
    pub words: Vec<String>,
}

impl MatchedVerse {
    /// Fields in CSV column order, with `idx` prepended.
    fn into_record(self, idx: usize) -> [String; 8] {
        return [
            idx.to_string(),
            self.book,
            self.reference,
            self.verse,
            self.words.join(", "),
            self.originals.join(", "),
            self.transliterations.join(", "),
            self.definitions.join(", "),
        ];
    }

    /// Record the lexicon data of one matched number, skipping values already present.
    fn add_lexicon_data(&mut self, number: &str, entry: &LexiconEntry) {
        push_unique(&mut self.originals, format!("{number} {}", entry.original));
        push_unique(&mut self.transliterations, entry.transliteration.clone());
        push_unique(&mut self.definitions, entry.definition.clone());
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Scan one verse for any of the requested numbers.
/// Returns `None` when the verse carries none of them.
pub fn extract_verse(row: &VerseRow, tags: &[String], lexicon: &Lexicon) -> Option<MatchedVerse> {
    if !tags.iter().any(|tag| return row.text.contains(tag.as_str())) {
        return None;
    }

    let cleaned = VERSE_NOISE.replace_all(&row.text, "");
    let mut matched = MatchedVerse {
        book: row.reference.split_whitespace().next().unwrap_or_default().to_string(),
        reference: row.reference.clone(),
        ..MatchedVerse::default()
    };

    let mut verse = String::new();
    for group in WORD_GROUP.find_iter(&cleaned).map(|m| return m.as_str()) {
        if tags.iter().any(|tag| return group.contains(tag.as_str())) {
            verse.push_str(&mark_matched_group(group, lexicon, &mut matched));
        } else {
            verse.push_str(&STRONGS_TAG.replace_all(group, ""));
        }
    }
    matched.verse = verse;

    return Some(matched);
}

/// Bold a matching word group and collect its word and lexicon data.
fn mark_matched_group(group: &str, lexicon: &Lexicon, matched: &mut MatchedVerse) -> String {
    let mut parts = group.split('[');
    let (Some(words), Some(tagged)) = (parts.next(), parts.next()) else {
        return group.to_string();
    };
    let number = tagged.trim_end_matches(']');

    let word = NON_WORD.replace_all(words, "");
    let word = word.trim();
    if !word.is_empty() {
        matched.words.push(word.to_string());
    }

    match lexicon.get(number) {
        Some(entry) => matched.add_lexicon_data(number, entry),
        None => tracing::warn!(number, reference = %matched.reference, "Strong's number not found in lexicon"),
    }

    return GROUP_BODY.replace_all(group, "${1}**${2}**").into_owned();
}

/// Read a SQLite column as text, whatever its storage class.
fn column_text(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<String> {
    return Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    });
}

/// Read every verse from the `bible` table of a verse store.
/// Tables with fewer than three columns yield no verses.
///
/// # Errors
///
/// Returns `Error::DataSourceNotFound` if the file is missing,
/// `Error::MissingTable` if it has no `bible` table,
/// or `Error::Database` if it is not a readable verse store.
pub fn read_verses(path: &Path) -> Result<Vec<VerseRow>, Error> {
    if !path.is_file() {
        return Err(Error::DataSourceNotFound { path: path.to_path_buf() });
    }
    let conn = rusqlite::Connection::open_with_flags(path, rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let tables: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [VERSE_TABLE],
        |row| return row.get(0),
    )?;
    if tables == 0 {
        return Err(Error::MissingTable { path: path.to_path_buf(), table: VERSE_TABLE });
    }

    let mut stmt = conn.prepare(&format!("SELECT * FROM {VERSE_TABLE}"))?;
    if stmt.column_count() < 3 {
        tracing::warn!(path = %path.display(), "bible table has fewer than 3 columns");
        return Ok(Vec::new());
    }

    let verses = stmt
        .query_map([], |row| {
            return Ok(VerseRow { reference: column_text(row, 1)?, text: column_text(row, 2)? });
        })?
        .collect::<Result<Vec<_>, _>>()?;
    return Ok(verses);
}

/// Find all verses matching the requested numbers.
pub fn extract_all(verses: &[VerseRow], numbers: &[StrongsNumber], lexicon: &Lexicon) -> Vec<MatchedVerse> {
    let tags: Vec<String> = numbers.iter().map(StrongsNumber::tag).collect();
    return verses
        .iter()
        .filter_map(|row| return extract_verse(row, &tags, lexicon))
        .collect();
}

/// Output path: `<dir>/<first number>.csv`, or the working directory when `dir` is `None`.
pub fn output_path(dir: Option<&Path>, first: &StrongsNumber) -> PathBuf {
    let file_name = format!("{first}.csv");
    return dir.map_or_else(|| return PathBuf::from(&file_name), |d| return d.join(&file_name));
}

/// Write matched verses as CSV: unquoted header, then fully quoted rows numbered from 1.
///
/// # Errors
///
/// Returns `Error::Io` or `Error::Csv` if the file cannot be written.
pub fn write_csv(path: &Path, verses: Vec<MatchedVerse>) -> Result<(), Error> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    writeln!(file, "{CSV_HEADER}")?;

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);
    for (offset, verse) in verses.into_iter().enumerate() {
        writer.write_record(verse.into_record(offset.saturating_add(1)))?;
    }
    writer.flush()?;
    return Ok(());
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test code")]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        return serde_json::from_str(
            r#"{
                "H430": {"original": "אֱלֹהִים", "transliteration": "ʼĕlôhîym", "definition": "God"},
                "H7225": {"original": "רֵאשִׁית", "transliteration": "rêʼshîyth", "definition": "beginning"}
            }"#,
        )
        .unwrap();
    }

    fn genesis_1_1() -> VerseRow {
        return VerseRow {
            reference: "Gen 1:1".to_string(),
            text: "In the beginning[H7225] God[H430] created[H1254][(H8804)] the heaven[H8064] and[H853] the earth[H776].<fn>1</fn>"
                .to_string(),
        };
    }

    fn tags(raw: &[&str]) -> Vec<String> {
        return raw.iter().map(|n| StrongsNumber::parse(n).unwrap().tag()).collect();
    }

    #[test]
    fn numbers_from_lists_and_separate_args() {
        let args = vec!["H356,G217".to_string(), "[G875]".to_string(), " H25 ".to_string()];
        let numbers = parse_numbers(&args).unwrap();
        let names: Vec<&str> = numbers.iter().map(StrongsNumber::as_str).collect();
        assert_eq!(names, vec!["H356", "G217", "G875", "H25"]);
    }

    #[test]
    fn invalid_numbers_are_skipped() {
        let args = vec!["h25,X1,G12a,G7".to_string()];
        let numbers = parse_numbers(&args).unwrap();
        assert_eq!(numbers, vec![StrongsNumber("G7".to_string())]);
    }

    #[test]
    fn no_valid_numbers_is_an_error() {
        let args = vec!["h25".to_string(), ",".to_string()];
        assert!(matches!(parse_numbers(&args), Err(Error::NoStrongsNumbers)));
    }

    #[test]
    fn verse_without_requested_number_is_skipped() {
        assert!(extract_verse(&genesis_1_1(), &tags(&["G25"]), &lexicon()).is_none());
    }

    #[test]
    fn bracketed_number_does_not_match_longer_number() {
        assert!(extract_verse(&genesis_1_1(), &tags(&["H43"]), &lexicon()).is_none());
    }

    #[test]
    fn matched_verse_is_bolded_and_cleaned() {
        let matched = extract_verse(&genesis_1_1(), &tags(&["H430"]), &lexicon()).unwrap();
        assert_eq!(matched.book, "Gen");
        assert_eq!(matched.reference, "Gen 1:1");
        assert_eq!(matched.verse, "In the beginning **God[H430]** created the heaven and the earth");
        assert_eq!(matched.words, vec!["God"]);
        assert_eq!(matched.originals, vec!["H430 אֱלֹהִים"]);
        assert_eq!(matched.transliterations, vec!["ʼĕlôhîym"]);
        assert_eq!(matched.definitions, vec!["God"]);
    }

    #[test]
    fn several_numbers_collect_in_verse_order() {
        let matched = extract_verse(&genesis_1_1(), &tags(&["H430", "H7225"]), &lexicon()).unwrap();
        assert_eq!(matched.words, vec!["In the beginning", "God"]);
        assert_eq!(matched.definitions, vec!["beginning", "God"]);
        assert!(matched.verse.starts_with("**In the beginning[H7225]**"));
    }

    #[test]
    fn lexicon_miss_keeps_word_but_no_lexicon_data() {
        let matched = extract_verse(&genesis_1_1(), &tags(&["H776"]), &lexicon()).unwrap();
        assert_eq!(matched.words, vec!["the earth"]);
        assert!(matched.originals.is_empty());
        assert!(matched.definitions.is_empty());
    }

    #[test]
    fn repeated_number_deduplicates_lexicon_fields() {
        let row = VerseRow {
            reference: "Ps 82:1".to_string(),
            text: "God[H430] standeth[H5324] among the gods[H430].".to_string(),
        };
        let matched = extract_verse(&row, &tags(&["H430"]), &lexicon()).unwrap();
        assert_eq!(matched.words, vec!["God", "among the gods"]);
        assert_eq!(matched.originals.len(), 1);
        assert_eq!(matched.verse, "**God[H430]** standeth **among the gods[H430]**");
    }

    #[test]
    fn markup_and_line_breaks_are_removed() {
        let row = VerseRow {
            reference: "Gen 1:2".to_string(),
            text: "And <i>the</i> earth[H776]\r\n was[H1961]".to_string(),
        };
        let matched = extract_verse(&row, &tags(&["H776"]), &lexicon()).unwrap();
        assert_eq!(matched.verse, "**And the earth[H776]** was");
        assert_eq!(matched.words, vec!["And the earth"]);
    }

    #[test]
    fn missing_lexicon_is_a_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Lexicon::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::DataSourceNotFound { .. }));
        assert!(!err.is_usage());
    }

    #[test]
    fn store_without_verse_table_is_a_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bib");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE notes (id INTEGER, body TEXT);").unwrap();
        drop(conn);

        let err = read_verses(&path).unwrap_err();
        assert!(matches!(err, Error::MissingTable { table: "bible", .. }));
        assert!(!err.is_usage());
    }

    #[test]
    fn narrow_verse_table_yields_no_verses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narrow.bib");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE bible (id INTEGER, ref TEXT);
             INSERT INTO bible VALUES (1, 'Gen 1:1');",
        )
        .unwrap();
        drop(conn);

        assert_eq!(read_verses(&path).unwrap(), Vec::new());
    }

    #[test]
    fn output_path_uses_first_number() {
        let numbers = parse_numbers(&["H25,G7".to_string()]).unwrap();
        assert_eq!(output_path(None, &numbers[0]), PathBuf::from("H25.csv"));
        assert_eq!(output_path(Some(Path::new("out")), &numbers[0]), PathBuf::from("out/H25.csv"));
    }

    #[test]
    fn csv_quotes_rows_but_not_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("H430.csv");
        let verse = MatchedVerse {
            book: "Gen".to_string(),
            reference: "Gen 1:1".to_string(),
            verse: "said \"Let\"".to_string(),
            words: vec!["God".to_string(), "Lord".to_string()],
            ..MatchedVerse::default()
        };
        write_csv(&path, vec![verse]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(r#""1","Gen","Gen 1:1","said ""Let""","God, Lord","","","""#)
        );
    }
}
