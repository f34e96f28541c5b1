//! Core domain types: scripture loci, references, and output edges.
use std::fmt;

use serde::Serialize;

use crate::canon::Book;
use crate::error::Error;

/// A whole chapter, e.g. `Exod.20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterLocus {
    /// Book containing the chapter.
    pub book: Book,
    /// One-based chapter number.
    pub chapter: u32,
}

/// A single verse, e.g. `Gen.1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseLocus {
    /// Book containing the verse.
    pub book: Book,
    /// One-based chapter number.
    pub chapter: u32,
    /// One-based verse number.
    pub verse: u32,
}

/// Either locus shape, for callers that only know the shape at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locus {
    /// Chapter-granular locus.
    Chapter(ChapterLocus),
    /// Verse-granular locus.
    Verse(VerseLocus),
}

/// A parsed scripture reference. Ranges hold two loci of the same shape,
/// so a chapter-to-verse range cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// `Book.C-Book.C`
    RangeChapter {
        /// Last chapter of the range, inclusive.
        end: ChapterLocus,
        /// First chapter of the range.
        start: ChapterLocus,
    },
    /// `Book.C.V-Book.C.V`
    RangeVerse {
        /// Last verse of the range, inclusive.
        end: VerseLocus,
        /// First verse of the range.
        start: VerseLocus,
    },
    /// `Book.C`
    SingleChapter(ChapterLocus),
    /// `Book.C.V`
    SingleVerse(VerseLocus),
}

impl ChapterLocus {
    /// Build a chapter locus.
    pub const fn new(book: Book, chapter: u32) -> Self {
        return Self { book, chapter };
    }
}

impl VerseLocus {
    /// Build a verse locus.
    pub const fn new(book: Book, chapter: u32, verse: u32) -> Self {
        return Self { book, chapter, verse };
    }
}

impl Reference {
    /// Build a range from two loci, failing when their shapes differ.
    ///
    /// # Errors
    ///
    /// Returns `Error::MismatchedRange` when one side is a chapter and the other a verse.
    pub fn range(start: Locus, end: Locus) -> Result<Self, Error> {
        return match (start, end) {
            (Locus::Chapter(start), Locus::Chapter(end)) => Ok(Self::RangeChapter { end, start }),
            (Locus::Verse(start), Locus::Verse(end)) => Ok(Self::RangeVerse { end, start }),
            (start, end) => Err(Error::MismatchedRange {
                end: end.to_string(),
                start: start.to_string(),
            }),
        };
    }

    /// Wrap one locus as a single reference.
    pub const fn single(locus: Locus) -> Self {
        return match locus {
            Locus::Chapter(chapter) => Self::SingleChapter(chapter),
            Locus::Verse(verse) => Self::SingleVerse(verse),
        };
    }
}

impl fmt::Display for ChapterLocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}.{}", self.book, self.chapter);
    }
}

impl fmt::Display for VerseLocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}.{}.{}", self.book, self.chapter, self.verse);
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::Chapter(locus) => locus.fmt(f),
            Self::Verse(locus) => locus.fmt(f),
        };
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::RangeChapter { start, end } => write!(f, "{start}-{end}"),
            Self::RangeVerse { start, end } => write!(f, "{start}-{end}"),
            Self::SingleChapter(locus) => locus.fmt(f),
            Self::SingleVerse(locus) => locus.fmt(f),
        };
    }
}

/// Edge direction tag. Every graph this tool emits is directed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Source points at targets.
    Directed,
}

/// One line of JSONL output: a source verse and the references it points to.
#[allow(clippy::arbitrary_source_item_ordering, reason = "field order is the JSON key order")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Always `"directed"`.
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    /// OSIS id of the source verse.
    pub source: String,
    /// Annotation attached to the source verse (TSK only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    /// Formatted target references, in input order, duplicates kept.
    pub targets: Vec<String>,
}

impl Edge {
    /// A directed edge with no source text.
    pub const fn directed(source: String, targets: Vec<String>) -> Self {
        return Self { kind: EdgeKind::Directed, source, source_text: None, targets };
    }
}
