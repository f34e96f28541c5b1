//! The 66-book Protestant canon: positional order, OSIS ids, and TSK abbreviations.

use std::fmt;

/// A canonical book. Variants are declared in canon order.
#[allow(clippy::arbitrary_source_item_ordering, reason = "variants follow canon order")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Book {
    /// Genesis
    Genesis,
    /// Exodus
    Exodus,
    /// Leviticus
    Leviticus,
    /// Numbers
    Numbers,
    /// Deuteronomy
    Deuteronomy,
    /// Joshua
    Joshua,
    /// Judges
    Judges,
    /// Ruth
    Ruth,
    /// 1 Samuel
    FirstSamuel,
    /// 2 Samuel
    SecondSamuel,
    /// 1 Kings
    FirstKings,
    /// 2 Kings
    SecondKings,
    /// 1 Chronicles
    FirstChronicles,
    /// 2 Chronicles
    SecondChronicles,
    /// Ezra
    Ezra,
    /// Nehemiah
    Nehemiah,
    /// Esther
    Esther,
    /// Job
    Job,
    /// Psalms
    Psalms,
    /// Proverbs
    Proverbs,
    /// Ecclesiastes
    Ecclesiastes,
    /// Song of Songs (Song of Solomon)
    SongOfSongs,
    /// Isaiah
    Isaiah,
    /// Jeremiah
    Jeremiah,
    /// Lamentations
    Lamentations,
    /// Ezekiel
    Ezekiel,
    /// Daniel
    Daniel,
    /// Hosea
    Hosea,
    /// Joel
    Joel,
    /// Amos
    Amos,
    /// Obadiah
    Obadiah,
    /// Jonah
    Jonah,
    /// Micah
    Micah,
    /// Nahum
    Nahum,
    /// Habakkuk
    Habakkuk,
    /// Zephaniah
    Zephaniah,
    /// Haggai
    Haggai,
    /// Zechariah
    Zechariah,
    /// Malachi
    Malachi,
    /// Matthew
    Matthew,
    /// Mark
    Mark,
    /// Luke
    Luke,
    /// John
    John,
    /// Acts
    Acts,
    /// Romans
    Romans,
    /// 1 Corinthians
    FirstCorinthians,
    /// 2 Corinthians
    SecondCorinthians,
    /// Galatians
    Galatians,
    /// Ephesians
    Ephesians,
    /// Philippians
    Philippians,
    /// Colossians
    Colossians,
    /// 1 Thessalonians
    FirstThessalonians,
    /// 2 Thessalonians
    SecondThessalonians,
    /// 1 Timothy
    FirstTimothy,
    /// 2 Timothy
    SecondTimothy,
    /// Titus
    Titus,
    /// Philemon
    Philemon,
    /// Hebrews
    Hebrews,
    /// James
    James,
    /// 1 Peter
    FirstPeter,
    /// 2 Peter
    SecondPeter,
    /// 1 John
    FirstJohn,
    /// 2 John
    SecondJohn,
    /// 3 John
    ThirdJohn,
    /// Jude
    Jude,
    /// Revelation of John
    Revelation,
}

/// Every book, in canon order. Position `i` holds canon index `i + 1`.
pub const CANON: [Book; 66] = [
    Book::Genesis,
    Book::Exodus,
    Book::Leviticus,
    Book::Numbers,
    Book::Deuteronomy,
    Book::Joshua,
    Book::Judges,
    Book::Ruth,
    Book::FirstSamuel,
    Book::SecondSamuel,
    Book::FirstKings,
    Book::SecondKings,
    Book::FirstChronicles,
    Book::SecondChronicles,
    Book::Ezra,
    Book::Nehemiah,
    Book::Esther,
    Book::Job,
    Book::Psalms,
    Book::Proverbs,
    Book::Ecclesiastes,
    Book::SongOfSongs,
    Book::Isaiah,
    Book::Jeremiah,
    Book::Lamentations,
    Book::Ezekiel,
    Book::Daniel,
    Book::Hosea,
    Book::Joel,
    Book::Amos,
    Book::Obadiah,
    Book::Jonah,
    Book::Micah,
    Book::Nahum,
    Book::Habakkuk,
    Book::Zephaniah,
    Book::Haggai,
    Book::Zechariah,
    Book::Malachi,
    Book::Matthew,
    Book::Mark,
    Book::Luke,
    Book::John,
    Book::Acts,
    Book::Romans,
    Book::FirstCorinthians,
    Book::SecondCorinthians,
    Book::Galatians,
    Book::Ephesians,
    Book::Philippians,
    Book::Colossians,
    Book::FirstThessalonians,
    Book::SecondThessalonians,
    Book::FirstTimothy,
    Book::SecondTimothy,
    Book::Titus,
    Book::Philemon,
    Book::Hebrews,
    Book::James,
    Book::FirstPeter,
    Book::SecondPeter,
    Book::FirstJohn,
    Book::SecondJohn,
    Book::ThirdJohn,
    Book::Jude,
    Book::Revelation,
];

impl Book {
    /// Look up a book by its 1-based position in the canon.
    /// Returns `None` for 0 and anything past 66.
    pub fn from_canon_index(index: u32) -> Option<Self> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        return CANON.get(position).copied();
    }

    /// Resolve a Treasury of Scripture Knowledge abbreviation (`"ge"`, `"1co"`).
    /// Matching is exact; abbreviations are always lowercase in the source data.
    pub fn from_tsk_abbreviation(abbreviation: &str) -> Option<Self> {
        return CANON
            .iter()
            .copied()
            .find(|book| return book.tsk_abbreviation() == abbreviation);
    }

    /// The OSIS identifier used in every emitted reference.
    pub const fn osis_id(self) -> &'static str {
        return match self {
            Self::Genesis => "Gen",
            Self::Exodus => "Exod",
            Self::Leviticus => "Lev",
            Self::Numbers => "Num",
            Self::Deuteronomy => "Deut",
            Self::Joshua => "Josh",
            Self::Judges => "Judg",
            Self::Ruth => "Ruth",
            Self::FirstSamuel => "1Sam",
            Self::SecondSamuel => "2Sam",
            Self::FirstKings => "1Kgs",
            Self::SecondKings => "2Kgs",
            Self::FirstChronicles => "1Chr",
            Self::SecondChronicles => "2Chr",
            Self::Ezra => "Ezra",
            Self::Nehemiah => "Neh",
            Self::Esther => "Esth",
            Self::Job => "Job",
            Self::Psalms => "Ps",
            Self::Proverbs => "Prov",
            Self::Ecclesiastes => "Eccl",
            Self::SongOfSongs => "Song",
            Self::Isaiah => "Isa",
            Self::Jeremiah => "Jer",
            Self::Lamentations => "Lam",
            Self::Ezekiel => "Ezek",
            Self::Daniel => "Dan",
            Self::Hosea => "Hos",
            Self::Joel => "Joel",
            Self::Amos => "Amos",
            Self::Obadiah => "Obad",
            Self::Jonah => "Jonah",
            Self::Micah => "Mic",
            Self::Nahum => "Nah",
            Self::Habakkuk => "Hab",
            Self::Zephaniah => "Zeph",
            Self::Haggai => "Hag",
            Self::Zechariah => "Zech",
            Self::Malachi => "Mal",
            Self::Matthew => "Matt",
            Self::Mark => "Mark",
            Self::Luke => "Luke",
            Self::John => "John",
            Self::Acts => "Acts",
            Self::Romans => "Rom",
            Self::FirstCorinthians => "1Cor",
            Self::SecondCorinthians => "2Cor",
            Self::Galatians => "Gal",
            Self::Ephesians => "Eph",
            Self::Philippians => "Phil",
            Self::Colossians => "Col",
            Self::FirstThessalonians => "1Thess",
            Self::SecondThessalonians => "2Thess",
            Self::FirstTimothy => "1Tim",
            Self::SecondTimothy => "2Tim",
            Self::Titus => "Titus",
            Self::Philemon => "Phlm",
            Self::Hebrews => "Heb",
            Self::James => "Jas",
            Self::FirstPeter => "1Pet",
            Self::SecondPeter => "2Pet",
            Self::FirstJohn => "1John",
            Self::SecondJohn => "2John",
            Self::ThirdJohn => "3John",
            Self::Jude => "Jude",
            Self::Revelation => "Rev",
        };
    }

    /// The abbreviation the TSK dataset uses for this book.
    pub const fn tsk_abbreviation(self) -> &'static str {
        return match self {
            Self::Genesis => "ge",
            Self::Exodus => "ex",
            Self::Leviticus => "le",
            Self::Numbers => "nu",
            Self::Deuteronomy => "de",
            Self::Joshua => "jos",
            Self::Judges => "jud",
            Self::Ruth => "ru",
            Self::FirstSamuel => "1sa",
            Self::SecondSamuel => "2sa",
            Self::FirstKings => "1ki",
            Self::SecondKings => "2ki",
            Self::FirstChronicles => "1ch",
            Self::SecondChronicles => "2ch",
            Self::Ezra => "ezr",
            Self::Nehemiah => "ne",
            Self::Esther => "es",
            Self::Job => "job",
            Self::Psalms => "ps",
            Self::Proverbs => "pr",
            Self::Ecclesiastes => "ec",
            Self::SongOfSongs => "so",
            Self::Isaiah => "isa",
            Self::Jeremiah => "jer",
            Self::Lamentations => "la",
            Self::Ezekiel => "eze",
            Self::Daniel => "da",
            Self::Hosea => "ho",
            Self::Joel => "joe",
            Self::Amos => "am",
            Self::Obadiah => "ob",
            Self::Jonah => "jon",
            Self::Micah => "mic",
            Self::Nahum => "na",
            Self::Habakkuk => "hab",
            Self::Zephaniah => "zep",
            Self::Haggai => "hag",
            Self::Zechariah => "zec",
            Self::Malachi => "mal",
            Self::Matthew => "mt",
            Self::Mark => "mr",
            Self::Luke => "lu",
            Self::John => "joh",
            Self::Acts => "ac",
            Self::Romans => "ro",
            Self::FirstCorinthians => "1co",
            Self::SecondCorinthians => "2co",
            Self::Galatians => "ga",
            Self::Ephesians => "eph",
            Self::Philippians => "php",
            Self::Colossians => "col",
            Self::FirstThessalonians => "1th",
            Self::SecondThessalonians => "2th",
            Self::FirstTimothy => "1ti",
            Self::SecondTimothy => "2ti",
            Self::Titus => "tit",
            Self::Philemon => "phm",
            Self::Hebrews => "heb",
            Self::James => "jas",
            Self::FirstPeter => "1pe",
            Self::SecondPeter => "2pe",
            Self::FirstJohn => "1jo",
            Self::SecondJohn => "2jo",
            Self::ThirdJohn => "3jo",
            Self::Jude => "jude",
            Self::Revelation => "re",
        };
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(self.osis_id());
    }
}
