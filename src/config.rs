use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".scriptref.toml";

/// What to do when a reference token cannot be parsed or resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop the whole run at the first malformed token.
    #[default]
    Abort,
    /// Log the token, drop it, and keep converting the rest of the row.
    Skip,
}

/// Project configuration loaded from `.scriptref.toml`.
/// Every key is optional; CLI flags override what is set here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Malformed-reference handling for the TSK converter.
    pub on_malformed: MalformedPolicy,
    /// Verse store consulted by the Strong's extractor.
    pub strongs_database: PathBuf,
    /// Lexicon consulted by the Strong's extractor.
    pub strongs_lexicon: PathBuf,
    /// Output file written by the TSK converter.
    pub tsk_output: PathBuf,
    /// Output file written by the simple cross-reference converter.
    pub xref_output: PathBuf,
}

/// Raw TOML structure for `.scriptref.toml`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptrefTomlConfig {
    #[serde(default)]
    on_malformed: Option<MalformedPolicy>,
    #[serde(default)]
    strongs: StrongsSection,
    #[serde(default)]
    tsk: OutputSection,
    #[serde(default)]
    xref: OutputSection,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    output: Option<PathBuf>,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StrongsSection {
    database: Option<PathBuf>,
    lexicon: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            on_malformed: MalformedPolicy::Abort,
            strongs_database: PathBuf::from("av1769s.bib"),
            strongs_lexicon: PathBuf::from("strongs.json"),
            tsk_output: PathBuf::from("tsk_xrefs.jsonl"),
            xref_output: PathBuf::from("out.jsonl"),
        };
    }
}

impl Config {
    /// Load config from `.scriptref.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist. Returns an error if the file
    /// exists but is malformed; a config the user wrote is never silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML content, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: ScriptrefTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        return Ok(Self {
            on_malformed: raw.on_malformed.unwrap_or(defaults.on_malformed),
            strongs_database: raw.strongs.database.unwrap_or(defaults.strongs_database),
            strongs_lexicon: raw.strongs.lexicon.unwrap_or(defaults.strongs_lexicon),
            tsk_output: raw.tsk.output.unwrap_or(defaults.tsk_output),
            xref_output: raw.xref.output.unwrap_or(defaults.xref_output),
        });
    }
}
