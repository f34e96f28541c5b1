//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Progress and warnings go to stderr through `tracing`; stdout carries only
//! the one-line summary each command prints on success.
//!
//! - `error`: fatal input or data-source problems
//! - `warn`: skipped tokens, invalid Strong's numbers, lexicon misses
//! - `info`: files read and written, record counts
//! - `debug`: per-row progress
//! - `trace`: everything else

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Configuration for logging behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is unset.
    pub level: Level,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        return Self { level: Level::INFO, with_ansi: true };
    }
}

impl LogConfig {
    /// Map `-v`/`-q` counts to a level.
    ///
    /// - `-q`: error
    /// - none: info
    /// - `-v`: debug
    /// - `-vv` and beyond: trace
    #[must_use]
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            Level::ERROR
        } else {
            match verbose {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        return Self { level, ..Self::default() };
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        return self;
    }
}

/// Install the global subscriber, writing to stderr. Call once at startup.
pub fn init_logging(config: &LogConfig) {
    init_logging_with_writer(config, std::io::stderr);
}

/// Install the global subscriber with a custom writer.
/// A second call is a no-op rather than a panic.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let _already_set = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(config.level))
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
fn build_env_filter(level: Level) -> EnvFilter {
    return EnvFilter::try_from_default_env().unwrap_or_else(|_err| {
        // Dependencies stay at warn so only our own progress shows.
        let level = level.as_str().to_lowercase();
        return EnvFilter::new(format!("warn,scriptref={level}"));
    });
}
