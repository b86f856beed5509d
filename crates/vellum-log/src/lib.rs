//! A minimal, zero-dependency logging crate for the Vellum compiler crates.
//!
//! Every record carries the module path it was emitted from, is colored by
//! level and goes to standard error so it never mixes with compiler output.
//! The minimum level is global and can be changed at any time.
//!
//! # Example
//!
//! ```
//! use vellum_log::{debug, info, trace, Level};
//!
//! vellum_log::set_level(Level::Debug);
//!
//! let decls = 12;
//! info!("bound {} declarations", decls);
//! debug!("arena chunks: {:?}", [8192, 16384]);
//! trace!("not shown at debug level");
//! ```
//!
//! # Configuration
//!
//! [`init_from_env`] reads the `VELLUM_LOG` environment variable
//! (`error`, `warn`, `info`, `debug` or `trace`, case-insensitive) and
//! leaves the level untouched when the variable is unset or malformed.

use std::fmt::{self, Arguments};
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable consulted by [`init_from_env`].
pub const ENV_VAR: &str = "VELLUM_LOG";

/// Log levels, ordered from most severe (`Error`) to most verbose (`Trace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Unrecoverable failures.
    Error = 0,
    /// Suspicious situations, including recorded diagnostics.
    Warn = 1,
    /// Coarse progress messages.
    Info = 2,
    /// Allocation and lifecycle details.
    Debug = 3,
    /// Per-node events.
    Trace = 4,
}

impl Level {
    const ALL: [Level; 5] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Returns the upper-case name of this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Level {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Level`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    input: String,
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid log level: {}", self.input)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses a level name, ignoring case.
    ///
    /// ```
    /// use vellum_log::Level;
    ///
    /// assert_eq!("warn".parse::<Level>(), Ok(Level::Warn));
    /// assert!("loud".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError {
                input: s.to_string(),
            })
    }
}

/// The global logger. Only the level is mutable, stored atomically.
pub struct Logger {
    level: AtomicU8,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
        }
    }

    /// Sets the minimum level; records below it are dropped.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current minimum level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Returns true if a record at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, creating it at `Level::Warn` on first use.
///
/// Compiler libraries are quiet by default; binaries and tests raise the
/// level explicitly or through [`init_from_env`].
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn))
}

/// Sets the minimum level of the global logger.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Sets the minimum level from a level name.
///
/// ```
/// vellum_log::set_level_from_str("debug").unwrap();
/// assert_eq!(vellum_log::get_logger().level(), vellum_log::Level::Debug);
/// ```
pub fn set_level_from_str(s: &str) -> Result<(), ParseLevelError> {
    set_level(s.parse()?);
    Ok(())
}

/// Applies the level named by `VELLUM_LOG`, if any.
///
/// Returns the level that was applied.
pub fn init_from_env() -> Option<Level> {
    let raw = std::env::var(ENV_VAR).ok()?;
    let level = raw.parse().ok()?;
    set_level(level);
    Some(level)
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments) {
    const RESET: &str = "\x1b[0m";

    if !get_logger().enabled(level) {
        return;
    }

    let color = level.color_code();
    eprintln!("{color}[{level}]{RESET} {target}: {args}");
}

/// Logs a record at an explicit level, tagged with the caller's module path.
///
/// ```
/// use vellum_log::{log, Level};
///
/// log!(level: Level::Info, "{} nodes released", 3);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        {
            if $crate::get_logger().enabled($level) {
                $crate::__log_with_target(
                    $level,
                    module_path!(),
                    format_args!($($arg)*)
                );
            }
        }
    };
}

/// Logs at `Level::Error`.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs at `Level::Warn`.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs at `Level::Info`.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs at `Level::Debug`.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs at `Level::Trace`.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("error".parse(), Ok(Level::Error));
        assert_eq!("WARN".parse(), Ok(Level::Warn));
        assert_eq!(" Info ".parse(), Ok(Level::Info));
        assert_eq!("DEBUG".parse(), Ok(Level::Debug));
        assert_eq!("trace".parse(), Ok(Level::Trace));

        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err.to_string(), "invalid log level: verbose");
    }

    #[test]
    fn test_level_display_round_trips_through_u8() {
        for level in Level::ALL {
            assert_eq!(Level::from_u8(level as u8), level);
            assert_eq!(level.to_string(), level.as_str());
        }
    }

    #[test]
    fn test_logger_level_filtering() {
        let logger = Logger::new(Level::Info);

        assert!(logger.enabled(Level::Error));
        assert!(logger.enabled(Level::Info));
        assert!(!logger.enabled(Level::Debug));

        logger.set_level(Level::Trace);
        assert!(logger.enabled(Level::Trace));
        assert_eq!(logger.level(), Level::Trace);
    }

    #[test]
    fn test_global_logger_singleton() {
        let logger1 = get_logger();
        let logger2 = get_logger();
        assert!(std::ptr::eq(logger1, logger2));

        set_level_from_str("error").unwrap();
        assert_eq!(logger2.level(), Level::Error);
        assert!(set_level_from_str("loud").is_err());
        assert_eq!(logger2.level(), Level::Error);
    }

    #[test]
    fn test_macros_compile_at_every_level() {
        error!("error {}", 1);
        warn!("warn {}", 2);
        info!("info {}", 3);
        debug!("debug {:?}", [4]);
        trace!("trace");
    }
}
