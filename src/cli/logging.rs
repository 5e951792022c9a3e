// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Console logging for the overlay.
//!
//! Results (`success!`, `section!`) go to stdout. Diagnostics (`warn!`, `error!`,
//! `verbose!`) go to stderr so a saved or piped image stream stays clean.
//! `verbose!` and `section!` are muted by `set_verbose(false)`.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

static VERBOSE: AtomicBool = AtomicBool::new(true);

/// Set the global verbosity flag.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Check if verbose output is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Kind of console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
    Success,
    Detail,
    Section,
}

impl Level {
    const fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error | Self::Detail)
    }

    const fn is_gated(self) -> bool {
        matches!(self, Self::Detail | Self::Section)
    }

    /// Whether a line of this level is printed under the current verbosity.
    pub fn enabled(self) -> bool {
        !self.is_gated() || is_verbose()
    }
}

/// Render one console line.
pub fn format_line(level: Level, message: &str) -> String {
    match level {
        Level::Warning => format!("{} {message}", "WARNING ⚠️".yellow().bold()),
        Level::Error => format!("{} {message}", "Error:".red().bold()),
        Level::Success => format!("{} {message}", "✅".green()),
        Level::Detail => format!("  {message}"),
        Level::Section => format!("\n{}", message.cyan().bold()),
    }
}

/// Print a line if `level` is enabled. Used by the logging macros.
pub fn emit(level: Level, args: fmt::Arguments<'_>) {
    if !level.enabled() {
        return;
    }
    let line = format_line(level, &args.to_string());
    if level.to_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Warning on stderr.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Warning, format_args!($($arg)*))
    };
}

/// Error on stderr.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Error, format_args!($($arg)*))
    };
}

/// Completed step on stdout.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Success, format_args!($($arg)*))
    };
}

/// Pipeline detail on stderr, only when verbose.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Detail, format_args!($($arg)*))
    };
}

/// Heading for a pipeline stage on stdout, only when verbose.
#[macro_export]
macro_rules! section {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Section, format_args!($($arg)*))
    };
}
