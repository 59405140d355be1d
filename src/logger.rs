//! Logging utilities with colored output.
//!
//! All log lines go to stderr so that `list` and `show` output on stdout
//! stays machine-readable.
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "wrote {} records", count);
//! ```

use colored::{ColoredString, Colorize};
use crossterm::terminal::size;
use std::{
    io::{IsTerminal, Write, stderr},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;

/// Total prefix length for a module name: `[`, `]` and the trailing space.
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print a log line with a colored `[module]` prefix.
///
/// Single-line messages are truncated to the terminal width when stderr
/// is a terminal. Errors and multi-line messages are printed whole.
pub fn log(module: &str, message: &str) {
    let mut stderr = stderr().lock();
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let message = if !fits_terminal(&module_lower, message) || !stderr.is_terminal() {
        message
    } else {
        let width = get_terminal_width() as usize;
        truncate_str(message, width.saturating_sub(calc_prefix_len(module.len())))
    };

    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

/// Whether a message may be shortened to one terminal line.
#[inline]
fn fits_terminal(module_lower: &str, message: &str) -> bool {
    module_lower != "error" && !message.contains('\n')
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "check" => prefix.bright_green().bold(),
        "config" => prefix.bright_blue().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
