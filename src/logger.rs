//! Terminal output with colored prefixes.
//!
//! - `debug!` prints a `[module]` prefixed line to stdout, only with `--verbose`
//! - `success` / `error` print the final status lines

use owo_colors::{OwoColorize, Stream};
use std::io::{stderr, stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module {
        "read" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_blue().bold().to_string())
            .to_string(),
        "write" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_green().bold().to_string())
            .to_string(),
        _ => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_yellow().bold().to_string())
            .to_string(),
    }
}

/// Print a `✓` status line to stdout. Plain text when stdout is not a terminal.
pub fn success(message: &str) {
    let mut stdout = stdout().lock();
    writeln!(
        stdout,
        "{} {message}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green())
    )
    .ok();
}

/// Print an `Error:` line to stderr. Plain text when stderr is not a terminal.
pub fn error(message: &str) {
    let mut stderr = stderr().lock();
    writeln!(
        stderr,
        "{} {message}",
        "Error:".if_supports_color(Stream::Stderr, |t| t.bright_red().bold().to_string())
    )
    .ok();
}
