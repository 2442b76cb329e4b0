//! Terminal output for commands.
//!
//! Results go to stdout, problems to stderr.  Diagnostic detail is not
//! printed here; it goes through `tracing` and shows up with `-v`.

use std::path::Path;

use console::style;

/// "✓ {msg}" in green.
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// "✗ {msg}" in red, on stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// "⚠ {msg}" in yellow, on stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), style(msg).yellow());
}

/// "ℹ {msg}" in blue.
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// "→ {msg}", dimmed.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// A path formatted for inclusion in a message.
pub fn path(path: &Path) -> String {
    style(path.display()).cyan().to_string()
}
