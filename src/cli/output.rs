//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print a `symbol<sep>code` line, code in green
pub fn code(symbol: &str, separator: &str, code: &(impl std::fmt::Display + ?Sized)) {
    println!("{}{}{}", symbol, separator, code.to_string().green());
}

/// Print a labelled value
pub fn field(label: &str, value: &(impl std::fmt::Display + ?Sized)) {
    println!("  {:<16} {}", format!("{label}:"), value);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
