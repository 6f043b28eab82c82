//! Output formatting utilities.

use colored::Colorize;

/// Print success message.
pub fn print_success(msg: &str) {
    eprintln!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{}", format!("⚠ {}", msg).yellow());
}

/// Print a labelled value.
pub fn print_field(label: &str, value: &str) {
    eprintln!("  {:<10} {}", format!("{}:", label).dimmed(), value);
}
