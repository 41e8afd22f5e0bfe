//! One-line status messages.

use colored::Colorize;

/// Green check mark on stdout.
pub fn show_success(message: &str) {
    println!("{} {}", "✔".green().bold(), message.green());
}

/// Red cross on stderr.
pub fn show_error(message: &str) {
    eprintln!("{} {}", "✖".red().bold(), message.red());
}
