//! Output formatting utilities

use console::style;
use deployease_core::{Notice, Reporter};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Print a step that is starting
pub fn step(message: &str) {
    println!("{} {}", style("⚙").cyan(), style(message).cyan());
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Reporter that prints notices to the terminal
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, notice: &Notice) {
        match notice {
            Notice::Info(m) => info(m),
            Notice::Step(m) => step(m),
            Notice::Success(m) => success(m),
            Notice::Warning(m) => warning(m),
            Notice::Error(m) => error(m),
        }
    }
}
