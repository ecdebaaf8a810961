//! Centralized shell output.
//!
//! Commands never format status lines themselves; they hand a semantic
//! [`Status`] and a message to the [`Shell`], which handles alignment,
//! color and verbosity. Machine-readable output goes to stdout, everything
//! else to stderr.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::util::diagnostic::{self, Diagnostic};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only
    Quiet,
    #[default]
    Normal,
    /// --verbose: debug logging
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Added,
    Created,
    Finished,
    Updated,
    Removed,
    Exported,

    // In-progress statuses (cyan)
    Evaluating,

    // Info statuses (blue)
    Info,

    // Warning statuses (yellow)
    Warning,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Added => "Added",
            Status::Created => "Created",
            Status::Finished => "Finished",
            Status::Updated => "Updated",
            Status::Removed => "Removed",
            Status::Exported => "Exported",
            Status::Evaluating => "Evaluating",
            Status::Info => "Info",
            Status::Warning => "Warning",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Added
            | Status::Created
            | Status::Finished
            | Status::Updated
            | Status::Removed
            | Status::Exported => "\x1b[1;32m",
            Status::Evaluating => "\x1b[1;36m",
            Status::Info => "\x1b[1;34m",
            Status::Warning => "\x1b[1;33m",
        }
    }
}

/// Width status labels are right-aligned to.
const STATUS_WIDTH: usize = 12;

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
}

impl Shell {
    pub fn new(verbosity: Verbosity, color: ColorChoice) -> Self {
        let use_color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };

        Shell {
            verbosity,
            use_color,
        }
    }

    /// Create a shell from CLI flags. Quiet wins over verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Shell::new(verbosity, color)
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`. Nothing prints in quiet mode;
    /// errors reach the user through the returned `Result` instead.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_quiet() {
            return;
        }

        eprintln!("{} {}", self.format_status(status), msg);
    }

    /// Print an info message.
    pub fn note(&self, msg: impl Display) {
        self.status(Status::Info, msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print a full diagnostic. Hidden in quiet mode.
    pub fn diagnostic(&self, diag: &Diagnostic) {
        if self.is_quiet() {
            return;
        }
        diagnostic::emit(diag, self.use_color);
    }

    /// Print a line of regular output to stdout.
    pub fn print(&self, line: impl Display) {
        println!("{}", line);
    }

    /// Print a value as pretty JSON to stdout.
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json).context("failed to write to stdout")?;
        stdout.flush().context("failed to flush stdout")
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();

        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                text,
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(Verbosity::Normal, ColorChoice::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice_from_str() {
        assert_eq!("auto".parse::<ColorChoice>(), Ok(ColorChoice::Auto));
        assert_eq!("ALWAYS".parse::<ColorChoice>(), Ok(ColorChoice::Always));
        assert_eq!("never".parse::<ColorChoice>(), Ok(ColorChoice::Never));
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_from_flags_quiet_wins() {
        let shell = Shell::from_flags(true, true, ColorChoice::Never);
        assert!(shell.is_quiet());
        assert!(!shell.is_verbose());

        let shell = Shell::from_flags(false, true, ColorChoice::Never);
        assert!(shell.is_verbose());
    }

    #[test]
    fn test_status_alignment() {
        let shell = Shell::new(Verbosity::Normal, ColorChoice::Never);
        assert_eq!(shell.format_status(Status::Added), "       Added");
        assert_eq!(shell.format_status(Status::Evaluating), "  Evaluating");
    }

    #[test]
    fn test_status_color() {
        let shell = Shell::new(Verbosity::Normal, ColorChoice::Always);
        assert!(shell.use_color());
        let formatted = shell.format_status(Status::Warning);
        assert!(formatted.starts_with("\x1b[1;33m"));
        assert!(formatted.ends_with("\x1b[0m"));
    }
}
