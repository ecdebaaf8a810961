//! User-friendly diagnostic messages.
//!
//! Every message names the problem, the context it was found in, and what
//! to do about it.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no recipe file is found.
    pub const NO_MANIFEST: &str = "help: Run `recipe init` to create a new Recipe.toml";

    /// Suggestion when a requirement is not found.
    pub const REQUIREMENT_NOT_FOUND: &str =
        "help: Run `recipe evaluate` to list the declared requirements";

    /// Suggestion when declared axes have no value.
    pub const MISSING_SETTINGS: &str =
        "help: Pass values with `-s axis=value` or add them to `[settings]` in config.toml";
}

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Note,
}

impl Severity {
    fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }

    /// ANSI bold color for the label.
    fn color_code(&self) -> &'static str {
        match self {
            Severity::Warning => "1;33",
            Severity::Note => "1;36",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn with_severity(message: impl Into<String>, severity: Severity) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Warning)
    }

    /// Create a new note diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Note)
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal.
    ///
    /// ```text
    /// warning: generator `cmakedeps` is not recognized
    ///   --> Recipe.toml
    ///   = <context>
    /// help: Did you mean `CMakeDeps`?
    /// ```
    pub fn format(&self, color: bool) -> String {
        let label = paint(self.severity.as_str(), self.severity.color_code(), color);
        let mut lines = vec![format!("{}: {}", label, self.message)];

        if let Some(path) = &self.location {
            lines.push(format!("  --> {}", path.display()));
        }
        lines.extend(self.context.iter().map(|c| format!("  = {}", c)));

        let help = paint("help", "1;32", color);
        match self.suggestions.as_slice() {
            [] => {}
            [only] => lines.push(format!("{}: {}", help, only)),
            many => {
                lines.push(format!("{}: consider:", help));
                for (i, suggestion) in many.iter().enumerate() {
                    lines.push(format!("  {}. {}", i + 1, suggestion));
                }
            }
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
