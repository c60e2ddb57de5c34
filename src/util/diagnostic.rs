//! User-friendly diagnostic messages.
//!
//! Problems found while validating an outline against the filesystem are
//! rendered as a [`Diagnostic`] with context lines and suggested fixes.
//! Problems with a position in `gren.json` are rendered by miette as an
//! [`OutlineReport`] with a code frame.

use std::fmt;
use std::path::{Path, PathBuf};

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::outline::OutlineProblem;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no outline file is found.
    pub const NO_OUTLINE: &str = "help: Run `gren-outline init` to create a new project";

    /// Suggestion after fixing an outline by hand.
    pub const CHECK_AGAIN: &str = "help: Run `gren-outline check` after editing gren.json";

    /// Suggestion when an outline is not in canonical form.
    pub const NOT_CANONICAL: &str = "help: Run `gren-outline fmt` to rewrite gren.json";

    /// Suggestion when `exposed` is run on an application.
    pub const NOT_A_PACKAGE: &str =
        "help: Only packages expose modules; set `\"type\": \"package\"` to publish one";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
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
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
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

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = match (color, self.severity) {
            (true, Severity::Error) => "\x1b[1;31merror\x1b[0m",
            (true, Severity::Warning) => "\x1b[1;33mwarning\x1b[0m",
            (false, Severity::Error) => "error",
            (false, Severity::Warning) => "warning",
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  → {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// An outline problem together with the file it came from.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("{problem}")]
#[diagnostic(code(gren_outline::outline::invalid))]
pub struct OutlineReport {
    pub problem: OutlineProblem,
    pub path: PathBuf,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("problem found here")]
    pub span: Option<SourceSpan>,
    #[help]
    pub help: Option<String>,
}

impl OutlineReport {
    pub fn new(path: &Path, src: String, problem: OutlineProblem) -> Self {
        let span = problem.position().map(|at| {
            let len = usize::from(at.offset < src.len());
            SourceSpan::from((at.offset, len))
        });

        OutlineReport {
            help: problem.help(),
            path: path.to_path_buf(),
            src: NamedSource::new(path.display().to_string(), src),
            span,
            problem,
        }
    }

    /// Whether the report points into the file.
    pub fn has_span(&self) -> bool {
        self.span.is_some()
    }

    /// The plain diagnostic for problems without a position.
    pub fn to_diagnostic(&self) -> Diagnostic {
        self.problem.to_diagnostic().with_location(&self.path)
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

/// Print an error message with context and suggestions.
pub fn emit_error(message: &str, context: &[&str], suggestions: &[&str], color: bool) {
    let mut diag = Diagnostic::error(message);
    for ctx in context {
        diag = diag.with_context(*ctx);
    }
    for sug in suggestions {
        diag = diag.with_suggestion(*sug);
    }
    emit(&diag, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outline::Problem;
    use crate::json::{Cursor, DecodeError};

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("source directories do not exist: `lib`")
            .with_location("/p/gren.json")
            .with_context("`lib` is not a directory")
            .with_suggestion("create the directories or remove them from `source-directories`");

        let output = diag.format(false);
        assert!(output.contains("error: source directories do not exist"));
        assert!(output.contains("--> /p/gren.json"));
        assert!(output.contains("`lib` is not a directory"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. create the directories"));
    }

    #[test]
    fn test_warning_formatting_with_color() {
        let output = Diagnostic::warning("gren.json is not formatted").format(true);
        assert!(output.starts_with("\x1b[1;33mwarning\x1b[0m: gren.json"));
    }

    #[test]
    fn test_report_span_points_at_problem() {
        let src = r#"{"type": "library"}"#.to_string();
        let at = Cursor {
            offset: 10,
            row: 1,
            col: 11,
        };
        let problem = OutlineProblem::BadStructure(DecodeError::failure(
            at,
            Problem::BadType("library".to_string()),
        ));

        let report = OutlineReport::new(Path::new("gren.json"), src, problem);
        assert!(report.has_span());
        assert_eq!(report.span, Some(SourceSpan::from((10, 1))));
        assert!(report.help.is_some());
    }

    #[test]
    fn test_report_without_position() {
        let report = OutlineReport::new(
            Path::new("/p/gren.json"),
            String::new(),
            OutlineProblem::NoAppCore,
        );
        assert!(!report.has_span());

        let output = report.to_diagnostic().format(false);
        assert!(output.contains("--> /p/gren.json"));
        assert!(output.contains("core-pkg/core"));
    }
}
