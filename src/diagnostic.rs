//! Rendering of fatal errors with a source excerpt
//!
//! A [`Diagnostic`] is built at the moment compilation fails, while the source
//! buffer is still available, and captures everything needed to print:
//!
//! ```text
//! shapes.mc:3:12: Unknown variable 'hieght'.
//! 3 |   area = mul(hieght width)
//!                  ^
//! ```
//!
//! The excerpt starts at the beginning of the offending line and stops at the
//! newline, at end of input, or after [`MAX_LINE_LENGTH_FOR_ERRORS`] bytes
//! (marked with `...`). When the location is at end of input the line ends
//! with `<end-of-file>`. The caret is offset by the width of the line number
//! and the ` | ` separator.

use crate::ast::Location;
use crate::constants::MAX_LINE_LENGTH_FOR_ERRORS;
use crate::errors::CompileError;
use crossterm::style::Stylize;
use std::fmt;

/// One source line around an error location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub location: Location,
    pub text: String,
    pub truncated: bool,
    pub at_end_of_file: bool,
}

impl Excerpt {
    pub fn capture(source: &[u8], location: Location) -> Self {
        let line_start = location.line_start.min(source.len());
        let limit = (line_start + MAX_LINE_LENGTH_FOR_ERRORS).min(source.len());
        let line = &source[line_start..limit];
        let (end, reached_end_of_line) = match line.iter().position(|&c| c == b'\n') {
            Some(newline) => (newline, true),
            None => (line.len(), limit == source.len()),
        };
        Excerpt {
            location,
            text: String::from_utf8_lossy(&line[..end]).into_owned(),
            truncated: !reached_end_of_line,
            at_end_of_file: location.offset >= source.len(),
        }
    }

    /// Column (0-based, in characters of the rendered line) the caret sits on
    fn caret_offset(&self) -> usize {
        let line_number_width = self.location.line.to_string().len();
        line_number_width + 3 + (self.location.offset - self.location.line_start)
    }
}

/// A fatal error ready to be shown to the user
#[derive(Debug)]
pub struct Diagnostic {
    pub filename: Option<String>,
    pub error: CompileError,
    pub excerpt: Option<Excerpt>,
}

impl Diagnostic {
    /// Attach file context to an error raised while compiling `source`.
    pub fn new(filename: &str, source: &[u8], error: CompileError) -> Self {
        let excerpt = error
            .location()
            .map(|location| Excerpt::capture(source, location));
        Diagnostic {
            filename: Some(filename.to_string()),
            error,
            excerpt,
        }
    }

    /// An error with no file context (e.g. the file could not be read).
    pub fn bare(error: CompileError) -> Self {
        Diagnostic {
            filename: None,
            error,
            excerpt: None,
        }
    }

    /// Render the diagnostic as lines, optionally with terminal styling.
    pub fn render(&self, color: bool) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        let Some(excerpt) = &self.excerpt else {
            lines.push(self.error.to_string());
            return lines;
        };

        let location = excerpt.location;
        let header = format!(
            "{}:{}:{}:",
            self.filename.as_deref().unwrap_or("<input>"),
            location.line,
            location.column
        );
        if color {
            lines.push(format!("{} {}", header.bold(), self.error));
        } else {
            lines.push(format!("{} {}", header, self.error));
        }

        let mut code = format!("{} | {}", location.line, excerpt.text);
        if excerpt.truncated {
            code.push_str("...");
        }
        if excerpt.at_end_of_file {
            code.push_str("<end-of-file>");
        }
        lines.push(code);

        let padding = " ".repeat(excerpt.caret_offset());
        if color {
            lines.push(format!("{}{}", padding, "^".red().bold()));
        } else {
            lines.push(format!("{}^", padding));
        }
        lines
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render(false) {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
