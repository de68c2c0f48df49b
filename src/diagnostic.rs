//! Diagnostic records and the sink that receives them

use crate::error::ParseError;
use serde::Serialize;

/// One parse failure recovered at a statement boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Human-readable description
    pub message: String,
    /// Byte offset of the offending token, `None` at end of input
    pub position: Option<usize>,
    /// Structured error
    #[serde(skip)]
    pub error: ParseError,
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Diagnostic {
            message: error.to_string(),
            position: error.position(),
            error,
        }
    }
}

/// Receives diagnostics while parsing continues
pub trait DiagnosticSink {
    /// Record one diagnostic
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` at error level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::error!(position = ?diagnostic.position, "{}", diagnostic.message);
    }
}

/// 1-indexed line and column of byte offset `position` in `source`
pub fn line_col(source: &str, position: usize) -> (usize, usize) {
    let mut end = position.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

/// Formats a diagnostic with the offending line and a caret under the token
pub fn render(diagnostic: &Diagnostic, source: &str) -> String {
    match diagnostic.position {
        Some(position) => {
            let (line, col) = line_col(source, position);
            let line_text = source.lines().nth(line - 1).unwrap_or("");
            format!(
                "error:{}:{}: {}\n  {}\n  {}^",
                line,
                col,
                diagnostic.message,
                line_text,
                " ".repeat(col - 1)
            )
        }
        None => format!("error: {}", diagnostic.message),
    }
}
