//! Error types for the Minilang front end

use thiserror::Error;

/// Tokenizer failure. Tokenization stops at the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No matcher recognizes the input at `position`
    ///
    /// **Triggered by:** a character outside every token class
    /// **Example:** `int x = 1.;` (the `.` after `1`), `x @ y`, an unterminated `"abc`
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter {
        /// Offending character
        ch: char,
        /// Byte offset of the character
        position: usize,
    },
}

impl LexError {
    /// Byte offset the error refers to
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

/// Parser failure for a single statement
///
/// `found` and `position` are `None` when the token stream was exhausted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required punctuation, operator, keyword or identifier is missing
    #[error("Expected {expected}, found {}", describe(.found))]
    ExpectedToken {
        /// What the grammar required here
        expected: String,
        /// Text of the token actually present
        found: Option<String>,
        /// Offset of the token actually present
        position: Option<usize>,
    },

    /// No statement rule starts with this token
    #[error("Expected statement, found {}", describe(.found))]
    UnexpectedStatementStart {
        /// Text of the token at the statement boundary
        found: Option<String>,
        /// Offset of that token
        position: Option<usize>,
    },

    /// No factor production matches: expected number, boolean, string, identifier or `(`
    #[error("Invalid factor: expected number, boolean, string, identifier or `(`, found {}", describe(.found))]
    UnparseableFactor {
        /// Text of the token where a factor was required
        found: Option<String>,
        /// Offset of that token
        position: Option<usize>,
    },
}

fn describe(found: &Option<String>) -> String {
    match found {
        Some(text) => format!("`{}`", text),
        None => "end of input".to_string(),
    }
}

impl ParseError {
    /// Offset of the token the error points at, `None` at end of input
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::ExpectedToken { position, .. }
            | ParseError::UnexpectedStatementStart { position, .. }
            | ParseError::UnparseableFactor { position, .. } => *position,
        }
    }

    /// Text of the offending token, `None` at end of input
    pub fn found(&self) -> Option<&str> {
        match self {
            ParseError::ExpectedToken { found, .. }
            | ParseError::UnexpectedStatementStart { found, .. }
            | ParseError::UnparseableFactor { found, .. } => found.as_deref(),
        }
    }
}

/// Front-end errors
#[derive(Error, Debug)]
pub enum Error {
    /// Tokenization failed; nothing was parsed
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    /// A statement failed to parse
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Reading the source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Minilang operations
pub type Result<T> = std::result::Result<T, Error>;
