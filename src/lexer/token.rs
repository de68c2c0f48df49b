use serde::{Deserialize, Serialize};

/// Keywords that name a declared type
pub const TYPE_KEYWORDS: [&str; 4] = ["int", "float", "string", "bool"];

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The class of token
    pub kind: TokenKind,
    /// Matched source text, verbatim
    pub text: String,
    /// Byte offset where the token starts
    pub position: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Byte offset one past the last byte of the token
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }

    /// True for a token of `kind` whose text is exactly `text`
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// True for `int`, `float`, `string` and `bool`
    pub fn is_type_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && TYPE_KEYWORDS.contains(&self.text.as_str())
    }
}

/// Token classes, closed set
///
/// Whitespace is recognized by the tokenizer but never becomes a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Reserved word: `if`, `while`, `function`, a type name, ...
    Keyword,
    /// Single-character operator
    Operator,
    /// Braces, parentheses, `;` and `,`
    Punctuation,
    /// `true` or `false`
    Boolean,
    /// Name
    Identifier,
    /// Integer or decimal literal
    Number,
    /// Double-quoted literal, quotes and escapes included
    String,
}

impl TokenKind {
    /// Lowercase name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Boolean => "boolean",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
