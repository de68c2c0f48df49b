//! Lexical analysis for Minilang
//!
//! Converts source text into a stream of classified, positioned tokens.

mod matcher;
mod token;
mod tokenizer;

pub use matcher::{first_match, Matcher, MATCHERS};
pub use token::{Token, TokenKind, TYPE_KEYWORDS};
pub use tokenizer::Tokenizer;

use crate::error::LexError;

/// Tokenizes `source` with default options
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(source).tokenize()
}
