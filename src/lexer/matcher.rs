//! Priority-ordered token matchers
//!
//! The order of [`MATCHERS`] is part of the grammar: at each cursor position
//! the first matcher whose pattern matches at the cursor wins, regardless of
//! how long a later matcher's match would be. Keywords therefore shadow
//! identifiers only when followed by a word boundary (`if` vs `iffy`), and
//! `true`/`false` become booleans because Boolean is tried before Identifier.
//! Word boundaries are ASCII: a non-ASCII letter ends a word.

use super::token::TokenKind;
use regex::Regex;

/// A token class paired with the pattern that recognizes it
pub struct Matcher {
    /// Class of the emitted token, `None` for whitespace which is discarded
    pub kind: Option<TokenKind>,
    pattern: Regex,
}

impl Matcher {
    fn new(kind: Option<TokenKind>, pattern: &str) -> Self {
        // Every pattern is anchored at the start of the remaining input
        let anchored = format!("^(?:{})", pattern);
        Matcher {
            kind,
            pattern: Regex::new(&anchored).expect("matcher patterns are valid regexes"),
        }
    }

    /// Length in bytes of the match at the start of `rest`, if any
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        self.pattern.find(rest).map(|m| m.end())
    }
}

lazy_static::lazy_static! {
    /// Matchers in priority order
    pub static ref MATCHERS: Vec<Matcher> = vec![
        Matcher::new(
            Some(TokenKind::Keyword),
            r"(?-u:\b)(?:if|else|while|for|function|int|float|string|bool|return)(?-u:\b)",
        ),
        Matcher::new(Some(TokenKind::Operator), r"[+\-*/%|&=<>!]"),
        Matcher::new(Some(TokenKind::Punctuation), r"[{}();,]"),
        Matcher::new(Some(TokenKind::Boolean), r"(?-u:\b)(?:true|false)(?-u:\b)"),
        Matcher::new(Some(TokenKind::Identifier), r"(?-u:\b)[a-zA-Z_][a-zA-Z0-9_]*(?-u:\b)"),
        Matcher::new(Some(TokenKind::Number), r"(?-u:\b)[0-9]+(?:\.[0-9]+)?(?-u:\b)"),
        Matcher::new(Some(TokenKind::String), r#""(?:[^"\\]|\\.)*""#),
        Matcher::new(None, r"\s+"),
    ];
}

/// First matcher in priority order that matches at the start of `rest`,
/// with the matched length
pub fn first_match(rest: &str) -> Option<(&'static Matcher, usize)> {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher.match_len(rest).map(|len| (matcher, len)))
}
