use super::matcher::first_match;
use super::token::Token;
use crate::config::FrontendConfig;
use crate::error::LexError;

/// Converts source text into an ordered token sequence
pub struct Tokenizer<'src> {
    /// Source text being tokenized
    source: &'src str,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Byte offset of the next unconsumed character
    cursor: usize,
    /// Emit a trace record per token
    trace: bool,
}

impl<'src> Tokenizer<'src> {
    /// Creates a tokenizer with default options
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, &FrontendConfig::default())
    }

    /// Creates a tokenizer using `config`
    pub fn with_config(source: &'src str, config: &FrontendConfig) -> Self {
        Tokenizer {
            source,
            tokens: Vec::new(),
            cursor: 0,
            trace: config.trace_tokens,
        }
    }

    /// Tokenizes the whole source
    ///
    /// Stops at the first character no matcher recognizes; no partial token
    /// list is returned in that case.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while self.cursor < self.source.len() {
            let rest = &self.source[self.cursor..];
            let Some((matcher, len)) = first_match(rest) else {
                // The cursor always sits on a char boundary, so `rest` is non-empty
                let ch = rest.chars().next().unwrap_or('\0');
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    position: self.cursor,
                });
            };

            if let Some(kind) = matcher.kind {
                let token = Token::new(kind, &rest[..len], self.cursor);
                if self.trace {
                    tracing::trace!(
                        kind = %token.kind,
                        text = %token.text,
                        position = token.position,
                        "token"
                    );
                }
                self.tokens.push(token);
            }
            self.cursor += len;
        }

        Ok(self.tokens)
    }
}
