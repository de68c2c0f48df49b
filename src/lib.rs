//! # Minilang - a small, inspectable language front end
//!
//! Minilang turns source text in a tiny C-like teaching language into a
//! syntax tree. It is two stages, strictly ordered:
//!
//! ```text
//! Source Code → Tokenizer → Tokens → Parser → AST (+ diagnostics)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use minilang::{Parser, Statement, Tokenizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = r#"
//!     function area(float w, float h) {
//!         float a = w * h;
//!     }
//!     while (running) { int ticks = ticks + 1; }
//! "#;
//!
//! // Tokenize
//! let tokens = Tokenizer::new(code).tokenize()?;
//!
//! // Parse into AST, collecting diagnostics
//! let mut diagnostics = Vec::new();
//! let program = Parser::new(tokens).parse(&mut diagnostics);
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(program.statements.len(), 2);
//! assert!(matches!(program.statements[0], Statement::FunctionDeclaration { .. }));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Declarations**: `int x = 1;`, `function f(int a, bool b) { ... }`
//! - **Control flow**: `if cond { ... }`, `while (cond) { ... }`,
//!   `for (i = 0; cond; step) { ... }`
//! - **Expressions**: numbers, `true`/`false`, strings, names and
//!   parentheses, combined with `+ - * /` on a single, left-associative
//!   precedence tier (`1 + 2 * 3` is `(1 + 2) * 3`)
//!
//! Relational and logical characters (`< > ! & |`) are tokenized as
//! operators but no grammar rule accepts them.
//!
//! ## Error Handling
//!
//! An unrecognized character aborts tokenization with a [`LexError`]. Parse
//! failures are recovered at top-level statement boundaries: the error goes
//! to a [`DiagnosticSink`] and parsing resumes one token later.
//!
//! ```rust
//! use minilang::{parse_source, FrontendConfig, ParseError};
//!
//! let output = parse_source("int x = ; int y = 2;", &FrontendConfig::default()).unwrap();
//! assert_eq!(output.program.statements.len(), 1);
//! assert!(matches!(
//!     output.diagnostics[0].error,
//!     ParseError::UnparseableFactor { position: Some(8), .. }
//! ));
//! assert!(!output.is_clean());
//! ```

/// Version of the Minilang front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export main types
pub use config::FrontendConfig;
pub use diagnostic::{render, Diagnostic, DiagnosticSink, TracingSink};
pub use error::{Error, LexError, ParseError, Result};
pub use lexer::{tokenize, Token, TokenKind, Tokenizer};
pub use parser::{
    AssignmentExpression, BinaryOp, DescentParser, Expression, Parameter, Program, Statement,
    TypeKeyword,
};

/// Type alias for the recursive-descent parser.
/// Converts tokens into an abstract syntax tree (AST).
pub type Parser = DescentParser;

/// Program plus the diagnostics reported while parsing it
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// Statements that parsed, in source order
    pub program: Program,
    /// Recovered parse errors, in the order they occurred
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    /// True when nothing was reported; strict callers treat anything else as failure
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// All-or-nothing view: the program, or the first reported error
    pub fn into_program(self) -> Result<Program> {
        match self.diagnostics.into_iter().next() {
            Some(diagnostic) => Err(Error::Parse(diagnostic.error)),
            None => Ok(self.program),
        }
    }
}

/// Tokenizes and parses `source`
///
/// Fails only on a lex error; parse errors end up in
/// [`ParseOutput::diagnostics`].
pub fn parse_source(source: &str, config: &FrontendConfig) -> Result<ParseOutput> {
    let tokens = Tokenizer::with_config(source, config).tokenize()?;
    tracing::debug!(count = tokens.len(), "tokenized source");

    let mut diagnostics = Vec::new();
    let program = Parser::with_config(tokens, config.clone()).parse(&mut diagnostics);
    tracing::debug!(
        statements = program.statements.len(),
        diagnostics = diagnostics.len(),
        "parsed program"
    );

    Ok(ParseOutput {
        program,
        diagnostics,
    })
}

/// Reads `path` and parses its contents
pub fn parse_file(
    path: impl AsRef<std::path::Path>,
    config: &FrontendConfig,
) -> Result<ParseOutput> {
    let source = std::fs::read_to_string(path)?;
    parse_source(&source, config)
}
