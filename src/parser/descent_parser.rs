use super::ast::{
    AssignmentExpression, BinaryOp, Expression, Parameter, Program, Statement, TypeKeyword,
};
use crate::config::FrontendConfig;
use crate::diagnostic::DiagnosticSink;
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};

type ParseResult<T> = std::result::Result<T, ParseError>;

/// LL(1) recursive-descent parser for Minilang
///
/// One grammar rule per method. Nothing backtracks: each rule commits on a
/// single token of lookahead, and a failed expectation leaves the offending
/// token unconsumed.
pub struct DescentParser {
    tokens: Vec<Token>,
    current: usize,
    config: FrontendConfig,
}

impl DescentParser {
    /// Creates a parser with default options
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, FrontendConfig::default())
    }

    /// Creates a parser using `config`
    pub fn with_config(tokens: Vec<Token>, config: FrontendConfig) -> Self {
        DescentParser {
            tokens,
            current: 0,
            config,
        }
    }

    /// Parses the token stream into a program
    ///
    /// A statement that fails to parse is reported to `sink` and skipped by
    /// advancing one token from the point of failure. Errors inside blocks
    /// abandon the whole enclosing top-level statement.
    pub fn parse(&mut self, sink: &mut impl DiagnosticSink) -> Program {
        let mut statements = Vec::new();
        let mut reported = 0usize;

        while !self.is_at_end() {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    tracing::warn!(position = ?error.position(), "{}", error);
                    sink.report(error.into());
                    reported += 1;
                    self.advance();

                    if let Some(limit) = self.config.max_diagnostics {
                        if reported >= limit {
                            tracing::warn!(limit, "diagnostic limit reached, stopping");
                            break;
                        }
                    }
                }
            }
        }

        Program { statements }
    }

    /// Statement := Declaration | IfStatement | WhileStatement | ForStatement
    fn parse_statement(&mut self) -> ParseResult<Statement> {
        if !self.peek().is_some_and(|token| token.kind == TokenKind::Keyword) {
            return Err(self.unexpected_statement_start());
        }

        if self.check(TokenKind::Keyword, "if") {
            self.parse_if()
        } else if self.check(TokenKind::Keyword, "while") {
            self.parse_while()
        } else if self.check(TokenKind::Keyword, "for") {
            self.parse_for()
        } else {
            self.parse_declaration()
        }
    }

    /// Declaration := TypeKeyword VariableDeclaration | 'function' FunctionDeclaration
    fn parse_declaration(&mut self) -> ParseResult<Statement> {
        if self.check(TokenKind::Keyword, "function") {
            self.advance();
            return self.parse_function_declaration();
        }

        let declared_type = self
            .peek()
            .filter(|token| token.is_type_keyword())
            .and_then(|token| TypeKeyword::from_keyword(&token.text));

        match declared_type {
            Some(declared_type) => {
                self.advance();
                self.parse_variable_declaration(declared_type)
            }
            None => Err(self.expected_error("variable or function declaration")),
        }
    }

    /// VariableDeclaration := Identifier '=' Expression ';'
    fn parse_variable_declaration(
        &mut self,
        declared_type: TypeKeyword,
    ) -> ParseResult<Statement> {
        let name = self.expect_identifier()?;
        self.consume(TokenKind::Operator, "=")?;
        let initializer = self.parse_expression()?;
        self.consume(TokenKind::Punctuation, ";")?;

        Ok(Statement::VariableDeclaration {
            declared_type,
            name,
            initializer,
        })
    }

    /// FunctionDeclaration := Identifier '(' ParamList ')' Block
    fn parse_function_declaration(&mut self) -> ParseResult<Statement> {
        let name = self.expect_identifier()?;
        let parameters = self.parse_parameter_list()?;
        let body = self.parse_block()?;

        Ok(Statement::FunctionDeclaration {
            name,
            parameters,
            body,
        })
    }

    /// '(' (TypeKeyword Identifier (',' TypeKeyword Identifier)*)? ')'
    fn parse_parameter_list(&mut self) -> ParseResult<Vec<Parameter>> {
        self.consume(TokenKind::Punctuation, "(")?;

        let mut parameters = Vec::new();
        if self.check(TokenKind::Punctuation, ")") {
            self.advance();
            return Ok(parameters);
        }

        loop {
            let declared_type = self.expect_type_keyword()?;
            let name = self.expect_identifier()?;
            parameters.push(Parameter {
                declared_type,
                name,
            });

            if !self.check(TokenKind::Punctuation, ",") {
                break;
            }
            self.advance();
        }

        self.consume(TokenKind::Punctuation, ")")?;
        Ok(parameters)
    }

    /// Block := '{' BlockItem* '}'
    fn parse_block(&mut self) -> ParseResult<Vec<Statement>> {
        self.consume(TokenKind::Punctuation, "{")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::Punctuation, "}") {
            if self.is_at_end() {
                return Err(self.expected_error("`}`"));
            }
            // No recovery inside blocks
            statements.push(self.parse_statement()?);
        }
        self.advance();

        Ok(statements)
    }

    /// IfStatement := 'if' Expression Block
    fn parse_if(&mut self) -> ParseResult<Statement> {
        self.advance(); // if
        let condition = self.parse_expression()?;
        let body = self.parse_block()?;

        Ok(Statement::If { condition, body })
    }

    /// WhileStatement := 'while' '(' Expression ')' Block
    fn parse_while(&mut self) -> ParseResult<Statement> {
        self.advance(); // while
        self.consume(TokenKind::Punctuation, "(")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::Punctuation, ")")?;
        let body = self.parse_block()?;

        Ok(Statement::While { condition, body })
    }

    /// ForStatement := 'for' '(' AssignmentExpression? ';' Expression ';' Expression ')' Block
    fn parse_for(&mut self) -> ParseResult<Statement> {
        self.advance(); // for
        self.consume(TokenKind::Punctuation, "(")?;

        let initializer = if self.peek().is_some_and(|t| t.kind == TokenKind::Identifier) {
            Some(self.parse_assignment()?)
        } else {
            None
        };
        self.consume(TokenKind::Punctuation, ";")?;

        let condition = self.parse_expression()?;
        self.consume(TokenKind::Punctuation, ";")?;

        let increment = self.parse_expression()?;
        self.consume(TokenKind::Punctuation, ")")?;

        let body = self.parse_block()?;

        Ok(Statement::For {
            initializer,
            condition,
            increment,
            body,
        })
    }

    /// AssignmentExpression := Identifier '=' Expression
    fn parse_assignment(&mut self) -> ParseResult<AssignmentExpression> {
        let name = self.expect_identifier()?;
        self.consume(TokenKind::Operator, "=")?;
        let value = self.parse_expression()?;

        Ok(AssignmentExpression { name, value })
    }

    /// Expression := Term
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_term()
    }

    /// Term := Factor (('+'|'-'|'*'|'/') Factor)*
    ///
    /// All four operators share one tier and associate to the left, so
    /// `1 + 2 * 3` is `(1 + 2) * 3`.
    fn parse_term(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_factor()?;

        while let Some(operator) = self.peek_binary_op() {
            self.advance();
            let right = self.parse_factor()?;
            left = Expression::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Factor := Number | Boolean | String | Identifier | '(' Expression ')'
    fn parse_factor(&mut self) -> ParseResult<Expression> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.unparseable_factor());
        };

        let expr = match token.kind {
            TokenKind::Number => {
                let value = token
                    .text
                    .parse::<f64>()
                    .map_err(|_| self.unparseable_factor())?;
                Expression::NumberLiteral { value }
            }
            TokenKind::Boolean => Expression::BooleanLiteral {
                value: token.text == "true",
            },
            TokenKind::String => Expression::StringLiteral {
                value: unescape_string(&token.text),
            },
            TokenKind::Identifier => Expression::Identifier { name: token.text },
            TokenKind::Punctuation if token.text == "(" => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(TokenKind::Punctuation, ")")?;
                return Ok(expr);
            }
            _ => return Err(self.unparseable_factor()),
        };

        self.advance();
        Ok(expr)
    }

    // Helper methods

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is_some_and(|token| token.is(kind, text))
    }

    fn consume(&mut self, kind: TokenKind, text: &str) -> ParseResult<Token> {
        match self.advance_if(|token| token.is(kind, text)) {
            Some(token) => Ok(token),
            None => Err(self.expected_error(&format!("`{}`", text))),
        }
    }

    fn advance_if(&mut self, accept: impl FnOnce(&Token) -> bool) -> Option<Token> {
        if self.peek().is_some_and(accept) {
            self.advance()
        } else {
            None
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.advance_if(|token| token.kind == TokenKind::Identifier) {
            Some(token) => Ok(token.text),
            None => Err(self.expected_error("identifier")),
        }
    }

    fn expect_type_keyword(&mut self) -> ParseResult<TypeKeyword> {
        match self
            .advance_if(Token::is_type_keyword)
            .and_then(|token| TypeKeyword::from_keyword(&token.text))
        {
            Some(declared_type) => Ok(declared_type),
            None => Err(self.expected_error("type keyword")),
        }
    }

    fn peek_binary_op(&self) -> Option<BinaryOp> {
        self.peek()
            .filter(|token| token.kind == TokenKind::Operator)
            .and_then(|token| BinaryOp::from_symbol(&token.text))
    }

    fn found(&self) -> (Option<String>, Option<usize>) {
        match self.peek() {
            Some(token) => (Some(token.text.clone()), Some(token.position)),
            None => (None, None),
        }
    }

    /// Syntax error with expected/found pattern at the current token
    fn expected_error(&self, expected: &str) -> ParseError {
        let (found, position) = self.found();
        ParseError::ExpectedToken {
            expected: expected.to_string(),
            found,
            position,
        }
    }

    fn unexpected_statement_start(&self) -> ParseError {
        let (found, position) = self.found();
        ParseError::UnexpectedStatementStart { found, position }
    }

    fn unparseable_factor(&self) -> ParseError {
        let (found, position) = self.found();
        ParseError::UnparseableFactor { found, position }
    }
}

/// Strips the quotes from a string token and resolves `\"` and `\\`
///
/// Other escapes are kept verbatim, backslash included.
fn unescape_string(raw: &str) -> String {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('"' | '\\')) => value.push(escaped),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostic;
    use crate::lexer::tokenize;

    fn parse_str(source: &str) -> (Program, Vec<Diagnostic>) {
        let tokens = tokenize(source).unwrap();
        let mut diagnostics = Vec::new();
        let program = DescentParser::new(tokens).parse(&mut diagnostics);
        (program, diagnostics)
    }

    fn parse_clean(source: &str) -> Program {
        let (program, diagnostics) = parse_str(source);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
        program
    }

    fn number(value: f64) -> Expression {
        Expression::NumberLiteral { value }
    }

    fn ident(name: &str) -> Expression {
        Expression::Identifier {
            name: name.to_string(),
        }
    }

    fn binary(operator: BinaryOp, left: Expression, right: Expression) -> Expression {
        Expression::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_variable_declaration() {
        let program = parse_clean("int x = 5;");
        assert_eq!(
            program.statements,
            vec![Statement::VariableDeclaration {
                declared_type: TypeKeyword::Int,
                name: "x".to_string(),
                initializer: number(5.0),
            }]
        );
        assert_eq!(program.statements[0].node_type(), "intVariableDeclaration");
        assert_eq!(program.node_type(), "Program");
    }

    #[test]
    fn test_single_tier_left_associative() {
        let program = parse_clean("int x = 1 + 2 * 3;");
        let Statement::VariableDeclaration { initializer, .. } = &program.statements[0] else {
            panic!("Expected VariableDeclaration");
        };
        assert_eq!(
            *initializer,
            binary(
                BinaryOp::Mul,
                binary(BinaryOp::Add, number(1.0), number(2.0)),
                number(3.0)
            )
        );
    }

    #[test]
    fn test_parenthesized_factor() {
        let program = parse_clean("float y = a - (b / 2);");
        let Statement::VariableDeclaration { initializer, .. } = &program.statements[0] else {
            panic!("Expected VariableDeclaration");
        };
        assert_eq!(
            *initializer,
            binary(
                BinaryOp::Sub,
                ident("a"),
                binary(BinaryOp::Div, ident("b"), number(2.0))
            )
        );
    }

    #[test]
    fn test_literals() {
        let program = parse_clean(r#"bool b = false; string s = "say \"hi\" \\ \n";"#);
        let initializers: Vec<_> = program
            .statements
            .iter()
            .map(|s| match s {
                Statement::VariableDeclaration { initializer, .. } => initializer.clone(),
                other => panic!("Expected VariableDeclaration, got {:?}", other),
            })
            .collect();
        assert_eq!(initializers[0], Expression::BooleanLiteral { value: false });
        assert_eq!(
            initializers[1],
            Expression::StringLiteral {
                value: r#"say "hi" \ \n"#.to_string()
            }
        );
    }

    #[test]
    fn test_while_statement() {
        let program = parse_clean("while (true) { int y = 1; }");
        assert_eq!(
            program.statements,
            vec![Statement::While {
                condition: Expression::BooleanLiteral { value: true },
                body: vec![Statement::VariableDeclaration {
                    declared_type: TypeKeyword::Int,
                    name: "y".to_string(),
                    initializer: number(1.0),
                }],
            }]
        );
    }

    #[test]
    fn test_if_condition_is_bare() {
        let program = parse_clean("if flag { }");
        assert_eq!(
            program.statements,
            vec![Statement::If {
                condition: ident("flag"),
                body: vec![],
            }]
        );

        // A parenthesized condition is just a parenthesized factor
        let program = parse_clean("if (flag) { }");
        assert!(matches!(&program.statements[0], Statement::If { condition, .. } if *condition == ident("flag")));
    }

    #[test]
    fn test_while_requires_parentheses() {
        let (program, diagnostics) = parse_str("while true { }");
        assert!(program.statements.is_empty());
        assert_eq!(
            diagnostics[0].error,
            ParseError::ExpectedToken {
                expected: "`(`".to_string(),
                found: Some("true".to_string()),
                position: Some(6),
            }
        );
    }

    #[test]
    fn test_for_statement() {
        let program = parse_clean("for (i = 0; i; i + 1) { float f = i; }");
        let Statement::For {
            initializer,
            condition,
            increment,
            body,
        } = &program.statements[0]
        else {
            panic!("Expected ForStatement");
        };
        assert_eq!(initializer.as_ref().map(|a| a.node_type()), Some("AssignmentExpression"));
        assert_eq!(
            *initializer,
            Some(AssignmentExpression {
                name: "i".to_string(),
                value: number(0.0),
            })
        );
        assert_eq!(*condition, ident("i"));
        assert_eq!(*increment, binary(BinaryOp::Add, ident("i"), number(1.0)));
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_for_without_initializer() {
        let program = parse_clean("for (; n; n - 1) { }");
        assert!(matches!(
            &program.statements[0],
            Statement::For {
                initializer: None,
                ..
            }
        ));
    }

    #[test]
    fn test_function_declaration() {
        let program = parse_clean("function f(int a, int b) { int c = a + b; }");
        assert_eq!(
            program.statements,
            vec![Statement::FunctionDeclaration {
                name: "f".to_string(),
                parameters: vec![
                    Parameter {
                        declared_type: TypeKeyword::Int,
                        name: "a".to_string(),
                    },
                    Parameter {
                        declared_type: TypeKeyword::Int,
                        name: "b".to_string(),
                    },
                ],
                body: vec![Statement::VariableDeclaration {
                    declared_type: TypeKeyword::Int,
                    name: "c".to_string(),
                    initializer: binary(BinaryOp::Add, ident("a"), ident("b")),
                }],
            }]
        );
    }

    #[test]
    fn test_function_without_parameters_nests() {
        let program = parse_clean("function main() { function inner() { } while (1) { } }");
        let Statement::FunctionDeclaration {
            parameters, body, ..
        } = &program.statements[0]
        else {
            panic!("Expected FunctionDeclaration");
        };
        assert!(parameters.is_empty());
        assert_eq!(body[0].node_type(), "FunctionDeclaration");
        assert_eq!(body[1].node_type(), "WhileStatement");
    }

    #[test]
    fn test_missing_factor_recovers_one_token() {
        let (program, diagnostics) = parse_str("int x = ; int y = 2;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].error,
            ParseError::UnparseableFactor {
                found: Some(";".to_string()),
                position: Some(8),
            }
        );
        // The `;` is skipped and the next declaration parses
        assert_eq!(program.statements.len(), 1);
        assert!(matches!(&program.statements[0], Statement::VariableDeclaration { name, .. } if name == "y"));
    }

    #[test]
    fn test_relational_operator_is_rejected() {
        let (program, diagnostics) = parse_str("if x == 1 { }");
        assert!(program.statements.is_empty());
        assert_eq!(
            diagnostics[0].error,
            ParseError::ExpectedToken {
                expected: "`{`".to_string(),
                found: Some("=".to_string()),
                position: Some(5),
            }
        );
    }

    #[test]
    fn test_error_in_block_abandons_enclosing_statement() {
        let (program, diagnostics) = parse_str("function f() { int a = 1 } int b = 2;");
        assert_eq!(
            diagnostics[0].error,
            ParseError::ExpectedToken {
                expected: "`;`".to_string(),
                found: Some("}".to_string()),
                position: Some(25),
            }
        );
        // `}` skipped, then `int b = 2;` parses
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.statements[0].node_type(), "intVariableDeclaration");
    }

    #[test]
    fn test_unclosed_block_at_end_of_input() {
        let (program, diagnostics) = parse_str("while (x) { int a = 1;");
        assert!(program.statements.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].error,
            ParseError::ExpectedToken {
                expected: "`}`".to_string(),
                found: None,
                position: None,
            }
        );
    }

    #[test]
    fn test_unexpected_statement_start() {
        let (program, diagnostics) = parse_str("x = 1;");
        assert!(program.statements.is_empty());
        assert_eq!(diagnostics.len(), 4); // x = 1 ;
        assert!(diagnostics
            .iter()
            .all(|d| matches!(d.error, ParseError::UnexpectedStatementStart { .. })));
    }

    #[test]
    fn test_non_declaration_keyword() {
        let (_, diagnostics) = parse_str("return");
        assert_eq!(
            diagnostics[0].error,
            ParseError::ExpectedToken {
                expected: "variable or function declaration".to_string(),
                found: Some("return".to_string()),
                position: Some(0),
            }
        );
    }

    #[test]
    fn test_bad_parameter_list() {
        let (_, diagnostics) = parse_str("function f(a) { }");
        assert_eq!(
            diagnostics[0].error,
            ParseError::ExpectedToken {
                expected: "type keyword".to_string(),
                found: Some("a".to_string()),
                position: Some(11),
            }
        );

        let (_, diagnostics) = parse_str("function f(int a,) { }");
        assert_eq!(
            diagnostics[0].error,
            ParseError::ExpectedToken {
                expected: "type keyword".to_string(),
                found: Some(")".to_string()),
                position: Some(17),
            }
        );
    }

    #[test]
    fn test_diagnostic_limit_stops_parsing() {
        let tokens = tokenize("; ; ; int ok = 1;").unwrap();
        let mut diagnostics = Vec::new();
        let program = DescentParser::with_config(tokens, FrontendConfig::with_max_diagnostics(2))
            .parse(&mut diagnostics);
        assert_eq!(diagnostics.len(), 2);
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_unescape_string() {
        assert_eq!(unescape_string(r#""plain""#), "plain");
        assert_eq!(unescape_string(r#""a\"b""#), "a\"b");
        assert_eq!(unescape_string(r#""a\\b""#), "a\\b");
        assert_eq!(unescape_string(r#""\t""#), "\\t");
        assert_eq!(unescape_string(r#""""#), "");
    }
}
