use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete Minilang program
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements that parsed successfully, in source order
    pub statements: Vec<Statement>,
}

impl Program {
    /// Node type name
    pub fn node_type(&self) -> &'static str {
        "Program"
    }
}

/// Declared type of a variable or parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKeyword {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `string`
    String,
    /// `bool`
    Bool,
}

impl TypeKeyword {
    /// Maps keyword text to a type, `None` for anything else
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "int" => Some(TypeKeyword::Int),
            "float" => Some(TypeKeyword::Float),
            "string" => Some(TypeKeyword::String),
            "bool" => Some(TypeKeyword::Bool),
            _ => None,
        }
    }

    /// Keyword text
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKeyword::Int => "int",
            TypeKeyword::Float => "float",
            TypeKeyword::String => "string",
            TypeKeyword::Bool => "bool",
        }
    }
}

impl fmt::Display for TypeKeyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Function parameter: `int a`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Declared type
    pub declared_type: TypeKeyword,
    /// Parameter name
    pub name: String,
}

/// Assignment: `i = 0`, only valid as a `for` initializer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpression {
    /// Assigned variable
    pub name: String,
    /// Assigned value
    pub value: Expression,
}

impl AssignmentExpression {
    /// Node type name
    pub fn node_type(&self) -> &'static str {
        "AssignmentExpression"
    }
}

/// Statements
///
/// Serialized with a `type` tag. A variable declaration is tagged
/// `VariableDeclaration` and carries its type in `declaredType`;
/// [`Statement::node_type`] folds the two into `intVariableDeclaration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// Variable declaration: `int x = expr;`
    #[serde(rename_all = "camelCase")]
    VariableDeclaration {
        /// Declared type
        declared_type: TypeKeyword,
        /// Variable name
        name: String,
        /// Initial value
        initializer: Expression,
    },

    /// Function declaration: `function f(int a) { ... }`
    FunctionDeclaration {
        /// Function name
        name: String,
        /// Parameters in declaration order
        parameters: Vec<Parameter>,
        /// Body statements
        body: Vec<Statement>,
    },

    /// If statement, condition not parenthesized: `if x { ... }`
    #[serde(rename = "IfStatement")]
    If {
        /// Condition expression
        condition: Expression,
        /// Statements executed when the condition holds
        body: Vec<Statement>,
    },

    /// While loop: `while (cond) { ... }`
    #[serde(rename = "WhileStatement")]
    While {
        /// Loop condition expression
        condition: Expression,
        /// Loop body
        body: Vec<Statement>,
    },

    /// For loop: `for (i = 0; cond; step) { ... }`
    #[serde(rename = "ForStatement")]
    For {
        /// Optional initializer assignment
        initializer: Option<AssignmentExpression>,
        /// Loop condition expression
        condition: Expression,
        /// Increment expression
        increment: Expression,
        /// Loop body
        body: Vec<Statement>,
    },
}

impl Statement {
    /// Node type name; variable declarations carry their type, e.g. `intVariableDeclaration`
    pub fn node_type(&self) -> String {
        match self {
            Statement::VariableDeclaration { declared_type, .. } => {
                format!("{}VariableDeclaration", declared_type)
            }
            Statement::FunctionDeclaration { .. } => "FunctionDeclaration".to_string(),
            Statement::If { .. } => "IfStatement".to_string(),
            Statement::While { .. } => "WhileStatement".to_string(),
            Statement::For { .. } => "ForStatement".to_string(),
        }
    }

    /// Nested statements, empty for declarations without a body
    pub fn body(&self) -> &[Statement] {
        match self {
            Statement::FunctionDeclaration { body, .. }
            | Statement::If { body, .. }
            | Statement::While { body, .. }
            | Statement::For { body, .. } => body,
            Statement::VariableDeclaration { .. } => &[],
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Binary operation, single precedence tier, left-associative
    #[serde(rename = "BinaryExpression")]
    Binary {
        /// Operator
        operator: BinaryOp,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },

    /// Numeric literal, always a float
    NumberLiteral {
        /// Parsed value
        value: f64,
    },

    /// `true` or `false`
    BooleanLiteral {
        /// Literal value
        value: bool,
    },

    /// String literal with escapes resolved
    StringLiteral {
        /// Unquoted value
        value: String,
    },

    /// Variable reference
    Identifier {
        /// Referenced name
        name: String,
    },
}

impl Expression {
    /// Node type name
    pub fn node_type(&self) -> &'static str {
        match self {
            Expression::Binary { .. } => "BinaryExpression",
            Expression::NumberLiteral { .. } => "NumberLiteral",
            Expression::BooleanLiteral { .. } => "BooleanLiteral",
            Expression::StringLiteral { .. } => "StringLiteral",
            Expression::Identifier { .. } => "Identifier",
        }
    }
}

impl fmt::Display for Expression {
    /// Fully parenthesized rendering, e.g. `((1 + 2) * 3)`
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Binary {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::NumberLiteral { value } => write!(f, "{}", value),
            Expression::BooleanLiteral { value } => write!(f, "{}", value),
            Expression::StringLiteral { value } => write!(f, "{:?}", value),
            Expression::Identifier { name } => f.write_str(name),
        }
    }
}

/// Binary operators accepted by the term rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition operator (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction operator (-)
    #[serde(rename = "-")]
    Sub,
    /// Multiplication operator (*)
    #[serde(rename = "*")]
    Mul,
    /// Division operator (/)
    #[serde(rename = "/")]
    Div,
}

impl BinaryOp {
    /// Operator for `text`; relational and logical characters are not operators here
    pub fn from_symbol(text: &str) -> Option<Self> {
        match text {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
        }
    }
}
