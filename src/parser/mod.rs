//! Minilang Parser Module
//!
//! Parses the token stream into an Abstract Syntax Tree (AST).

mod ast;
mod descent_parser;

pub use ast::{
    AssignmentExpression, BinaryOp, Expression, Parameter, Program, Statement, TypeKeyword,
};
pub use descent_parser::DescentParser;
