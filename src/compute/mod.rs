//! Sandboxed arithmetic evaluation.
//!
//! # Data Flow
//! ```text
//! raw expression
//!     → allow-list check (digits, + - * / ( ) . and space)
//!     → lexer.rs (tokens)
//!     → parser.rs (recursive descent → Expr tree)
//!     → eval.rs (structural recursion → Number)
//! ```
//!
//! # Design Decisions
//! - The grammar only knows numeric literals, the four operators, unary
//!   sign and parentheses; there is nothing else to evaluate
//! - The character allow-list is a first gate, not the sandbox
//! - Integer arithmetic stays exact until it overflows `i64`, then falls
//!   back to `f64`; `/` is always true division
//! - Nesting depth and input length are bounded so hostile input cannot
//!   exhaust the stack

pub mod eval;
pub mod lexer;
pub mod parser;

use serde::{Serialize, Serializer};
use thiserror::Error;

pub use parser::{BinaryOp, Expr};

/// Characters accepted in an expression.
pub const ALLOWED_CHARS: &str = "0123456789+-*/(). ";

/// Longest expression accepted, in characters.
pub const MAX_EXPRESSION_LEN: usize = 1024;

/// Deepest nesting of parentheses and unary signs.
pub const MAX_DEPTH: usize = 64;

/// Errors produced while validating, parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("character {ch:?} at position {position} is not allowed")]
    DisallowedCharacter { ch: char, position: usize },

    #[error("expression is empty")]
    Empty,

    #[error("expression exceeds {MAX_EXPRESSION_LEN} characters")]
    TooLong,

    #[error("malformed number at position {position}")]
    InvalidNumber { position: usize },

    #[error("unexpected token at position {position}")]
    UnexpectedToken { position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expression nests deeper than {MAX_DEPTH} levels")]
    TooDeep,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

/// Result of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Int(i) => serializer.serialize_i64(i),
            Number::Float(f) => serializer.serialize_f64(f),
        }
    }
}

/// Reject any character outside [`ALLOWED_CHARS`].
pub fn check_allowed(input: &str) -> Result<(), ExprError> {
    match input.char_indices().find(|(_, c)| !ALLOWED_CHARS.contains(*c)) {
        Some((position, ch)) => Err(ExprError::DisallowedCharacter { ch, position }),
        None => Ok(()),
    }
}

/// Validate, parse and evaluate `input`.
pub fn evaluate(input: &str) -> Result<Number, ExprError> {
    check_allowed(input)?;
    if input.len() > MAX_EXPRESSION_LEN {
        return Err(ExprError::TooLong);
    }
    let tokens = lexer::tokenize(input)?;
    let expr = parser::parse(&tokens)?;
    let value = eval::eval(&expr)?;
    if let Number::Float(f) = value {
        if !f.is_finite() {
            return Err(ExprError::NonFinite);
        }
    }
    Ok(value)
}
