//! Evaluation of parsed expressions by structural recursion.

use super::parser::{BinaryOp, Expr};
use super::{ExprError, Number};

pub fn eval(expr: &Expr) -> Result<Number, ExprError> {
    match expr {
        Expr::Literal(n) => Ok(*n),
        Expr::Neg(inner) => Ok(match eval(inner)? {
            Number::Int(i) => i
                .checked_neg()
                .map(Number::Int)
                .unwrap_or(Number::Float(-(i as f64))),
            Number::Float(f) => Number::Float(-f),
        }),
        Expr::Binary { op, lhs, rhs } => apply(*op, eval(lhs)?, eval(rhs)?),
    }
}

fn apply(op: BinaryOp, lhs: Number, rhs: Number) -> Result<Number, ExprError> {
    if op == BinaryOp::Div {
        let divisor = rhs.as_f64();
        if divisor == 0.0 {
            return Err(ExprError::DivisionByZero);
        }
        return Ok(Number::Float(lhs.as_f64() / divisor));
    }

    if let (Number::Int(a), Number::Int(b)) = (lhs, rhs) {
        let exact = match op {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Sub => a.checked_sub(b),
            BinaryOp::Mul => a.checked_mul(b),
            BinaryOp::Div => None,
        };
        if let Some(value) = exact {
            return Ok(Number::Int(value));
        }
    }

    let (a, b) = (lhs.as_f64(), rhs.as_f64());
    Ok(Number::Float(match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
    }))
}
