//! A tree-walking evaluator, folding an expression directly to its value.

use super::CompilationStage;
use crate::ast::{AdditionExpr, Expr, NumberLiteral};
use tracing::debug;

/// Interpreter evaluates an expression in post-order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpreter;

impl<'a> CompilationStage<&'a Expr, i64, core::convert::Infallible> for Interpreter {
    fn apply(&mut self, input: &'a Expr) -> Result<i64, core::convert::Infallible> {
        let value = interpret(input);
        debug!(value, "evaluated expression");
        Ok(value)
    }
}

/// interpret returns the value of an expression. Sums wrap on overflow.
pub fn interpret(expr: &Expr) -> i64 {
    match expr {
        Expr::NumberLiteral(NumberLiteral(value)) => *value,
        Expr::Addition(AdditionExpr(lhs, rhs)) => interpret(lhs).wrapping_add(interpret(rhs)),
    }
}
