//! The expression tree produced by the parser. Nodes carry shape only; every
//! behavior over the tree lives in a compilation stage.

/// Represents a single expression in the ast.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Expr {
    NumberLiteral(NumberLiteral),
    Addition(AdditionExpr),
}

impl Expr {
    pub fn number(value: i64) -> Self {
        Self::NumberLiteral(NumberLiteral(value))
    }

    /// Wraps two subexpressions in an addition node, taking ownership of both.
    pub fn addition(lhs: Expr, rhs: Expr) -> Self {
        Self::Addition(AdditionExpr(Box::new(lhs), Box::new(rhs)))
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NumberLiteral(literal) => write!(f, "{}", literal),
            Self::Addition(addition) => write!(f, "{}", addition),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AdditionExpr(pub Box<Expr>, pub Box<Expr>);

impl std::fmt::Display for AdditionExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(+ {} {})", self.0, self.1)
    }
}

/// A non-negative integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLiteral(pub i64);

impl std::fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
