use parcel::prelude::v1::*;
use tracing::debug;

use crate::ast::{Expr, NumberLiteral};
use crate::lexer::{Token, TokenType};

/// ParseError represents a parser response that doesn't return a complete
/// expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected a number, found {actual}")]
    ExpectedNumber { actual: Token },
    #[error("expected end of input, found {actual}")]
    ExpectedEndOfInput { actual: Token },
    #[error("unspecified parser err: {0}")]
    Unspecified(String),
}

impl ParseError {
    /// Returns the kind of the offending token, if the error carries one.
    pub fn actual_kind(&self) -> Option<TokenType> {
        match self {
            Self::ExpectedNumber { actual } | Self::ExpectedEndOfInput { actual } => {
                Some(actual.to_token_type())
            }
            Self::Unspecified(_) => None,
        }
    }
}

/// parse expects a position-enumerated token slice and attempts to parse a
/// single complete expression, returning a parse error if it is invalid.
///
/// ```
/// use addc::lexer::{lex, Token};
/// use addc::parser::{parse, ParseError};
///
/// let tokens: Vec<(usize, Token)> = lex("1 2").into_iter().enumerate().collect();
/// assert_eq!(
///     Err(ParseError::ExpectedEndOfInput { actual: Token::Number(2) }),
///     parse(&tokens)
/// );
/// ```
pub fn parse(input: &[(usize, Token)]) -> Result<Expr, ParseError> {
    debug!(tokens = input.len(), "parsing expression");

    let res = expression()
        .parse(input)
        .map_err(ParseError::Unspecified)
        .and_then(|ms| match ms {
            MatchStatus::Match {
                remainder, inner, ..
            } => expect_end_of_input(remainder).map(|_| inner),
            MatchStatus::NoMatch(remainder) => Err(ParseError::ExpectedNumber {
                actual: current_token(remainder),
            }),
        });

    match &res {
        Ok(expr) => debug!(%expr, "parsed expression"),
        Err(e) => debug!(error = %e, "parse failed"),
    }
    res
}

/// Validates the tokens left over once the expression stops matching.
fn expect_end_of_input(remainder: &[(usize, Token)]) -> Result<(), ParseError> {
    match remainder {
        [] | [(_, Token::Eof), ..] => Ok(()),
        // repetition only halts on a plus when no number follows it.
        [(_, Token::Plus), rest @ ..] => Err(ParseError::ExpectedNumber {
            actual: current_token(rest),
        }),
        [(_, actual), ..] => Err(ParseError::ExpectedEndOfInput { actual: *actual }),
    }
}

fn current_token(input: &[(usize, Token)]) -> Token {
    input.first().map(|&(_, tok)| tok).unwrap_or(Token::Eof)
}

fn expression<'a>() -> impl parcel::Parser<'a, &'a [(usize, Token)], Expr> {
    parcel::join(
        number(),
        parcel::zero_or_more(parcel::right(parcel::join(
            expect_tokentype(TokenType::Plus),
            number(),
        ))),
    )
    .map(|(first_expr, operands)| operands.into_iter().fold(first_expr, Expr::addition))
}

fn number<'a>() -> impl parcel::Parser<'a, &'a [(usize, Token)], Expr> {
    move |input: &'a [(usize, Token)]| match input.first() {
        Some(&(pos, Token::Number(value))) => Ok(MatchStatus::Match {
            span: pos..pos + 1,
            remainder: &input[1..],
            inner: Expr::NumberLiteral(NumberLiteral(value)),
        }),
        _ => Ok(MatchStatus::NoMatch(input)),
    }
}

pub fn expect_tokentype<'a>(expected: TokenType) -> impl Parser<'a, &'a [(usize, Token)], Token> {
    move |input: &'a [(usize, Token)]| match input.first() {
        Some(&(pos, next)) if next.to_token_type() == expected => Ok(MatchStatus::Match {
            span: pos..pos + 1,
            remainder: &input[1..],
            inner: next,
        }),
        _ => Ok(MatchStatus::NoMatch(input)),
    }
}
