use std::ops::Range;
use super::{
    error::{kind, Error},
    expr::Expr,
    token::{CloseParen, OpenParen},
    Parse,
    Parser
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parses the contents of a pair of parentheses, given that the opening parenthesis has already
/// been consumed. Returns the inner expression and the span of the closing parenthesis.
///
/// Once an opening parenthesis is seen, every error is fatal; there is nothing else the
/// parentheses could be.
pub(crate) fn parse_delimited(
    input: &mut Parser,
    open_paren: &OpenParen,
) -> Result<(Expr, Range<usize>), Error> {
    if input.peek_kind() == Some(TokenKind::CloseParen) {
        let close_span = input.span();
        return Err(Error::new_fatal(
            vec![open_paren.span.start..close_span.end],
            kind::EmptyParenthesis,
        ));
    }

    let expr = input.try_parse::<Expr>().map_err(Error::into_fatal)?;

    match input.peek_kind() {
        Some(TokenKind::CloseParen) => {
            let close_paren = input.try_parse::<CloseParen>()?;
            Ok((expr, close_paren.span))
        },
        None => Err(Error::new_fatal(
            vec![open_paren.span.clone()],
            kind::UnclosedParenthesis { opening: true },
        )),
        Some(found) => Err(input.error_fatal(kind::UnexpectedToken {
            expected: &[TokenKind::CloseParen],
            found,
        })),
    }
}

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from, including the
    /// parentheses.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        let (expr, close_span) = parse_delimited(input, &open_paren)?;
        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_span.end,
        })
    }
}
