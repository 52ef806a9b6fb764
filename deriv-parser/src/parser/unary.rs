use std::ops::Range;
use crate::{
    parser::{
        binary::Binary,
        expr::{Expr, Operand},
        error::{kind, Error},
        token::op::UnaryOp,
        Associativity,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attempt to parse a unary operator that is written before its operand. Returns a non-fatal error
/// if the operator is not right-associative.
fn try_parse_prefix_op(input: &mut Parser) -> Result<UnaryOp, Error> {
    input.try_parse_then::<UnaryOp, _>(|op, input| {
        if op.associativity() == Associativity::Right {
            Ok(())
        } else {
            Err(input.error(kind::NonFatal))
        }
    })
}

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression if the stream starts with a unary operator, or an [`Operand`]
    /// expression otherwise.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        if input.peek_kind() == Some(TokenKind::Sub) {
            input.try_parse::<Self>().map(Expr::Unary)
        } else {
            input.try_parse::<Operand>().map(Into::into)
        }
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.nested(|input| {
            let op = try_parse_prefix_op(input)?;

            // the operand may itself be signed (`--x`), and binds any operators of higher
            // precedence than the sign, so `-x^2` is `-(x^2)`
            let operand = {
                let lhs = Self::parse_or_lower(input)?;
                Binary::parse_expr(input, lhs, op.precedence())?
            };

            let start_span = op.span.start;
            let end_span = operand.span().end;
            Ok(Self {
                operand: Box::new(operand),
                op,
                span: start_span..end_span,
            })
        })
    }
}
