use std::ops::Range;
use super::{
    expr::Expr,
    error::Error,
    token::op::{BinOp, BinOpKind},
    unary::Unary,
    Associativity,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The operator found between two operands while climbing.
#[derive(Debug, Clone, PartialEq)]
enum Joiner {
    /// An operator written in the source, such as `+` or `^`.
    Written(BinOp),

    /// Two operands next to each other, such as `2x` or `(x + 1)sin(x)`. Treated as `*`.
    Juxtaposed,
}

impl Joiner {
    fn precedence(&self) -> Precedence {
        match self {
            Self::Written(op) => op.precedence(),
            Self::Juxtaposed => Precedence::Factor,
        }
    }

    fn associativity(&self) -> Associativity {
        match self {
            Self::Written(op) => op.associativity(),
            Self::Juxtaposed => Associativity::Left,
        }
    }

    /// True if an operator following one with the given precedence must be applied first.
    fn outranks(&self, precedence: Precedence) -> bool {
        let own = self.precedence();
        own > precedence || (own == precedence && self.associativity() == Associativity::Right)
    }

    /// Finds the operator joining the operand just parsed to the next one, if there is one. Nothing
    /// is consumed.
    fn peek(input: &mut Parser) -> Option<Self> {
        match input.peek::<BinOp>() {
            Some(op) => Some(Self::Written(op)),
            None if input.implicit_multiplication_allowed() => Some(Self::Juxtaposed),
            None => None,
        }
    }

    /// Converts into the operator stored in the tree. A juxtaposition gets the empty span between
    /// its operands.
    fn into_op(self, lhs: &Expr, rhs: &Expr) -> BinOp {
        match self {
            Self::Written(op) => op,
            Self::Juxtaposed => BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: lhs.span().end..rhs.span().start,
            },
        }
    }
}

/// Two expressions joined by an operator, such as `x + 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,

    /// The region of the source code covering both operands.
    pub span: Range<usize>,
}

impl Binary {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Extends `lhs` with every following operator whose precedence is at least `min`, using
    /// precedence climbing. `x - 2x^3 + 1` groups as `(x - (2 * (x^3))) + 1`.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        min: Precedence,
    ) -> Result<Expr, Error> {
        while let Some(joiner) = Joiner::peek(input) {
            if joiner.precedence() < min {
                break;
            }

            if let Joiner::Written(_) = joiner {
                input.try_parse::<BinOp>()?;
            }

            let mut rhs = Unary::parse_or_lower(input)?;

            // an operator after `rhs` that outranks this one takes `rhs` as its left operand:
            // `4 * 5` in `3 + 4 * 5`, or `2 ^ 3` in `x ^ 2 ^ 3`
            // each such operator recurses, so long `^` chains count towards the nesting limit
            while let Some(next) = Joiner::peek(input) {
                if !next.outranks(joiner.precedence()) {
                    break;
                }
                let min = next.precedence();
                rhs = input.nested(|input| Self::parse_expr(input, rhs, min))?;
            }

            let span = lhs.span().start..rhs.span().end;
            let op = joiner.into_op(&lhs, &rhs);
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}
