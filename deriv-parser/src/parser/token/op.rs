//! Operator tokens, and how tightly they bind their operands.

use crate::{
    parser::{
        error::{Error, kind},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A prefix operator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    /// `-x`
    Neg,
}

impl UnaryOpKind {
    /// Returns the operator the token stands for in prefix position, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Sub => Some(Self::Neg),
            _ => None,
        }
    }

    pub fn precedence(&self) -> Precedence {
        Precedence::Neg
    }

    /// Prefix operators apply to everything to their right that binds tighter, so they are always
    /// right-associative.
    pub fn associativity(&self) -> Associativity {
        Associativity::Right
    }
}

/// A prefix operator, along with where it was found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl UnaryOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match UnaryOpKind::from_token(token.kind) {
            Some(kind) => Ok(Self { kind, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Sub],
                found: token.kind,
            })),
        }
    }
}

/// An infix operator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    /// `x ^ y`
    Exp,

    /// `x * y`, or two operands written next to each other, as in `2x`.
    Mul,

    /// `x / y`
    Div,

    /// `x + y`
    Add,

    /// `x - y`
    Sub,
}

/// Every token that can stand for a [`BinOpKind`].
const BIN_OP_TOKENS: &[TokenKind] = &[
    TokenKind::Exp,
    TokenKind::Mul,
    TokenKind::Div,
    TokenKind::Add,
    TokenKind::Sub,
];

impl BinOpKind {
    /// Returns the operator the token stands for in infix position, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Exp => Self::Exp,
            TokenKind::Mul => Self::Mul,
            TokenKind::Div => Self::Div,
            TokenKind::Add => Self::Add,
            TokenKind::Sub => Self::Sub,
            _ => return None,
        })
    }

    /// Returns the precedence of the operator. `^` binds tighter than a prefix `-`, so `-x^2` is
    /// `-(x^2)`.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the operator. Only `^` groups to the right.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

/// An infix operator, along with where it was found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    pub kind: BinOpKind,

    /// True if the operator does not appear in the source, such as the multiplication in `2x`.
    pub implicit: bool,

    /// The region of the source code that this operator was parsed from. For an implicit
    /// operator, this is the empty span between its operands.
    pub span: Range<usize>,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match BinOpKind::from_token(token.kind) {
            Some(kind) => Ok(Self { kind, implicit: false, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: BIN_OP_TOKENS,
                found: token.kind,
            })),
        }
    }
}
