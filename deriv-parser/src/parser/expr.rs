use std::ops::Range;
use crate::{
    parser::{
        binary::Binary,
        call::Call,
        error::{kind, Error},
        literal::Literal,
        paren::Paren,
        unary::Unary,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
    try_parse_catch_fatal,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tokens that can begin an [`Operand`].
const OPERAND_START: &[TokenKind] = &[TokenKind::Int, TokenKind::Float, TokenKind::Name, TokenKind::OpenParen];

/// A parsed expression, such as `x * sin(x^2) + 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number or a variable.
    Literal(Literal),

    /// An expression in parentheses, such as `(x + 1)`.
    Paren(Paren),

    /// A call to one of the supported functions, such as `ln(x)`.
    Call(Call),

    /// A negated expression, such as `-x`.
    Unary(Unary),

    /// Two expressions joined by an operator, such as `x^2`. Implicit multiplication, as in `2x`,
    /// is also represented here.
    Binary(Binary),
}

impl Expr {
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Literal(literal) => literal.span(),
            Self::Paren(paren) => paren.span(),
            Self::Call(call) => call.span(),
            Self::Unary(unary) => unary.span(),
            Self::Binary(binary) => binary.span(),
        }
    }

    /// Looks through any number of enclosing parentheses, so `((0))` gives the literal `0`.
    pub fn innermost(&self) -> &Expr {
        match self {
            Self::Paren(paren) => paren.expr.innermost(),
            other => other,
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.nested(|input| {
            let first = Unary::parse_or_lower(input)?;
            Binary::parse_expr(input, first, Precedence::Any)
        })
    }
}

/// Anything that can stand on either side of an operator without needing a sign: a literal, a
/// function call, or a parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operand {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
}

impl Operand {
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Literal(literal) => literal.span(),
            Self::Paren(paren) => paren.span(),
            Self::Call(call) => call.span(),
        }
    }

    /// Fails early, with the most specific error available, when the next token cannot begin an
    /// operand.
    fn check_start(input: &mut Parser) -> Result<(), Error> {
        let Some(found) = input.peek_kind() else {
            return Err(input.error(kind::UnexpectedEof));
        };

        match found {
            start if OPERAND_START.contains(&start) => Ok(()),
            TokenKind::CloseParen if input.unclosed_parens() == 0 => {
                Err(input.error_fatal(kind::UnclosedParenthesis { opening: false }))
            },
            TokenKind::Symbol => {
                let token = input.next_token()?;
                Err(Error::new_fatal(vec![token.span], kind::UnexpectedCharacter {
                    lexeme: token.lexeme.to_string(),
                }))
            },
            found => Err(input.error_fatal(kind::UnexpectedToken {
                expected: OPERAND_START,
                found,
            })),
        }
    }
}

impl Parse for Operand {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        Self::check_start(input)?;

        // `sin(x)` also starts with a name, so calls are tried before bare symbols
        let _ = try_parse_catch_fatal!(input.try_parse::<Call>().map(Self::Call));
        let _ = try_parse_catch_fatal!(input.try_parse::<Literal>().map(Self::Literal));

        input.try_parse::<Paren>().map(Self::Paren)
    }
}

impl From<Operand> for Expr {
    fn from(operand: Operand) -> Self {
        match operand {
            Operand::Literal(literal) => Self::Literal(literal),
            Operand::Paren(paren) => Self::Paren(paren),
            Operand::Call(call) => Self::Call(call),
        }
    }
}
