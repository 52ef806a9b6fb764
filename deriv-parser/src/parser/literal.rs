use std::ops::Range;
use super::{
    error::{kind, Error},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number such as `3` or `.5`. Both spellings are stored as an `f64`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// Always finite.
    pub value: f64,
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if !token.kind.is_number() {
            return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float],
                found: token.kind,
            }));
        }

        // the tokenizer only lets digits and a single dot through, so the only way to fail is a
        // number too large to be represented
        match token.lexeme.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Self { value, span: token.span }),
            _ => Err(Error::new_fatal(vec![token.span], kind::InvalidNumber)),
        }
    }
}

/// A name, such as the variable `x`. Function names are parsed by [`Call`](super::call::Call)
/// before a name is tried.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    pub name: String,
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Name => Ok(Self { name: token.lexeme.to_string(), span: token.span }),
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Name],
                found,
            })),
        }
    }
}

/// A literal value written directly into the expression, such as the number `2` or the variable
/// `x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    Number(LitNum),
    Symbol(LitSym),
}

impl Literal {
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(name) => name.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // a number that is too large must be reported rather than retried as a symbol
        match input.try_parse::<LitNum>() {
            Ok(num) => return Ok(Literal::Number(num)),
            Err(err) if err.fatal => return Err(err),
            Err(_) => {},
        }

        input.try_parse::<LitSym>().map(Literal::Symbol)
    }
}
