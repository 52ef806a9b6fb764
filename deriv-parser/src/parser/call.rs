use std::{fmt, ops::Range};
use super::{
    error::{kind, Error},
    expr::Expr,
    literal::LitSym,
    paren::parse_delimited,
    token::OpenParen,
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function that can be applied to a single argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Ln,
    Log,
    Exp,
}

impl Func {
    /// Every supported function.
    pub const ALL: [Func; 6] = [Func::Sin, Func::Cos, Func::Tan, Func::Ln, Func::Log, Func::Exp];

    /// Looks up a function by name, ignoring case. The names `sen` and `tg` are accepted as
    /// aliases for `sin` and `tan`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sin" | "sen" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" | "tg" => Some(Self::Tan),
            "ln" => Some(Self::Ln),
            "log" => Some(Self::Log),
            "exp" => Some(Self::Exp),
            _ => None,
        }
    }

    /// Returns the canonical name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Exp => "exp",
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A function call, such as `sin(x^2)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The function being called.
    pub func: Func,

    /// The name of the function as written, which may be an alias.
    pub name: LitSym,

    /// The argument to the function.
    pub arg: Box<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the argument.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>();

        let (func, open_paren) = match (Func::from_name(&name.name), open_paren) {
            (Some(func), Ok(open_paren)) => (func, open_paren),
            // a plain symbol; let the literal parser take it
            (None, Err(_)) => return Err(Error::new(vec![name.span], kind::NonFatal)),
            (None, Ok(_)) => return Err(Error::new_fatal(
                vec![name.span.clone()],
                kind::UnknownFunction { name: name.name },
            )),
            (Some(_), Err(_)) => return Err(Error::new_fatal(
                vec![name.span.clone()],
                kind::MissingFunctionArgument { name: name.name },
            )),
        };

        let (arg, close_span) = input.nested(|input| parse_delimited(input, &open_paren))?;
        let span = name.span.start..close_span.end;
        Ok(Self {
            func,
            name,
            arg: Box::new(arg),
            span,
            paren_span: open_paren.span.start..close_span.end,
        })
    }
}
