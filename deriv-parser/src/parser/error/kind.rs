use ariadne::Fmt;
use deriv_attrs::ErrorKind;
use deriv_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// Tells the caller to backtrack and try something else. Never shown to the user.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "this is a bug in the parser"
)]
pub struct NonFatal;

/// The source code contained nothing but whitespace.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the expression is empty",
    labels = [format!("add an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyExpression;

/// The expression ended where an operand was needed, as in `x +`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("you might need to add another {} here", "term".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A complete expression was followed by something that does not continue it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of expression",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "terms must be joined with an operator such as `+`, `-`, `*` or `/`",
)]
pub struct ExpectedEof;

/// A token appeared where it cannot be used, such as the `*` in `x + * 2`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("found {} here", found.describe())],
    help = {
        let mut names = expected.iter().map(|kind| kind.describe()).collect::<Vec<_>>();
        names.dedup();
        format!("expected {}", names.join(" or "))
    },
)]
pub struct UnexpectedToken {
    pub expected: &'static [TokenKind],
    pub found: TokenKind,
}

/// A parenthesis has no partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// True for a `(` that is never closed, false for a `)` that was never opened.
    pub opening: bool,
}

/// `()` with nothing inside.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A name followed by parentheses is not one of the supported functions.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function is not supported"],
    help = format!(
        "the supported functions are: {}",
        "sin (sen), cos, tan (tg), ln, log, exp".fg(EXPR),
    ),
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,
}

/// A supported function was not followed by a parenthesized argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument for `{}`", name),
    labels = ["this function needs an argument"],
    help = format!("write the argument in parentheses, such as `{}(x)`", name),
)]
pub struct MissingFunctionArgument {
    /// The name of the function.
    pub name: String,
}

/// A number literal too large for an `f64`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "number is too large",
    labels = ["this number cannot be represented"],
)]
pub struct InvalidNumber;

/// A character that is not part of any token, such as `$`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", lexeme),
    labels = ["this character is not allowed in an expression"],
)]
pub struct UnexpectedCharacter {
    pub lexeme: String,
}

/// Parentheses, function calls, or signs were nested too deeply.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = ["nesting starts going too deep here"],
    help = format!("at most {} levels of nesting are supported", max),
)]
pub struct TooDeeplyNested {
    /// The maximum supported nesting depth.
    pub max: usize,
}
