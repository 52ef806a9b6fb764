use ariadne::Fmt;
use deriv_attrs::ErrorKind;
use deriv_error::{ErrorKind, EXPR};

/// The exponent of a power refers to a symbol.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "exponents must be constant",
    labels = [format!("`{}` is not a constant", name)],
    help = format!(
        "only powers with a numeric exponent, such as {}, can be differentiated",
        "x^3".fg(EXPR),
    ),
)]
pub struct NonConstantExponent {
    /// The symbol found in the exponent.
    pub name: String,
}

/// The exponent of a power does not evaluate to a finite number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "exponent is not a finite number",
    labels = ["this exponent evaluates to infinity or an undefined value"],
)]
pub struct InvalidExponent;

/// The expression is nested more deeply than allowed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is too large",
    labels = ["this part of the expression is nested too deeply"],
    help = format!("expressions can be at most {} levels deep", max),
)]
pub struct ExpressionTooLarge {
    /// The maximum supported depth.
    pub max: usize,
}

/// No expression was given.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression",
    help = format!("enter a function to differentiate, such as {}", "x^2 + sin(x)".fg(EXPR)),
)]
pub struct MissingExpression;

/// No variable was given.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing variable",
    help = format!("enter the variable to differentiate with respect to, such as {}", "x".fg(EXPR)),
)]
pub struct MissingVariable;

/// The variable is not a valid symbol name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` cannot be used as a variable", name),
    help = "variables start with a letter and may contain only letters, digits and underscores, and cannot be a function name",
)]
pub struct InvalidVariable {
    /// The rejected variable name.
    pub name: String,
}

/// The derivative order is not a positive integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid derivative order", raw),
    help = "the order must be a positive integer, such as 1 or 2",
)]
pub struct InvalidOrder {
    /// The order as it was given.
    pub raw: String,
}

/// The derivative order exceeds the configured maximum.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("derivative order {} is too large", order),
    help = format!("at most {} derivatives can be computed at once", max),
)]
pub struct OrderTooLarge {
    /// The requested order.
    pub order: i64,

    /// The maximum supported order.
    pub max: u32,
}

/// A quotient divides by the constant zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this divisor is zero"],
    help = "the expression is undefined everywhere, so it has no derivative",
)]
pub struct DivisionByZero;

/// A derivative grew past the configured size limit.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the derivative of order {} is too large to compute", order),
    help = format!("results are limited to {} nodes; try a lower order", max),
)]
pub struct ResultTooLarge {
    /// The order of the derivative that grew too large.
    pub order: u32,

    /// The maximum supported number of nodes.
    pub max: usize,
}
