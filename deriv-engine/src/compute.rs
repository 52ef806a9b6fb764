//! The entry point tying the parser, the differentiation engine and the explanation together.

use deriv_parser::{
    parser::{call::Func, expr::Expr, Parser},
    tokenizer::{tokenize_complete, TokenKind},
};
use tracing::{debug, trace};
use crate::{
    error::{kind, EngineError, Error},
    options::ComputeOptions,
    symbolic::{
        canonical::canonicalize,
        derivative::differentiate,
        simplify::simplify_with_steps,
        term::{lower::{find_division_by_zero, lower}, Term},
    },
    trace::{numbering::number, TraceBuilder},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The outcome of a successful derivative computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Derivation {
    /// The rendered derivative of the requested order.
    pub result: String,

    /// The expression that was differentiated.
    pub term: Term,

    /// Every derivative up to the requested order. The first derivative is at index 0.
    pub orders: Vec<Term>,

    /// The numbered explanation of how each derivative was taken. Empty if
    /// [`ComputeOptions::steps`] is disabled.
    pub steps: Vec<String>,
}

/// Parses the derivative order as typed into a form.
///
/// Only checks that the text is an integer; [`compute`] checks that the order is positive.
pub fn parse_order(raw: &str) -> Result<i64, EngineError> {
    raw.trim().parse::<i64>().map_err(|_| {
        EngineError::Validation(Error::new(Vec::new(), kind::InvalidOrder { raw: raw.to_string() }))
    })
}

/// Returns true if the name would be read by the parser as a single symbol that is not a
/// function.
fn is_valid_variable(name: &str) -> bool {
    match &*tokenize_complete(name) {
        [token] => token.kind == TokenKind::Name && Func::from_name(name).is_none(),
        _ => false,
    }
}

/// Checks the form input, returning the trimmed variable name and the order.
fn validate<'a>(
    expression: &str,
    variable: &'a str,
    order: i64,
    options: &ComputeOptions,
) -> Result<(&'a str, u32), EngineError> {
    if expression.trim().is_empty() {
        return Err(EngineError::Validation(Error::new(Vec::new(), kind::MissingExpression)));
    }

    let variable = variable.trim();
    if variable.is_empty() {
        return Err(EngineError::Validation(Error::new(Vec::new(), kind::MissingVariable)));
    }
    if !is_valid_variable(variable) {
        return Err(EngineError::Validation(Error::new(Vec::new(), kind::InvalidVariable {
            name: variable.to_string(),
        })));
    }

    if order < 1 {
        return Err(EngineError::Validation(Error::new(Vec::new(), kind::InvalidOrder {
            raw: order.to_string(),
        })));
    }
    match u32::try_from(order) {
        Ok(order) if order <= options.max_order => Ok((variable, order)),
        _ => Err(EngineError::Validation(Error::new(Vec::new(), kind::OrderTooLarge {
            order,
            max: options.max_order,
        }))),
    }
}

/// Parses the expression into a [`Term`].
fn parse(expression: &str, options: &ComputeOptions) -> Result<Term, EngineError> {
    let expr = Parser::new(expression)
        .try_parse_full::<Expr>()
        .map_err(EngineError::Parse)?;
    let term = lower(&expr, options.max_depth).map_err(EngineError::Parse)?;

    if let Some(span) = find_division_by_zero(&expr) {
        return Err(EngineError::Differentiation(Error::new(vec![span], kind::DivisionByZero)));
    }
    if term.divides_by_zero() {
        return Err(EngineError::Differentiation(Error::new(Vec::new(), kind::DivisionByZero)));
    }

    Ok(term)
}

/// Computes the `order`-th derivative of the expression with respect to `variable`, using the
/// default [`ComputeOptions`].
///
/// ```
/// use deriv_engine::compute;
///
/// let derivation = compute("x*sen(x)", "x", 1).unwrap();
/// assert_eq!(derivation.result, "sin(x) + x*cos(x)");
/// ```
pub fn compute(expression: &str, variable: &str, order: i64) -> Result<Derivation, EngineError> {
    compute_with(expression, variable, order, &ComputeOptions::default())
}

/// Computes the `order`-th derivative of the expression with respect to `variable`.
///
/// Each derivative is simplified (and, if enabled, put in canonical order) before the next one is
/// taken. Either every requested derivative is computed, or an error is returned.
pub fn compute_with(
    expression: &str,
    variable: &str,
    order: i64,
    options: &ComputeOptions,
) -> Result<Derivation, EngineError> {
    let (variable, order) = validate(expression, variable, order, options)?;
    debug!(?options, variable, order, "computing derivative of `{}`", expression);

    let term = parse(expression, options)?;
    let mut trace = options.steps.then(|| TraceBuilder::new(variable, options.exponent_style));
    let mut orders: Vec<Term> = Vec::with_capacity(order as usize);

    for k in 1..=order {
        let current = orders.last().unwrap_or(&term);
        if let Some(trace) = trace.as_mut() {
            trace.begin_order(k, current);
        }

        let (mut next, identities) = simplify_with_steps(&differentiate(current, variable));
        trace!(order = k, ?identities, "simplified");
        if options.canonical_order {
            next = canonicalize(next, variable);
        }
        debug!(order = k, size = next.size(), "computed `{}`", next);

        if next.divides_by_zero() {
            return Err(EngineError::Differentiation(Error::new(Vec::new(), kind::DivisionByZero)));
        }
        if next.size() > options.max_nodes {
            return Err(EngineError::Differentiation(Error::new(Vec::new(), kind::ResultTooLarge {
                order: k,
                max: options.max_nodes,
            })));
        }

        if let Some(trace) = trace.as_mut() {
            trace.finish_order(k, &next);
        }
        orders.push(next);
    }

    let result = orders.last()
        .unwrap_or(&term)
        .display_with(options.exponent_style)
        .to_string();
    let steps = trace
        .map(|trace| number(&trace.into_lines()))
        .unwrap_or_default();

    Ok(Derivation { result, term, orders, steps })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use deriv_parser::parser::error::kind as parse_kind;
    use pretty_assertions::assert_eq;
    use crate::{
        options::ComputeOptionsBuilder,
        symbolic::{parse_term, simplify::simplify, term::fmt::ExponentStyle},
    };
    use super::*;

    /// Prints the term, parses the text back, and checks that both agree at a few points.
    fn assert_parses_back(term: &Term) {
        let printed = term.to_string();
        let reparsed = simplify(&parse_term(&printed));
        for x in [0.7, 1.3, 2.1] {
            assert_float_relative_eq!(reparsed.eval("x", x), term.eval("x", x), 1e-9);
        }
    }

    fn result(expression: &str) -> String {
        compute(expression, "x", 1).unwrap().result
    }

    #[test]
    fn first_derivatives() {
        assert_eq!(result("x^3"), "3x^2");
        assert_eq!(result("x*sen(x)"), "sin(x) + x*cos(x)");
        assert_eq!(result("x*sin(x)"), "sin(x) + x*cos(x)");
        assert_eq!(result("sen(x^2)"), "2x*cos(x^2)");
        assert_eq!(result("5x^2"), "10x");
        assert_eq!(result("3x^2 - 2x + 7"), "6x - 2");
        assert_eq!(result("  x^2 + 1  "), "2x");
    }

    #[test]
    fn other_variables() {
        let derivation = compute("t^2 + y*t", "t", 1).unwrap();
        assert_eq!(derivation.result, "2t + y");

        let derivation = compute("y^2 + x", " y ", 1).unwrap();
        assert_eq!(derivation.result, "2y");
    }

    #[test]
    fn higher_orders() {
        let derivation = compute("x^4", "x", 2).unwrap();
        let orders = derivation.orders.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(orders, vec!["4x^3", "12x^2"]);
        assert_eq!(derivation.result, "12x^2");
        assert_eq!(derivation.term, Term::power(Term::var("x"), 4.0));

        assert_eq!(compute("x^2", "x", 5).unwrap().result, "0");
    }

    #[test]
    fn printed_results_parse_back() {
        let sources = [
            "x + (5 - (x^2 + x))",
            "x^3 - 2x^2 + x - 5",
            "1 - x^3",
            "-x^4 + 3x",
            "sin(x)/x",
            "x*ln(x)",
            "(2x + 1)^3",
            "exp(3x)*cos(x)",
            "1/x",
            "y - (x^2 - y*x)",
        ];
        for source in sources {
            let derivation = compute(source, "x", 2).unwrap();
            assert_parses_back(&derivation.term);
            for derivative in &derivation.orders {
                assert_parses_back(derivative);
            }
        }

        let x = || Term::var("x");
        let neg = |term| Term::product(Term::constant(-1.0), term);
        let terms = [
            Term::sum(Term::var("a"), neg(Term::sum(x(), Term::constant(1.0)))),
            Term::difference(Term::constant(1.0), neg(Term::difference(x(), Term::constant(1.0)))),
            Term::sum(Term::constant(2.0), neg(neg(x()))),
            Term::sum(
                Term::product(Term::constant(-3.0), Term::power(x(), 2.0)),
                Term::product(Term::constant(-2.0), Term::sum(x(), Term::constant(1.0))),
            ),
            Term::power(neg(x()), 3.0),
        ];
        for term in &terms {
            assert_parses_back(term);
        }
    }

    #[test]
    fn negated_sums_in_results() {
        let derivation = compute("x + (5 - (x^2 + x))", "x", 1).unwrap();
        let derivative = derivation.orders.last().unwrap();
        for x in [0.7, 1.3, 2.1] {
            assert_float_relative_eq!(derivative.eval("x", x), -2.0 * x, 1e-9);
        }
        assert_parses_back(derivative);
    }

    #[test]
    fn steps() {
        let derivation = compute("x^3", "x", 1).unwrap();
        assert_eq!(derivation.steps, vec![
            "1. Computing the 1st derivative with respect to x",
            "   Original expression: f(x) = x^3",
            "2. Apply the power rule: d/dx(x^n) = n*x^(n-1)",
            "   d/dx(x^3) = 3x^2",
            "3. Result of the 1st derivative: f'(x) = 3x^2",
        ]);

        let derivation = compute("x^4", "x", 2).unwrap();
        assert!(derivation.steps.contains(&"----------".to_string()));
        assert_eq!(
            derivation.steps.last().map(String::as_str),
            Some("7. Result of the 2nd derivative: f''(x) = 12x^2"),
        );
    }

    #[test]
    fn options() {
        let options = ComputeOptionsBuilder::new()
            .exponent_style(ExponentStyle::Superscript)
            .steps(false)
            .build();
        let derivation = compute_with("x^3", "x", 1, &options).unwrap();
        assert_eq!(derivation.result, "3x²");
        assert!(derivation.steps.is_empty());

        let options = ComputeOptionsBuilder::new().canonical_order(false).build();
        assert_eq!(compute_with("1 + x^2", "x", 1, &options).unwrap().result, "2x");
        assert_eq!(compute_with("x + x^3", "x", 1, &options).unwrap().result, "1 + 3x^2");
        assert_eq!(result("x + x^3"), "3x^2 + 1");
    }

    #[test]
    fn validation_errors() {
        let err = compute("", "x", 1).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert!(err.inner().is::<kind::MissingExpression>());

        assert!(compute("   ", "x", 1).unwrap_err().inner().is::<kind::MissingExpression>());
        assert!(compute("x", "", 1).unwrap_err().inner().is::<kind::MissingVariable>());
        assert!(compute("x", "sin", 1).unwrap_err().inner().is::<kind::InvalidVariable>());
        assert!(compute("x", "2x", 1).unwrap_err().inner().is::<kind::InvalidVariable>());
        assert!(compute("x", "x y", 1).unwrap_err().inner().is::<kind::InvalidVariable>());

        for order in [0, -1] {
            let err = compute("x^2", "x", order).unwrap_err();
            assert!(matches!(err, EngineError::Validation(_)));
            assert!(err.inner().is::<kind::InvalidOrder>());
        }

        let err = compute("x^2", "x", 65).unwrap_err();
        assert_eq!(
            err.inner().downcast_ref(),
            Some(&kind::OrderTooLarge { order: 65, max: 64 }),
        );
    }

    #[test]
    fn order_from_text() {
        assert_eq!(parse_order(" 3 ").unwrap(), 3);
        assert_eq!(parse_order("-1").unwrap(), -1);

        let err = parse_order("1.5").unwrap_err();
        assert_eq!(err.category(), "validation error");
        assert_eq!(
            err.inner().downcast_ref(),
            Some(&kind::InvalidOrder { raw: "1.5".to_string() }),
        );
        assert!(parse_order("two").is_err());
    }

    #[test]
    fn parse_errors() {
        let err = compute("x +", "x", 1).unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
        assert!(err.inner().is::<parse_kind::UnexpectedEof>());

        let err = compute("foo(x)", "x", 1).unwrap_err();
        assert!(err.inner().is::<parse_kind::UnknownFunction>());

        let err = compute("(x + 1", "x", 1).unwrap_err();
        assert!(err.inner().is::<parse_kind::UnclosedParenthesis>());

        let err = compute("x^x", "x", 1).unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
        assert_eq!(err.to_string(), "exponents must be constant at position 2");
    }

    #[test]
    fn division_by_zero() {
        let err = compute("x/0", "x", 1).unwrap_err();
        assert!(matches!(err, EngineError::Differentiation(_)));
        assert_eq!(err.inner().spans, vec![2..3]);

        let err = compute("1/(-0)", "x", 1).unwrap_err();
        assert!(err.inner().is::<kind::DivisionByZero>());

        // only appears once the derivative is simplified
        let err = compute("1/(0*x)", "x", 1).unwrap_err();
        assert!(matches!(err, EngineError::Differentiation(_)));
        assert!(err.inner().is::<kind::DivisionByZero>());
    }

    #[test]
    fn result_size_limit() {
        let options = ComputeOptionsBuilder::new().max_nodes(5).build();
        let err = compute_with("x^3*sin(x)", "x", 1, &options).unwrap_err();
        assert_eq!(
            err.inner().downcast_ref(),
            Some(&kind::ResultTooLarge { order: 1, max: 5 }),
        );
    }
}
