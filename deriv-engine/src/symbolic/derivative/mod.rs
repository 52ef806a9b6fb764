//! Symbolic differentiation of [`Term`]s.

use std::f64::consts::LN_10;
use tracing::trace;
use super::{
    canonical::canonicalize,
    simplify::simplify,
    term::{Func, Term},
};

/// A differentiation rule, selected by the shape of a term.
///
/// [`Rule::of`] is the single place that decides which rule applies to a term, so the derivative
/// and the explanation of the derivative always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `c' = 0`, for numbers and symbols other than the variable.
    Constant,

    /// `x' = 1`
    Variable,

    /// `(f + g)' = f' + g'`
    Sum,

    /// `(f - g)' = f' - g'`
    Difference,

    /// `(f * g)' = f' * g + f * g'`
    Product,

    /// `(f / g)' = (f' * g - f * g') / g^2`
    Quotient,

    /// `(x^n)' = n * x^(n - 1)`
    Power,

    /// `(u^n)' = n * u^(n - 1) * u'`
    GeneralPower,

    /// `sin(u)' = cos(u) * u'`
    Sin,

    /// `cos(u)' = -sin(u) * u'`
    Cos,

    /// `tan(u)' = (1 / cos(u))^2 * u'`
    Tan,

    /// `ln(u)' = (1 / u) * u'`
    Ln,

    /// `log(u)' = (1 / (u * ln(10))) * u'`
    Log,

    /// `exp(u)' = exp(u) * u'`
    Exp,
}

impl Rule {
    /// Returns the rule that differentiates the given term with respect to `var`.
    pub fn of(term: &Term, var: &str) -> Self {
        match term {
            Term::Constant(_) => Self::Constant,
            Term::Variable(name) if name == var => Self::Variable,
            Term::Variable(_) => Self::Constant,
            Term::Sum(..) => Self::Sum,
            Term::Difference(..) => Self::Difference,
            Term::Product(..) => Self::Product,
            Term::Quotient(..) => Self::Quotient,
            Term::Power(base, _) if base.is_var(var) => Self::Power,
            Term::Power(..) => Self::GeneralPower,
            Term::Func(func, _) => match func {
                Func::Sin => Self::Sin,
                Func::Cos => Self::Cos,
                Func::Tan => Self::Tan,
                Func::Ln => Self::Ln,
                Func::Log => Self::Log,
                Func::Exp => Self::Exp,
            },
        }
    }

    /// Returns the name of the rule, as in "the power rule".
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "constant rule",
            Self::Variable => "variable rule",
            Self::Sum => "sum rule",
            Self::Difference => "difference rule",
            Self::Product => "product rule",
            Self::Quotient => "quotient rule",
            Self::Power => "power rule",
            Self::GeneralPower => "generalized power rule",
            Self::Sin => "sine rule",
            Self::Cos => "cosine rule",
            Self::Tan => "tangent rule",
            Self::Ln => "natural logarithm rule",
            Self::Log => "logarithm rule",
            Self::Exp => "exponential rule",
        }
    }

    /// Returns the general form of the rule, written for the variable `var`.
    pub fn formula(&self, var: &str) -> String {
        let d = format!("d/d{}", var);
        match self {
            Self::Constant => format!("{}(c) = 0", d),
            Self::Variable => format!("{}({}) = 1", d, var),
            Self::Sum => "(f + g)' = f' + g'".to_string(),
            Self::Difference => "(f - g)' = f' - g'".to_string(),
            Self::Product => "(f*g)' = f'*g + f*g'".to_string(),
            Self::Quotient => "(f/g)' = (f'*g - f*g')/g^2".to_string(),
            Self::Power => format!("{}({}^n) = n*{}^(n-1)", d, var, var),
            Self::GeneralPower => format!("{}(u^n) = n*u^(n-1)*u'", d),
            Self::Sin => format!("{}(sin(u)) = cos(u)*u'", d),
            Self::Cos => format!("{}(cos(u)) = -sin(u)*u'", d),
            Self::Tan => format!("{}(tan(u)) = (1/cos(u))^2*u'", d),
            Self::Ln => format!("{}(ln(u)) = u'/u", d),
            Self::Log => format!("{}(log(u)) = u'/(u*ln(10))", d),
            Self::Exp => format!("{}(exp(u)) = exp(u)*u'", d),
        }
    }

    /// Returns true if the rule combines the derivatives of two operands, `f` and `g`.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Sum | Self::Difference | Self::Product | Self::Quotient)
    }
}

/// Computes the derivative of the given term with respect to `var`.
///
/// The result is built exactly as the rule prescribes and is not simplified; for example, the
/// derivative of `x * 2` is `1 * 2 + x * 0`. Use [`differentiate_n`] to get a readable result.
pub fn differentiate(term: &Term, var: &str) -> Term {
    let rule = Rule::of(term, var);
    trace!(?rule, "differentiating `{}`", term);

    match term {
        Term::Constant(_) => Term::Constant(0.0),
        Term::Variable(name) => Term::Constant(if name == var { 1.0 } else { 0.0 }),
        Term::Sum(left, right) => {
            Term::sum(differentiate(left, var), differentiate(right, var))
        },
        Term::Difference(left, right) => {
            Term::difference(differentiate(left, var), differentiate(right, var))
        },
        Term::Product(left, right) => Term::sum(
            Term::product(differentiate(left, var), (**right).clone()),
            Term::product((**left).clone(), differentiate(right, var)),
        ),
        Term::Quotient(left, right) => Term::quotient(
            Term::difference(
                Term::product(differentiate(left, var), (**right).clone()),
                Term::product((**left).clone(), differentiate(right, var)),
            ),
            Term::power((**right).clone(), 2.0),
        ),
        Term::Power(base, exponent) if rule == Rule::Power => Term::product(
            Term::Constant(*exponent),
            Term::power((**base).clone(), exponent - 1.0),
        ),
        Term::Power(base, exponent) => Term::product(
            Term::product(
                Term::Constant(*exponent),
                Term::power((**base).clone(), exponent - 1.0),
            ),
            differentiate(base, var),
        ),
        Term::Func(func, arg) => {
            let outer = match func {
                Func::Sin => Term::func(Func::Cos, (**arg).clone()),
                Func::Cos => Term::product(
                    Term::Constant(-1.0),
                    Term::func(Func::Sin, (**arg).clone()),
                ),
                Func::Tan => Term::power(
                    Term::quotient(Term::Constant(1.0), Term::func(Func::Cos, (**arg).clone())),
                    2.0,
                ),
                Func::Ln => Term::quotient(Term::Constant(1.0), (**arg).clone()),
                Func::Log => Term::quotient(
                    Term::Constant(1.0),
                    Term::product((**arg).clone(), Term::Constant(LN_10)),
                ),
                Func::Exp => term.clone(),
            };
            Term::product(outer, differentiate(arg, var))
        },
    }
}

/// Computes the simplified derivative of the given term, putting the terms of a resulting sum in
/// descending order of their power of `var`.
pub fn differentiate_simplified(term: &Term, var: &str) -> Term {
    canonicalize(simplify(&differentiate(term, var)), var)
}

/// Computes the first `n` derivatives of the given term with respect to `var`. Each derivative is
/// simplified and put in canonical order before the next one is taken.
///
/// The returned vector holds the first derivative at index 0, the second at index 1, and so on.
pub fn differentiate_n(term: &Term, var: &str, n: usize) -> Vec<Term> {
    let mut derivatives: Vec<Term> = Vec::with_capacity(n);
    for _ in 0..n {
        let current = derivatives.last().unwrap_or(term);
        let next = differentiate_simplified(current, var);
        derivatives.push(next);
    }
    derivatives
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use crate::symbolic::parse_term;
    use super::*;

    fn derive(source: &str) -> String {
        differentiate_simplified(&parse_term(source), "x").to_string()
    }

    #[test]
    fn constants_and_symbols() {
        assert_eq!(differentiate(&Term::constant(7.5), "x"), Term::constant(0.0));
        assert_eq!(differentiate(&Term::var("x"), "x"), Term::constant(1.0));
        assert_eq!(differentiate(&Term::var("y"), "x"), Term::constant(0.0));
        assert_eq!(differentiate(&Term::var("x"), "t"), Term::constant(0.0));
    }

    #[test]
    fn rules_follow_the_table() {
        let x = Term::var("x");
        let sum = Term::sum(x.clone(), Term::func(Func::Sin, x.clone()));
        assert_eq!(differentiate(&sum, "x"), Term::sum(
            Term::constant(1.0),
            Term::product(Term::func(Func::Cos, x.clone()), Term::constant(1.0)),
        ));

        let power = Term::power(x.clone(), 3.0);
        assert_eq!(differentiate(&power, "x"), Term::product(
            Term::constant(3.0),
            Term::power(x.clone(), 2.0),
        ));

        let log = Term::func(Func::Log, x.clone());
        assert_eq!(differentiate(&log, "x"), Term::product(
            Term::quotient(Term::constant(1.0), Term::product(x.clone(), Term::constant(LN_10))),
            Term::constant(1.0),
        ));
    }

    #[test]
    fn power_rule() {
        assert_eq!(derive("x^3"), "3x^2");
        assert_eq!(derive("x^-1"), "-x^(-2)");
        assert_eq!(derive("x^0.5"), "0.5x^(-0.5)");
        assert_eq!(derive("(x)^4"), "4x^3");
    }

    #[test]
    fn constant_multiple() {
        assert_eq!(derive("5x^2"), "10x");
        assert_eq!(derive("-2x"), "-2");
        assert_eq!(derive("y*x"), "y");
        assert_eq!(derive("7"), "0");
    }

    #[test]
    fn product_rule() {
        assert_eq!(derive("x*sen(x)"), "sin(x) + x*cos(x)");
        assert_eq!(derive("x*ln(x)"), "ln(x) + 1");
    }

    #[test]
    fn quotient_rule() {
        assert_eq!(derive("1/x"), "-1/x^2");
        assert_eq!(derive("sin(x)/x"), "(x*cos(x) - sin(x))/x^2");
    }

    #[test]
    fn chain_rule() {
        assert_eq!(derive("sen(x^2)"), "2x*cos(x^2)");
        assert_eq!(derive("exp(3x)"), "3exp(3x)");
        assert_eq!(derive("cos(x)"), "-sin(x)");
        assert_eq!(derive("tan(x)"), "(1/cos(x))^2");
        assert_eq!(derive("ln(x)"), "1/x");
        assert_eq!(derive("(2x + 1)^3"), "6(2x + 1)^2");
    }

    #[test]
    fn linearity() {
        let (a, b) = (parse_term("x^3"), parse_term("sin(x)"));
        let sum = Term::sum(a.clone(), b.clone());
        assert_eq!(
            differentiate(&sum, "x"),
            Term::sum(differentiate(&a, "x"), differentiate(&b, "x")),
        );
    }

    #[test]
    fn polynomial_order() {
        assert_eq!(derive("x + x^3 + 2x^2 + 1"), "3x^2 + 4x + 1");
        assert_eq!(derive("sin(x) - x^4 + 3x^2"), "-4x^3 + 6x + cos(x)");
    }

    #[test]
    fn higher_orders() {
        let orders = differentiate_n(&parse_term("x^4"), "x", 2)
            .into_iter()
            .map(|term| term.to_string())
            .collect::<Vec<_>>();
        assert_eq!(orders, vec!["4x^3", "12x^2"]);

        let orders = differentiate_n(&parse_term("sin(x)"), "x", 4)
            .into_iter()
            .map(|term| term.to_string())
            .collect::<Vec<_>>();
        assert_eq!(orders, vec!["cos(x)", "-sin(x)", "-cos(x)", "sin(x)"]);
    }

    /// Compares the symbolic derivative against a central finite difference at a few points.
    #[test]
    fn agrees_with_finite_differences() {
        let sources = [
            "x^3 - 2x + 1",
            "x*sin(x)",
            "sin(x^2)",
            "cos(3x)/x",
            "tan(x)",
            "ln(x^2 + 1)",
            "log(x)",
            "exp(-x^2)",
            "(2x + 1)^0.5",
            "y*x^2 - y",
        ];
        let h = 1e-6;

        for source in sources {
            let term = parse_term(source);
            let derivative = differentiate_simplified(&term, "x");
            for x in [0.3, 0.7, 1.1] {
                let numeric = (term.eval("x", x + h) - term.eval("x", x - h)) / (2.0 * h);
                assert_float_relative_eq!(derivative.eval("x", x), numeric, 1e-5);
            }
        }
    }
}
