//! Algebraic simplification of [`Term`]s.
//!
//! Simplification is a single bottom-up pass: the children of a node are simplified first, then
//! the node is rebuilt with one of the constructors in this module ([`add`], [`sub`], [`mul`],
//! [`div`], [`pow`]). Each constructor applies a bounded set of identities before building the
//! node, so the node it returns is already in simplified form. This makes [`simplify`] idempotent.
//!
//! None of the identities change the value of the expression where it is defined. Constants are
//! only folded when the result is finite, so `1/0` or `(-8)^0.5` are left as they are.
//!
//! ```
//! use deriv_engine::symbolic::{simplify::simplify, term::Term};
//!
//! // 3 * (x^1 + 0)
//! let term = Term::product(
//!     Term::constant(3.0),
//!     Term::sum(Term::power(Term::var("x"), 1.0), Term::constant(0.0)),
//! );
//! assert_eq!(simplify(&term), Term::product(Term::constant(3.0), Term::var("x")));
//! ```

pub mod step;

use crate::step_collector::StepCollector;
use step::Step;
use super::term::Term;

/// Returns the value if it is finite.
fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Splits `c * rest` into its coefficient and the remaining factor.
fn split_coefficient(term: Term) -> Result<(f64, Term), Term> {
    match term {
        Term::Product(left, right) => match *left {
            Term::Constant(coefficient) => Ok((coefficient, *right)),
            left => Err(Term::Product(Box::new(left), right)),
        },
        term => Err(term),
    }
}

/// Splits `1 / denominator` into its denominator.
fn split_reciprocal(term: Term) -> Result<Term, Term> {
    match term {
        Term::Quotient(left, right) if left.is_constant_value(1.0) => Ok(*right),
        term => Err(term),
    }
}

/// Where a factor goes in a product of two factors: symbols and their powers first, then other
/// powers, then functions. Other factors keep their place.
fn factor_rank(term: &Term) -> Option<u8> {
    match term {
        Term::Variable(_) => Some(0),
        Term::Power(base, _) if matches!(**base, Term::Variable(_)) => Some(0),
        Term::Power(..) => Some(1),
        Term::Func(..) => Some(2),
        _ => None,
    }
}

/// Builds `left + right`.
pub fn add(left: Term, right: Term, steps: &mut dyn StepCollector<Step>) -> Term {
    if let (Term::Constant(l), Term::Constant(r)) = (&left, &right) {
        if let Some(value) = finite(l + r) {
            steps.push(Step::FoldConstants);
            return Term::Constant(value);
        }
    }

    if right.is_constant_value(0.0) {
        steps.push(Step::AddZero);
        left
    } else if left.is_constant_value(0.0) {
        steps.push(Step::AddZero);
        right
    } else {
        Term::sum(left, right)
    }
}

/// Builds `left - right`.
pub fn sub(left: Term, right: Term, steps: &mut dyn StepCollector<Step>) -> Term {
    if let (Term::Constant(l), Term::Constant(r)) = (&left, &right) {
        if let Some(value) = finite(l - r) {
            steps.push(Step::FoldConstants);
            return Term::Constant(value);
        }
    }

    if right.is_constant_value(0.0) {
        steps.push(Step::SubtractZero);
        left
    } else if left.is_constant_value(0.0) {
        steps.push(Step::SubtractFromZero);
        neg(right, steps)
    } else {
        Term::difference(left, right)
    }
}

/// Builds `-term`, as a product with `-1`.
pub fn neg(term: Term, steps: &mut dyn StepCollector<Step>) -> Term {
    mul(Term::Constant(-1.0), term, steps)
}

/// Builds `left * right`, gathering constant coefficients to the left of the product.
pub fn mul(left: Term, right: Term, steps: &mut dyn StepCollector<Step>) -> Term {
    if let (Term::Constant(l), Term::Constant(r)) = (&left, &right) {
        return match finite(l * r) {
            Some(value) => {
                steps.push(Step::FoldConstants);
                Term::Constant(value)
            },
            None => Term::product(left, right),
        };
    }

    if left.is_constant_value(0.0) || right.is_constant_value(0.0) {
        steps.push(Step::MultiplyZero);
        return Term::Constant(0.0);
    }
    if left.is_constant_value(1.0) {
        steps.push(Step::MultiplyOne);
        return right;
    }
    if right.is_constant_value(1.0) {
        steps.push(Step::MultiplyOne);
        return left;
    }

    // at most one side is a constant from here on
    if right.as_constant().is_some() {
        steps.push(Step::MoveCoefficient);
        return mul(right, left, steps);
    }

    if let Term::Constant(coefficient) = left {
        let right = match split_coefficient(right) {
            Ok((inner, rest)) => match finite(coefficient * inner) {
                Some(combined) => {
                    steps.push(Step::CombineCoefficients);
                    return mul(Term::Constant(combined), rest, steps);
                },
                None => Term::product(Term::Constant(inner), rest),
            },
            Err(right) => right,
        };

        return match split_reciprocal(right) {
            Ok(denominator) => {
                steps.push(Step::ReciprocalProduct);
                div(Term::Constant(coefficient), denominator, steps)
            },
            Err(right) => Term::product(Term::Constant(coefficient), right),
        };
    }

    let left = match split_coefficient(left) {
        Ok((coefficient, rest)) => {
            steps.push(Step::CombineCoefficients);
            let product = mul(rest, right, steps);
            return mul(Term::Constant(coefficient), product, steps);
        },
        Err(left) => left,
    };
    let right = match split_coefficient(right) {
        Ok((coefficient, rest)) => {
            steps.push(Step::CombineCoefficients);
            let product = mul(left, rest, steps);
            return mul(Term::Constant(coefficient), product, steps);
        },
        Err(right) => right,
    };

    let left = match split_reciprocal(left) {
        Ok(denominator) => {
            steps.push(Step::ReciprocalProduct);
            return div(right, denominator, steps);
        },
        Err(left) => left,
    };
    let right = match split_reciprocal(right) {
        Ok(denominator) => {
            steps.push(Step::ReciprocalProduct);
            return div(left, denominator, steps);
        },
        Err(right) => right,
    };

    match (factor_rank(&left), factor_rank(&right)) {
        (Some(l), Some(r)) if r < l => {
            steps.push(Step::ReorderFactors);
            Term::product(right, left)
        },
        _ => Term::product(left, right),
    }
}

/// Builds `left / right`.
pub fn div(left: Term, right: Term, steps: &mut dyn StepCollector<Step>) -> Term {
    if let (Term::Constant(l), Term::Constant(r)) = (&left, &right) {
        if *r != 0.0 {
            if let Some(value) = finite(l / r) {
                steps.push(Step::FoldConstants);
                return Term::Constant(value);
            }
        }
    }

    if right.is_constant_value(1.0) {
        steps.push(Step::DivideOne);
        left
    } else if left.is_constant_value(0.0) && !right.is_constant_value(0.0) {
        steps.push(Step::DivideZero);
        Term::Constant(0.0)
    } else if left == right && !right.is_constant_value(0.0) {
        steps.push(Step::DivideSelf);
        Term::Constant(1.0)
    } else {
        Term::quotient(left, right)
    }
}

/// Builds `base ^ exponent`.
pub fn pow(base: Term, exponent: f64, steps: &mut dyn StepCollector<Step>) -> Term {
    if exponent == 0.0 {
        steps.push(Step::PowerZero);
        return Term::Constant(1.0);
    }
    if exponent == 1.0 {
        steps.push(Step::PowerOne);
        return base;
    }

    if let Term::Constant(value) = base {
        if let Some(value) = finite(value.powf(exponent)) {
            steps.push(Step::FoldConstants);
            return Term::Constant(value);
        }
    }

    Term::power(base, exponent)
}

/// Base implementation of the simplification algorithm.
fn inner_simplify(term: &Term, steps: &mut dyn StepCollector<Step>) -> Term {
    match term {
        Term::Constant(_) | Term::Variable(_) => term.clone(),
        Term::Sum(left, right) => {
            let (left, right) = (inner_simplify(left, steps), inner_simplify(right, steps));
            add(left, right, steps)
        },
        Term::Difference(left, right) => {
            let (left, right) = (inner_simplify(left, steps), inner_simplify(right, steps));
            sub(left, right, steps)
        },
        Term::Product(left, right) => {
            let (left, right) = (inner_simplify(left, steps), inner_simplify(right, steps));
            mul(left, right, steps)
        },
        Term::Quotient(left, right) => {
            let (left, right) = (inner_simplify(left, steps), inner_simplify(right, steps));
            div(left, right, steps)
        },
        Term::Power(base, exponent) => {
            let base = inner_simplify(base, steps);
            pow(base, *exponent, steps)
        },
        Term::Func(func, arg) => Term::func(*func, inner_simplify(arg, steps)),
    }
}

/// Simplify the given term.
pub fn simplify(term: &Term) -> Term {
    inner_simplify(term, &mut ())
}

/// Simplify the given term, also returning the identities that were applied, in the order they
/// were applied.
pub fn simplify_with_steps(term: &Term) -> (Term, Vec<Step>) {
    let mut steps = Vec::new();
    let term = inner_simplify(term, &mut steps);
    (term, steps)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::parse_term;
    use super::*;

    fn simplified(source: &str) -> String {
        simplify(&parse_term(source)).to_string()
    }

    #[test]
    fn identities() {
        assert_eq!(simplified("x + 0"), "x");
        assert_eq!(simplified("0 + x"), "x");
        assert_eq!(simplified("x - 0"), "x");
        assert_eq!(simplified("x * 0"), "0");
        assert_eq!(simplified("0 * x"), "0");
        assert_eq!(simplified("x * 1"), "x");
        assert_eq!(simplified("1 * x"), "x");
        assert_eq!(simplified("x / 1"), "x");
        assert_eq!(simplified("x^0"), "1");
        assert_eq!(simplified("x^1"), "x");
        assert_eq!(simplified("0 - x"), "-x");
        assert_eq!(simplified("0 / x"), "0");
        assert_eq!(simplified("sin(x) / sin(x)"), "1");
    }

    #[test]
    fn constant_folding() {
        assert_eq!(simplified("2 + 3"), "5");
        assert_eq!(simplified("2 - 3"), "-1");
        assert_eq!(simplified("2 * 3 * x"), "6x");
        assert_eq!(simplified("3 / 2"), "1.5");
        assert_eq!(simplified("2^3"), "8");
        assert_eq!(simplified("x^(2 - 1)"), "x");
    }

    #[test]
    fn no_folding_to_undefined_values() {
        assert_eq!(simplify(&parse_term("1/0")), Term::quotient(Term::constant(1.0), Term::constant(0.0)));
        assert_eq!(simplify(&parse_term("(-8)^0.5")), Term::power(Term::constant(-8.0), 0.5));
        assert_eq!(simplified("0/0"), "0/0");
    }

    #[test]
    fn coefficients() {
        assert_eq!(simplified("x * 3"), "3x");
        assert_eq!(simplified("2(3x)"), "6x");
        assert_eq!(simplified("(2x) * y"), "2x*y");
        assert_eq!(simplified("x * (2y)"), "2x*y");
        assert_eq!(simplified("-(-x)"), "x");
        assert_eq!(simplified("-(3x)"), "-3x");
    }

    #[test]
    fn reciprocals() {
        assert_eq!(simplified("(1/x) * y"), "y/x");
        assert_eq!(simplified("y * (1/x)"), "y/x");
        assert_eq!(simplified("2 * (1/x)"), "2/x");
    }

    #[test]
    fn factor_order() {
        assert_eq!(simplified("cos(x) * x"), "x*cos(x)");
        assert_eq!(simplified("sin(x) * x^2"), "x^2*sin(x)");
        assert_eq!(simplified("(x + 1)^2 * x"), "x*(x + 1)^2");
        assert_eq!(simplified("sin(x) * (x + 1)"), "sin(x)*(x + 1)");
    }

    #[test]
    fn idempotence() {
        let sources = [
            "x*sin(x) + 0",
            "2 * x * 3 * cos(x) * x",
            "(1/cos(x))^2 * (2x + 0)",
            "0 - (x * 1)^1 / 1",
            "(3x^2 - 0) * (1/(x*ln(10)))",
            "exp(x^2) * (2 * x^1)",
            "((x + 1) * 0 + 1 * (x - 1)) / (x - 1)^2",
        ];

        for source in sources {
            let once = simplify(&parse_term(source));
            let twice = simplify(&once);
            assert_eq!(once, twice, "simplifying `{}` twice changed it", source);
        }
    }

    #[test]
    fn collects_steps() {
        let (term, steps) = simplify_with_steps(&parse_term("x*1 + 0"));
        assert_eq!(term, Term::var("x"));
        assert_eq!(steps, vec![Step::MultiplyOne, Step::AddZero]);
    }
}
