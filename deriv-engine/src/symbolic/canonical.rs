//! Ordering of the terms of a sum by descending power of the variable.

use super::{simplify, term::Term};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Plus,
    Minus,
}

impl std::ops::Not for Sign {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }
}

/// Collects the terms of a chain of sums and differences, along with the sign each term is
/// applied with.
fn flatten(term: Term, sign: Sign, out: &mut Vec<(Sign, Term)>) {
    match term {
        Term::Sum(left, right) => {
            flatten(*left, sign, out);
            flatten(*right, sign, out);
        },
        Term::Difference(left, right) => {
            flatten(*left, sign, out);
            flatten(*right, !sign, out);
        },
        term => out.push((sign, term)),
    }
}

/// Returns the power of `var` in the term, if the term is a monomial in `var`. Any other term,
/// including constants, has a degree of 0.
pub fn degree(term: &Term, var: &str) -> f64 {
    match term {
        Term::Variable(name) if name == var => 1.0,
        Term::Power(base, exponent) if base.is_var(var) => *exponent,
        Term::Product(left, right) if matches!(**left, Term::Constant(_)) => degree(right, var),
        _ => 0.0,
    }
}

/// Reorders the terms of a sum or difference so that the highest powers of `var` come first.
/// Terms of equal degree keep their relative order, and each term keeps its sign. Any other term
/// is returned unchanged.
///
/// A leading term that was subtracted is negated in place, so `1 - x^2` becomes `-x^2 + 1`.
pub fn canonicalize(term: Term, var: &str) -> Term {
    if !term.is_additive() {
        return term;
    }

    let mut terms = Vec::new();
    flatten(term, Sign::Plus, &mut terms);

    // `sort_by` is stable
    terms.sort_by(|(_, a), (_, b)| degree(b, var).total_cmp(&degree(a, var)));

    terms.into_iter()
        .fold(None, |acc, (sign, term)| Some(match (acc, sign) {
            (None, Sign::Plus) => term,
            (None, Sign::Minus) => simplify::neg(term, &mut ()),
            (Some(acc), Sign::Plus) => Term::sum(acc, term),
            (Some(acc), Sign::Minus) => Term::difference(acc, term),
        }))
        .unwrap_or(Term::Constant(0.0))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::{parse_term, simplify::simplify};
    use super::*;

    fn canonical(source: &str, var: &str) -> String {
        canonicalize(simplify(&parse_term(source)), var).to_string()
    }

    #[test]
    fn degrees() {
        assert_eq!(degree(&parse_term("x"), "x"), 1.0);
        assert_eq!(degree(&parse_term("x^4"), "x"), 4.0);
        assert_eq!(degree(&parse_term("-3x^2"), "x"), 2.0);
        assert_eq!(degree(&parse_term("7"), "x"), 0.0);
        assert_eq!(degree(&parse_term("sin(x)"), "x"), 0.0);
        assert_eq!(degree(&parse_term("y^2"), "x"), 0.0);
    }

    #[test]
    fn descending_powers() {
        assert_eq!(canonical("3 + x^2 - 2x", "x"), "x^2 - 2x + 3");
        assert_eq!(canonical("x + x^3 + x^2", "x"), "x^3 + x^2 + x");
        assert_eq!(canonical("x - (x^2 - x^3)", "x"), "x^3 - x^2 + x");
    }

    #[test]
    fn leading_term_keeps_its_sign() {
        assert_eq!(canonical("1 - x^3", "x"), "-x^3 + 1");
        assert_eq!(canonical("2 - 4x^2", "x"), "-4x^2 + 2");
    }

    #[test]
    fn equal_degrees_keep_their_order() {
        assert_eq!(canonical("sin(x) + 2 + cos(x)", "x"), "sin(x) + 2 + cos(x)");
        assert_eq!(canonical("y^2 + y", "x"), "y^2 + y");
        assert_eq!(canonical("t + t^2", "t"), "t^2 + t");
    }

    #[test]
    fn other_terms_are_unchanged() {
        assert_eq!(canonical("x*(1 + x^2)", "x"), "x*(1 + x^2)");
        assert_eq!(canonical("x^2", "x"), "x^2");
    }

    #[test]
    fn idempotent() {
        let once = canonicalize(simplify(&parse_term("x - 5 + 2x^3 - x^2")), "x");
        assert_eq!(once.to_string(), "2x^3 - x^2 + x - 5");
        assert_eq!(canonicalize(once.clone(), "x"), once);

        // the chain nests the way the parser groups `+` and `-`
        assert_eq!(simplify(&parse_term(&once.to_string())), once);
    }
}
