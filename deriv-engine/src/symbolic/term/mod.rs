pub mod fmt;
pub mod lower;

pub use deriv_parser::parser::call::Func;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node of a single-variable expression tree.
///
/// Unlike the [`deriv_parser::parser::expr::Expr`] nodes produced by the parser, a [`Term`] keeps
/// no span information and no parentheses; its shape alone determines grouping. Every node owns
/// its children, and every transformation (differentiation, simplification, canonical ordering)
/// produces a new tree.
///
/// Constants and exponents are always finite.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Term {
    /// A literal number.
    Constant(f64),

    /// A named symbol. Only the symbol matching the differentiation variable varies; all others
    /// behave as constants.
    Variable(String),

    /// `left + right`
    Sum(Box<Term>, Box<Term>),

    /// `left - right`
    Difference(Box<Term>, Box<Term>),

    /// `left * right`
    Product(Box<Term>, Box<Term>),

    /// `left / right`
    Quotient(Box<Term>, Box<Term>),

    /// `base ^ exponent`, where the exponent is a constant.
    Power(Box<Term>, f64),

    /// A function applied to a single argument, such as `sin(x)`.
    Func(Func, Box<Term>),
}

impl Term {
    /// Creates a [`Term::Constant`].
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Creates a [`Term::Variable`].
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates a [`Term::Sum`].
    pub fn sum(left: Term, right: Term) -> Self {
        Self::Sum(Box::new(left), Box::new(right))
    }

    /// Creates a [`Term::Difference`].
    pub fn difference(left: Term, right: Term) -> Self {
        Self::Difference(Box::new(left), Box::new(right))
    }

    /// Creates a [`Term::Product`].
    pub fn product(left: Term, right: Term) -> Self {
        Self::Product(Box::new(left), Box::new(right))
    }

    /// Creates a [`Term::Quotient`].
    pub fn quotient(left: Term, right: Term) -> Self {
        Self::Quotient(Box::new(left), Box::new(right))
    }

    /// Creates a [`Term::Power`].
    pub fn power(base: Term, exponent: f64) -> Self {
        Self::Power(Box::new(base), exponent)
    }

    /// Creates a [`Term::Func`].
    pub fn func(func: Func, arg: Term) -> Self {
        Self::Func(func, Box::new(arg))
    }

    /// Returns the value of the term if it is a [`Term::Constant`].
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the term is the constant `value`.
    pub fn is_constant_value(&self, value: f64) -> bool {
        self.as_constant() == Some(value)
    }

    /// Returns true if the term is exactly the variable with the given name.
    pub fn is_var(&self, name: &str) -> bool {
        matches!(self, Self::Variable(var) if var == name)
    }

    /// Returns true if the term is a [`Term::Sum`] or [`Term::Difference`].
    pub fn is_additive(&self) -> bool {
        matches!(self, Self::Sum(..) | Self::Difference(..))
    }

    /// Returns true if the term is a bare constant, a bare symbol, a power of a symbol, or one of
    /// the latter two with a constant coefficient, such as `3`, `x`, `x^4`, `2x` or `-5x^2`.
    ///
    /// The derivative of such a term can be stated in one line.
    pub fn is_monomial(&self) -> bool {
        fn is_symbol_power(term: &Term) -> bool {
            match term {
                Term::Variable(_) => true,
                Term::Power(base, _) => matches!(**base, Term::Variable(_)),
                _ => false,
            }
        }

        match self {
            Self::Constant(_) => true,
            Self::Product(left, right) => {
                matches!(**left, Term::Constant(_)) && is_symbol_power(right)
            },
            term => is_symbol_power(term),
        }
    }

    /// Returns the number of nodes along the longest path from this node to a leaf, counting
    /// both ends. A leaf has a depth of 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Constant(_) | Self::Variable(_) => 1,
            Self::Sum(left, right)
            | Self::Difference(left, right)
            | Self::Product(left, right)
            | Self::Quotient(left, right) => 1 + left.depth().max(right.depth()),
            Self::Power(base, _) => 1 + base.depth(),
            Self::Func(_, arg) => 1 + arg.depth(),
        }
    }

    /// Returns the total number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut stack = vec![self];
        while let Some(term) = stack.pop() {
            size += 1;
            match term {
                Self::Constant(_) | Self::Variable(_) => {},
                Self::Sum(left, right)
                | Self::Difference(left, right)
                | Self::Product(left, right)
                | Self::Quotient(left, right) => {
                    stack.push(left);
                    stack.push(right);
                },
                Self::Power(base, _) | Self::Func(_, base) => stack.push(base),
            }
        }
        size
    }

    /// Returns true if any quotient in the tree divides by the literal constant zero.
    pub fn divides_by_zero(&self) -> bool {
        match self {
            Self::Constant(_) | Self::Variable(_) => false,
            Self::Quotient(_, right) if right.is_constant_value(0.0) => true,
            Self::Sum(left, right)
            | Self::Difference(left, right)
            | Self::Product(left, right)
            | Self::Quotient(left, right) => left.divides_by_zero() || right.divides_by_zero(),
            Self::Power(base, _) | Self::Func(_, base) => base.divides_by_zero(),
        }
    }
}

#[cfg(test)]
impl Term {
    /// Evaluates the term with `var` bound to `x`. Every other symbol evaluates to `2`.
    pub(crate) fn eval(&self, var: &str, x: f64) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Variable(name) => if name == var { x } else { 2.0 },
            Self::Sum(left, right) => left.eval(var, x) + right.eval(var, x),
            Self::Difference(left, right) => left.eval(var, x) - right.eval(var, x),
            Self::Product(left, right) => left.eval(var, x) * right.eval(var, x),
            Self::Quotient(left, right) => left.eval(var, x) / right.eval(var, x),
            Self::Power(base, exponent) => base.eval(var, x).powf(*exponent),
            Self::Func(func, arg) => {
                let arg = arg.eval(var, x);
                match func {
                    Func::Sin => arg.sin(),
                    Func::Cos => arg.cos(),
                    Func::Tan => arg.tan(),
                    Func::Ln => arg.ln(),
                    Func::Log => arg.log10(),
                    Func::Exp => arg.exp(),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_and_size() {
        let term = Term::sum(
            Term::product(Term::constant(3.0), Term::power(Term::var("x"), 2.0)),
            Term::func(Func::Sin, Term::var("x")),
        );
        assert_eq!(term.depth(), 4);
        assert_eq!(term.size(), 7);
        assert_eq!(Term::var("x").depth(), 1);
    }

    #[test]
    fn monomials() {
        assert!(Term::constant(-4.0).is_monomial());
        assert!(Term::var("y").is_monomial());
        assert!(Term::power(Term::var("x"), 3.0).is_monomial());
        assert!(Term::product(Term::constant(2.0), Term::var("x")).is_monomial());
        assert!(Term::product(Term::constant(2.0), Term::power(Term::var("x"), 3.0)).is_monomial());

        assert!(!Term::product(Term::var("x"), Term::var("x")).is_monomial());
        assert!(!Term::power(Term::sum(Term::var("x"), Term::constant(1.0)), 2.0).is_monomial());
        assert!(!Term::func(Func::Exp, Term::var("x")).is_monomial());
    }

    #[test]
    fn division_by_zero() {
        let term = Term::sum(
            Term::var("x"),
            Term::quotient(Term::constant(1.0), Term::constant(0.0)),
        );
        assert!(term.divides_by_zero());
        assert!(!Term::quotient(Term::constant(0.0), Term::var("x")).divides_by_zero());
    }
}
