//! Rendering of [`Term`]s into text.
//!
//! The default rendering is the canonical form: it can be fed back into the parser, and produces
//! a tree that is equal to the original after simplification. Parentheses are only added where the
//! parser would otherwise group the expression differently.

use std::fmt::{self, Display, Formatter};
use super::Term;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How exponents are written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExponentStyle {
    /// Exponents follow a caret, as in `x^3` or `x^(-1)`. This form can be parsed again.
    ///
    /// This is the default option.
    #[default]
    Caret,

    /// Integral exponents are written with Unicode superscripts, as in `x³` or `x⁻¹`. Other
    /// exponents fall back to the caret form.
    Superscript,
}

/// How tightly a rendered term holds together, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Sum,
    Product,
    Neg,
    Power,
    Atom,
}

fn level(term: &Term) -> Level {
    match term {
        Term::Constant(value) if *value < 0.0 => Level::Neg,
        Term::Constant(_) | Term::Variable(_) | Term::Func(..) => Level::Atom,
        Term::Sum(..) | Term::Difference(..) => Level::Sum,
        Term::Product(..) | Term::Quotient(..) => Level::Product,
        Term::Power(..) => Level::Power,
    }
}

/// Formats a number in its shortest form that parses back to the same value. Integral values have
/// no fractional part, and negative zero is written as `0`.
pub fn fmt_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Returns the term with its leading minus sign removed, if it would be rendered with one.
/// The returned term has the opposite value.
fn without_minus(term: &Term) -> Option<Term> {
    match term {
        Term::Constant(value) if *value < 0.0 => Some(Term::Constant(-value)),
        Term::Product(left, right) => match **left {
            Term::Constant(value) if value == -1.0 => Some((**right).clone()),
            _ => without_minus(left).map(|left| Term::product(left, (**right).clone())),
        },
        Term::Quotient(left, right) => {
            without_minus(left).map(|left| Term::quotient(left, (**right).clone()))
        },
        _ => None,
    }
}

/// Returns true if a constant coefficient can be written directly before this text, as in `3x`
/// or `2(x + 1)`.
fn juxtaposable(text: &str) -> bool {
    text.starts_with(|c: char| c.is_alphabetic() || c == '(')
}

fn wrap(text: String) -> String {
    format!("({})", text)
}

/// Writes an integral exponent in Unicode superscript digits.
fn superscript(exponent: f64) -> Option<String> {
    if exponent.fract() != 0.0 || exponent.abs() > 1e15 {
        return None;
    }

    let text = fmt_number(exponent);
    text.chars()
        .map(|c| match c {
            '-' => Some('⁻'),
            '0' => Some('⁰'),
            '1' => Some('¹'),
            '2' => Some('²'),
            '3' => Some('³'),
            '4' => Some('⁴'),
            '5' => Some('⁵'),
            '6' => Some('⁶'),
            '7' => Some('⁷'),
            '8' => Some('⁸'),
            '9' => Some('⁹'),
            _ => None,
        })
        .collect()
}

/// A [`Term`] paired with the style to render it in. Created by [`Term::display_with`].
#[derive(Debug, Clone, Copy)]
pub struct TermFormatter<'a> {
    term: &'a Term,
    style: ExponentStyle,
}

impl TermFormatter<'_> {
    fn render(&self, term: &Term) -> String {
        match term {
            Term::Constant(value) => fmt_number(*value),
            Term::Variable(name) => name.clone(),
            Term::Sum(left, right) => {
                let left = self.render(left);
                if right.is_additive() {
                    format!("{} + {}", left, wrap(self.render(right)))
                } else if let Some(positive) = without_minus(right) {
                    format!("{} - {}", left, self.render_negated(&positive))
                } else {
                    format!("{} + {}", left, self.render_signed(right))
                }
            },
            Term::Difference(left, right) => {
                let left = self.render(left);
                if right.is_additive() {
                    format!("{} - {}", left, wrap(self.render(right)))
                } else if let Some(positive) = without_minus(right) {
                    format!("{} + {}", left, self.render_negated(&positive))
                } else {
                    format!("{} - {}", left, self.render_signed(right))
                }
            },
            Term::Product(left, right) => match **left {
                Term::Constant(coefficient) => self.render_coefficient(coefficient, right),
                _ => {
                    let left = self.render_at_least(left, Level::Product);
                    let right = self.render_above(right, Level::Product);
                    format!("{}*{}", left, right)
                },
            },
            Term::Quotient(left, right) => {
                let left = self.render_at_least(left, Level::Product);
                let right = self.render_above(right, Level::Product);
                format!("{}/{}", left, right)
            },
            Term::Power(base, exponent) => {
                let base = self.render_above(base, Level::Power);
                match self.style {
                    ExponentStyle::Superscript => match superscript(*exponent) {
                        Some(exponent) => format!("{}{}", base, exponent),
                        None => format!("{}^{}", base, fmt_number(*exponent)),
                    },
                    ExponentStyle::Caret if *exponent < 0.0 => {
                        format!("{}^{}", base, wrap(fmt_number(*exponent)))
                    },
                    ExponentStyle::Caret => format!("{}^{}", base, fmt_number(*exponent)),
                }
            },
            Term::Func(func, arg) => format!("{}({})", func, self.render(arg)),
        }
    }

    /// Renders a term that follows a binary operator, parenthesizing it if it starts with a minus
    /// sign.
    fn render_signed(&self, term: &Term) -> String {
        let text = self.render(term);
        if text.starts_with('-') {
            wrap(text)
        } else {
            text
        }
    }

    /// Renders a term whose minus sign was moved into the operator before it. A sum keeps its
    /// parentheses, since `a - (x + 1)` is not `a - x + 1`.
    fn render_negated(&self, term: &Term) -> String {
        if term.is_additive() {
            wrap(self.render(term))
        } else {
            self.render_signed(term)
        }
    }

    /// Renders a left operand, parenthesizing it if it binds looser than `min`.
    fn render_at_least(&self, term: &Term, min: Level) -> String {
        let text = self.render(term);
        if level(term) < min {
            wrap(text)
        } else {
            text
        }
    }

    /// Renders a right operand, parenthesizing it unless it binds tighter than `min` and does not
    /// start with a minus sign.
    fn render_above(&self, term: &Term, min: Level) -> String {
        let text = self.render(term);
        if level(term) <= min || text.starts_with('-') {
            wrap(text)
        } else {
            text
        }
    }

    /// Renders `coefficient * factor`, juxtaposing the two where possible.
    fn render_coefficient(&self, coefficient: f64, factor: &Term) -> String {
        let factor = match level(factor) {
            Level::Sum => wrap(self.render(factor)),
            _ => self.render_signed(factor),
        };

        if !juxtaposable(&factor) {
            format!("{}*{}", fmt_number(coefficient), factor)
        } else if coefficient == -1.0 {
            format!("-{}", factor)
        } else {
            format!("{}{}", fmt_number(coefficient), factor)
        }
    }
}

impl Display for TermFormatter<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.render(self.term))
    }
}

impl Term {
    /// Returns a displayable wrapper that renders the term in the given exponent style.
    pub fn display_with(&self, style: ExponentStyle) -> TermFormatter<'_> {
        TermFormatter { term: self, style }
    }
}

/// Renders the term in its canonical, re-parseable form.
impl Display for Term {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.display_with(ExponentStyle::Caret).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use super::super::Func;

    fn x() -> Term {
        Term::var("x")
    }

    fn c(value: f64) -> Term {
        Term::constant(value)
    }

    #[test]
    fn numbers() {
        assert_eq!(c(3.0).to_string(), "3");
        assert_eq!(c(-2.0).to_string(), "-2");
        assert_eq!(c(0.5).to_string(), "0.5");
        assert_eq!(c(-0.0).to_string(), "0");
        assert_eq!(c(std::f64::consts::LN_10).to_string(), "2.302585092994046");
    }

    #[test]
    fn coefficients() {
        assert_eq!(Term::product(c(3.0), Term::power(x(), 2.0)).to_string(), "3x^2");
        assert_eq!(Term::product(c(2.0), Term::func(Func::Sin, x())).to_string(), "2sin(x)");
        assert_eq!(Term::product(c(2.0), Term::sum(x(), c(1.0))).to_string(), "2(x + 1)");
        assert_eq!(Term::product(c(-1.0), Term::func(Func::Sin, x())).to_string(), "-sin(x)");
        assert_eq!(Term::product(c(-3.0), x()).to_string(), "-3x");
        assert_eq!(Term::product(c(2.0), c(3.0)).to_string(), "2*3");
        assert_eq!(Term::product(c(2.0), c(-3.0)).to_string(), "2(-3)");
    }

    #[test]
    fn products() {
        let chain = Term::product(
            c(2.0),
            Term::product(x(), Term::func(Func::Cos, Term::power(x(), 2.0))),
        );
        assert_eq!(chain.to_string(), "2x*cos(x^2)");

        let nested = Term::product(x(), Term::product(x(), Term::var("y")));
        assert_eq!(nested.to_string(), "x*(x*y)");

        let negated = Term::product(x(), Term::product(c(-1.0), x()));
        assert_eq!(negated.to_string(), "x*(-x)");
    }

    #[test]
    fn sums_with_negative_terms() {
        let sum = Term::sum(Term::power(x(), 2.0), Term::product(c(-3.0), x()));
        assert_eq!(sum.to_string(), "x^2 - 3x");

        let difference = Term::difference(x(), Term::product(c(-1.0), Term::func(Func::Cos, x())));
        assert_eq!(difference.to_string(), "x + cos(x)");

        let constant = Term::sum(x(), c(-4.0));
        assert_eq!(constant.to_string(), "x - 4");
    }

    #[test]
    fn negated_sums_keep_their_parentheses() {
        let x_plus_1 = || Term::sum(x(), c(1.0));

        let sum = Term::sum(Term::var("a"), Term::product(c(-1.0), x_plus_1()));
        assert_eq!(sum.to_string(), "a - (x + 1)");

        let difference = Term::difference(Term::var("a"), Term::product(c(-1.0), x_plus_1()));
        assert_eq!(difference.to_string(), "a + (x + 1)");

        let inner_difference = Term::difference(x(), c(1.0));
        let sum = Term::sum(c(1.0), Term::product(c(-1.0), inner_difference));
        assert_eq!(sum.to_string(), "1 - (x - 1)");

        // a coefficient other than -1 already brackets the sum
        let scaled = Term::sum(Term::var("a"), Term::product(c(-2.0), x_plus_1()));
        assert_eq!(scaled.to_string(), "a - 2(x + 1)");

        let double = Term::sum(Term::var("a"), Term::product(c(-1.0), Term::product(c(-1.0), x())));
        assert_eq!(double.to_string(), "a - (-x)");
    }

    #[test]
    fn grouping() {
        let right_sum = Term::difference(x(), Term::sum(x(), c(1.0)));
        assert_eq!(right_sum.to_string(), "x - (x + 1)");

        let left_sum = Term::difference(Term::sum(x(), c(1.0)), x());
        assert_eq!(left_sum.to_string(), "x + 1 - x");

        let quotient = Term::quotient(Term::sum(x(), c(1.0)), Term::product(c(2.0), x()));
        assert_eq!(quotient.to_string(), "(x + 1)/(2x)");
    }

    #[test]
    fn powers() {
        assert_eq!(Term::power(Term::sum(x(), c(1.0)), 2.0).to_string(), "(x + 1)^2");
        assert_eq!(Term::power(Term::func(Func::Sin, x()), 2.0).to_string(), "sin(x)^2");
        assert_eq!(Term::power(x(), -1.0).to_string(), "x^(-1)");
        assert_eq!(Term::power(c(-2.0), 2.0).to_string(), "(-2)^2");
        assert_eq!(Term::power(Term::power(x(), 2.0), 3.0).to_string(), "(x^2)^3");

        let tan = Term::power(Term::quotient(c(1.0), Term::func(Func::Cos, x())), 2.0);
        assert_eq!(tan.to_string(), "(1/cos(x))^2");
    }

    #[test]
    fn superscripts() {
        let style = ExponentStyle::Superscript;
        assert_eq!(Term::power(x(), 3.0).display_with(style).to_string(), "x³");
        assert_eq!(Term::power(x(), -12.0).display_with(style).to_string(), "x⁻¹²");
        assert_eq!(Term::power(x(), 0.5).display_with(style).to_string(), "x^0.5");
    }

    #[test]
    fn functions() {
        let term = Term::func(Func::Log, Term::sum(x(), c(1.0)));
        assert_eq!(term.to_string(), "log(x + 1)");
    }
}
