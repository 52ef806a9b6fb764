//! Step-by-step explanations of a derivative computation.
//!
//! A [`TraceBuilder`] walks a term the same way [`differentiate`] does, and records which rule
//! applies at each node as a sequence of [`TraceLine`]s. The lines form a flat list in which the
//! nesting of sub-expressions is kept as a depth on each line. [`numbering::number`] then turns
//! the list into numbered, indented text for display.

pub mod numbering;

use std::fmt::{self, Display, Formatter};
use crate::symbolic::{
    derivative::{differentiate_simplified, Rule},
    term::{fmt::ExponentStyle, Term},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returns the English ordinal of `n`, such as `1st`, `2nd` or `11th`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Returns the name of the `order`-th derivative of `f`, such as `f(x)`, `f''(x)` or `f^(4)(x)`.
pub fn label(var: &str, order: u32) -> String {
    match order {
        0..=3 => format!("f{}({})", "'".repeat(order as usize), var),
        _ => format!("f^({})({})", order, var),
    }
}

/// A single line of an explanation.
///
/// Lines describing a sub-expression carry the depth of that sub-expression, where the term being
/// differentiated has depth 0, its operands have depth 1, and so on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TraceLine {
    /// `Computing the 2nd derivative with respect to x`
    Computing {
        order: u32,
        var: String,
    },

    /// `Original expression: f'(x) = 3x^2`
    Original {
        label: String,
        expr: String,
    },

    /// `Apply the product rule: (f*g)' = f'*g + f*g'`
    Rule {
        name: String,
        formula: String,
        depth: usize,
    },

    /// `where f(x) = x and g(x) = sin(x)`
    Where {
        var: String,
        operands: Vec<(char, String)>,
        depth: usize,
    },

    /// `Compute f'(x) and g'(x) separately:`
    Separately {
        var: String,
        depth: usize,
    },

    /// `For f(x) = x^2:`
    ///
    /// The term itself is kept so that trivial sub-expressions can be recognized by their shape.
    SubHeader {
        name: char,
        var: String,
        term: Term,
        expr: String,
        depth: usize,
    },

    /// `d/dx(x^3) = 3x^2`
    Note {
        text: String,
        depth: usize,
    },

    /// `Result of the 1st derivative: f'(x) = 3x^2`
    Result {
        order: u32,
        label: String,
        expr: String,
    },

    /// Separates the explanations of successive derivatives.
    Separator,
}

impl TraceLine {
    /// Returns the nesting depth of the line. Lines that are not about a sub-expression have
    /// depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Rule { depth, .. }
            | Self::Where { depth, .. }
            | Self::Separately { depth, .. }
            | Self::SubHeader { depth, .. }
            | Self::Note { depth, .. } => *depth,
            Self::Computing { .. }
            | Self::Original { .. }
            | Self::Result { .. }
            | Self::Separator => 0,
        }
    }
}

impl Display for TraceLine {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Computing { order, var } => {
                write!(f, "Computing the {} derivative with respect to {}", ordinal(*order), var)
            },
            Self::Original { label, expr } => write!(f, "Original expression: {} = {}", label, expr),
            Self::Rule { name, formula, .. } => write!(f, "Apply the {}: {}", name, formula),
            Self::Where { var, operands, .. } => {
                write!(f, "where ")?;
                for (i, (name, expr)) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " and ")?;
                    }
                    write!(f, "{}({}) = {}", name, var, expr)?;
                }
                Ok(())
            },
            Self::Separately { var, .. } => {
                write!(f, "Compute f'({}) and g'({}) separately:", var, var)
            },
            Self::SubHeader { name, var, expr, .. } => write!(f, "For {}({}) = {}:", name, var, expr),
            Self::Note { text, .. } => f.write_str(text),
            Self::Result { order, label, expr } => {
                write!(f, "Result of the {} derivative: {} = {}", ordinal(*order), label, expr)
            },
            Self::Separator => f.write_str("----------"),
        }
    }
}

/// Records the explanation of a derivative computation, one order at a time.
#[derive(Debug, Clone)]
pub struct TraceBuilder {
    var: String,
    style: ExponentStyle,
    lines: Vec<TraceLine>,
}

impl TraceBuilder {
    /// Creates a builder explaining derivatives with respect to `var`, writing terms in the given
    /// style.
    pub fn new(var: impl Into<String>, style: ExponentStyle) -> Self {
        Self { var: var.into(), style, lines: Vec::new() }
    }

    fn render(&self, term: &Term) -> String {
        term.display_with(self.style).to_string()
    }

    /// Explains how the `order`-th derivative is taken from `term`, the derivative of the
    /// previous order.
    pub fn begin_order(&mut self, order: u32, term: &Term) {
        if order > 1 {
            self.lines.push(TraceLine::Separator);
        }

        self.lines.push(TraceLine::Computing { order, var: self.var.clone() });
        self.lines.push(TraceLine::Original {
            label: label(&self.var, order.saturating_sub(1)),
            expr: self.render(term),
        });
        self.explain(term, 0);
    }

    /// Records the result of the `order`-th derivative.
    pub fn finish_order(&mut self, order: u32, result: &Term) {
        self.lines.push(TraceLine::Result {
            order,
            label: label(&self.var, order),
            expr: self.render(result),
        });
    }

    /// Explains which rule applies to the term, then explains each of its operands.
    fn explain(&mut self, term: &Term, depth: usize) {
        let rule = Rule::of(term, &self.var);
        self.lines.push(TraceLine::Rule {
            name: rule.name().to_string(),
            formula: rule.formula(&self.var),
            depth,
        });

        if term.is_monomial() {
            let derivative = differentiate_simplified(term, &self.var);
            self.lines.push(TraceLine::Note {
                text: format!(
                    "d/d{}({}) = {}",
                    self.var,
                    self.render(term),
                    self.render(&derivative),
                ),
                depth,
            });
        }

        match term {
            Term::Sum(left, right)
            | Term::Difference(left, right)
            | Term::Product(left, right)
            | Term::Quotient(left, right) => {
                self.lines.push(TraceLine::Where {
                    var: self.var.clone(),
                    operands: vec![('f', self.render(left)), ('g', self.render(right))],
                    depth,
                });
                self.lines.push(TraceLine::Separately { var: self.var.clone(), depth });
                self.explain_operand('f', left, depth + 1);
                self.explain_operand('g', right, depth + 1);
            },
            Term::Power(base, _) if rule == Rule::GeneralPower => self.explain_inner(base, depth),
            Term::Func(_, arg) => self.explain_inner(arg, depth),
            Term::Constant(_) | Term::Variable(_) | Term::Power(..) => {},
        }
    }

    /// Explains the inner function `u` of a chain rule.
    fn explain_inner(&mut self, inner: &Term, depth: usize) {
        self.lines.push(TraceLine::Where {
            var: self.var.clone(),
            operands: vec![('u', self.render(inner))],
            depth,
        });
        self.explain_operand('u', inner, depth + 1);
    }

    fn explain_operand(&mut self, name: char, term: &Term, depth: usize) {
        self.lines.push(TraceLine::SubHeader {
            name,
            var: self.var.clone(),
            term: term.clone(),
            expr: self.render(term),
            depth,
        });
        self.explain(term, depth);
    }

    /// Returns the recorded lines.
    pub fn into_lines(self) -> Vec<TraceLine> {
        self.lines
    }
}
