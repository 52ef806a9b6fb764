//! Conversion of parsed expressions into [`Term`]s.

use deriv_error::Error;
use deriv_parser::parser::{
    binary::Binary,
    call::Func,
    expr::Expr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
};
use std::ops::Range;
use crate::error::kind;
use super::Term;

/// Converts a parsed expression into a [`Term`].
///
/// Parentheses disappear, a negated number becomes a negative constant, and any other negation
/// becomes a product with `-1`. The exponent of every power must fold to a finite constant.
///
/// Returns an error if the resulting term would be deeper than `max_depth`.
pub fn lower(expr: &Expr, max_depth: usize) -> Result<Term, Error> {
    Lowering { max_depth }.lower(expr, 1)
}

/// Returns the span of the first division by a literal zero in the expression, such as the `0`
/// in `x / 0` or `1 / (0)`.
pub fn find_division_by_zero(expr: &Expr) -> Option<Range<usize>> {
    match expr {
        Expr::Literal(_) => None,
        Expr::Paren(paren) => find_division_by_zero(&paren.expr),
        Expr::Call(call) => find_division_by_zero(&call.arg),
        Expr::Unary(unary) => find_division_by_zero(&unary.operand),
        Expr::Binary(binary) => {
            let divisor = binary.rhs.innermost();
            match (binary.op.kind, divisor) {
                (BinOpKind::Div, Expr::Literal(Literal::Number(num))) if num.value == 0.0 => {
                    Some(divisor.span())
                },
                _ => find_division_by_zero(&binary.lhs)
                    .or_else(|| find_division_by_zero(&binary.rhs)),
            }
        },
    }
}

struct Lowering {
    max_depth: usize,
}

impl Lowering {
    fn check_depth(&self, expr: &Expr, depth: usize) -> Result<(), Error> {
        if depth > self.max_depth {
            return Err(Error::new(vec![expr.span()], kind::ExpressionTooLarge {
                max: self.max_depth,
            }));
        }
        Ok(())
    }

    fn lower(&self, expr: &Expr, depth: usize) -> Result<Term, Error> {
        self.check_depth(expr, depth)?;

        match expr {
            Expr::Literal(Literal::Number(num)) => Ok(Term::Constant(num.value)),
            Expr::Literal(Literal::Symbol(sym)) => Ok(Term::Variable(sym.name.clone())),
            // parentheses leave no node behind
            Expr::Paren(paren) => self.lower(&paren.expr, depth),
            Expr::Call(call) => Ok(Term::func(call.func, self.lower(&call.arg, depth + 1)?)),
            Expr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => match self.lower(&unary.operand, depth + 1)? {
                    Term::Constant(value) => Ok(Term::Constant(-value)),
                    operand => Ok(Term::product(Term::Constant(-1.0), operand)),
                },
            },
            Expr::Binary(binary) => self.lower_binary(binary, depth),
        }
    }

    fn lower_binary(&self, binary: &Binary, depth: usize) -> Result<Term, Error> {
        let left = self.lower(&binary.lhs, depth + 1)?;
        let combine: fn(Term, Term) -> Term = match binary.op.kind {
            BinOpKind::Add => Term::sum,
            BinOpKind::Sub => Term::difference,
            BinOpKind::Mul => Term::product,
            BinOpKind::Div => Term::quotient,
            BinOpKind::Exp => {
                return Ok(Term::power(left, self.fold_exponent(&binary.rhs, depth + 1)?));
            },
        };

        let right = self.lower(&binary.rhs, depth + 1)?;
        Ok(combine(left, right))
    }

    /// Folds the exponent of a power into a single finite number.
    fn fold_exponent(&self, expr: &Expr, depth: usize) -> Result<f64, Error> {
        let value = self.fold_constant(expr, depth)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::new(vec![expr.span()], kind::InvalidExponent))
        }
    }

    /// Evaluates an expression built only from numbers, signs, parentheses, the four arithmetic
    /// operators, powers and functions of constants. Nesting counts towards `max_depth` the same
    /// way it does for terms.
    fn fold_constant(&self, expr: &Expr, depth: usize) -> Result<f64, Error> {
        self.check_depth(expr, depth)?;

        match expr {
            Expr::Literal(Literal::Number(num)) => Ok(num.value),
            Expr::Literal(Literal::Symbol(sym)) => Err(Error::new(
                vec![sym.span.clone()],
                kind::NonConstantExponent { name: sym.name.clone() },
            )),
            Expr::Paren(paren) => self.fold_constant(&paren.expr, depth),
            Expr::Call(call) => {
                let arg = self.fold_constant(&call.arg, depth + 1)?;
                Ok(match call.func {
                    Func::Sin => arg.sin(),
                    Func::Cos => arg.cos(),
                    Func::Tan => arg.tan(),
                    Func::Ln => arg.ln(),
                    Func::Log => arg.log10(),
                    Func::Exp => arg.exp(),
                })
            },
            Expr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => self.fold_constant(&unary.operand, depth + 1).map(|value| -value),
            },
            Expr::Binary(binary) => {
                let left = self.fold_constant(&binary.lhs, depth + 1)?;
                let right = self.fold_constant(&binary.rhs, depth + 1)?;
                Ok(match binary.op.kind {
                    BinOpKind::Add => left + right,
                    BinOpKind::Sub => left - right,
                    BinOpKind::Mul => left * right,
                    BinOpKind::Div => left / right,
                    BinOpKind::Exp => left.powf(right),
                })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use deriv_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn lower_str(source: &str) -> Result<Term, Error> {
        let expr = Parser::new(source).try_parse_full::<Expr>().unwrap();
        lower(&expr, 512)
    }

    #[test]
    fn negation() {
        assert_eq!(lower_str("-3").unwrap(), Term::constant(-3.0));
        assert_eq!(lower_str("-(2)").unwrap(), Term::constant(-2.0));
        assert_eq!(
            lower_str("-x^2").unwrap(),
            Term::product(Term::constant(-1.0), Term::power(Term::var("x"), 2.0)),
        );
        assert_eq!(
            lower_str("-2x").unwrap(),
            Term::product(Term::constant(-2.0), Term::var("x")),
        );
    }

    #[test]
    fn parentheses_disappear() {
        assert_eq!(lower_str("((x))^3").unwrap(), Term::power(Term::var("x"), 3.0));
        assert_eq!(
            lower_str("2(x + 1)").unwrap(),
            Term::product(Term::constant(2.0), Term::sum(Term::var("x"), Term::constant(1.0))),
        );
    }

    #[test]
    fn constant_exponents() {
        assert_eq!(lower_str("x^-1").unwrap(), Term::power(Term::var("x"), -1.0));
        assert_eq!(lower_str("x^(1/2)").unwrap(), Term::power(Term::var("x"), 0.5));
        assert_eq!(lower_str("x^2^3").unwrap(), Term::power(Term::var("x"), 8.0));
        assert_eq!(lower_str("x^(2*3 - 1)").unwrap(), Term::power(Term::var("x"), 5.0));
    }

    #[test]
    fn functions() {
        assert_eq!(
            lower_str("tg(3x)").unwrap(),
            Term::func(Func::Tan, Term::product(Term::constant(3.0), Term::var("x"))),
        );
    }

    #[test]
    fn variable_exponent() {
        let err = lower_str("x^x").unwrap_err();
        assert_eq!(
            err.downcast_ref(),
            Some(&kind::NonConstantExponent { name: "x".to_string() }),
        );
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn invalid_exponent() {
        let err = lower_str("x^(1/0)").unwrap_err();
        assert!(err.is::<kind::InvalidExponent>());
        assert_eq!(err.spans, vec![2..7]);

        assert!(lower_str("x^ln(-1)").unwrap_err().is::<kind::InvalidExponent>());
    }

    #[test]
    fn depth_limit() {
        let expr = Parser::new("sin(sin(sin(x)))").try_parse_full::<Expr>().unwrap();
        assert!(lower(&expr, 4).is_ok());

        let err = lower(&expr, 3).unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&kind::ExpressionTooLarge { max: 3 }));
    }

    #[test]
    fn exponent_depth_limit() {
        let expr = Parser::new("x^(1 + (1 + (1 + 1)))").try_parse_full::<Expr>().unwrap();
        assert_eq!(lower(&expr, 5).unwrap(), Term::power(Term::var("x"), 4.0));

        let err = lower(&expr, 4).unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&kind::ExpressionTooLarge { max: 4 }));
    }

    #[test]
    fn division_by_literal_zero() {
        let expr = Parser::new("x + 1/(0)").try_parse_full::<Expr>().unwrap();
        assert_eq!(find_division_by_zero(&expr), Some(7..8));

        let expr = Parser::new("0/x").try_parse_full::<Expr>().unwrap();
        assert_eq!(find_division_by_zero(&expr), None);
    }
}
