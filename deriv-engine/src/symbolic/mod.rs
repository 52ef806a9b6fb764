//! Symbolic manipulation of single-variable expressions.
//!
//! Parsed expressions are first lowered into a [`Term`](term::Term) tree with
//! [`lower`](term::lower::lower). The tree can then be differentiated with
//! [`differentiate`](derivative::differentiate), reduced with [`simplify`](simplify::simplify),
//! and have its terms ordered by descending power with [`canonicalize`](canonical::canonicalize).

pub mod canonical;
pub mod derivative;
pub mod simplify;
pub mod term;

/// Parses and lowers the given source, panicking if either step fails.
#[cfg(test)]
pub(crate) fn parse_term(source: &str) -> term::Term {
    use deriv_parser::parser::{expr::Expr, Parser};

    let expr = Parser::new(source).try_parse_full::<Expr>().unwrap();
    term::lower::lower(&expr, 512).unwrap()
}
