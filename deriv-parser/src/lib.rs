//! Tokenizer and parser for textual single-variable calculus expressions, such as `3x^2 + sin(x)`
//! or `ln(x^2 + 1) / x`.
//!
//! The [`parser::Parser`] produces an abstract syntax tree of [`parser::expr::Expr`] nodes that
//! keeps track of the region of the source code every node was parsed from, so that errors can be
//! reported with precise highlighting.
//!
//! ```
//! use deriv_parser::parser::{binary::Binary, expr::Expr, Parser, token::op::BinOpKind};
//!
//! let mut parser = Parser::new("2x + 1");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! match expr {
//!     Expr::Binary(Binary { op, .. }) => assert_eq!(op.kind, BinOpKind::Add),
//!     _ => panic!("expected a sum"),
//! }
//! ```

pub mod parser;
pub mod tokenizer;
