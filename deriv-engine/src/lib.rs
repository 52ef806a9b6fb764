//! Symbolic differentiation of single-variable expressions, with simplification of the results
//! and step-by-step explanations of the rules applied.
//!
//! The easiest way to use this crate is through [`compute`], which parses an expression, takes
//! the requested number of derivatives, and explains how each one was obtained:
//!
//! ```
//! use deriv_engine::compute;
//!
//! let derivation = compute("x^4", "x", 2).unwrap();
//! assert_eq!(derivation.result, "12x^2");
//! assert_eq!(derivation.orders[0].to_string(), "4x^3");
//! assert!(derivation.steps[0].starts_with("1. Computing the 1st derivative"));
//! ```
//!
//! The individual stages are available in the [`symbolic`] module, and the explanation in the
//! [`trace`] module.
//!
//! # Feature flags
//!
//! - `serde`: Derives `Serialize` and `Deserialize` for the public data types, such as [`Term`],
//!   [`ComputeOptions`] and [`Derivation`].

pub mod compute;
pub mod error;
pub mod options;
pub mod step_collector;
pub mod symbolic;
pub mod trace;

pub use compute::{compute, compute_with, parse_order, Derivation};
pub use error::EngineError;
pub use options::{ComputeOptions, ComputeOptionsBuilder};
pub use symbolic::term::{fmt::ExponentStyle, Func, Term};
