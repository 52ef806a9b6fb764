use crate::symbolic::term::fmt::ExponentStyle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how a derivative is computed and presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComputeOptions {
    /// The maximum depth of the expression tree accepted as input. Deeper expressions are
    /// rejected with an error instead of risking a stack overflow in the recursive algorithms.
    ///
    /// The default is 512.
    pub max_depth: usize,

    /// The highest derivative order that can be requested.
    ///
    /// The default is 64.
    pub max_order: u32,

    /// The maximum number of nodes in any computed derivative. Some expressions, such as
    /// quotients, grow quickly with each differentiation; the computation stops with an error once
    /// a derivative grows past this size.
    ///
    /// The default is 100 000.
    pub max_nodes: usize,

    /// Whether the terms of each resulting sum are put in descending order of their power of the
    /// variable.
    ///
    /// The default is `true`.
    pub canonical_order: bool,

    /// How exponents are written in the result and in the explanation.
    pub exponent_style: ExponentStyle,

    /// Whether to produce the step-by-step explanation. When `false`, the computed
    /// [`Derivation`](crate::Derivation) has no steps.
    ///
    /// The default is `true`.
    pub steps: bool,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_order: 64,
            max_nodes: 100_000,
            canonical_order: true,
            exponent_style: ExponentStyle::default(),
            steps: true,
        }
    }
}

impl ComputeOptions {
    /// Wraps the given [`ComputeOptions`] into a builder for further customization.
    pub fn into_builder(self) -> ComputeOptionsBuilder {
        ComputeOptionsBuilder(self)
    }
}

/// A builder for [`ComputeOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComputeOptionsBuilder(ComputeOptions);

impl ComputeOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum depth of the input expression. See [`ComputeOptions::max_depth`].
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.0.max_depth = max_depth;
        self
    }

    /// Sets the highest derivative order that can be requested.
    pub fn max_order(mut self, max_order: u32) -> Self {
        self.0.max_order = max_order;
        self
    }

    /// Sets the maximum number of nodes in a computed derivative. See
    /// [`ComputeOptions::max_nodes`].
    pub fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.0.max_nodes = max_nodes;
        self
    }

    /// Sets whether resulting sums are put in descending order of powers.
    pub fn canonical_order(mut self, canonical_order: bool) -> Self {
        self.0.canonical_order = canonical_order;
        self
    }

    /// Sets how exponents are written. See [`ExponentStyle`] for more information.
    pub fn exponent_style(mut self, exponent_style: ExponentStyle) -> Self {
        self.0.exponent_style = exponent_style;
        self
    }

    /// Sets whether to produce the step-by-step explanation.
    pub fn steps(mut self, steps: bool) -> Self {
        self.0.steps = steps;
        self
    }

    /// Builds the [`ComputeOptions`] struct.
    pub fn build(self) -> ComputeOptions {
        self.0
    }
}
