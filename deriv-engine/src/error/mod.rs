pub mod kind;

pub use deriv_error::Error;

use std::{fmt::{self, Display, Formatter}, io};

/// The ways a derivative computation can fail. Each category wraps a spanned [`Error`], so the
/// failure can be shown either as a plain message or as a full report against the input.
#[derive(Debug)]
pub enum EngineError {
    /// The expression text is malformed or uses something that cannot be differentiated.
    Parse(Error),

    /// The expression, variable or order was missing or invalid.
    Validation(Error),

    /// The expression cannot be differentiated, such as when it divides by zero.
    Differentiation(Error),
}

impl EngineError {
    /// Returns the wrapped error.
    pub fn inner(&self) -> &Error {
        match self {
            Self::Parse(err) | Self::Validation(err) | Self::Differentiation(err) => err,
        }
    }

    /// Returns a short name for the category of the error.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse error",
            Self::Validation(_) => "validation error",
            Self::Differentiation(_) => "differentiation error",
        }
    }

    /// Renders the full report for this error against the given input.
    pub fn render_report(&self, src_id: &str, input: &str) -> io::Result<String> {
        self.inner().render_report(src_id, input)
    }

    /// Report this error to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.inner().report_to_stderr(src_id, input)
    }
}

/// Displays the plain message of the wrapped error, suitable for showing next to a form.
impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.inner().fmt(f)
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner())
    }
}
