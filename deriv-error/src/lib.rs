//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs an error kind with the regions of source code it
//! originated from.
//!
//! Error kinds are usually declared with the `ErrorKind` derive macro from `deriv-attrs`:
//!
//! ```
//! use deriv_attrs::ErrorKind;
//! use deriv_error::{Error, ErrorKind};
//!
//! #[derive(Debug, ErrorKind)]
//! #[error(message = "unexpected end of expression", labels = ["add something here"])]
//! pub struct UnexpectedEof;
//!
//! let err = Error::new(vec![3..3], UnexpectedEof);
//! assert_eq!(err.to_string(), "unexpected end of expression at position 3");
//! assert!(err.is::<UnexpectedEof>());
//! ```

use ariadne::{Color, Label, Report, ReportKind, Source};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the error as [`Any`], so that the concrete kind can be recovered.
    fn as_any(&self) -> &dyn Any;

    /// The message displayed at the top of the error.
    fn message(&self) -> String;

    /// The text of the labels pointing at each span of the error, in the same order as the spans.
    fn labels(&self) -> Vec<String> {
        Vec::new()
    }

    /// Optional help text, describing what the user can do to fix the error.
    fn help(&self) -> Option<String> {
        None
    }

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        let offset = spans.first().map_or(0, |span| span.start);
        let labels = self.labels();
        let mut builder = Report::build(ReportKind::Error, src_id, offset)
            .with_message(self.message())
            .with_labels(
                spans
                    .iter()
                    .enumerate()
                    .map(|(i, span)| {
                        let label = Label::new((src_id, span.clone())).with_color(EXPR);
                        match labels.get(i) {
                            Some(text) if !text.is_empty() => label.with_message(text),
                            _ => label,
                        }
                    })
                    .collect::<Vec<_>>()
            );

        if let Some(help) = self.help() {
            builder.set_help(help);
        }

        builder.finish()
    }
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from. Errors that do not come
    /// from the source code (such as invalid options) have no spans.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,

    /// Whether the error is fatal. Fatal errors stop a parser from trying other alternatives.
    pub fatal: bool,
}

impl Error {
    /// Creates a new non-fatal error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: false }
    }

    /// Creates a new fatal error with the given spans and kind.
    pub fn new_fatal(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: true }
    }

    /// Marks this error as fatal, so that no other alternatives are attempted after it.
    pub fn into_fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    /// Returns the offset of the first character this error points at, if any.
    pub fn position(&self) -> Option<usize> {
        self.spans.first().map(|span| span.start)
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source into a string.
    pub fn render_report(&self, src_id: &str, input: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

/// Displays the plain message of the error, followed by the position it points at. This is the
/// form handed to callers that cannot render a full report.
impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.message())?;
        if let Some(position) = self.position() {
            write!(f, " at position {}", position)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use deriv_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = "unclosed parenthesis",
        labels = ["this parenthesis is not closed"],
        help = "add a closing parenthesis `)` somewhere after this",
    )]
    struct Unclosed;

    #[derive(Debug, ErrorKind)]
    #[error(message = format!("unknown function `{}`", name))]
    struct Unknown {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "the derivative order must be a positive integer")]
    struct NoSpan;

    #[test]
    fn display_with_position() {
        let err = Error::new(vec![4..5], Unclosed);
        assert_eq!(err.to_string(), "unclosed parenthesis at position 4");
        assert_eq!(err.position(), Some(4));
        assert!(!err.fatal);
    }

    #[test]
    fn display_without_position() {
        let err = Error::new_fatal(Vec::new(), NoSpan);
        assert_eq!(err.to_string(), "the derivative order must be a positive integer");
        assert_eq!(err.position(), None);
        assert!(err.fatal);
    }

    #[test]
    fn fields_in_message() {
        let err = Error::new(vec![0..3], Unknown { name: "foo".to_string() });
        assert_eq!(err.to_string(), "unknown function `foo` at position 0");
        assert!(err.is::<Unknown>());
        assert!(!err.is::<Unclosed>());
        assert_eq!(err.downcast_ref::<Unknown>().map(|k| k.name.as_str()), Some("foo"));
    }

    #[test]
    fn report_contains_label_and_help() {
        let input = "sin(x + 1";
        let err = Error::new(vec![3..4], Unclosed);
        let report = err.render_report("input", input).unwrap();
        let plain = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();

        assert!(plain.contains("unclosed parenthesis"));
        assert!(plain.contains("this parenthesis is not closed"));
        assert!(plain.contains("add a closing parenthesis `)` somewhere after this"));
        assert!(plain.contains("sin(x + 1"));
    }

    #[test]
    fn report_without_spans() {
        let err = Error::new(Vec::new(), NoSpan);
        let report = err.render_report("input", "").unwrap();
        let plain = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();
        assert!(plain.contains("the derivative order must be a positive integer"));
    }
}
