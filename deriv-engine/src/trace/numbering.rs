//! Arrangement of an explanation into numbered steps.
//!
//! [`number`] reads the lines of an explanation once, from top to bottom, and decides for each
//! line whether it starts a new numbered step, is indented under the current step, or is dropped.
//! Explanations of trivial sub-expressions, such as constants or `3x^2`, are collapsed into the
//! line stating their derivative, followed by the `where` line naming their operands, if any.

use super::TraceLine;

/// The part of the explanation that is currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    None,
    Calculating,
    SubExpressions,
    SubRule,
}

/// Returns true if the derivative of the term is obvious enough to not be worth explaining:
/// a constant, a symbol, or a power of a symbol, optionally with a coefficient.
fn is_trivial(line: &TraceLine) -> bool {
    matches!(line, TraceLine::SubHeader { term, .. } if term.is_monomial())
}

fn indent(depth: usize) -> String {
    " ".repeat(3 * depth)
}

#[derive(Debug)]
struct Numbering {
    context: Context,

    /// The depth of the trivial sub-expression whose explanation is being dropped, if any.
    skip_substeps: Option<usize>,

    /// The number of the last numbered step.
    step: usize,

    /// Whether the last emitted line was numbered.
    prev_numbered: bool,

    output: Vec<String>,
}

impl Numbering {
    fn numbered(&mut self, line: &TraceLine) {
        self.step += 1;
        self.output.push(format!("{}. {}", self.step, line));
        self.prev_numbered = true;
    }

    fn indented(&mut self, line: &TraceLine, depth: usize) {
        self.output.push(format!("{}{}", indent(depth), line));
        self.prev_numbered = false;
    }

    /// Returns true if a line at the given depth belongs to a trivial sub-expression that is
    /// being skipped. Notes stating the derivative of the trivial sub-expression itself are kept,
    /// and `where` lines naming the operands are never skipped.
    fn skips(&self, line: &TraceLine) -> bool {
        match (self.skip_substeps, line) {
            (_, TraceLine::Where { .. }) => false,
            (Some(skip), TraceLine::Note { depth, .. }) => *depth > skip,
            (Some(skip), line) => line.depth() >= skip,
            (None, _) => false,
        }
    }

    fn process<'a>(&mut self, lines: impl IntoIterator<Item = &'a TraceLine>) {
        let mut lines = lines.into_iter().peekable();
        while let Some(line) = lines.next() {
            if line.depth() == 0 {
                self.skip_substeps = None;
            }

            match line {
                TraceLine::Computing { .. } => {
                    self.context = Context::Calculating;
                    self.numbered(line);
                },
                TraceLine::Result { .. } => {
                    self.context = Context::None;
                    self.numbered(line);
                },
                TraceLine::Original { .. } => self.indented(line, 1),
                TraceLine::Separator => {
                    self.output.push(line.to_string());
                    self.prev_numbered = false;
                },
                TraceLine::Separately { depth, .. } => {
                    self.context = Context::SubExpressions;
                    if *depth == 0 {
                        self.numbered(line);
                    } else if !self.skips(line) {
                        self.indented(line, depth + 1);
                    }
                },
                TraceLine::SubHeader { depth, .. } => {
                    match self.skip_substeps {
                        Some(skip) if *depth > skip => continue,
                        _ => {},
                    }
                    self.skip_substeps = is_trivial(line).then_some(*depth);
                    self.indented(line, *depth);
                },
                TraceLine::Rule { depth: 0, .. } if self.context == Context::Calculating => {
                    if self.prev_numbered {
                        self.indented(line, 1);
                    } else {
                        self.numbered(line);
                    }

                    // the note stating the result of the rule stays with it
                    if let Some(note @ TraceLine::Note { depth: 0, .. }) = lines.peek() {
                        self.indented(note, 1);
                        lines.next();
                    }
                },
                TraceLine::Rule { depth, .. } => {
                    self.context = Context::SubRule;
                    if !self.skips(line) {
                        self.indented(line, depth + 1);
                    }
                },
                TraceLine::Where { depth, .. } | TraceLine::Note { depth, .. } => {
                    if !self.skips(line) {
                        self.indented(line, depth + 1);
                    }
                },
            }
        }
    }
}

/// Arranges the lines of an explanation into numbered steps.
///
/// The announcement of each derivative, each top-level rule, the start of the explanation of the
/// operands, and each result begin a new step. Step numbers continue across derivatives of
/// different orders. Every other line is indented by three spaces per level of nesting.
pub fn number(lines: &[TraceLine]) -> Vec<String> {
    let mut numbering = Numbering {
        context: Context::None,
        skip_substeps: None,
        step: 0,
        prev_numbered: false,
        output: Vec::with_capacity(lines.len()),
    };
    numbering.process(lines);
    numbering.output
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::{parse_term, term::fmt::ExponentStyle};
    use super::super::TraceBuilder;
    use super::*;

    fn numbered(source: &str, result: &str) -> Vec<String> {
        let mut builder = TraceBuilder::new("x", ExponentStyle::Caret);
        builder.begin_order(1, &parse_term(source));
        builder.finish_order(1, &parse_term(result));
        number(&builder.into_lines())
    }

    #[test]
    fn single_rule() {
        assert_eq!(numbered("x^3", "3x^2"), vec![
            "1. Computing the 1st derivative with respect to x",
            "   Original expression: f(x) = x^3",
            "2. Apply the power rule: d/dx(x^n) = n*x^(n-1)",
            "   d/dx(x^3) = 3x^2",
            "3. Result of the 1st derivative: f'(x) = 3x^2",
        ]);
    }

    #[test]
    fn trivial_operands_are_collapsed() {
        assert_eq!(numbered("x*sin(x)", "sin(x) + x*cos(x)"), vec![
            "1. Computing the 1st derivative with respect to x",
            "   Original expression: f(x) = x*sin(x)",
            "2. Apply the product rule: (f*g)' = f'*g + f*g'",
            "   where f(x) = x and g(x) = sin(x)",
            "3. Compute f'(x) and g'(x) separately:",
            "   For f(x) = x:",
            "      d/dx(x) = 1",
            "   For g(x) = sin(x):",
            "      Apply the sine rule: d/dx(sin(u)) = cos(u)*u'",
            "      where u(x) = x",
            "      For u(x) = x:",
            "         d/dx(x) = 1",
            "4. Result of the 1st derivative: f'(x) = sin(x) + x*cos(x)",
        ]);
    }

    #[test]
    fn trivial_products_keep_their_note() {
        assert_eq!(numbered("5x^2 + 1", "10x"), vec![
            "1. Computing the 1st derivative with respect to x",
            "   Original expression: f(x) = 5x^2 + 1",
            "2. Apply the sum rule: (f + g)' = f' + g'",
            "   where f(x) = 5x^2 and g(x) = 1",
            "3. Compute f'(x) and g'(x) separately:",
            "   For f(x) = 5x^2:",
            "      d/dx(5x^2) = 10x",
            "      where f(x) = 5 and g(x) = x^2",
            "   For g(x) = 1:",
            "      d/dx(1) = 0",
            "4. Result of the 1st derivative: f'(x) = 10x",
        ]);
    }

    #[test]
    fn chain_rule_at_the_top() {
        assert_eq!(numbered("sin(x^2)", "2x*cos(x^2)"), vec![
            "1. Computing the 1st derivative with respect to x",
            "   Original expression: f(x) = sin(x^2)",
            "2. Apply the sine rule: d/dx(sin(u)) = cos(u)*u'",
            "   where u(x) = x^2",
            "   For u(x) = x^2:",
            "      d/dx(x^2) = 2x",
            "3. Result of the 1st derivative: f'(x) = 2x*cos(x^2)",
        ]);
    }

    #[test]
    fn nested_operands_are_explained() {
        let lines = numbered("x*sin(x) - ln(x)", "sin(x) + x*cos(x) - 1/x");
        assert_eq!(lines[2], "2. Apply the difference rule: (f - g)' = f' - g'");
        assert_eq!(lines[4], "3. Compute f'(x) and g'(x) separately:");
        assert_eq!(lines[5], "   For f(x) = x*sin(x):");
        assert_eq!(lines[6], "      Apply the product rule: (f*g)' = f'*g + f*g'");
        assert_eq!(lines[7], "      where f(x) = x and g(x) = sin(x)");
        assert_eq!(lines[8], "      Compute f'(x) and g'(x) separately:");
        assert_eq!(lines[9], "      For f(x) = x:");
        assert_eq!(lines[10], "         d/dx(x) = 1");

        // the skipped operand `x` ends with the next header at its own depth
        assert_eq!(lines[11], "      For g(x) = sin(x):");
        assert_eq!(lines[12], "         Apply the sine rule: d/dx(sin(u)) = cos(u)*u'");

        // back out at the depth of `ln(x)`
        assert!(lines.contains(&"   For g(x) = ln(x):".to_string()));
        assert!(lines.contains(&"      Apply the natural logarithm rule: d/dx(ln(u)) = u'/u".to_string()));
    }

    #[test]
    fn steps_continue_across_orders() {
        let mut builder = TraceBuilder::new("x", ExponentStyle::Caret);
        builder.begin_order(1, &parse_term("x^3"));
        builder.finish_order(1, &parse_term("3x^2"));
        builder.begin_order(2, &parse_term("3x^2"));
        builder.finish_order(2, &parse_term("6x"));

        let lines = number(&builder.into_lines());
        assert_eq!(lines[4], "3. Result of the 1st derivative: f'(x) = 3x^2");
        assert_eq!(lines[5], "----------");
        assert_eq!(lines[6], "4. Computing the 2nd derivative with respect to x");
        assert_eq!(lines[8], "5. Apply the product rule: (f*g)' = f'*g + f*g'");
        assert_eq!(lines[9], "   d/dx(3x^2) = 6x");
        assert_eq!(lines.last().map(String::as_str), Some("7. Result of the 2nd derivative: f''(x) = 6x"));
    }
}
