use deriv_engine::{compute_with, parse_order, ComputeOptions, Derivation, EngineError, ExponentStyle};
use super::error::Error;

/// The state of the derivative calculator form: the expression, the variable, the order, and how
/// the result is presented.
#[derive(Debug, Clone)]
pub struct Form {
    expression: String,
    variable: String,
    order: i64,
    options: ComputeOptions,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            expression: String::new(),
            variable: "x".to_string(),
            order: 1,
            options: ComputeOptions::default(),
        }
    }
}

impl Form {
    /// Returns the expression to differentiate.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn set_expression(&mut self, expression: impl Into<String>) {
        self.expression = expression.into();
    }

    pub fn set_variable(&mut self, variable: impl Into<String>) {
        self.variable = variable.into();
    }

    pub fn set_order(&mut self, order: i64) {
        self.order = order;
    }

    pub fn set_exponent_style(&mut self, style: ExponentStyle) {
        self.options = self.options.into_builder().exponent_style(style).build();
    }

    pub fn set_steps(&mut self, steps: bool) {
        self.options = self.options.into_builder().steps(steps).build();
    }

    /// Computes the derivative described by the form.
    pub fn compute(&self) -> Result<Derivation, EngineError> {
        compute_with(&self.expression, &self.variable, self.order, &self.options)
    }

    /// Applies a command of the form `:name argument` to the form, returning a confirmation
    /// message.
    pub fn apply_command(&mut self, command: &str) -> Result<String, Error> {
        let mut words = command.trim().trim_start_matches(':').split_whitespace();
        let name = words.next().unwrap_or_default();
        let Some(arg) = words.next() else {
            return Err(Error::Command(format!("`:{}` expects an argument", name)));
        };

        match (name, arg) {
            ("var", _) => {
                self.set_variable(arg);
                Ok(format!("variable set to {}", arg))
            },
            ("order", _) => {
                self.set_order(parse_order(arg)?);
                Ok(format!("order set to {}", self.order))
            },
            ("style", "caret") => {
                self.set_exponent_style(ExponentStyle::Caret);
                Ok("exponents are written as x^2".to_string())
            },
            ("style", "superscript") => {
                self.set_exponent_style(ExponentStyle::Superscript);
                Ok("exponents are written as x²".to_string())
            },
            ("steps", "on") => {
                self.set_steps(true);
                Ok("steps are shown".to_string())
            },
            ("steps", "off") => {
                self.set_steps(false);
                Ok("steps are hidden".to_string())
            },
            ("style" | "steps", _) => {
                Err(Error::Command(format!("invalid argument `{}` for `:{}`", arg, name)))
            },
            _ => Err(Error::Command(format!("unknown command `:{}`", name))),
        }
    }
}
