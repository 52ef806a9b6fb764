use deriv_engine::EngineError;

/// Utility enum to package errors that can occur while handling a line of input.
#[derive(Debug)]
pub enum Error {
    /// An error from the engine, such as a malformed expression or an invalid order.
    Engine(EngineError),

    /// A command that could not be understood.
    Command(String),
}

impl Error {
    /// Report this error to stderr.
    ///
    /// Engine errors are rendered as a full report against the given input. If the report cannot
    /// be written, the plain message is printed instead.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Engine(err) => {
                if err.report_to_stderr("input", input).is_err() {
                    eprintln!("{}: {}", err.category(), err);
                }
            },
            Self::Command(message) => eprintln!("error: {}", message),
        }
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}
