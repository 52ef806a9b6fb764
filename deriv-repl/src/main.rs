mod error;
mod form;

use deriv_engine::{parse_order, Derivation};
use error::Error;
use form::Form;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{io::{self, BufRead, IsTerminal}, process::ExitCode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Prints the explanation, followed by the result.
fn print_derivation(derivation: &Derivation) {
    for line in &derivation.steps {
        println!("{}", line);
    }
    println!("{}", derivation.result);
}

/// Computes the derivative described by the form, printing the success or failure. Returns true
/// on success.
fn run(form: &Form) -> bool {
    match form.compute() {
        Ok(derivation) => {
            print_derivation(&derivation);
            true
        },
        Err(err) => {
            Error::from(err).report_to_stderr(form.expression());
            false
        },
    }
}

/// Handles a line of input: either a `:command` that changes the form, or a new expression to
/// differentiate.
fn handle_line(form: &mut Form, line: &str) -> bool {
    if line.trim_start().starts_with(':') {
        match form.apply_command(line) {
            Ok(message) => {
                debug!(?form, "applied `{}`", line.trim());
                println!("{}", message);
                true
            },
            Err(err) => {
                err.report_to_stderr(line);
                false
            },
        }
    } else {
        form.set_expression(line);
        run(form)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args();
    args.next();

    let mut form = Form::default();
    if let Some(expression) = args.next() {
        // deriv <expression> [variable] [order]
        form.set_expression(expression);
        if let Some(variable) = args.next() {
            form.set_variable(variable);
        }
        if let Some(order) = args.next() {
            match parse_order(&order) {
                Ok(order) => form.set_order(order),
                Err(err) => {
                    Error::from(err).report_to_stderr(&order);
                    return ExitCode::FAILURE;
                },
            }
        }

        if run(&form) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    } else if !io::stdin().is_terminal() {
        // one expression or command per line
        let mut success = true;
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    eprintln!("{}", err);
                    return ExitCode::FAILURE;
                },
            };
            if line.trim().is_empty() {
                continue;
            }

            success &= handle_line(&mut form, &line);
        }

        if success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };

        fn process_line(rl: &mut DefaultEditor, form: &mut Form) -> Result<(), ReadlineError> {
            let input = rl.readline("d/dx> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            handle_line(form, &input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut form) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }

        ExitCode::SUCCESS
    }
}
