//! Line‑oriented session: every line is parsed and evaluated against one
//! environment that lives as long as the [`Repl`], so bindings made on one
//! line are visible on the next.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::environment::{Env, Environment};
use crate::error::MonkeyError;
use crate::interpreter::Interpreter;

/// Printed before every line read.
pub const PROMPT: &str = ">> ";

/// Input that ends the session.
pub const QUIT: &str = "quit";

/// What a single line of input produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The quit word was entered.
    Quit,

    /// Nothing to show: a blank line or a `null` result.
    Empty,

    /// Rendering of a non‑null result.
    Value(String),

    /// The line did not parse; nothing was evaluated.
    ParseErrors(Vec<String>),

    /// Evaluation failed with this message.
    RuntimeError(String),
}

pub struct Repl {
    interpreter: Interpreter,
    env: Env,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

impl Repl {
    pub fn new() -> Self {
        Self::with_interpreter(Interpreter::new())
    }

    pub fn with_interpreter(interpreter: Interpreter) -> Self {
        info!("REPL session started");

        Self {
            interpreter,
            env: Environment::new_shared(),
        }
    }

    /// The session environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Evaluate one line of input.
    pub fn eval_line(&mut self, line: &str) -> Outcome {
        let line = line.trim();

        if line == QUIT {
            return Outcome::Quit;
        }

        if line.is_empty() {
            return Outcome::Empty;
        }

        debug!("Evaluating line: {}", line);

        match self.interpreter.eval_source(line, &self.env) {
            Ok(object) if object.is_null() => Outcome::Empty,
            Ok(object) => Outcome::Value(object.to_string()),
            Err(MonkeyError::Parse(errors)) => Outcome::ParseErrors(errors),
            Err(e) => Outcome::RuntimeError(e.to_string()),
        }
    }

    /// Write the user‑visible form of `outcome`. Returns `false` on quit.
    pub fn report<W: Write>(outcome: &Outcome, output: &mut W) -> io::Result<bool> {
        match outcome {
            Outcome::Quit => return Ok(false),
            Outcome::Empty => {}
            Outcome::Value(rendered) => writeln!(output, "{}", rendered)?,
            Outcome::ParseErrors(errors) => {
                writeln!(output, "parser errors:")?;

                for error in errors {
                    writeln!(output, "\t{}", error)?;
                }
            }
            Outcome::RuntimeError(message) => writeln!(output, "ERROR: {}", message)?,
        }

        Ok(true)
    }

    /// Drive a session until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        let mut lines = input.lines();

        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let Some(line) = lines.next() else {
                break;
            };

            let outcome = self.eval_line(&line?);

            if !Self::report(&outcome, output)? {
                break;
            }
        }

        info!("REPL session ended");

        Ok(())
    }
}
