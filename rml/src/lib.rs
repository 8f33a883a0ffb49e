pub mod repl;

use log::debug;
use rml_parser::ast::FunctionDef;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::rc::Rc;
use thiserror::Error;

pub use rml_eval::{Config, Evaluator, RuntimeError};
pub use rml_parser::error::{LexError, ParseError};
pub use rml_parser::{parse, parse_program};
pub use rml_value::Value;

/// Either failure layer of the interpreter.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Parses and evaluates source text against one persistent environment.
pub struct Interpreter<W: Write = io::Stdout> {
    evaluator: Evaluator<W>,
}

impl Interpreter<io::Stdout> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            evaluator: Evaluator::with_config(config),
        }
    }
}

impl Default for Interpreter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(config: Config, output: W) -> Self {
        Self {
            evaluator: Evaluator::with_output(config, output),
        }
    }

    /// Evaluates a single statement.
    pub fn eval(&mut self, source: &str) -> Result<Value, Error> {
        let ast = parse(source)?;
        Ok(self.evaluator.evaluate(&ast)?)
    }

    /// Evaluates every statement of `source` in order and returns the value of the last one.
    /// Nothing is evaluated if any statement fails to parse.
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let program = parse_program(source)?;
        debug!("running {} statements", program.len());
        let mut result = Value::Nil;
        for stmt in &program {
            result = self.evaluator.evaluate(stmt)?;
        }
        Ok(result)
    }

    /// All global variables, sorted by name.
    pub fn variables(&self) -> BTreeMap<String, Value> {
        self.evaluator.variables()
    }

    /// All global functions, sorted by name.
    pub fn functions(&self) -> BTreeMap<String, Rc<FunctionDef>> {
        self.evaluator.functions()
    }

    pub fn evaluator(&self) -> &Evaluator<W> {
        &self.evaluator
    }

    pub fn into_output(self) -> W {
        self.evaluator.into_output()
    }
}
