//! Runtime errors.

use rml_value::Value;
use std::io;
use thiserror::Error;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("undefined function: {0}")]
    UndefinedFunction(String),
    #[error("wrong number of arguments for '{name}': expected {expected}, got {got}")]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    /// `construct` is the phrase naming the statement, e.g. "an if statement".
    #[error("condition of {construct} must be a boolean, got {kind}")]
    NonBooleanCondition {
        construct: &'static str,
        kind: &'static str,
    },
    #[error("Loop exceeded maximum iterations ({0})")]
    LoopLimitExceeded(usize),
    #[error("maximum recursion depth exceeded ({0})")]
    RecursionLimitExceeded(usize),
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
    #[error("return outside of a function")]
    ReturnOutsideFunction,
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {lhs} {op} {rhs}")]
    Overflow { lhs: i64, op: &'static str, rhs: i64 },
    #[error("unsupported operand types for {op}: {lhs} and {rhs}")]
    UnsupportedOperands {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("cannot compare {lhs} with {rhs}")]
    NotComparable {
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Non-local exits that unwind through [`crate::evaluator::Evaluator::eval`].
#[derive(Debug)]
pub enum Unwind {
    /// A `return` travelling to the nearest function call.
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(err: RuntimeError) -> Self {
        Unwind::Error(err)
    }
}

impl From<io::Error> for Unwind {
    fn from(err: io::Error) -> Self {
        Unwind::Error(err.into())
    }
}
