//! Tree-walking evaluation of [`Node`]s.

use crate::config::Config;
use crate::environment::{Environment, FrameId};
use crate::error::{RuntimeError, Unwind};
use log::{debug, trace, warn};
use rml_parser::ast::{FunctionDef, Node};
use rml_parser::lexer::Token;
use rml_value::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;

/// A function body is evaluated on a fresh stack segment when less than this is left.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated for deep call chains.
const STACK_PER_CALL: usize = 4 * 1024 * 1024;

/// Generate evaluation of a checked integer binary operator.
macro_rules! gen_int_binary_op {
    ($lhs: expr, $rhs: expr, $op: literal, $checked: ident) => {
        match ($lhs, $rhs) {
            (Value::Int(a), Value::Int(b)) => a.$checked(b).map(Value::Int).ok_or(RuntimeError::Overflow {
                lhs: a,
                op: $op,
                rhs: b,
            }),
            (a, b) => Err(RuntimeError::UnsupportedOperands {
                op: $op,
                lhs: a.kind(),
                rhs: b.kind(),
            }),
        }
    };
}

pub struct Evaluator<W: Write = io::Stdout> {
    env: Environment,
    /// The frame statements are currently evaluated in.
    current_frame: FrameId,
    /// Number of active function calls.
    call_depth: usize,
    config: Config,
    /// Destination of `hyouji`.
    output: W,
}

impl Evaluator<io::Stdout> {
    /// Create an evaluator with the default [`Config`] that prints to stdout.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_output(config, io::stdout())
    }
}

impl Default for Evaluator<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Evaluator<W> {
    pub fn with_output(config: Config, output: W) -> Self {
        let env = Environment::new();
        Self {
            current_frame: env.global(),
            env,
            call_depth: 0,
            config,
            output,
        }
    }

    /// Evaluates a top-level statement.
    /// Whatever the statement changed before failing stays changed.
    pub fn evaluate(&mut self, node: &Node) -> Result<Value, RuntimeError> {
        match self.eval(node) {
            Ok(value) => Ok(value),
            Err(Unwind::Return(_)) => Err(RuntimeError::ReturnOutsideFunction),
            Err(Unwind::Error(err)) => Err(err),
        }
    }

    /// All global variables.
    pub fn variables(&self) -> BTreeMap<String, Value> {
        self.env.variables(self.env.global())
    }

    /// All global functions.
    pub fn functions(&self) -> BTreeMap<String, Rc<FunctionDef>> {
        self.env.functions(self.env.global())
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn eval(&mut self, node: &Node) -> Result<Value, Unwind> {
        trace!("eval {:?}", node);
        match node {
            Node::IntegerLiteral(val) => Ok(Value::Int(*val)),
            Node::BooleanLiteral(val) => Ok(Value::Bool(*val)),
            Node::StringLiteral(val) => Ok(Value::Str(val.clone())),
            Node::Variable(name) => Ok(self.env.lookup(self.current_frame, name)?),
            Node::Assignment { name, value } => {
                let value = self.eval(value)?;
                if self.env.var_exists(self.current_frame, name) {
                    self.env.assign(self.current_frame, name, value.clone())?;
                } else {
                    self.env.define(self.current_frame, name.as_str(), value.clone());
                }
                Ok(value)
            }
            Node::BinaryOp { lhs, op, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                Ok(eval_binary_op(lhs, op, rhs)?)
            }
            Node::ComparisonOp { lhs, op, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                Ok(eval_comparison_op(&lhs, op, &rhs)?)
            }
            Node::IfStatement {
                condition,
                then_body,
                else_ifs,
                else_body,
            } => {
                if self.eval_condition(condition, "an if statement")? {
                    return self.eval(then_body);
                }
                for branch in else_ifs {
                    if self.eval_condition(&branch.condition, "an else-if statement")? {
                        return self.eval(&branch.body);
                    }
                }
                match else_body {
                    Some(body) => self.eval(body),
                    None => Ok(Value::Nil),
                }
            }
            Node::WhileStatement { condition, body } => {
                let mut result = Value::Nil;
                let mut iterations = 0;
                while self.eval_condition(condition, "a while statement")? {
                    iterations += 1;
                    if iterations > self.config.max_loop_iterations {
                        warn!("loop stopped after {} iterations", self.config.max_loop_iterations);
                        return Err(RuntimeError::LoopLimitExceeded(self.config.max_loop_iterations).into());
                    }
                    result = self.eval(body)?;
                }
                Ok(result)
            }
            Node::Block(body) => {
                let mut result = Value::Nil;
                for stmt in body {
                    result = self.eval(stmt)?;
                }
                Ok(result)
            }
            Node::OutputStatement(expr) => {
                let value = self.eval(expr)?;
                writeln!(self.output, "{}", value)?;
                Ok(Value::Nil)
            }
            Node::FunctionDef(def) => {
                debug!("define function {}({})", def.name, def.params.join(", "));
                self.env.define_function(self.current_frame, Rc::clone(def));
                Ok(Value::Str(def.name.clone()))
            }
            Node::FunctionCall { name, args } => self.eval_call(name, args),
            Node::ReturnStatement(expr) => {
                let value = match expr {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                Err(Unwind::Return(value))
            }
        }
    }

    /// Evaluates a condition that must produce a boolean.
    /// `construct` names the statement in the error message.
    fn eval_condition(&mut self, condition: &Node, construct: &'static str) -> Result<bool, Unwind> {
        let value = self.eval(condition)?;
        value.cast_to_bool().ok_or_else(|| {
            RuntimeError::NonBooleanCondition {
                construct,
                kind: value.kind(),
            }
            .into()
        })
    }

    fn eval_call(&mut self, name: &str, args: &[Node]) -> Result<Value, Unwind> {
        let func = self.env.lookup_function(self.current_frame, name)?;
        if args.len() != func.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                name: name.to_string(),
                expected: func.params.len(),
                got: args.len(),
            }
            .into());
        }

        // arguments are evaluated in the caller's frame
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg)?);
        }

        let global = self.env.global();
        let frame = self.env.push_frame(global);
        for (param, value) in func.params.iter().zip(values) {
            self.env.define(frame, param.as_str(), value);
        }
        let caller = mem::replace(&mut self.current_frame, frame);
        self.call_depth += 1;
        debug!("call {} at depth {}", name, self.call_depth);

        let result = if self.call_depth > self.config.max_recursion_depth {
            warn!("call to {} exceeds the recursion limit", name);
            Err(RuntimeError::RecursionLimitExceeded(self.config.max_recursion_depth).into())
        } else {
            stacker::maybe_grow(STACK_RED_ZONE, STACK_PER_CALL, || self.eval(&func.body))
        };

        self.call_depth -= 1;
        self.current_frame = caller;
        self.env.pop_frame();

        match result {
            Ok(value) | Err(Unwind::Return(value)) => {
                debug!("{} returned {:?}", name, value);
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }
}

fn eval_binary_op(lhs: Value, op: &Token, rhs: Value) -> Result<Value, RuntimeError> {
    match op {
        Token::Plus => match (lhs, rhs) {
            (lhs @ Value::Str(_), rhs) | (lhs, rhs @ Value::Str(_)) => {
                Ok(Value::Str(format!("{}{}", lhs, rhs)))
            }
            (lhs, rhs) => gen_int_binary_op!(lhs, rhs, "+", checked_add),
        },
        Token::Minus => gen_int_binary_op!(lhs, rhs, "-", checked_sub),
        Token::Asterisk => gen_int_binary_op!(lhs, rhs, "*", checked_mul),
        Token::Slash => match (lhs, rhs) {
            (Value::Int(_), Value::Int(0)) => Err(RuntimeError::DivisionByZero),
            (lhs, rhs) => gen_int_binary_op!(lhs, rhs, "/", checked_div_floor),
        },
        _ => Err(RuntimeError::UnknownOperator(op.to_string())),
    }
}

fn eval_comparison_op(lhs: &Value, op: &Token, rhs: &Value) -> Result<Value, RuntimeError> {
    let holds: fn(Ordering) -> bool = match op {
        // values of different types are never equal
        Token::EqualsEquals => return Ok(Value::Bool(lhs == rhs)),
        Token::NotEquals => return Ok(Value::Bool(lhs != rhs)),
        Token::LessThan => Ordering::is_lt,
        Token::GreaterThan => Ordering::is_gt,
        Token::EqualsLess => Ordering::is_le,
        Token::EqualsGreater => Ordering::is_ge,
        _ => return Err(RuntimeError::UnknownOperator(op.to_string())),
    };
    let ordering = match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => {
            return Err(RuntimeError::NotComparable {
                lhs: lhs.kind(),
                rhs: rhs.kind(),
            })
        }
    };
    Ok(Value::Bool(holds(ordering)))
}

/// Integer division rounding toward negative infinity. `None` on division by zero or overflow.
trait CheckedDivFloor: Sized {
    fn checked_div_floor(self, rhs: Self) -> Option<Self>;
}

impl CheckedDivFloor for i64 {
    fn checked_div_floor(self, rhs: i64) -> Option<i64> {
        let quotient = self.checked_div(rhs)?;
        if self % rhs != 0 && (self < 0) != (rhs < 0) {
            Some(quotient - 1)
        } else {
            Some(quotient)
        }
    }
}
