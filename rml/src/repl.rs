//! Line-buffered front-end. Lines are collected until brackets balance, then evaluated as one statement.

use crate::{Error, Interpreter, Value};
use std::io::Write;

/// What the caller should do after feeding a line.
#[derive(Debug)]
pub enum Response {
    /// Brackets are still open, more lines are needed.
    Continue,
    Value(Value),
    Error(Error),
    /// Output of a command.
    Text(String),
    Exit,
}

pub struct Repl<W: Write> {
    interpreter: Interpreter<W>,
    buffer: String,
}

impl<W: Write> Repl<W> {
    pub fn new(interpreter: Interpreter<W>) -> Self {
        Self {
            interpreter,
            buffer: String::new(),
        }
    }

    /// Returns `true` while a statement spans several lines.
    pub fn is_continuing(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn interpreter(&self) -> &Interpreter<W> {
        &self.interpreter
    }

    pub fn handle_line(&mut self, line: &str) -> Response {
        let line = line.trim_end_matches(['\n', '\r']);
        match line.trim() {
            "exit" | "quit" if !self.is_continuing() => return Response::Exit,
            "vars" if !self.is_continuing() => return Response::Text(self.vars()),
            "funcs" if !self.is_continuing() => return Response::Text(self.funcs()),
            "show" => return Response::Text(self.buffer.clone()),
            "clear" => {
                self.buffer.clear();
                return Response::Text("buffer cleared".to_string());
            }
            "" if !self.is_continuing() => return Response::Text(String::new()),
            _ => {}
        }

        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(line);
        if nesting_depth(&self.buffer) > 0 {
            return Response::Continue;
        }

        let source = std::mem::take(&mut self.buffer);
        match self.interpreter.eval(&source) {
            Ok(value) => Response::Value(value),
            Err(err) => Response::Error(err),
        }
    }

    fn vars(&self) -> String {
        let vars = self.interpreter.variables();
        if vars.is_empty() {
            return "(no variables)".to_string();
        }
        vars.iter()
            .map(|(name, value)| format!("{} = {:?}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn funcs(&self) -> String {
        let funcs = self.interpreter.functions();
        if funcs.is_empty() {
            return "(no functions)".to_string();
        }
        funcs
            .values()
            .map(|def| format!("{}({})", def.name, def.params.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Counts open `(` and `{` minus closing ones, ignoring string literals.
pub fn nesting_depth(source: &str) -> i32 {
    let mut depth = 0;
    let mut quote = None;
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '{' => depth += 1,
                ')' | '}' => depth -= 1,
                _ => {}
            },
        }
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn repl() -> Repl<Vec<u8>> {
        Repl::new(Interpreter::with_output(Config::default(), Vec::new()))
    }

    #[test]
    fn test_nesting_depth() {
        assert_eq!(nesting_depth("x = 1"), 0);
        assert_eq!(nesting_depth("func f(a) {"), 1);
        assert_eq!(nesting_depth("func f(a) { if < a > 0 > {"), 2);
        assert_eq!(nesting_depth("hyouji(\"{ (\")"), 0);
        assert_eq!(nesting_depth("hyouji('it\\'s {')"), 0);
        assert_eq!(nesting_depth("}"), -1);
    }

    #[test]
    fn test_single_line() {
        let mut repl = repl();
        assert!(matches!(repl.handle_line("x = 1 + 2\n"), Response::Value(Value::Int(3))));
        assert!(matches!(repl.handle_line("x"), Response::Value(Value::Int(3))));
    }

    #[test]
    fn test_multi_line() {
        let mut repl = repl();
        assert!(matches!(repl.handle_line("func add(a, b) {"), Response::Continue));
        assert!(repl.is_continuing());
        assert!(matches!(repl.handle_line("  return a + b"), Response::Continue));
        match repl.handle_line("}") {
            Response::Value(value) => assert_eq!(value, Value::from("add")),
            other => panic!("expected a value, got {:?}", other),
        }
        assert!(!repl.is_continuing());
        assert!(matches!(repl.handle_line("add(3, 4)"), Response::Value(Value::Int(7))));
    }

    #[test]
    fn test_errors_do_not_stop_the_session() {
        let mut repl = repl();
        match repl.handle_line("z") {
            Response::Error(err) => assert_eq!(err.to_string(), "undefined variable: z"),
            other => panic!("expected an error, got {:?}", other),
        }
        assert!(matches!(repl.handle_line("(1"), Response::Continue));
        assert!(matches!(repl.handle_line(")"), Response::Value(Value::Int(1))));
        assert!(matches!(repl.handle_line("1 )"), Response::Error(Error::Parse(_))));
    }

    #[test]
    fn test_commands() {
        let mut repl = repl();
        match repl.handle_line("vars") {
            Response::Text(text) => assert_eq!(text, "(no variables)"),
            other => panic!("expected text, got {:?}", other),
        }
        repl.handle_line("b = 'two'");
        repl.handle_line("a = 1");
        repl.handle_line("func f(x, y) { x }");
        match repl.handle_line("vars") {
            Response::Text(text) => assert_eq!(text, "a = 1\nb = \"two\""),
            other => panic!("expected text, got {:?}", other),
        }
        match repl.handle_line("funcs") {
            Response::Text(text) => assert_eq!(text, "f(x, y)"),
            other => panic!("expected text, got {:?}", other),
        }
        assert_eq!(repl.interpreter().variables().len(), 2);

        repl.handle_line("while < true > {");
        match repl.handle_line("show") {
            Response::Text(text) => assert_eq!(text, "while < true > {"),
            other => panic!("expected text, got {:?}", other),
        }
        repl.handle_line("clear");
        assert!(!repl.is_continuing());
        assert!(matches!(repl.handle_line("exit"), Response::Exit));
    }
}
