//! Chained scopes, stored as an arena of frames linked by parent handles.

use crate::error::RuntimeError;
use log::debug;
use rml_parser::ast::FunctionDef;
use rml_value::Value;
use std::collections::{BTreeMap, HashMap};
use std::iter;
use std::rc::Rc;

/// Handle to a frame of an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId(usize);

#[derive(Debug, Default)]
struct Frame {
    values: HashMap<String, Value>,
    functions: HashMap<String, Rc<FunctionDef>>,
    parent: Option<FrameId>,
}

/// All frames alive at a given time. The global frame is created with the environment and is never removed.
/// Frames are created and discarded in LIFO order, one per active function call.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// The outermost frame. Function call frames always have it as their parent.
    pub fn global(&self) -> FrameId {
        FrameId(0)
    }

    /// Number of live frames, the global frame included.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Creates a new empty frame on top of the arena.
    pub fn push_frame(&mut self, parent: FrameId) -> FrameId {
        self.frames.push(Frame {
            parent: Some(parent),
            ..Frame::default()
        });
        let id = FrameId(self.frames.len() - 1);
        debug!("push frame {:?} (parent {:?})", id, parent);
        id
    }

    /// Discards the most recently pushed frame. The global frame is kept.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
            debug!("pop frame {:?}", FrameId(self.frames.len()));
        }
    }

    /// Returns `frame` followed by its ancestors, innermost first.
    fn chain(&self, frame: FrameId) -> impl Iterator<Item = (FrameId, &Frame)> {
        iter::successors(Some(frame), move |id| self.frames[id.0].parent)
            .map(move |id| (id, &self.frames[id.0]))
    }

    /// Defines (or overwrites) `name` in `frame` itself.
    pub fn define(&mut self, frame: FrameId, name: impl Into<String>, value: Value) {
        self.frames[frame.0].values.insert(name.into(), value);
    }

    /// Rewrites `name` in the nearest frame of the chain that defines it.
    pub fn assign(&mut self, frame: FrameId, name: &str, value: Value) -> Result<(), RuntimeError> {
        let owner = self
            .chain(frame)
            .find(|(_, f)| f.values.contains_key(name))
            .map(|(id, _)| id)
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))?;
        self.frames[owner.0].values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn lookup(&self, frame: FrameId, name: &str) -> Result<Value, RuntimeError> {
        self.chain(frame)
            .find_map(|(_, f)| f.values.get(name))
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))
    }

    pub fn var_exists(&self, frame: FrameId, name: &str) -> bool {
        self.chain(frame).any(|(_, f)| f.values.contains_key(name))
    }

    /// All variables visible from `frame`. Inner frames shadow outer ones.
    pub fn variables(&self, frame: FrameId) -> BTreeMap<String, Value> {
        let mut vars = BTreeMap::new();
        for (_, f) in self.chain(frame) {
            for (name, value) in &f.values {
                vars.entry(name.clone()).or_insert_with(|| value.clone());
            }
        }
        vars
    }

    pub fn define_function(&mut self, frame: FrameId, def: Rc<FunctionDef>) {
        self.frames[frame.0].functions.insert(def.name.clone(), def);
    }

    pub fn lookup_function(&self, frame: FrameId, name: &str) -> Result<Rc<FunctionDef>, RuntimeError> {
        self.chain(frame)
            .find_map(|(_, f)| f.functions.get(name))
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedFunction(name.to_string()))
    }

    pub fn function_exists(&self, frame: FrameId, name: &str) -> bool {
        self.chain(frame).any(|(_, f)| f.functions.contains_key(name))
    }

    /// All functions visible from `frame`. Inner frames shadow outer ones.
    pub fn functions(&self, frame: FrameId) -> BTreeMap<String, Rc<FunctionDef>> {
        let mut funcs = BTreeMap::new();
        for (_, f) in self.chain(frame) {
            for (name, def) in &f.functions {
                funcs.entry(name.clone()).or_insert_with(|| Rc::clone(def));
            }
        }
        funcs
    }

    /// Returns `true` if the global frame holds no variables and no functions.
    pub fn is_empty(&self) -> bool {
        let global = &self.frames[0];
        global.values.is_empty() && global.functions.is_empty()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rml_parser::ast::Node;

    fn func(name: &str) -> Rc<FunctionDef> {
        Rc::new(FunctionDef {
            name: name.to_string(),
            params: Vec::new(),
            body: Node::Block(Vec::new()),
        })
    }

    #[test]
    fn test_define_and_lookup() {
        let mut env = Environment::new();
        let global = env.global();
        assert!(env.is_empty());
        env.define(global, "x", Value::Int(1));
        assert_eq!(env.lookup(global, "x").unwrap(), Value::Int(1));
        assert!(env.var_exists(global, "x"));
        assert!(!env.is_empty());
        assert!(matches!(
            env.lookup(global, "y"),
            Err(RuntimeError::UndefinedVariable(name)) if name == "y"
        ));
    }

    #[test]
    fn test_lookup_walks_to_parent() {
        let mut env = Environment::new();
        let global = env.global();
        env.define(global, "x", Value::Int(1));
        let local = env.push_frame(global);
        assert_eq!(env.lookup(local, "x").unwrap(), Value::Int(1));

        // shadowing
        env.define(local, "x", Value::Int(2));
        assert_eq!(env.lookup(local, "x").unwrap(), Value::Int(2));
        assert_eq!(env.lookup(global, "x").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_assign_rewrites_defining_frame() {
        let mut env = Environment::new();
        let global = env.global();
        env.define(global, "x", Value::Int(1));
        let local = env.push_frame(global);
        env.assign(local, "x", Value::Int(5)).unwrap();
        env.pop_frame();
        assert_eq!(env.lookup(global, "x").unwrap(), Value::Int(5));

        assert!(matches!(
            env.assign(global, "missing", Value::Nil),
            Err(RuntimeError::UndefinedVariable(_))
        ));
    }

    #[test]
    fn test_pop_frame_discards_locals() {
        let mut env = Environment::new();
        let global = env.global();
        let local = env.push_frame(global);
        env.define(local, "tmp", Value::Bool(true));
        assert_eq!(env.frame_count(), 2);
        env.pop_frame();
        assert_eq!(env.frame_count(), 1);
        assert!(!env.var_exists(global, "tmp"));

        // the global frame survives
        env.pop_frame();
        assert_eq!(env.frame_count(), 1);
    }

    #[test]
    fn test_variables_flattened() {
        let mut env = Environment::new();
        let global = env.global();
        env.define(global, "a", Value::Int(1));
        env.define(global, "b", Value::Int(2));
        let local = env.push_frame(global);
        env.define(local, "b", Value::from("local"));

        let vars = env.variables(local);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars["a"], Value::Int(1));
        assert_eq!(vars["b"], Value::from("local"));
        assert_eq!(env.variables(global)["b"], Value::Int(2));
    }

    #[test]
    fn test_functions() {
        let mut env = Environment::new();
        let global = env.global();
        env.define_function(global, func("add"));
        let local = env.push_frame(global);
        env.define_function(local, func("helper"));

        assert_eq!(env.lookup_function(local, "add").unwrap().name, "add");
        assert!(env.function_exists(local, "helper"));
        assert!(!env.function_exists(global, "helper"));
        assert_eq!(
            env.functions(local).keys().collect::<Vec<_>>(),
            vec!["add", "helper"]
        );
        assert!(matches!(
            env.lookup_function(global, "nope"),
            Err(RuntimeError::UndefinedFunction(name)) if name == "nope"
        ));
    }
}
