use crate::lexer::Token;
use std::rc::Rc;

/// A node of the syntax tree. Every node evaluates to a value, so statements and expressions share one type.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    StringLiteral(String),
    /// A variable reference (e.g. `foo`).
    Variable(String),
    /// Assigns or declares a variable (e.g. `x = 1`).
    Assignment { name: String, value: Box<Node> },
    /// An arithmetic expression (e.g. `1 + 1`). `op` is one of `+ - * /`.
    BinaryOp {
        lhs: Box<Node>,
        op: Token,
        rhs: Box<Node>,
    },
    /// A comparison (e.g. `a =< b`). `op` is one of `== != < > =< =>`.
    ComparisonOp {
        lhs: Box<Node>,
        op: Token,
        rhs: Box<Node>,
    },
    IfStatement {
        condition: Box<Node>,
        then_body: Box<Node>,
        /// Tested in order after `condition`.
        else_ifs: Vec<ConditionalBranch>,
        else_body: Option<Box<Node>>,
    },
    WhileStatement { condition: Box<Node>, body: Box<Node> },
    /// A sequence of statements. Evaluates to the value of the last one.
    Block(Vec<Node>),
    /// `hyouji(expr)`
    OutputStatement(Box<Node>),
    FunctionDef(Rc<FunctionDef>),
    FunctionCall { name: String, args: Vec<Node> },
    ReturnStatement(Option<Box<Node>>),
}

/// An `else-if < condition > { body }` branch.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    pub condition: Node,
    pub body: Node,
}

/// A `func name(params) { body }` definition. Shared between the tree and the function tables that register it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Node,
}
