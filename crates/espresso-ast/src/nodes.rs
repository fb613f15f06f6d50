//! Per-kind node data.
//!
//! Each struct here holds only what is essential to its kind. Flags and
//! provenance live on [`Expr`], which wraps an [`ExprKind`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{AstError, Expr, Literal, NodeKind, Origin, Token};

fn default_mutable() -> bool {
    true
}

/// A variable reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Var {
    pub name: String,
    #[serde(default = "default_mutable")]
    pub mutable: bool,
}

impl Var {
    pub fn new(name: impl Into<String>, mutable: bool) -> Self {
        Var {
            name: name.into(),
            mutable,
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.mutable {
            f.write_str("!")?;
        }
        Ok(())
    }
}

/// Plain or compound assignment. `op` is the operator in front of `=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub func: Box<Expr>,
    #[serde(default)]
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub obj: Box<Expr>,
    #[serde(default)]
    pub keys: Vec<Expr>,
}

/// An infinite loop. Every looping construct lowers to this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loop {
    pub body: Box<Expr>,
    #[serde(default, rename = "else", skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct If {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond: Option<Box<Expr>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<Box<Expr>>,
    #[serde(default, rename = "else", skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Box<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    Break,
    Continue,
    Redo,
}

impl BranchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BranchKind::Break => "break",
            BranchKind::Continue => "continue",
            BranchKind::Redo => "redo",
        }
    }
}

impl FromStr for BranchKind {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "break" => Ok(BranchKind::Break),
            "continue" => Ok(BranchKind::Continue),
            "redo" => Ok(BranchKind::Redo),
            other => Err(AstError::malformed(
                NodeKind::Branch,
                format!("unknown branch kind {other:?}"),
            )),
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Jump out of (or back to the top of) the `level`-th enclosing block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub kind: BranchKind,
    #[serde(default)]
    pub level: i64,
}

/// Operator application. Always an r-value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op {
    pub op: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Expr>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub public: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private: Vec<Expr>,
    #[serde(default, rename = "static", skip_serializing_if = "Vec::is_empty")]
    pub statics: Vec<Expr>,
}

/// One arm of a [`Switch`].
///
/// Not a node on its own: it only exists inside a switch, and `next`
/// indexes that switch's case list. A `next` equal to the number of cases
/// falls through into the default body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(skip)]
    pub origin: Origin,
    pub op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<Expr>>,
    pub body: Box<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<usize>,
}

impl Case {
    pub fn new(op: impl Into<String>, value: Option<Expr>, body: Expr) -> Self {
        Case {
            origin: Origin::default(),
            op: op.into(),
            value: value.map(Box::new),
            body: Box::new(body),
            next: None,
        }
    }

    pub fn with_token(mut self, token: Arc<Token>) -> Self {
        self.origin = Origin::new(token);
        self
    }

    pub fn token(&self) -> Option<&Token> {
        self.origin.token()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    pub scrutinee: Box<Expr>,
    #[serde(default)]
    pub cases: Vec<Case>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Box<Expr>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<Box<Expr>>,
    #[serde(default, rename = "else", skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Box<Expr>>,
}

/// A sequence of expressions evaluating to the last one, with the
/// variables it declares.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub elems: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<Var>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Func {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub params: Vec<Expr>,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct For {
    pub target: Box<Expr>,
    pub iter: Box<Expr>,
    pub body: Box<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<Box<Expr>>,
    #[serde(default, rename = "else", skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Box<Expr>>,
}

/// The closed set of node kinds.
///
/// In JSON each kind is an object with a single snake_case key, e.g.
/// `{"var": {"name": "x"}}` or `{"value": 1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprKind {
    Value(Literal),
    Var(Var),
    Spread(Box<Expr>),
    Assign(Assign),
    Tuple(Vec<Expr>),
    Call(Call),
    Index(Index),
    Loop(Loop),
    If(If),
    Branch(Branch),
    Op(Op),
    Import(String),
    Proto(Proto),
    Return(Box<Expr>),
    Switch(Switch),
    Block(Block),
    Prog(Block),
    Func(Func),
    /// Interpolated string: literal pieces and embedded expressions.
    Format(Vec<Expr>),
    /// Object literal as ordered key/value pairs.
    Object(Vec<(Expr, Expr)>),
    For(For),
}

impl ExprKind {
    pub fn node_kind(&self) -> NodeKind {
        match self {
            ExprKind::Value(_) => NodeKind::Value,
            ExprKind::Var(_) => NodeKind::Var,
            ExprKind::Spread(_) => NodeKind::Spread,
            ExprKind::Assign(_) => NodeKind::Assign,
            ExprKind::Tuple(_) => NodeKind::Tuple,
            ExprKind::Call(_) => NodeKind::Call,
            ExprKind::Index(_) => NodeKind::Index,
            ExprKind::Loop(_) => NodeKind::Loop,
            ExprKind::If(_) => NodeKind::If,
            ExprKind::Branch(_) => NodeKind::Branch,
            ExprKind::Op(_) => NodeKind::Op,
            ExprKind::Import(_) => NodeKind::Import,
            ExprKind::Proto(_) => NodeKind::Proto,
            ExprKind::Return(_) => NodeKind::Return,
            ExprKind::Switch(_) => NodeKind::Switch,
            ExprKind::Block(_) => NodeKind::Block,
            ExprKind::Prog(_) => NodeKind::Prog,
            ExprKind::Func(_) => NodeKind::Func,
            ExprKind::Format(_) => NodeKind::Format,
            ExprKind::Object(_) => NodeKind::Object,
            ExprKind::For(_) => NodeKind::For,
        }
    }
}
