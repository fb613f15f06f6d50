//! The node type shared by every kind.

use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::nodes::{
    Assign, Block, Branch, BranchKind, Call, ExprKind, For, Func, If, Index, Loop, Op, Proto,
    Switch, Var,
};
use crate::{AstError, Literal, NodeKind, Token};

/// The token a node was built from, if any.
///
/// Provenance never takes part in structural equality: two origins always
/// compare equal.
#[derive(Debug, Clone, Default)]
pub struct Origin(Option<Arc<Token>>);

impl Origin {
    pub fn new(token: Arc<Token>) -> Self {
        Origin(Some(token))
    }

    pub fn token(&self) -> Option<&Token> {
        self.0.as_deref()
    }
}

impl PartialEq for Origin {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// A syntax tree node.
///
/// The l-value and r-value flags are derived from the kind when the node
/// is built and never change afterwards. The kind is only reachable by
/// shared reference, so a published node is immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    origin: Origin,
    lvalue: bool,
    rvalue: bool,
    kind: ExprKind,
}

impl Expr {
    /// Builds a node from kind data, checking every structural rule.
    ///
    /// All constructors funnel through here or through [`Expr::new`], which
    /// skips the checks for kinds that have none.
    pub fn from_kind(mut kind: ExprKind) -> Result<Expr, AstError> {
        drop_sentinels(&mut kind);
        validate(&kind)?;
        Ok(Self::with_flags(kind))
    }

    fn new(mut kind: ExprKind) -> Expr {
        drop_sentinels(&mut kind);
        Self::with_flags(kind)
    }

    fn with_flags(kind: ExprKind) -> Expr {
        let (lvalue, rvalue) = flags(&kind);
        Expr {
            origin: Origin::default(),
            lvalue,
            rvalue,
            kind,
        }
    }

    /// Attaches the originating token.
    ///
    /// `Prog` is the top-level unit and never records a token; the call
    /// leaves it unchanged.
    pub fn with_token(mut self, token: Arc<Token>) -> Self {
        if !matches!(self.kind, ExprKind::Prog(_)) {
            self.origin = Origin::new(token);
        }
        self
    }

    pub fn value(value: impl Into<Literal>) -> Expr {
        Self::new(ExprKind::Value(value.into()))
    }

    /// A value node holding the none-sentinel.
    pub fn none() -> Expr {
        Self::value(Literal::None)
    }

    /// Builds a variable reference. The name must not be empty.
    pub fn var(name: impl Into<String>, mutable: bool) -> Result<Expr, AstError> {
        Self::from_kind(ExprKind::Var(Var::new(name, mutable)))
    }

    /// Builds a variable whose name is the token's value.
    pub fn var_from_token(token: Arc<Token>, mutable: bool) -> Result<Expr, AstError> {
        let name = token.value.as_str().ok_or_else(|| {
            AstError::malformed(
                NodeKind::Var,
                format!("name must be a string, got {}", token.value.type_name()),
            )
        })?;
        Ok(Self::var(name, mutable)?.with_token(token))
    }

    pub fn spread(inner: Expr) -> Expr {
        Self::new(ExprKind::Spread(Box::new(inner)))
    }

    pub fn assign(target: Expr, value: Expr) -> Expr {
        Self::new(ExprKind::Assign(Assign {
            target: Box::new(target),
            value: Box::new(value),
            op: None,
        }))
    }

    /// Compound assignment such as `x += 1`, where `op` is `"+"`.
    pub fn compound_assign(target: Expr, value: Expr, op: impl Into<String>) -> Expr {
        Self::new(ExprKind::Assign(Assign {
            target: Box::new(target),
            value: Box::new(value),
            op: Some(op.into()),
        }))
    }

    pub fn tuple(elems: Vec<Expr>) -> Expr {
        Self::new(ExprKind::Tuple(elems))
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Expr {
        Self::new(ExprKind::Call(Call {
            func: Box::new(func),
            args,
        }))
    }

    pub fn index(obj: Expr, keys: Vec<Expr>) -> Expr {
        Self::new(ExprKind::Index(Index {
            obj: Box::new(obj),
            keys,
        }))
    }

    pub fn loop_(body: Expr, otherwise: Option<Expr>) -> Expr {
        Self::new(ExprKind::Loop(Loop {
            body: Box::new(body),
            otherwise: otherwise.map(Box::new),
        }))
    }

    pub fn if_(cond: Option<Expr>, then: Option<Expr>, otherwise: Option<Expr>) -> Expr {
        Self::new(ExprKind::If(If {
            cond: cond.map(Box::new),
            then: then.map(Box::new),
            otherwise: otherwise.map(Box::new),
        }))
    }

    /// Builds a branch. `level` must be an integer literal.
    pub fn branch(kind: &str, level: impl Into<Literal>) -> Result<Expr, AstError> {
        let kind: BranchKind = kind.parse()?;
        let level: Literal = level.into();
        let level = level.as_int().ok_or_else(|| {
            AstError::malformed(
                NodeKind::Branch,
                format!("level must be an int, got {}", level.type_name()),
            )
        })?;
        Self::from_kind(ExprKind::Branch(Branch { kind, level }))
    }

    /// Builds an operator node tagged with the token's value.
    ///
    /// The parser passes `None` for an operand it could not build; any
    /// such hole rejects the whole node.
    pub fn op<I>(token: Arc<Token>, operands: I) -> Result<Expr, AstError>
    where
        I: IntoIterator<Item = Option<Expr>>,
    {
        let op = token
            .value
            .as_str()
            .ok_or_else(|| {
                AstError::malformed(
                    NodeKind::Op,
                    format!("operator must be a string, got {}", token.value.type_name()),
                )
            })?
            .to_string();

        let args = operands
            .into_iter()
            .enumerate()
            .map(|(position, operand)| {
                operand.ok_or_else(|| {
                    AstError::malformed(
                        NodeKind::Op,
                        format!("operand {position} of {op:?} is not a node"),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_kind(ExprKind::Op(Op { op, args }))?.with_token(token))
    }

    pub fn unary(token: Arc<Token>, operand: Expr) -> Result<Expr, AstError> {
        Self::op(token, [Some(operand)])
    }

    pub fn binary(token: Arc<Token>, lhs: Expr, rhs: Expr) -> Result<Expr, AstError> {
        Self::op(token, [Some(lhs), Some(rhs)])
    }

    pub fn import(name: impl Into<String>) -> Result<Expr, AstError> {
        Self::from_kind(ExprKind::Import(name.into()))
    }

    pub fn proto(proto: Proto) -> Expr {
        Self::new(ExprKind::Proto(proto))
    }

    pub fn return_(value: Expr) -> Expr {
        Self::new(ExprKind::Return(Box::new(value)))
    }

    pub fn block(elems: Vec<Expr>, vars: Vec<Var>) -> Expr {
        Self::new(ExprKind::Block(Block { elems, vars }))
    }

    /// The top-level program unit.
    pub fn prog(elems: Vec<Expr>, vars: Vec<Var>) -> Expr {
        Self::new(ExprKind::Prog(Block { elems, vars }))
    }

    pub fn func(name: Option<String>, params: Vec<Expr>, body: Expr) -> Expr {
        Self::new(ExprKind::Func(Func {
            name,
            params,
            body: Box::new(body),
        }))
    }

    pub fn format(parts: Vec<Expr>) -> Expr {
        Self::new(ExprKind::Format(parts))
    }

    pub fn object(pairs: Vec<(Expr, Expr)>) -> Expr {
        Self::new(ExprKind::Object(pairs))
    }

    pub fn for_(
        target: Expr,
        iter: Expr,
        body: Expr,
        then: Option<Expr>,
        otherwise: Option<Expr>,
    ) -> Expr {
        Self::new(ExprKind::For(For {
            target: Box::new(target),
            iter: Box::new(iter),
            body: Box::new(body),
            then: then.map(Box::new),
            otherwise: otherwise.map(Box::new),
        }))
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Gives up the node and returns its kind data for rebuilding.
    pub fn into_kind(self) -> ExprKind {
        self.kind
    }

    pub fn node_kind(&self) -> NodeKind {
        self.kind.node_kind()
    }

    pub fn token(&self) -> Option<&Token> {
        self.origin.token()
    }

    /// True if the node may be the target of an assignment.
    pub fn is_lvalue(&self) -> bool {
        self.lvalue
    }

    /// True if the node may be read as a value.
    pub fn is_rvalue(&self) -> bool {
        self.rvalue
    }

    /// True for kinds that do not implicitly become a function's result
    /// when they end its body.
    pub fn is_statement(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Assign(_)
                | ExprKind::Loop(_)
                | ExprKind::If(_)
                | ExprKind::Branch(_)
                | ExprKind::Return(_)
                | ExprKind::For(_)
                | ExprKind::Block(_)
                | ExprKind::Prog(_)
        )
    }

    pub fn is_none_sentinel(&self) -> bool {
        matches!(&self.kind, ExprKind::Value(value) if value.is_none())
    }

    /// Direct children in canonical print order, including the bodies and
    /// comparands of switch cases.
    pub fn children(&self) -> Vec<&Expr> {
        let mut out: Vec<&Expr> = Vec::new();
        match &self.kind {
            ExprKind::Value(_) | ExprKind::Var(_) | ExprKind::Branch(_) | ExprKind::Import(_) => {}
            ExprKind::Spread(inner) | ExprKind::Return(inner) => out.push(inner),
            ExprKind::Assign(node) => {
                out.push(&node.target);
                out.push(&node.value);
            }
            ExprKind::Tuple(elems) | ExprKind::Format(elems) => out.extend(elems),
            ExprKind::Call(node) => {
                out.push(&node.func);
                out.extend(&node.args);
            }
            ExprKind::Index(node) => {
                out.push(&node.obj);
                out.extend(&node.keys);
            }
            ExprKind::Loop(node) => {
                out.push(&node.body);
                out.extend(node.otherwise.as_deref());
            }
            ExprKind::If(node) => {
                out.extend(node.cond.as_deref());
                out.extend(node.then.as_deref());
                out.extend(node.otherwise.as_deref());
            }
            ExprKind::Op(node) => out.extend(&node.args),
            ExprKind::Proto(node) => {
                out.extend(node.parent.as_deref());
                out.extend(&node.public);
                out.extend(&node.private);
                out.extend(&node.statics);
            }
            ExprKind::Switch(node) => {
                out.push(&node.scrutinee);
                for case in &node.cases {
                    out.extend(case.value.as_deref());
                    out.push(&case.body);
                }
                out.extend(node.default.as_deref());
                out.extend(node.then.as_deref());
                out.extend(node.otherwise.as_deref());
            }
            ExprKind::Block(block) | ExprKind::Prog(block) => out.extend(&block.elems),
            ExprKind::Func(node) => {
                out.extend(&node.params);
                out.push(&node.body);
            }
            ExprKind::Object(pairs) => {
                for (key, value) in pairs {
                    out.push(key);
                    out.push(value);
                }
            }
            ExprKind::For(node) => {
                out.push(&node.target);
                out.push(&node.iter);
                out.push(&node.body);
                out.extend(node.then.as_deref());
                out.extend(node.otherwise.as_deref());
            }
        }
        out
    }

    /// Calls `f` on this node and every descendant, parents first.
    pub fn walk(&self, f: &mut impl FnMut(&Expr)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

fn flags(kind: &ExprKind) -> (bool, bool) {
    match kind {
        ExprKind::Value(_) | ExprKind::Format(_) | ExprKind::Object(_) | ExprKind::Op(_) => {
            (false, true)
        }
        ExprKind::Spread(inner) => (inner.lvalue, false),
        ExprKind::Tuple(elems) => (
            elems.iter().all(|e| e.lvalue),
            elems.iter().all(|e| e.rvalue),
        ),
        ExprKind::Block(_) | ExprKind::Prog(_) => (false, false),
        ExprKind::Var(_)
        | ExprKind::Assign(_)
        | ExprKind::Call(_)
        | ExprKind::Index(_)
        | ExprKind::Loop(_)
        | ExprKind::If(_)
        | ExprKind::Branch(_)
        | ExprKind::Import(_)
        | ExprKind::Proto(_)
        | ExprKind::Return(_)
        | ExprKind::Switch(_)
        | ExprKind::Func(_)
        | ExprKind::For(_) => (true, true),
    }
}

fn drop_sentinel(slot: &mut Option<Box<Expr>>) {
    if slot.as_deref().is_some_and(Expr::is_none_sentinel) {
        *slot = None;
    }
}

// An optional clause holding the none-sentinel is the same as no clause.
fn drop_sentinels(kind: &mut ExprKind) {
    match kind {
        ExprKind::Loop(node) => drop_sentinel(&mut node.otherwise),
        ExprKind::If(node) => {
            drop_sentinel(&mut node.then);
            drop_sentinel(&mut node.otherwise);
        }
        ExprKind::Switch(node) => {
            drop_sentinel(&mut node.default);
            drop_sentinel(&mut node.then);
            drop_sentinel(&mut node.otherwise);
        }
        ExprKind::For(node) => {
            drop_sentinel(&mut node.then);
            drop_sentinel(&mut node.otherwise);
        }
        _ => {}
    }
}

// Empty names would vanish from the canonical form.
fn validate(kind: &ExprKind) -> Result<(), AstError> {
    match kind {
        ExprKind::Var(var) if var.name.is_empty() => {
            Err(AstError::malformed(NodeKind::Var, "name is empty"))
        }
        ExprKind::Import(name) if name.is_empty() => {
            Err(AstError::malformed(NodeKind::Import, "module name is empty"))
        }
        ExprKind::Op(node) if node.op.is_empty() => {
            Err(AstError::malformed(NodeKind::Op, "operator tag is empty"))
        }
        ExprKind::Branch(node) if node.level < 0 => Err(AstError::malformed(
            NodeKind::Branch,
            format!("level must be non-negative, got {}", node.level),
        )),
        ExprKind::Switch(node) => validate_links(node),
        _ => Ok(()),
    }
}

fn validate_links(switch: &Switch) -> Result<(), AstError> {
    let count = switch.cases.len();
    for (position, case) in switch.cases.iter().enumerate() {
        let Some(next) = case.next else {
            continue;
        };
        if next != position + 1 {
            return Err(AstError::malformed(
                NodeKind::Switch,
                format!("case {position} must fall through to case {}, not {next}", position + 1),
            ));
        }
        if next == count && switch.default.is_none() {
            return Err(AstError::malformed(
                NodeKind::Switch,
                format!("case {position} falls through but no case or default follows"),
            ));
        }
    }
    Ok(())
}

impl Serialize for Expr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.kind.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let kind = ExprKind::deserialize(deserializer)?;
        Expr::from_kind(kind).map_err(D::Error::custom)
    }
}
