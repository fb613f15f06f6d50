//! Per-kind dispatch for passes over the tree.

use crate::nodes::{
    Assign, Block, Branch, Call, ExprKind, For, Func, If, Index, Loop, Op, Proto, Switch, Var,
};
use crate::{AstError, Expr, Literal, NodeKind};

/// A pass that behaves differently per node kind.
///
/// [`Expr::accept`] routes a node to the method for its kind. Every method
/// defaults to [`AstError::UnsupportedNodeKind`], so a pass only implements
/// the kinds it understands and anything else is reported to its caller.
/// Each method also receives the whole node for its flags and token.
pub trait Visitor {
    type Output;

    fn visit_value(&mut self, _value: &Literal, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Value))
    }

    fn visit_var(&mut self, _var: &Var, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Var))
    }

    fn visit_spread(&mut self, _inner: &Expr, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Spread))
    }

    fn visit_assign(&mut self, _node: &Assign, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Assign))
    }

    fn visit_tuple(&mut self, _elems: &[Expr], _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Tuple))
    }

    fn visit_call(&mut self, _node: &Call, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Call))
    }

    fn visit_index(&mut self, _node: &Index, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Index))
    }

    fn visit_loop(&mut self, _node: &Loop, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Loop))
    }

    fn visit_if(&mut self, _node: &If, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::If))
    }

    fn visit_branch(&mut self, _node: &Branch, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Branch))
    }

    fn visit_op(&mut self, _node: &Op, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Op))
    }

    fn visit_import(&mut self, _name: &str, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Import))
    }

    fn visit_proto(&mut self, _node: &Proto, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Proto))
    }

    fn visit_return(&mut self, _value: &Expr, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Return))
    }

    fn visit_switch(&mut self, _node: &Switch, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Switch))
    }

    fn visit_block(&mut self, _block: &Block, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Block))
    }

    /// Programs are blocks; passes that don't care about the difference
    /// get the block handler.
    fn visit_prog(&mut self, block: &Block, expr: &Expr) -> Result<Self::Output, AstError> {
        self.visit_block(block, expr)
    }

    fn visit_func(&mut self, _node: &Func, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Func))
    }

    fn visit_format(&mut self, _parts: &[Expr], _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Format))
    }

    fn visit_object(
        &mut self,
        _pairs: &[(Expr, Expr)],
        _expr: &Expr,
    ) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::Object))
    }

    fn visit_for(&mut self, _node: &For, _expr: &Expr) -> Result<Self::Output, AstError> {
        Err(AstError::UnsupportedNodeKind(NodeKind::For))
    }
}

impl Expr {
    /// Dispatches to the visitor method for this node's kind.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<V::Output, AstError> {
        match self.kind() {
            ExprKind::Value(value) => visitor.visit_value(value, self),
            ExprKind::Var(var) => visitor.visit_var(var, self),
            ExprKind::Spread(inner) => visitor.visit_spread(inner, self),
            ExprKind::Assign(node) => visitor.visit_assign(node, self),
            ExprKind::Tuple(elems) => visitor.visit_tuple(elems, self),
            ExprKind::Call(node) => visitor.visit_call(node, self),
            ExprKind::Index(node) => visitor.visit_index(node, self),
            ExprKind::Loop(node) => visitor.visit_loop(node, self),
            ExprKind::If(node) => visitor.visit_if(node, self),
            ExprKind::Branch(node) => visitor.visit_branch(node, self),
            ExprKind::Op(node) => visitor.visit_op(node, self),
            ExprKind::Import(name) => visitor.visit_import(name, self),
            ExprKind::Proto(node) => visitor.visit_proto(node, self),
            ExprKind::Return(value) => visitor.visit_return(value, self),
            ExprKind::Switch(node) => visitor.visit_switch(node, self),
            ExprKind::Block(block) => visitor.visit_block(block, self),
            ExprKind::Prog(block) => visitor.visit_prog(block, self),
            ExprKind::Func(node) => visitor.visit_func(node, self),
            ExprKind::Format(parts) => visitor.visit_format(parts, self),
            ExprKind::Object(pairs) => visitor.visit_object(pairs, self),
            ExprKind::For(node) => visitor.visit_for(node, self),
        }
    }
}
