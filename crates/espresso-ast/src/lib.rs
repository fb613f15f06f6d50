//! Syntax tree types and canonical s-expression form for Espresso.
//!
//! This crate sits between the parser and every later stage. It models
//! structure only: nodes are validated when they are built and can be
//! printed, visited and exchanged as JSON, but nothing here evaluates an
//! expression or resolves a name.
//!
//! # Canonical form
//!
//! Every node prints to one line of parenthesized text:
//!
//! ```
//! use espresso_ast::Expr;
//!
//! let call = Expr::call(
//!     Expr::var("f", false).unwrap(),
//!     vec![Expr::value(1), Expr::value(2)],
//! );
//! assert_eq!(call.to_string(), "(call f 1 2)");
//! ```
//!
//! The form is stable: snapshot tests compare it byte for byte.

mod builder;
mod error;
mod expr;
mod kind;
mod literal;
mod nodes;
mod sexpr;
mod token;
mod visit;

pub use builder::{SwitchBuilder, TupleBuilder};
pub use error::AstError;
pub use expr::{Expr, Origin};
pub use kind::NodeKind;
pub use literal::Literal;
pub use nodes::{
    Assign, Block, Branch, BranchKind, Call, Case, ExprKind, For, Func, If, Index, Loop, Op, Proto,
    Switch, Var,
};
pub use sexpr::{LEADING_SPACE, Printer, Sexp, sexp};
pub use token::Token;
pub use visit::Visitor;
