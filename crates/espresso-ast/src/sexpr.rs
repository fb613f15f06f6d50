//! Canonical s-expression form.
//!
//! [`sexp`] turns a mixed list of items into one parenthesized line. Every
//! node's `Display` goes through it, by way of the [`Printer`] visitor.

use std::borrow::Cow;
use std::fmt;

use crate::nodes::{
    Assign, Block, Branch, Call, Case, For, Func, If, Index, Loop, Op, Proto, Switch, Var,
};
use crate::{AstError, Expr, Literal, Visitor};

/// First item that asks for one space in front of the opening parenthesis.
pub const LEADING_SPACE: &str = " ";

/// One item of an s-expression.
#[derive(Debug, Clone)]
pub enum Sexp<'a> {
    /// Contributes nothing.
    Absent,
    /// Printed verbatim.
    Atom(Cow<'a, str>),
    Int(i64),
    /// `(a b c)`
    Group(Vec<Sexp<'a>>),
    /// `[a b c]`
    Bracket(Vec<Sexp<'a>>),
    Node(&'a Expr),
    Case(&'a Case),
    /// A raw payload. Only strings (verbatim) and integers print.
    Literal(&'a Literal),
}

impl<'a> Sexp<'a> {
    pub fn atom(text: impl Into<Cow<'a, str>>) -> Self {
        Sexp::Atom(text.into())
    }

    /// `(keyword value)`, or nothing when the value is absent.
    pub fn clause(keyword: &'a str, value: Option<&'a Expr>) -> Self {
        match value {
            Some(value) => Sexp::Group(vec![Sexp::atom(keyword), Sexp::Node(value)]),
            None => Sexp::Absent,
        }
    }

    /// `(keyword [e1 e2 ...])`, or nothing when there are no elements.
    fn group_clause(keyword: &'a str, elems: &'a [Expr]) -> Self {
        if elems.is_empty() {
            Sexp::Absent
        } else {
            Sexp::Group(vec![Sexp::atom(keyword), Sexp::Bracket(nodes(elems))])
        }
    }
}

impl<'a> From<&'a Expr> for Sexp<'a> {
    fn from(value: &'a Expr) -> Self {
        Sexp::Node(value)
    }
}

impl<'a> From<Option<&'a Expr>> for Sexp<'a> {
    fn from(value: Option<&'a Expr>) -> Self {
        value.map_or(Sexp::Absent, Sexp::Node)
    }
}

impl<'a> From<&'a str> for Sexp<'a> {
    fn from(value: &'a str) -> Self {
        Sexp::atom(value)
    }
}

impl From<String> for Sexp<'_> {
    fn from(value: String) -> Self {
        Sexp::atom(value)
    }
}

impl From<i64> for Sexp<'_> {
    fn from(value: i64) -> Self {
        Sexp::Int(value)
    }
}

impl<'a> From<&'a Literal> for Sexp<'a> {
    fn from(value: &'a Literal) -> Self {
        Sexp::Literal(value)
    }
}

fn nodes(elems: &[Expr]) -> Vec<Sexp<'_>> {
    elems.iter().map(Sexp::Node).collect()
}

/// Renders items as `(item item ...)`.
///
/// An empty list renders as the empty string. A leading [`LEADING_SPACE`]
/// atom puts one space before the opening parenthesis; the marker only
/// counts as the first item of the top-level list and is dropped anywhere
/// else, including inside nested groups. Items that render to nothing are
/// skipped, so absent clauses leave no trace.
///
/// ```
/// use espresso_ast::{Sexp, sexp};
///
/// let text = sexp(&[Sexp::atom("x"), Sexp::Absent, Sexp::Int(2)]).unwrap();
/// assert_eq!(text, "(x 2)");
/// assert_eq!(sexp(&[]).unwrap(), "");
/// ```
pub fn sexp(items: &[Sexp<'_>]) -> Result<String, AstError> {
    let Some(first) = items.first() else {
        return Ok(String::new());
    };

    let (prespace, items) = match first {
        Sexp::Atom(text) if text == LEADING_SPACE => (LEADING_SPACE, &items[1..]),
        _ => ("", items),
    };

    Ok(format!("{prespace}({})", join(items)?))
}

fn join(items: &[Sexp<'_>]) -> Result<String, AstError> {
    let mut out = String::new();
    for item in items {
        if matches!(item, Sexp::Atom(text) if text == LEADING_SPACE) {
            continue;
        }
        let text = render(item)?;
        if text.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&text);
    }
    Ok(out)
}

fn render<'t>(item: &'t Sexp<'_>) -> Result<Cow<'t, str>, AstError> {
    Ok(match item {
        Sexp::Absent => Cow::Borrowed(""),
        Sexp::Atom(text) => Cow::Borrowed(text.as_ref()),
        Sexp::Int(n) => Cow::Owned(n.to_string()),
        Sexp::Group(items) => Cow::Owned(format!("({})", join(items)?)),
        Sexp::Bracket(items) => Cow::Owned(format!("[{}]", join(items)?)),
        Sexp::Node(expr) => Cow::Owned(expr.to_sexp()?),
        Sexp::Case(case) => Cow::Owned(case.to_sexp()?),
        Sexp::Literal(Literal::Str(text)) => Cow::Borrowed(text.as_str()),
        Sexp::Literal(Literal::Int(n)) => Cow::Owned(n.to_string()),
        Sexp::Literal(other) => {
            return Err(AstError::UnprintableValue(format!(
                "{} literal {other}",
                other.type_name()
            )));
        }
    })
}

/// The visitor behind every node's canonical form.
#[derive(Debug, Default)]
pub struct Printer;

impl Visitor for Printer {
    type Output = String;

    fn visit_value(&mut self, value: &Literal, _expr: &Expr) -> Result<String, AstError> {
        Ok(value.to_string())
    }

    fn visit_var(&mut self, var: &Var, _expr: &Expr) -> Result<String, AstError> {
        Ok(var.to_string())
    }

    fn visit_spread(&mut self, inner: &Expr, _expr: &Expr) -> Result<String, AstError> {
        Ok(format!("...{}", inner.accept(self)?))
    }

    fn visit_assign(&mut self, node: &Assign, _expr: &Expr) -> Result<String, AstError> {
        let op = format!("{}=", node.op.as_deref().unwrap_or(""));
        sexp(&[Sexp::atom(op), Sexp::Node(&node.target), Sexp::Node(&node.value)])
    }

    fn visit_tuple(&mut self, elems: &[Expr], _expr: &Expr) -> Result<String, AstError> {
        let mut items = vec![Sexp::atom(",")];
        items.extend(nodes(elems));
        sexp(&items)
    }

    fn visit_call(&mut self, node: &Call, _expr: &Expr) -> Result<String, AstError> {
        let mut items = vec![Sexp::atom("call"), Sexp::Node(&node.func)];
        items.extend(nodes(&node.args));
        sexp(&items)
    }

    fn visit_index(&mut self, node: &Index, _expr: &Expr) -> Result<String, AstError> {
        sexp(&[
            Sexp::atom("."),
            Sexp::Node(&node.obj),
            Sexp::Bracket(nodes(&node.keys)),
        ])
    }

    fn visit_loop(&mut self, node: &Loop, _expr: &Expr) -> Result<String, AstError> {
        sexp(&[
            Sexp::atom("loop"),
            Sexp::Node(&node.body),
            Sexp::clause("else", node.otherwise.as_deref()),
        ])
    }

    fn visit_if(&mut self, node: &If, _expr: &Expr) -> Result<String, AstError> {
        sexp(&[
            Sexp::atom("if"),
            node.cond.as_deref().into(),
            Sexp::clause("then", node.then.as_deref()),
            Sexp::clause("else", node.otherwise.as_deref()),
        ])
    }

    fn visit_branch(&mut self, node: &Branch, _expr: &Expr) -> Result<String, AstError> {
        sexp(&[Sexp::atom(node.kind.as_str()), Sexp::Int(node.level)])
    }

    fn visit_op(&mut self, node: &Op, _expr: &Expr) -> Result<String, AstError> {
        let mut items = vec![Sexp::atom(node.op.as_str())];
        items.extend(nodes(&node.args));
        sexp(&items)
    }

    fn visit_import(&mut self, name: &str, _expr: &Expr) -> Result<String, AstError> {
        sexp(&[Sexp::atom("import"), Sexp::atom(name)])
    }

    fn visit_proto(&mut self, node: &Proto, _expr: &Expr) -> Result<String, AstError> {
        let name = match &node.name {
            Some(name) => Sexp::atom(format!(":{name}")),
            None => Sexp::Absent,
        };
        sexp(&[
            Sexp::atom("proto"),
            name,
            Sexp::clause("is", node.parent.as_deref()),
            Sexp::group_clause("public", &node.public),
            Sexp::group_clause("private", &node.private),
            Sexp::group_clause("static", &node.statics),
        ])
    }

    fn visit_return(&mut self, value: &Expr, _expr: &Expr) -> Result<String, AstError> {
        sexp(&[Sexp::atom("return"), Sexp::Node(value)])
    }

    fn visit_switch(&mut self, node: &Switch, _expr: &Expr) -> Result<String, AstError> {
        let mut items = vec![Sexp::atom("switch"), Sexp::Node(&node.scrutinee)];
        items.extend(node.cases.iter().map(Sexp::Case));
        items.push(Sexp::clause("default", node.default.as_deref()));
        items.push(Sexp::clause("then", node.then.as_deref()));
        items.push(Sexp::clause("else", node.otherwise.as_deref()));
        sexp(&items)
    }

    fn visit_block(&mut self, block: &Block, _expr: &Expr) -> Result<String, AstError> {
        let mut items = vec![Sexp::atom("block")];
        if !block.vars.is_empty() {
            let mut vars = vec![Sexp::atom("var")];
            vars.extend(block.vars.iter().map(|var| Sexp::atom(var.to_string())));
            items.push(Sexp::Group(vars));
        }
        items.extend(nodes(&block.elems));
        sexp(&items)
    }

    fn visit_func(&mut self, node: &Func, _expr: &Expr) -> Result<String, AstError> {
        sexp(&[
            Sexp::atom("function"),
            node.name.as_deref().map_or(Sexp::Absent, Sexp::atom),
            Sexp::Bracket(nodes(&node.params)),
            Sexp::Node(&node.body),
        ])
    }

    fn visit_format(&mut self, parts: &[Expr], _expr: &Expr) -> Result<String, AstError> {
        let mut items = vec![Sexp::atom("format")];
        items.extend(nodes(parts));
        sexp(&items)
    }

    fn visit_object(&mut self, pairs: &[(Expr, Expr)], _expr: &Expr) -> Result<String, AstError> {
        let mut items = vec![Sexp::atom("object")];
        items.extend(pairs.iter().map(|(key, value)| {
            Sexp::Group(vec![Sexp::atom("pair"), Sexp::Node(key), Sexp::Node(value)])
        }));
        sexp(&items)
    }

    fn visit_for(&mut self, node: &For, _expr: &Expr) -> Result<String, AstError> {
        sexp(&[
            Sexp::atom("for"),
            Sexp::clause("var", Some(&*node.target)),
            Sexp::clause("in", Some(&*node.iter)),
            Sexp::clause("body", Some(&*node.body)),
            Sexp::clause("then", node.then.as_deref()),
            Sexp::clause("else", node.otherwise.as_deref()),
        ])
    }
}

impl Expr {
    /// Renders the canonical form.
    pub fn to_sexp(&self) -> Result<String, AstError> {
        self.accept(&mut Printer)
    }
}

impl Case {
    /// Renders `(case op value body ...)`, with the trailing `...` only when
    /// the case falls through.
    pub fn to_sexp(&self) -> Result<String, AstError> {
        sexp(&[
            Sexp::atom("case"),
            Sexp::atom(self.op.as_str()),
            self.value.as_deref().into(),
            Sexp::Node(&self.body),
            if self.next.is_some() {
                Sexp::atom("...")
            } else {
                Sexp::Absent
            },
        ])
    }
}

// The printer never emits raw literals, so a built tree always renders.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_sexp().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_sexp().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
