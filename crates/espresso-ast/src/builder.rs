//! Incremental construction for nodes the parser assembles piece by piece.

use std::sync::Arc;

use crate::nodes::{Case, ExprKind, Switch};
use crate::{AstError, Expr, Token};

/// Collects tuple elements while a comma-separated list is parsed.
///
/// The tuple's flags are computed once, by [`TupleBuilder::finish`]; the
/// finished node cannot grow.
#[derive(Debug, Default)]
pub struct TupleBuilder {
    token: Option<Arc<Token>>,
    elems: Vec<Expr>,
}

impl TupleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: Arc<Token>) -> Self {
        self.token = Some(token);
        self
    }

    pub fn push(&mut self, elem: Expr) {
        self.elems.push(elem);
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn finish(self) -> Expr {
        let tuple = Expr::tuple(self.elems);
        match self.token {
            Some(token) => tuple.with_token(token),
            None => tuple,
        }
    }
}

impl Extend<Expr> for TupleBuilder {
    fn extend<I: IntoIterator<Item = Expr>>(&mut self, iter: I) {
        self.elems.extend(iter);
    }
}

impl FromIterator<Expr> for TupleBuilder {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        TupleBuilder {
            token: None,
            elems: iter.into_iter().collect(),
        }
    }
}

/// Assembles a switch and links fall-through cases to their successors.
///
/// ```
/// use espresso_ast::{Expr, SwitchBuilder};
///
/// let switch = SwitchBuilder::new(Expr::var("x", false).unwrap())
///     .fallthrough("=", Some(Expr::value(1)), Expr::block(vec![], vec![]))
///     .case("=", Some(Expr::value(2)), Expr::block(vec![], vec![]))
///     .finish()
///     .unwrap();
/// assert_eq!(
///     switch.to_string(),
///     "(switch x (case = 1 (block) ...) (case = 2 (block)))"
/// );
/// ```
#[derive(Debug)]
pub struct SwitchBuilder {
    token: Option<Arc<Token>>,
    scrutinee: Expr,
    cases: Vec<(Case, bool)>,
    default: Option<Expr>,
    then: Option<Expr>,
    otherwise: Option<Expr>,
}

impl SwitchBuilder {
    pub fn new(scrutinee: Expr) -> Self {
        SwitchBuilder {
            token: None,
            scrutinee,
            cases: Vec::new(),
            default: None,
            then: None,
            otherwise: None,
        }
    }

    pub fn with_token(mut self, token: Arc<Token>) -> Self {
        self.token = Some(token);
        self
    }

    /// Adds a case that ends the switch after its body runs.
    pub fn case(self, op: impl Into<String>, value: Option<Expr>, body: Expr) -> Self {
        self.push_case(Case::new(op, value, body), false)
    }

    /// Adds a case that continues into the next case (or the default body).
    pub fn fallthrough(self, op: impl Into<String>, value: Option<Expr>, body: Expr) -> Self {
        self.push_case(Case::new(op, value, body), true)
    }

    /// Adds a prebuilt case, e.g. one carrying its own token.
    pub fn push_case(mut self, mut case: Case, falls_through: bool) -> Self {
        case.next = None;
        self.cases.push((case, falls_through));
        self
    }

    pub fn default(mut self, body: Expr) -> Self {
        self.default = Some(body);
        self
    }

    pub fn then(mut self, body: Expr) -> Self {
        self.then = Some(body);
        self
    }

    pub fn otherwise(mut self, body: Expr) -> Self {
        self.otherwise = Some(body);
        self
    }

    /// Links the cases and validates the result.
    ///
    /// Fails if the last case falls through and there is no default body
    /// to fall into.
    pub fn finish(self) -> Result<Expr, AstError> {
        let cases = self
            .cases
            .into_iter()
            .enumerate()
            .map(|(position, (mut case, falls_through))| {
                if falls_through {
                    case.next = Some(position + 1);
                }
                case
            })
            .collect();

        let switch = Expr::from_kind(ExprKind::Switch(Switch {
            scrutinee: Box::new(self.scrutinee),
            cases,
            default: self.default.map(Box::new),
            then: self.then.map(Box::new),
            otherwise: self.otherwise.map(Box::new),
        }))?;

        Ok(match self.token {
            Some(token) => switch.with_token(token),
            None => switch,
        })
    }
}
