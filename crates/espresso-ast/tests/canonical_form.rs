//! Snapshot tests for the canonical s-expression form of every node kind.

use std::sync::Arc;

use espresso_ast::{AstError, Case, Expr, NodeKind, Proto, SwitchBuilder, Token, Var};

fn tok(op: &str) -> Arc<Token> {
    Arc::new(Token::new(op))
}

fn var(name: &str, mutable: bool) -> Expr {
    Expr::var(name, mutable).unwrap()
}

fn empty_block() -> Expr {
    Expr::block(vec![], vec![])
}

// =============================================================================
// Leaves
// =============================================================================

#[test]
fn test_var_mutability_marker() {
    assert_eq!(var("x", true).to_string(), "x!");
    assert_eq!(var("x", false).to_string(), "x");
}

#[test]
fn test_spread_has_no_space() {
    assert_eq!(Expr::spread(var("x", false)).to_string(), "...x");
    assert_eq!(Expr::spread(var("xs", true)).to_string(), "...xs!");
}

#[test]
fn test_value_payloads() {
    assert_eq!(Expr::value(1).to_string(), "1");
    assert_eq!(Expr::value(2.5).to_string(), "2.5");
    assert_eq!(Expr::value(false).to_string(), "false");
    assert_eq!(Expr::value("hi there").to_string(), "\"hi there\"");
    assert_eq!(Expr::none().to_string(), "none");
}

// =============================================================================
// Composites
// =============================================================================

#[test]
fn test_tuple() {
    let tuple = Expr::tuple(vec![var("a", false), var("b", false)]);
    assert_eq!(tuple.to_string(), "(, a b)");
    assert_eq!(Expr::tuple(vec![]).to_string(), "(,)");
}

#[test]
fn test_call() {
    let call = Expr::call(var("f", false), vec![Expr::value(1), Expr::value(2)]);
    assert_eq!(call.to_string(), "(call f 1 2)");
    assert_eq!(Expr::call(var("f", false), vec![]).to_string(), "(call f)");
}

#[test]
fn test_index() {
    let index = Expr::index(var("o", false), vec![Expr::value("k"), Expr::value(0)]);
    assert_eq!(index.to_string(), "(. o [\"k\" 0])");
}

#[test]
fn test_assign() {
    let plain = Expr::assign(var("x", true), Expr::value(1));
    assert_eq!(plain.to_string(), "(= x! 1)");

    let compound = Expr::compound_assign(var("x", true), Expr::value(1), "+");
    assert_eq!(compound.to_string(), "(+= x! 1)");
}

#[test]
fn test_op() {
    let sum = Expr::binary(tok("+"), var("a", false), Expr::value(1)).unwrap();
    assert_eq!(sum.to_string(), "(+ a 1)");

    let nested = Expr::binary(tok("*"), sum, var("b", false)).unwrap();
    assert_eq!(nested.to_string(), "(* (+ a 1) b)");
}

#[test]
fn test_branch() {
    assert_eq!(Expr::branch("break", 2).unwrap().to_string(), "(break 2)");
    assert_eq!(Expr::branch("continue", 0).unwrap().to_string(), "(continue 0)");

    let err = Expr::branch("break", "x").unwrap_err();
    assert!(matches!(
        err,
        AstError::MalformedNode {
            kind: NodeKind::Branch,
            ..
        }
    ));
}

#[test]
fn test_import_and_return() {
    assert_eq!(Expr::import("math").unwrap().to_string(), "(import math)");
    assert_eq!(Expr::return_(var("x", false)).to_string(), "(return x)");
}

// =============================================================================
// Control flow and omission of absent clauses
// =============================================================================

#[test]
fn test_loop_omits_absent_else() {
    assert_eq!(Expr::loop_(empty_block(), None).to_string(), "(loop (block))");
    assert_eq!(
        Expr::loop_(empty_block(), Some(Expr::none())).to_string(),
        "(loop (block))"
    );

    let with_else = Expr::loop_(empty_block(), Some(Expr::value(1)));
    assert_eq!(with_else.to_string(), "(loop (block) (else 1))");
}

#[test]
fn test_if_clauses() {
    let cond = || Some(var("c", false));
    assert_eq!(Expr::if_(cond(), None, None).to_string(), "(if c)");
    assert_eq!(
        Expr::if_(cond(), Some(Expr::value(1)), None).to_string(),
        "(if c (then 1))"
    );
    assert_eq!(
        Expr::if_(cond(), None, Some(Expr::value(2))).to_string(),
        "(if c (else 2))"
    );
    assert_eq!(
        Expr::if_(cond(), Some(Expr::value(1)), Some(Expr::value(2))).to_string(),
        "(if c (then 1) (else 2))"
    );
    assert_eq!(Expr::if_(None, None, None).to_string(), "(if)");
}

#[test]
fn test_switch() {
    let switch = SwitchBuilder::new(var("x", false))
        .fallthrough("=", Some(Expr::value(1)), Expr::value("one"))
        .case("in", Some(var("range", false)), Expr::value("many"))
        .default(Expr::value("other"))
        .then(Expr::value("done"))
        .finish()
        .unwrap();
    assert_eq!(
        switch.to_string(),
        "(switch x (case = 1 \"one\" ...) (case in range \"many\") \
         (default \"other\") (then \"done\"))"
    );
}

#[test]
fn test_switch_omits_absent_clauses() {
    let switch = SwitchBuilder::new(var("x", false))
        .case("=", Some(Expr::value(1)), empty_block())
        .default(Expr::none())
        .otherwise(Expr::none())
        .finish()
        .unwrap();
    let text = switch.to_string();
    assert_eq!(text, "(switch x (case = 1 (block)))");
    assert!(!text.contains("default"));
    assert!(!text.contains("else"));
}

#[test]
fn test_switch_fallthrough_into_default() {
    let ok = SwitchBuilder::new(var("x", false))
        .fallthrough("=", Some(Expr::value(1)), empty_block())
        .default(empty_block())
        .finish();
    assert!(ok.is_ok());

    let err = SwitchBuilder::new(var("x", false))
        .fallthrough("=", Some(Expr::value(1)), empty_block())
        .finish()
        .unwrap_err();
    assert!(matches!(
        err,
        AstError::MalformedNode {
            kind: NodeKind::Switch,
            ..
        }
    ));
}

#[test]
fn test_case_prints_on_its_own() {
    let case = Case::new("=", Some(Expr::value(3)), var("y", false));
    assert_eq!(case.to_string(), "(case = 3 y)");

    let else_case = Case::new("else", None, empty_block());
    assert_eq!(else_case.to_string(), "(case else (block))");
}

#[test]
fn test_for() {
    let for_loop = Expr::for_(
        var("i", true),
        var("items", false),
        empty_block(),
        None,
        Some(Expr::value(0)),
    );
    assert_eq!(
        for_loop.to_string(),
        "(for (var i!) (in items) (body (block)) (else 0))"
    );
}

// =============================================================================
// Blocks, functions and prototypes
// =============================================================================

#[test]
fn test_block_var_clause() {
    let block = Expr::block(
        vec![Expr::assign(var("x", true), Expr::value(1)), var("x", true)],
        vec![Var::new("x", true), Var::new("k", false)],
    );
    assert_eq!(block.to_string(), "(block (var x! k) (= x! 1) x!)");
    assert_eq!(empty_block().to_string(), "(block)");
}

#[test]
fn test_prog_prints_as_block() {
    let prog = Expr::prog(vec![Expr::import("io").unwrap()], vec![]);
    assert_eq!(prog.to_string(), "(block (import io))");
}

#[test]
fn test_func() {
    let named = Expr::func(
        Some("add".into()),
        vec![var("a", false), var("b", false)],
        Expr::binary(tok("+"), var("a", false), var("b", false)).unwrap(),
    );
    assert_eq!(named.to_string(), "(function add [a b] (+ a b))");

    let anonymous = Expr::func(None, vec![], empty_block());
    assert_eq!(anonymous.to_string(), "(function [] (block))");
}

#[test]
fn test_proto() {
    let proto = Expr::proto(Proto {
        name: Some("Point".into()),
        parent: Some(Box::new(var("Base", false))),
        public: vec![var("x", true), var("y", true)],
        private: vec![],
        statics: vec![Expr::func(Some("origin".into()), vec![], empty_block())],
    });
    assert_eq!(
        proto.to_string(),
        "(proto :Point (is Base) (public [x! y!]) (static [(function origin [] (block))]))"
    );

    let bare = Expr::proto(Proto {
        name: None,
        parent: None,
        public: vec![],
        private: vec![],
        statics: vec![],
    });
    assert_eq!(bare.to_string(), "(proto)");
}

#[test]
fn test_format_and_object() {
    let format = Expr::format(vec![Expr::value("x = "), var("x", false)]);
    assert_eq!(format.to_string(), "(format \"x = \" x)");

    let object = Expr::object(vec![
        (Expr::value("a"), Expr::value(1)),
        (Expr::value("b"), var("b", false)),
    ]);
    assert_eq!(object.to_string(), "(object (pair \"a\" 1) (pair \"b\" b))");
}

// =============================================================================
// Whole trees
// =============================================================================

#[test]
fn test_serialization_is_deterministic() {
    let tree = Expr::prog(
        vec![
            Expr::assign(
                var("f", false),
                Expr::func(
                    Some("f".into()),
                    vec![Expr::spread(var("args", false))],
                    Expr::block(
                        vec![Expr::loop_(
                            Expr::block(
                                vec![Expr::if_(
                                    Some(var("done", false)),
                                    Some(Expr::branch("break", 0).unwrap()),
                                    None,
                                )],
                                vec![],
                            ),
                            None,
                        )],
                        vec![Var::new("done", true)],
                    ),
                ),
            ),
            Expr::call(var("f", false), vec![Expr::value(1)]),
        ],
        vec![Var::new("f", false)],
    );

    let first = tree.to_sexp().unwrap();
    let second = tree.to_sexp().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        "(block (var f) (= f (function f [...args] (block (var done!) \
         (loop (block (if done (then (break 0)))))))) (call f 1))"
    );
}
