//! Trees exchanged as JSON go through the same checks as built trees.

use espresso_ast::{Expr, ExprKind, SwitchBuilder, Var};
use serde_json::json;

fn var(name: &str, mutable: bool) -> Expr {
    Expr::var(name, mutable).unwrap()
}

fn parse(value: serde_json::Value) -> Result<Expr, serde_json::Error> {
    serde_json::from_value(value)
}

#[test]
fn test_parse_call() {
    let expr = parse(json!({
        "call": {
            "func": {"var": {"name": "f", "mutable": false}},
            "args": [{"value": 1}, {"value": 2}]
        }
    }))
    .unwrap();
    assert_eq!(expr.to_string(), "(call f 1 2)");
}

#[test]
fn test_var_is_mutable_by_default() {
    let expr = parse(json!({"var": {"name": "x"}})).unwrap();
    assert_eq!(expr.kind(), &ExprKind::Var(Var::new("x", true)));
    assert_eq!(expr.to_string(), "x!");
}

#[test]
fn test_flags_computed_on_parse() {
    let expr = parse(json!({
        "tuple": [{"var": {"name": "a"}}, {"value": "lit"}]
    }))
    .unwrap();
    assert!(!expr.is_lvalue());
    assert!(expr.is_rvalue());

    let spread = parse(json!({"spread": {"var": {"name": "a"}}})).unwrap();
    assert!(spread.is_lvalue());
    assert!(!spread.is_rvalue());
}

#[test]
fn test_sentinel_else_dropped_on_parse() {
    let expr = parse(json!({
        "loop": {"body": {"block": {}}, "else": {"value": null}}
    }))
    .unwrap();
    assert_eq!(expr.to_string(), "(loop (block))");
    assert_eq!(expr, Expr::loop_(Expr::block(vec![], vec![]), None));
}

#[test]
fn test_branch_level_must_be_int() {
    let ok = parse(json!({"branch": {"kind": "break", "level": 2}})).unwrap();
    assert_eq!(ok.to_string(), "(break 2)");

    let defaulted = parse(json!({"branch": {"kind": "continue"}})).unwrap();
    assert_eq!(defaulted.to_string(), "(continue 0)");

    assert!(parse(json!({"branch": {"kind": "break", "level": "x"}})).is_err());
    assert!(parse(json!({"branch": {"kind": "break", "level": 1.5}})).is_err());
    assert!(parse(json!({"branch": {"kind": "break", "level": -1}})).is_err());
}

#[test]
fn test_bad_case_link_rejected() {
    let err = parse(json!({
        "switch": {
            "scrutinee": {"var": {"name": "x"}},
            "cases": [
                {"op": "=", "value": {"value": 1}, "body": {"block": {}}, "next": 0}
            ]
        }
    }))
    .unwrap_err();
    assert!(err.to_string().contains("malformed switch node"), "{err}");
}

#[test]
fn test_empty_op_tag_rejected() {
    let err = parse(json!({"op": {"op": "", "args": [{"value": 1}]}})).unwrap_err();
    assert!(err.to_string().contains("operator tag is empty"), "{err}");
}

#[test]
fn test_empty_names_rejected() {
    let err = parse(json!({"var": {"name": ""}})).unwrap_err();
    assert!(err.to_string().contains("malformed var node"), "{err}");

    let err = parse(json!({"tuple": [{"import": ""}]})).unwrap_err();
    assert!(err.to_string().contains("malformed import node"), "{err}");
}

#[test]
fn test_non_finite_reals_roundtrip() {
    for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let tree = Expr::loop_(Expr::block(vec![], vec![]), Some(Expr::value(value)));
        let json = serde_json::to_string(&tree).unwrap();
        let parsed: Expr = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, tree);
        assert_eq!(parsed.to_string(), tree.to_string());
    }

    let tree = parse(json!({
        "if": {"cond": {"value": {"real": "nan"}}, "else": {"value": {"real": "-inf"}}}
    }))
    .unwrap();
    assert_eq!(tree.to_string(), "(if nan (else -inf))");
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({"if": {"cond": {"value": {"real": "nan"}}, "else": {"value": {"real": "-inf"}}}})
    );
}

#[test]
fn test_unknown_kind_rejected() {
    assert!(parse(json!({"lambda": {}})).is_err());
}

#[test]
fn test_roundtrip_preserves_structure_and_text() {
    let tree = Expr::block(
        vec![
            Expr::assign(
                Expr::tuple(vec![var("a", true), var("b", true)]),
                Expr::tuple(vec![Expr::value(1), Expr::value(2.5)]),
            ),
            SwitchBuilder::new(var("a", true))
                .fallthrough("=", Some(Expr::value(1)), Expr::value("one"))
                .case("=", Some(Expr::value(2)), Expr::value("two"))
                .otherwise(Expr::value(false))
                .finish()
                .unwrap(),
            Expr::object(vec![(Expr::value("k"), Expr::none())]),
        ],
        vec![Var::new("a", true), Var::new("b", true)],
    );

    let json = serde_json::to_string(&tree).unwrap();
    let parsed: Expr = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, tree);
    assert_eq!(parsed.to_string(), tree.to_string());
}

#[test]
fn test_serialized_shape() {
    let expr = Expr::compound_assign(var("x", true), Expr::value(1), "+");
    assert_eq!(
        serde_json::to_value(&expr).unwrap(),
        json!({
            "assign": {
                "target": {"var": {"name": "x", "mutable": true}},
                "value": {"value": 1},
                "op": "+"
            }
        })
    );
}
