//! End-to-end tests of the expression language: parse, evaluate, enumerate.

use std::collections::HashMap;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use recipe_rs::ast::Expr;
use recipe_rs::error::LogicError;
use recipe_rs::eval::eval_expr;
use recipe_rs::parser::{extract_variables, parse};
use recipe_rs::table::{truth_table, TruthTable, MAX_TRUTH_TABLE_VARIABLES};

fn rows(text: &str) -> Vec<(Vec<u8>, u8)> {
    truth_table(text)
        .unwrap()
        .rows
        .iter()
        .map(|r| (r.bits.clone(), r.result))
        .collect()
}

/// Random expression over `vars`, at most `depth` levels deep.
fn random_expr(rng: &mut ChaCha8Rng, vars: &[&str], depth: usize) -> Expr {
    if depth == 0 || rng.gen_bool(0.3) {
        return Expr::var(*vars.choose(rng).unwrap());
    }
    match rng.gen_range(0..3) {
        0 => Expr::not(random_expr(rng, vars, depth - 1)),
        1 => Expr::and(random_expr(rng, vars, depth - 1), random_expr(rng, vars, depth - 1)),
        _ => Expr::or(random_expr(rng, vars, depth - 1), random_expr(rng, vars, depth - 1)),
    }
}

// ─── Evaluation ────────────────────────────────────────────────────────────────

#[test]
fn eval_not() {
    assert!(!eval_expr("not A", &[("A", true)]).unwrap());
}

#[test]
fn eval_mixed() {
    let env = [("A", true), ("B", false), ("C", true)];
    assert!(eval_expr("(A and B) or C", &env).unwrap());
    assert!(!eval_expr("A and (B or not C)", &env).unwrap());
}

#[test]
fn eval_keyword_spellings() {
    let env = [("A", true), ("B", false)];
    assert_eq!(eval_expr("A AND NOT B", &env), eval_expr("A ∧ ¬B", &env));
    assert!(eval_expr("B ∨ A", &env).unwrap());
    assert!(eval_expr("TRUE and not False", &env).unwrap());
}

#[test]
fn eval_unknown_variable() {
    assert_eq!(
        eval_expr("A and Z", &[("A", true)]),
        Err(LogicError::UnknownVariable("Z".to_string()))
    );
    // Reported even where evaluation would short-circuit.
    assert_eq!(
        eval_expr("A or Z", &[("A", true)]),
        Err(LogicError::UnknownVariable("Z".to_string()))
    );
}

#[test]
fn eval_is_deterministic() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let vars = ["A", "B", "C", "D"];
    for _ in 0..100 {
        let expr = random_expr(&mut rng, &vars, 5);
        let env: HashMap<&str, bool> = vars.iter().map(|&v| (v, rng.gen_bool(0.5))).collect();
        let first = expr.eval(&env).unwrap();
        for _ in 0..3 {
            assert_eq!(expr.eval(&env).unwrap(), first);
        }
    }
}

#[test]
fn display_roundtrip_preserves_semantics() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let vars = ["A", "B", "C"];
    for _ in 0..100 {
        let expr = random_expr(&mut rng, &vars, 4);
        let reparsed = parse(&expr.to_string()).unwrap();
        let original = TruthTable::from_expr(&expr).unwrap();
        let again = TruthTable::from_expr(&reparsed).unwrap();
        assert_eq!(original, again, "{}", expr);
    }
}

// ─── Validation ────────────────────────────────────────────────────────────────

#[test]
fn rejects_non_boolean_constructs() {
    for text in ["A + B", "A == B", "f(A)", "A.b", "A[0]", "x = 1", "A, B", "'A'", "-A", "1"] {
        match parse(text) {
            Err(LogicError::UnsupportedConstruct { .. }) | Err(LogicError::Syntax { .. }) => {}
            other => panic!("{:?} parsed as {:?}", text, other),
        }
    }
}

#[test]
fn rejects_malformed_input() {
    for text in ["", "   ", "(A and B", "A and B)", "A and", "not", "A B", "A $ B", "and A"] {
        assert!(
            matches!(parse(text), Err(LogicError::Syntax { .. })),
            "{:?} should be a syntax error",
            text
        );
    }
}

#[test]
fn keywords_do_not_split_identifiers() {
    assert_eq!(extract_variables("GRAND or ORDER and NOTE").unwrap(), vec!["GRAND", "NOTE", "ORDER"]);
    assert_eq!(extract_variables("android and notify").unwrap(), vec!["android", "notify"]);
}

#[test]
fn extract_variables_sorted_and_unique() {
    assert_eq!(extract_variables("c or (a and not c) or b").unwrap(), vec!["a", "b", "c"]);
    assert!(extract_variables("true or false").unwrap().is_empty());
}

// ─── Truth tables ──────────────────────────────────────────────────────────────

#[test]
fn truth_table_and() {
    let table = truth_table("A and B").unwrap();
    assert_eq!(table.variables, vec!["A", "B"]);
    assert_eq!(
        rows("A and B"),
        vec![(vec![0, 0], 0), (vec![0, 1], 0), (vec![1, 0], 0), (vec![1, 1], 1)]
    );
}

#[test]
fn truth_table_or() {
    let rows = rows("A or B");
    assert_eq!(rows[0], (vec![0, 0], 0));
    assert_eq!(rows[2], (vec![1, 0], 1));
}

#[test]
fn truth_table_constant() {
    assert_eq!(rows("true and not false"), vec![(vec![], 1)]);
}

#[test]
fn truth_table_ceiling() {
    let names: Vec<String> = (0..=MAX_TRUTH_TABLE_VARIABLES).map(|i| format!("x{}", i)).collect();
    let text = names.join(" or ");
    assert_eq!(
        truth_table(&text).unwrap_err(),
        LogicError::TooManyVariables {
            count: MAX_TRUTH_TABLE_VARIABLES + 1,
            limit: MAX_TRUTH_TABLE_VARIABLES,
        }
    );
}

#[test]
fn truth_table_agrees_with_eval() {
    let text = "(A and not B) or (C and A)";
    let table = truth_table(text).unwrap();
    for row in &table.rows {
        let env: HashMap<&str, bool> = table
            .variables
            .iter()
            .map(String::as_str)
            .zip(row.bits.iter().map(|&b| b == 1))
            .collect();
        assert_eq!(eval_expr(text, &env).unwrap(), row.holds());
    }
}
