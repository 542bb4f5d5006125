//! Validated boolean expression tree.
//!
//! An [`Expr`] can only be built from the five productions of the language, so a tree that
//! exists is already safe to evaluate. Use [`parse`][crate::parser::parse] to build one from
//! text, or the constructors below to build one directly.

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expr {
    /// Variable reference, bound by the evaluation environment.
    Var(String),
    /// Logical negation.
    Not(Box<Expr>),
    /// N-ary conjunction (at least two operands when produced by the parser).
    And(Vec<Expr>),
    /// N-ary disjunction (at least two operands when produced by the parser).
    Or(Vec<Expr>),
    /// Boolean constant.
    Const(bool),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn constant(value: bool) -> Self {
        Expr::Const(value)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(value: Self) -> Self {
        Expr::Not(Box::new(value))
    }

    /// Conjunction of `lhs` and `rhs`, flattening nested conjunctions into one node.
    pub fn and(lhs: Self, rhs: Self) -> Self {
        let mut operands = Vec::new();
        for e in [lhs, rhs] {
            match e {
                Expr::And(inner) => operands.extend(inner),
                other => operands.push(other),
            }
        }
        Expr::And(operands)
    }

    /// Disjunction of `lhs` and `rhs`, flattening nested disjunctions into one node.
    pub fn or(lhs: Self, rhs: Self) -> Self {
        let mut operands = Vec::new();
        for e in [lhs, rhs] {
            match e {
                Expr::Or(inner) => operands.extend(inner),
                other => operands.push(other),
            }
        }
        Expr::Or(operands)
    }

    /// Distinct variable names, in ascending lexical order.
    pub fn variables(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names.into_iter().map(str::to_string).collect()
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Var(name) => {
                names.insert(name.as_str());
            }
            Expr::Not(e) => e.collect_variables(names),
            Expr::And(es) | Expr::Or(es) => {
                for e in es {
                    e.collect_variables(names);
                }
            }
            Expr::Const(_) => {}
        }
    }

    /// Depth of the expression tree (0 for leaves).
    pub fn depth(&self) -> usize {
        match self {
            Expr::Var(_) | Expr::Const(_) => 0,
            Expr::Not(e) => 1 + e.depth(),
            Expr::And(es) | Expr::Or(es) => 1 + es.iter().map(Expr::depth).max().unwrap_or(0),
        }
    }

    /// Size of the expression tree (number of nodes).
    pub fn size(&self) -> usize {
        match self {
            Expr::Var(_) | Expr::Const(_) => 1,
            Expr::Not(e) => 1 + e.size(),
            Expr::And(es) | Expr::Or(es) => 1 + es.iter().map(Expr::size).sum::<usize>(),
        }
    }
}

/// Renders in canonical lowercase syntax. For trees built by the parser, the output parses back to
/// the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(true) => write!(f, "true"),
            Expr::Const(false) => write!(f, "false"),
            Expr::Not(e) => match e.as_ref() {
                Expr::And(_) | Expr::Or(_) => write!(f, "not ({})", e),
                _ => write!(f, "not {}", e),
            },
            Expr::And(es) => {
                for (i, e) in es.iter().enumerate() {
                    if i > 0 {
                        write!(f, " and ")?;
                    }
                    match e {
                        Expr::Or(_) => write!(f, "({})", e)?,
                        _ => write!(f, "{}", e)?,
                    }
                }
                Ok(())
            }
            Expr::Or(es) => {
                for (i, e) in es.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_flattens() {
        let e = Expr::and(Expr::and(Expr::var("a"), Expr::var("b")), Expr::var("c"));
        assert_eq!(e, Expr::And(vec![Expr::var("a"), Expr::var("b"), Expr::var("c")]));
    }

    #[test]
    fn test_or_does_not_flatten_and() {
        let e = Expr::or(Expr::and(Expr::var("a"), Expr::var("b")), Expr::var("c"));
        assert_eq!(
            e,
            Expr::Or(vec![Expr::And(vec![Expr::var("a"), Expr::var("b")]), Expr::var("c")])
        );
    }

    #[test]
    fn test_variables_sorted_and_unique() {
        let e = Expr::or(
            Expr::and(Expr::var("quick"), Expr::not(Expr::var("cheap"))),
            Expr::and(Expr::var("cheap"), Expr::var("B")),
        );
        assert_eq!(e.variables(), vec!["B", "cheap", "quick"]);
    }

    #[test]
    fn test_variables_of_constant() {
        assert!(Expr::not(Expr::constant(true)).variables().is_empty());
    }

    #[test]
    fn test_expr_depth() {
        assert_eq!(Expr::var("x").depth(), 0);
        assert_eq!(Expr::not(Expr::var("x")).depth(), 1);
        assert_eq!(Expr::and(Expr::not(Expr::var("x")), Expr::var("y")).depth(), 2);
    }

    #[test]
    fn test_expr_size() {
        assert_eq!(Expr::var("x").size(), 1);
        assert_eq!(Expr::not(Expr::var("x")).size(), 2);
        assert_eq!(Expr::and(Expr::var("x"), Expr::var("y")).size(), 3);
    }

    #[test]
    fn test_display() {
        let e = Expr::and(
            Expr::or(Expr::var("a"), Expr::var("b")),
            Expr::not(Expr::and(Expr::var("c"), Expr::constant(false))),
        );
        assert_eq!(e.to_string(), "(a or b) and not (c and false)");
    }
}
