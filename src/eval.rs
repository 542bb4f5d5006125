use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::ast::Expr;
use crate::error::LogicError;
use crate::parser::parse;

/// Variable bindings for one evaluation.
///
/// Implemented for the usual map types keyed by `String` or `&str`, and for slices of
/// `(&str, bool)` pairs, so callers can pass whatever they built the facts into.
pub trait Env {
    fn lookup(&self, name: &str) -> Option<bool>;
}

impl<S: BuildHasher> Env for HashMap<String, bool, S> {
    fn lookup(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl<S: BuildHasher> Env for HashMap<&str, bool, S> {
    fn lookup(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Env for BTreeMap<String, bool> {
    fn lookup(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Env for BTreeMap<&str, bool> {
    fn lookup(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Env for [(&str, bool)] {
    fn lookup(&self, name: &str) -> Option<bool> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> Env for [(&str, bool); N] {
    fn lookup(&self, name: &str) -> Option<bool> {
        self.as_slice().lookup(name)
    }
}

impl<E: Env + ?Sized> Env for &E {
    fn lookup(&self, name: &str) -> Option<bool> {
        (**self).lookup(name)
    }
}

impl Expr {
    /// Evaluates the expression under `env`.
    ///
    /// Every variable occurring in the expression must be bound, even one that short-circuiting
    /// would never reach. Otherwise the result is [`LogicError::UnknownVariable`] naming the first
    /// unbound variable in left-to-right order.
    pub fn eval<E: Env + ?Sized>(&self, env: &E) -> Result<bool, LogicError> {
        if let Some(name) = self.first_unbound(env) {
            return Err(LogicError::UnknownVariable(name.to_string()));
        }
        self.eval_bound(env)
    }

    fn first_unbound<E: Env + ?Sized>(&self, env: &E) -> Option<&str> {
        match self {
            Expr::Var(name) => match env.lookup(name) {
                Some(_) => None,
                None => Some(name.as_str()),
            },
            Expr::Not(e) => e.first_unbound(env),
            Expr::And(es) | Expr::Or(es) => es.iter().find_map(|e| e.first_unbound(env)),
            Expr::Const(_) => None,
        }
    }

    /// Short-circuiting evaluation. A name the environment does not answer for is still an
    /// error here, never a default.
    fn eval_bound<E: Env + ?Sized>(&self, env: &E) -> Result<bool, LogicError> {
        match self {
            Expr::Var(name) => env
                .lookup(name)
                .ok_or_else(|| LogicError::UnknownVariable(name.clone())),
            Expr::Not(e) => Ok(!e.eval_bound(env)?),
            Expr::And(es) => {
                for e in es {
                    if !e.eval_bound(env)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Expr::Or(es) => {
                for e in es {
                    if e.eval_bound(env)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Expr::Const(b) => Ok(*b),
        }
    }
}

/// Parses `text` and evaluates it under `env`.
///
/// # Example
///
/// ```rust
/// use recipe_rs::eval::eval_expr;
///
/// let env = [("healthy", true), ("cheap", false), ("quick", true)];
/// assert!(eval_expr("(healthy AND cheap) OR quick", &env).unwrap());
/// assert!(!eval_expr("NOT quick", &env).unwrap());
/// ```
pub fn eval_expr<E: Env + ?Sized>(text: &str, env: &E) -> Result<bool, LogicError> {
    parse(text)?.eval(env)
}
