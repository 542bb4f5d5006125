//! # recipe-rs: a recipe catalog with a safe boolean filter language
//!
//! **`recipe-rs`** keeps a small catalog of recipes in a flat file and lets you query it with
//! propositional formulas over named boolean facts, such as `cheap and not healthy`.
//!
//! ## Key Features
//!
//! - **Safe expression language**: The [`parser`] accepts only variables, `true`/`false`,
//!   `and`/`or`/`not` (also `∧`/`∨`/`¬`) and parentheses. Anything else (arithmetic,
//!   comparisons, function calls, indexing) is rejected with a precise error, and nothing is
//!   ever executed.
//! - **Evaluation and truth tables**: Formulas are evaluated against any [`Env`][crate::eval::Env]
//!   and enumerated over all assignments by [`table`].
//! - **Interchangeable stable sorts**: [`BubbleSort`][crate::sort::BubbleSort] and
//!   [`MergeSort`][crate::sort::MergeSort] order by a caller-supplied key and always agree.
//! - **Catalog**: [`RecipeCatalog`][crate::catalog::RecipeCatalog] ties it together with CSV
//!   persistence, searches, logical filtering and two-level sorting.
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use recipe_rs::parser::parse;
//! use recipe_rs::table::truth_table;
//!
//! let expr = parse("(A and B) or not C").unwrap();
//! assert_eq!(expr.variables(), vec!["A", "B", "C"]);
//!
//! let env = HashMap::from([("A", true), ("B", false), ("C", false)]);
//! assert!(expr.eval(&env).unwrap());
//!
//! let table = truth_table("A or not A").unwrap();
//! assert!(table.is_tautology());
//!
//! // Not boolean logic:
//! assert!(parse("A + B").is_err());
//! ```
//!
//! ## Core Components
//!
//! - **[`parser`]**: Validation and parsing into an [`Expr`][crate::ast::Expr] tree.
//! - **[`eval`]**: Evaluation under a variable assignment.
//! - **[`table`]**: Truth-table generation.
//! - **[`sort`]**: Bubble and merge sort behind the [`SortingAlgorithm`][crate::sort::SortingAlgorithm] trait.
//! - **[`catalog`]**: The recipe store.

pub mod ast;
pub mod catalog;
pub mod config;
pub mod error;
pub mod eval;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod recipe;
pub mod sort;
pub mod table;
