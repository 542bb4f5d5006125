//! Truth-table enumeration.
//!
//! Rows are produced in increasing order of the assignment mask, with the first (lexically
//! smallest) variable as the most significant bit. For `A and B`:
//!
//! ```text
//! A | B | Result
//! 0 | 0 | 0
//! 0 | 1 | 0
//! 1 | 0 | 0
//! 1 | 1 | 1
//! ```

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::ast::Expr;
use crate::error::LogicError;
use crate::parser::parse;

/// Largest number of variables a truth table is built for (2^20 rows).
pub const MAX_TRUTH_TABLE_VARIABLES: usize = 20;

/// One assignment and its result.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Row {
    /// Bit per variable (0 or 1), aligned to [`TruthTable::variables`].
    pub bits: Vec<u8>,
    /// 1 if the expression holds under this assignment, 0 otherwise.
    pub result: u8,
}

impl Row {
    pub fn holds(&self) -> bool {
        self.result == 1
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TruthTable {
    /// Variable names in ascending lexical order.
    pub variables: Vec<String>,
    /// Rows for masks `0 .. 2^n`, in that order.
    pub rows: Vec<Row>,
}

impl TruthTable {
    /// Enumerates every assignment of the variables of `expr`.
    pub fn from_expr(expr: &Expr) -> Result<Self, LogicError> {
        let variables = expr.variables();
        let n = variables.len();
        if n > MAX_TRUTH_TABLE_VARIABLES {
            return Err(LogicError::TooManyVariables {
                count: n,
                limit: MAX_TRUTH_TABLE_VARIABLES,
            });
        }
        debug!("truth_table(vars = {:?}) -> {} rows", variables, 1usize << n);

        let mut env: HashMap<&str, bool> = variables.iter().map(|v| (v.as_str(), false)).collect();
        let mut rows = Vec::with_capacity(1 << n);

        for mask in 0..(1usize << n) {
            let mut bits = Vec::with_capacity(n);
            for (i, v) in variables.iter().enumerate() {
                let bit = ((mask >> (n - i - 1)) & 1) as u8;
                env.insert(v.as_str(), bit == 1);
                bits.push(bit);
            }
            let result = expr.eval(&env)? as u8;
            rows.push(Row { bits, result });
        }

        Ok(TruthTable { variables, rows })
    }

    /// Number of variables (columns, excluding the result).
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Rows where the expression holds (the minterms).
    pub fn satisfying_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().filter(|r| r.holds())
    }

    pub fn is_tautology(&self) -> bool {
        self.rows.iter().all(Row::holds)
    }

    pub fn is_contradiction(&self) -> bool {
        !self.rows.iter().any(Row::holds)
    }
}

/// Renders one column per variable plus a `Result` column, separated by ` | `.
impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header: Vec<&str> = self.variables.iter().map(String::as_str).collect();
        header.push("Result");
        let widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        writeln!(f, "{}", header.join(" | "))?;

        for row in &self.rows {
            let cells = row.bits.iter().chain(std::iter::once(&row.result));
            let line: Vec<String> = cells
                .zip(&widths)
                .map(|(bit, &width)| format!("{:<width$}", bit, width = width))
                .collect();
            writeln!(f, "{}", line.join(" | ").trim_end())?;
        }
        Ok(())
    }
}

/// Parses `text` and enumerates its truth table.
///
/// Fails like [`parse`] on malformed input, and with [`LogicError::TooManyVariables`] above
/// [`MAX_TRUTH_TABLE_VARIABLES`].
pub fn truth_table(text: &str) -> Result<TruthTable, LogicError> {
    let expr = parse(text)?;
    TruthTable::from_expr(&expr)
}
