//! Recursive-descent parser for boolean expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! or_expr   := and_expr ("or" and_expr)*
//! and_expr  := not_expr ("and" not_expr)*
//! not_expr  := "not" not_expr | primary
//! primary   := IDENT | CONST | "(" or_expr ")"
//! ```
//!
//! The parser only ever builds the five [`Expr`] variants. Anything recognizable as a construct
//! from a richer language (arithmetic, comparisons, calls, attribute access, indexing, literals)
//! is reported as [`LogicError::UnsupportedConstruct`]. Everything else that fails to match the
//! grammar is a [`LogicError::Syntax`].

use std::str::FromStr;

use log::debug;

use crate::ast::Expr;
use crate::error::LogicError;
use crate::lexer::{tokenize, Spanned, Token};

/// Maximum nesting of parentheses and `not` chains.
pub const MAX_NESTING: usize = 256;

/// Parses and validates `text`.
///
/// # Example
///
/// ```rust
/// use recipe_rs::ast::Expr;
/// use recipe_rs::parser::parse;
///
/// let e = parse("(A AND B) ∨ ¬C").unwrap();
/// assert_eq!(e, Expr::or(Expr::and(Expr::var("A"), Expr::var("B")), Expr::not(Expr::var("C"))));
/// ```
pub fn parse(text: &str) -> Result<Expr, LogicError> {
    debug!("parse(text = {:?})", text);
    let tokens = tokenize(text)?;
    let mut parser = Parser::new(tokens, text.len());
    let expr = parser.parse_expr()?;
    debug!("parse: {} nodes, depth {}", expr.size(), expr.depth());
    Ok(expr)
}

/// Distinct variable names of `text`, in ascending lexical order.
///
/// Fails exactly as [`parse`] does.
pub fn extract_variables(text: &str) -> Result<Vec<String>, LogicError> {
    parse(text).map(|e| e.variables())
}

impl FromStr for Expr {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Description of a symbol that names a forbidden construct, or `None` if the symbol is just
/// misplaced punctuation.
fn forbidden_symbol(symbol: &str) -> Option<String> {
    let kind = match symbol {
        "+" | "-" | "*" | "/" | "%" | "**" | "//" | "@" => "arithmetic operator",
        "==" | "!=" | "<" | "<=" | ">" | ">=" => "comparison operator",
        "&" | "|" | "^" | "~" => "bitwise operator",
        "=" => "assignment",
        "." => "attribute access",
        "[" => "indexing",
        "," => "argument separator",
        _ => return None,
    };
    Some(format!("{} '{}'", kind, symbol))
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    /// Byte length of the source, used as the position of "end of input".
    end: usize,
    nesting: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>, end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            nesting: 0,
        }
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek().map(|s| &s.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn parse_expr(&mut self) -> Result<Expr, LogicError> {
        if self.tokens.is_empty() {
            return Err(LogicError::syntax(0, "empty expression"));
        }
        let expr = self.parse_or()?;
        match self.peek() {
            None => Ok(expr),
            Some(s) => Err(LogicError::syntax(s.position, format!("unexpected {}", s.token))),
        }
    }

    fn parse_or(&mut self) -> Result<Expr, LogicError> {
        let mut lhs = self.parse_and()?;
        while let Some(Token::Or) = self.peek_token() {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::or(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, LogicError> {
        let mut lhs = self.parse_not()?;
        while let Some(Token::And) = self.peek_token() {
            self.advance();
            let rhs = self.parse_not()?;
            lhs = Expr::and(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Expr, LogicError> {
        if let Some(Spanned {
            token: Token::Not,
            position,
        }) = self.peek()
        {
            let position = *position;
            self.advance();
            self.enter(position)?;
            let inner = self.parse_not();
            self.nesting -= 1;
            return Ok(Expr::not(inner?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, LogicError> {
        let Some(Spanned { token, position }) = self.advance() else {
            return Err(LogicError::syntax(self.end, "unexpected end of input, expected an operand"));
        };

        let expr = match token {
            Token::Ident(name) => {
                if let Some(Token::LParen) = self.peek_token() {
                    return Err(LogicError::unsupported(position, format!("function call '{}(...)'", name)));
                }
                Expr::Var(name)
            }
            Token::Const(b) => Expr::Const(b),
            Token::LParen => {
                self.enter(position)?;
                let inner = self.parse_or();
                self.nesting -= 1;
                let inner = inner?;
                self.check_operand_end()?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen, ..
                    }) => {}
                    Some(s) => {
                        return Err(LogicError::syntax(s.position, format!("expected ')', found {}", s.token)));
                    }
                    None => {
                        return Err(LogicError::syntax(self.end, "expected ')', found end of input"));
                    }
                }
                inner
            }
            Token::Number(s) => {
                return Err(LogicError::unsupported(position, format!("numeric literal '{}'", s)));
            }
            Token::Str(s) => {
                return Err(LogicError::unsupported(position, format!("string literal {:?}", s)));
            }
            Token::Symbol(s @ ("-" | "+" | "~")) => {
                return Err(LogicError::unsupported(position, format!("unary operator '{}'", s)));
            }
            Token::Symbol("[") => {
                return Err(LogicError::unsupported(position, "list literal"));
            }
            other => {
                return Err(LogicError::syntax(position, format!("expected an operand, found {}", other)));
            }
        };

        self.check_operand_end()?;
        Ok(expr)
    }

    /// Rejects a forbidden operator directly following a complete operand, such as the `+` in
    /// `A + B` or the `.` in `recipe.price`.
    fn check_operand_end(&self) -> Result<(), LogicError> {
        if let Some(Spanned {
            token: Token::Symbol(symbol),
            position,
        }) = self.peek()
        {
            if let Some(construct) = forbidden_symbol(symbol) {
                return Err(LogicError::unsupported(*position, construct));
            }
        }
        Ok(())
    }

    fn enter(&mut self, position: usize) -> Result<(), LogicError> {
        if self.nesting >= MAX_NESTING {
            return Err(LogicError::syntax(position, "expression nested too deeply"));
        }
        self.nesting += 1;
        Ok(())
    }
}
