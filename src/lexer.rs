//! Tokenizer for the boolean expression language.
//!
//! Keywords are recognized on whole identifier tokens only, so the
//! alternative notations map onto the same token kinds:
//!
//! | Token   | Spellings              |
//! |---------|------------------------|
//! | `And`   | `and`, `AND`, `∧`      |
//! | `Or`    | `or`, `OR`, `∨`        |
//! | `Not`   | `not`, `NOT`, `¬`      |
//! | `Const` | `true`, `True`, `TRUE`, `false`, `False`, `FALSE` |
//!
//! An identifier such as `GRAND` or `ORDER` is never split.
//!
//! Operators, numbers and string literals that have no meaning in the language are still
//! tokenized, so that the parser can reject them as unsupported constructs instead of
//! reporting a bare syntax error.

use std::fmt;

use crate::error::LogicError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Token {
    Ident(String),
    Const(bool),
    And,
    Or,
    Not,
    LParen,
    RParen,
    /// Numeric literal (always rejected).
    Number(String),
    /// Quoted string literal (always rejected).
    Str(String),
    /// Operator or punctuation outside the language (always rejected).
    Symbol(&'static str),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Const(b) => write!(f, "constant '{}'", b),
            Token::And => write!(f, "'and'"),
            Token::Or => write!(f, "'or'"),
            Token::Not => write!(f, "'not'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Number(s) => write!(f, "number '{}'", s),
            Token::Str(s) => write!(f, "string {:?}", s),
            Token::Symbol(s) => write!(f, "'{}'", s),
        }
    }
}

/// A token together with the byte offset where it starts.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Multi-character symbols first, so that `**` wins over `*`.
const SYMBOLS: &[&str] = &[
    "**", "//", "==", "!=", "<=", ">=", "+", "-", "*", "/", "%", "<", ">", "=", ".", "[", "]", ",", "&", "|",
    "^", "~", "@", ":",
];

fn keyword(ident: &str) -> Option<Token> {
    match ident {
        "and" | "AND" => Some(Token::And),
        "or" | "OR" => Some(Token::Or),
        "not" | "NOT" => Some(Token::Not),
        "true" | "True" | "TRUE" => Some(Token::Const(true)),
        "false" | "False" | "FALSE" => Some(Token::Const(false)),
        _ => None,
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_part(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Splits `text` into tokens.
///
/// Fails with [`LogicError::Syntax`] on characters that belong to no token and on
/// unterminated string literals.
pub fn tokenize(text: &str) -> Result<Vec<Spanned>, LogicError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '(' => {
                chars.next();
                Token::LParen
            }
            ')' => {
                chars.next();
                Token::RParen
            }
            '∧' => {
                chars.next();
                Token::And
            }
            '∨' => {
                chars.next();
                Token::Or
            }
            '¬' => {
                chars.next();
                Token::Not
            }
            '\'' | '"' => {
                let quote = c;
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                for (_, ch) in chars.by_ref() {
                    if ch == quote {
                        closed = true;
                        break;
                    }
                    value.push(ch);
                }
                if !closed {
                    return Err(LogicError::syntax(start, "unterminated string literal"));
                }
                Token::Str(value)
            }
            c if c.is_ascii_digit() => {
                let mut end = start;
                while let Some(&(i, ch)) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' {
                        end = i + ch.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Number(text[start..end].to_string())
            }
            c if is_ident_start(c) => {
                let mut end = start;
                while let Some(&(i, ch)) = chars.peek() {
                    if is_ident_part(ch) {
                        end = i + ch.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let ident = &text[start..end];
                keyword(ident).unwrap_or_else(|| Token::Ident(ident.to_string()))
            }
            _ => {
                let rest = &text[start..];
                match SYMBOLS.iter().find(|s| rest.starts_with(**s)) {
                    Some(symbol) => {
                        for _ in 0..symbol.chars().count() {
                            chars.next();
                        }
                        Token::Symbol(*symbol)
                    }
                    None => {
                        return Err(LogicError::syntax(start, format!("unexpected character '{}'", c)));
                    }
                }
            }
        };

        tokens.push(Spanned { token, position: start });
    }

    Ok(tokens)
}
