//! Lexer and parser: normalized expression text -> `Expr` AST.
//!
//! Standard arithmetic grammar over the fixed operator/function set:
//!
//! ```text
//! expr   := term  (('+'|'-') term)*        left-associative
//! term   := unary (('*'|'/') unary)*       left-associative
//! unary  := '-' unary | power
//! power  := atom ('^' unary)?              right-associative
//! atom   := number | 'x' | func '(' expr ')' | '(' expr ')'
//! ```
//!
//! Every token carries its byte position in the input, so each `ParseError`
//! can point the caller at the offending token. Parsing is deterministic:
//! identical normalized text always yields structurally identical ASTs.

use crate::expressions::expression_engine::{Expr, Func};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Syntax failure with enough structure for the caller to render a
/// user-facing message. Always recoverable: the user edits and retries.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// input was empty (or whitespace only) after normalization
    EmptyExpression,
    /// an identifier that is neither the variable x nor a recognized function
    UnknownIdentifier { name: String, position: usize },
    /// an opening bracket without its pair, or a stray closing bracket
    UnbalancedParenthesis { position: usize },
    /// a binary operator with a missing operand, or input ending mid-expression
    MissingOperand { position: usize },
    /// a token that cannot appear at this point of the grammar
    UnexpectedToken { token: String, position: usize },
    /// a numeric literal that does not parse as f64, e.g. "1.2.3"
    InvalidNumber { literal: String, position: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::EmptyExpression => write!(f, "empty expression"),
            ParseError::UnknownIdentifier { name, position } => {
                write!(f, "unknown identifier '{}' at position {}", name, position)
            }
            ParseError::UnbalancedParenthesis { position } => {
                write!(f, "unbalanced parenthesis at position {}", position)
            }
            ParseError::MissingOperand { position } => {
                write!(f, "missing operand at position {}", position)
            }
            ParseError::UnexpectedToken { token, position } => {
                write!(f, "unexpected token '{}' at position {}", token, position)
            }
            ParseError::InvalidNumber { literal, position } => {
                write!(
                    f,
                    "invalid numeric literal '{}' at position {}",
                    literal, position
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let bytes = input.char_indices().collect::<Vec<_>>();
    let mut i = 0;
    while i < bytes.len() {
        let (position, c) = bytes[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '+' => {
                tokens.push((Token::Plus, position));
                i += 1;
            }
            '-' => {
                tokens.push((Token::Minus, position));
                i += 1;
            }
            '*' => {
                tokens.push((Token::Star, position));
                i += 1;
            }
            '/' => {
                tokens.push((Token::Slash, position));
                i += 1;
            }
            '^' => {
                tokens.push((Token::Caret, position));
                i += 1;
            }
            '(' => {
                tokens.push((Token::LParen, position));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, position));
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].1.is_ascii_digit() || bytes[i].1 == '.') {
                    i += 1;
                }
                let literal: String = bytes[start..i].iter().map(|(_, c)| *c).collect();
                let value = literal.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    literal: literal.clone(),
                    position,
                })?;
                tokens.push((Token::Number(value), position));
            }
            c if c.is_alphabetic() => {
                let start = i;
                while i < bytes.len() && (bytes[i].1.is_alphanumeric() || bytes[i].1 == '_') {
                    i += 1;
                }
                let name: String = bytes[start..i].iter().map(|(_, c)| *c).collect();
                tokens.push((Token::Ident(name), position));
            }
            other => {
                return Err(ParseError::UnexpectedToken {
                    token: other.to_string(),
                    position,
                });
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
    /// byte length of the input, reported as the position of errors at end of input
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.cursor)
    }

    fn bump(&mut self) -> Option<(Token, usize)> {
        let item = self.tokens.get(self.cursor).cloned();
        if item.is_some() {
            self.cursor += 1;
        }
        item
    }

    // expr := term (('+'|'-') term)*
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_term()?;
        while let Some((token, _)) = self.peek() {
            match token {
                Token::Plus => {
                    self.bump();
                    let rhs = self.parse_term()?;
                    node = Expr::Add(node.boxed(), rhs.boxed());
                }
                Token::Minus => {
                    self.bump();
                    let rhs = self.parse_term()?;
                    node = Expr::Sub(node.boxed(), rhs.boxed());
                }
                _ => break,
            }
        }
        Ok(node)
    }

    // term := unary (('*'|'/') unary)*
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_unary()?;
        while let Some((token, _)) = self.peek() {
            match token {
                Token::Star => {
                    self.bump();
                    let rhs = self.parse_unary()?;
                    node = Expr::Mul(node.boxed(), rhs.boxed());
                }
                Token::Slash => {
                    self.bump();
                    let rhs = self.parse_unary()?;
                    node = Expr::Div(node.boxed(), rhs.boxed());
                }
                _ => break,
            }
        }
        Ok(node)
    }

    // unary := '-' unary | power
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some((Token::Minus, _)) = self.peek() {
            self.bump();
            let operand = self.parse_unary()?;
            return Ok(Expr::Neg(operand.boxed()));
        }
        self.parse_power()
    }

    // power := atom ('^' unary)?  -- right-associative, binds tighter than unary,
    // so -x^2 parses as -(x^2) and 2^-3 is accepted
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_atom()?;
        if let Some((Token::Caret, _)) = self.peek() {
            self.bump();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Pow(base.boxed(), exponent.boxed()));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let Some((token, position)) = self.bump() else {
            return Err(ParseError::MissingOperand { position: self.end });
        };
        match token {
            Token::Number(value) => Ok(Expr::Const(value)),
            Token::Ident(name) => {
                if name == "x" {
                    return Ok(Expr::Var);
                }
                match Func::from_str(&name) {
                    Ok(func) => {
                        let arg = self.parse_call_argument()?;
                        Ok(Expr::Fun(func, arg.boxed()))
                    }
                    Err(_) => Err(ParseError::UnknownIdentifier { name, position }),
                }
            }
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect_rparen(position)?;
                Ok(inner)
            }
            Token::RParen => Err(ParseError::UnbalancedParenthesis { position }),
            Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::Caret => {
                Err(ParseError::MissingOperand { position })
            }
        }
    }

    // functions of the fixed set take exactly one parenthesized argument
    fn parse_call_argument(&mut self) -> Result<Expr, ParseError> {
        match self.bump() {
            Some((Token::LParen, open_position)) => {
                let arg = self.parse_expr()?;
                self.expect_rparen(open_position)?;
                Ok(arg)
            }
            Some((other, position)) => Err(ParseError::UnexpectedToken {
                token: other.to_string(),
                position,
            }),
            None => Err(ParseError::MissingOperand { position: self.end }),
        }
    }

    fn expect_rparen(&mut self, open_position: usize) -> Result<(), ParseError> {
        match self.bump() {
            Some((Token::RParen, _)) => Ok(()),
            Some((other, position)) => Err(ParseError::UnexpectedToken {
                token: other.to_string(),
                position,
            }),
            None => Err(ParseError::UnbalancedParenthesis {
                position: open_position,
            }),
        }
    }
}

/// Parses normalized expression text into an AST. Use `Expr::parse` for the
/// normalize-then-parse front door.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    debug!("parsing {:?} ({} tokens)", input, tokens.len());
    let mut parser = Parser {
        tokens,
        cursor: 0,
        end: input.len(),
    };
    let expr = parser.parse_expr()?;
    if let Some((token, position)) = parser.peek() {
        return Err(match token {
            Token::RParen => ParseError::UnbalancedParenthesis {
                position: *position,
            },
            other => ParseError::UnexpectedToken {
                token: other.to_string(),
                position: *position,
            },
        });
    }
    Ok(expr)
}

//___________________________________TESTS____________________________________
