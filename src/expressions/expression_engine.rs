//! # Expression Engine Module
//!
//! Core abstract syntax tree for user-typed mathematical expressions of a
//! single free variable. Serves as the exchange type between the normalizer,
//! the parser, the evaluator and the series sampler.
//!
//! ## Purpose
//!
//! - Represent a parsed expression as an immutable tree of nodes
//! - Restrict calls to a fixed, exhaustively testable function set
//! - Pretty-print expressions for error messages and logs
//!
//! ## Main Structures
//!
//! ### `Expr` Enum
//! - **Constants**: `Const(f64)` - numerical literals
//! - **Variable**: `Var` - the single free variable, conventionally `x`.
//!   There is no variable name payload: the parser rejects every other
//!   identifier at construction time, so the "no other free variables"
//!   invariant holds by construction and evaluation needs no name lookup.
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - binary arithmetic
//! - **Negation**: `Neg` - unary minus
//! - **Calls**: `Fun(Func, arg)` - one-argument calls of the fixed set
//!
//! ### `Func` Enum
//! The recognized function set: sin, cos, tan, sqrt, abs, exp, log
//! (log is the natural logarithm).
//!
//! The enum uses `Box<Expr>` for recursive structures, allowing arbitrarily
//! deep expression trees, and implements the std::ops traits for natural
//! mathematical syntax when building trees by hand in tests.

use crate::expressions::evaluator::EvalError;
use crate::expressions::normalizer::normalize;
use crate::expressions::parse_expr::{ParseError, parse_expression};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// One-argument functions the parser recognizes. Anything else is an
/// unknown identifier and a parse error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Abs,
    Exp,
    /// natural logarithm
    Log,
}

impl Func {
    /// Applies the function to an already evaluated argument.
    pub fn apply(self, arg: f64) -> f64 {
        match self {
            Func::Sin => arg.sin(),
            Func::Cos => arg.cos(),
            Func::Tan => arg.tan(),
            Func::Sqrt => arg.sqrt(),
            Func::Abs => arg.abs(),
            Func::Exp => arg.exp(),
            Func::Log => arg.ln(),
        }
    }

    /// true if `name` is one of the recognized function names
    pub fn is_known(name: &str) -> bool {
        Func::from_str(name).is_ok()
    }
}

/// Core symbolic expression enum representing a parsed user expression as an
/// abstract syntax tree. Immutable once built; evaluation never mutates it.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// The single free variable x
    Var,
    /// Numerical constant value
    Const(f64),
    /// Unary negation: -operand
    Neg(Box<Expr>),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Function call with a single argument, e.g. sin(x)
    Fun(Func, Box<Expr>),
}

/// Display implementation for pretty printing expressions.
///
/// Fully parenthesized mathematical notation, used verbatim in error
/// messages (the evaluator reports the offending subexpression this way).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var => write!(f, "x"),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Neg(expr) => write!(f, "(-{})", expr),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Fun(func, arg) => write!(f, "{}({})", func, arg),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Neg(self.boxed())
    }
}

impl Expr {
    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Creates a function call node around self.
    pub fn fun(self, func: Func) -> Expr {
        Expr::Fun(func, self.boxed())
    }

    /// Front door of the expression pipeline: normalize the raw user text
    /// (implicit multiplication rewrites) and parse it into an AST.
    ///
    /// Two calls with identical normalized text always produce structurally
    /// identical ASTs.
    ///
    /// # Examples
    /// ```
    /// use series_engine::expressions::expression_engine::Expr;
    /// let expr = Expr::parse("2x + 1").unwrap();
    /// assert_eq!(expr.eval_at(3.0).unwrap(), 7.0);
    /// ```
    pub fn parse(raw: &str) -> Result<Expr, ParseError> {
        parse_expression(&normalize(raw))
    }

    /// Counts the nodes of the tree. Evaluation and parsing are O(size) in
    /// this count; handy for logging and sanity limits in callers.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Var | Expr::Const(_) => 1,
            Expr::Neg(e) | Expr::Fun(_, e) => 1 + e.node_count(),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => 1 + l.node_count() + r.node_count(),
        }
    }

    /// Direct evaluation at a given x; see the evaluator module.
    pub fn eval_at(&self, x: f64) -> Result<f64, EvalError> {
        crate::expressions::evaluator::eval_node(self, x)
    }
}

//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ops_build_the_expected_tree() {
        let expr = Expr::Var + Expr::Const(2.0);
        let expected = Expr::Add(Box::new(Expr::Var), Box::new(Expr::Const(2.0)));
        assert_eq!(expr, expected);

        let expr = Expr::Var * Expr::Const(2.0) - Expr::Const(1.0);
        let expected = Expr::Sub(
            Box::new(Expr::Mul(Box::new(Expr::Var), Box::new(Expr::Const(2.0)))),
            Box::new(Expr::Const(1.0)),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_neg_builds_unary_node() {
        let expr = -Expr::Var;
        assert_eq!(expr, Expr::Neg(Box::new(Expr::Var)));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let expr = (Expr::Var + Expr::Const(1.0)) * Expr::Var.fun(Func::Sin);
        let printed = expr.to_string();
        assert_eq!(printed, "((x + 1) * sin(x))");
        let reparsed = Expr::parse(&printed).unwrap();
        assert_eq!(reparsed, expr);
    }

    #[test]
    fn test_func_names() {
        assert!(Func::is_known("sin"));
        assert!(Func::is_known("log"));
        assert!(!Func::is_known("foo"));
        assert_eq!(Func::Sqrt.to_string(), "sqrt");
        assert_eq!("tan".parse::<Func>().unwrap(), Func::Tan);
    }

    #[test]
    fn test_func_apply() {
        assert_eq!(Func::Abs.apply(-2.5), 2.5);
        assert_eq!(Func::Sqrt.apply(9.0), 3.0);
        assert_eq!(Func::Log.apply(1.0), 0.0);
    }

    #[test]
    fn test_node_count() {
        let expr = Expr::parse("sin(x) + 2*x").unwrap();
        // sin, x, +, 2, *, x
        assert_eq!(expr.node_count(), 6);
    }
}
