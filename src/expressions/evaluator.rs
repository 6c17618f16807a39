//! Numeric evaluation of an `Expr` at a given value of x.
//!
//! Structural recursion under IEEE-754 double-precision semantics. The
//! finiteness of every sub-result is checked at the node that produced it,
//! so a division by zero or a `sqrt` of a negative argument fails with a
//! meaningful `EvalError::NonFinite` instead of silently propagating
//! NaN/inf to the root. Evaluation is a pure function of (AST, x); no
//! state survives between calls.

use crate::expressions::expression_engine::Expr;
use std::fmt;

/// The expression is syntactically valid but produced a non-real or
/// non-finite value at this x. Recoverable: the caller picks a different
/// domain or expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    NonFinite {
        /// the value of the free variable at which evaluation failed
        x: f64,
        /// display form of the subexpression that produced the value
        node: String,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::NonFinite { x, node } => {
                write!(f, "non-finite value of {} at x = {}", node, x)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Evaluates `expr` at the given x. Fails with `EvalError::NonFinite` as
/// soon as any node (including nested sub-results) is NaN or infinite;
/// `0/0` and `x/0` fail here rather than leaking inf/NaN to callers.
pub fn eval_node(expr: &Expr, x: f64) -> Result<f64, EvalError> {
    let value = match expr {
        Expr::Var => x,
        Expr::Const(val) => *val,
        Expr::Neg(operand) => -eval_node(operand, x)?,
        Expr::Add(lhs, rhs) => eval_node(lhs, x)? + eval_node(rhs, x)?,
        Expr::Sub(lhs, rhs) => eval_node(lhs, x)? - eval_node(rhs, x)?,
        Expr::Mul(lhs, rhs) => eval_node(lhs, x)? * eval_node(rhs, x)?,
        Expr::Div(lhs, rhs) => eval_node(lhs, x)? / eval_node(rhs, x)?,
        Expr::Pow(base, exp) => eval_node(base, x)?.powf(eval_node(exp, x)?),
        Expr::Fun(func, arg) => func.apply(eval_node(arg, x)?),
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite {
            x,
            node: expr.to_string(),
        })
    }
}

/// Probes an already parsed expression at the given sample points,
/// returning the preview values or the first failure. Callers use this to
/// validate an expression before saving it; the customary probe set is
/// `i*pi/4` for `i = 0..5`, see [`PREVIEW_PROBES`].
pub fn preview(expr: &Expr, probes: &[f64]) -> Result<Vec<f64>, EvalError> {
    probes.iter().map(|&x| eval_node(expr, x)).collect()
}

/// Default probe abscissas for expression validation previews.
pub const PREVIEW_PROBES: [f64; 5] = [
    0.0,
    std::f64::consts::FRAC_PI_4,
    std::f64::consts::FRAC_PI_2,
    3.0 * std::f64::consts::FRAC_PI_4,
    std::f64::consts::PI,
];

//___________________________________TESTS____________________________________
