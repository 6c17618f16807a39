//! Text-level normalization of user-typed expressions.
//!
//! End users write shorthand like `2x`, `2(x+1)` or `(x+1)(x-1)`. The
//! normalizer rewrites exactly three implicit-multiplication forms into
//! explicit ones so the parser grammar stays simple and unambiguous:
//!
//! 1. `<digits>x`  -> `<digits>*x`
//! 2. `)(`         -> `)*(`
//! 3. `<digits>(`  -> `<digits>*(`
//!
//! No other forms (`x(`, `)x`, `2sin(`) are inferred; those reach the
//! parser unchanged and surface as syntax errors there. The transform is
//! pure, never fails and is idempotent.

use regex::Regex;
use std::sync::LazyLock;

static DIGITS_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)x").unwrap());
static CLOSE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\)\(").unwrap());
static DIGITS_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\(").unwrap());

/// Makes implicit multiplication explicit. Applied rewrites, in this order:
/// `2x -> 2*x`, `)( -> )*(`, `2( -> 2*(`. Leading/trailing whitespace is
/// trimmed.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let step1 = DIGITS_VAR.replace_all(trimmed, "${1}*x");
    let step2 = CLOSE_OPEN.replace_all(&step1, ")*(");
    let step3 = DIGITS_OPEN.replace_all(&step2, "${1}*(");
    step3.into_owned()
}

//___________________________________TESTS____________________________________
