/// a module turns a String expression typed by an end user into a symbolic
/// expression and evaluates it at a given value of the single free variable x
///
///# Example
/// ```
/// use series_engine::expressions::expression_engine::Expr;
/// let input = "2x*sin(x) + (x+1)(x-1)";
/// let parsed_expression = Expr::parse(input).unwrap();
/// println!("parsed_expression {}", parsed_expression);
/// let y = parsed_expression.eval_at(3.0).unwrap();
/// println!("{} at x=3 is {}", input, y);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod expression_engine;
///____________________________________________________________________________________________________________________________
/// rewrites shorthand notations (2x, )(, 2( ) into an explicit token stream
/// so the parser grammar stays simple and unambiguous; a pure text transform
/// that never fails and is idempotent
pub mod normalizer;
///____________________________________________________________________________________________________________________________
/// lexer and recursive-descent parser: normalized text -> Expr or ParseError
/// with the offending token and byte position
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// structural-recursion evaluation of an Expr at a given x under IEEE-754
/// semantics; any non-finite sub-result fails with EvalError::NonFinite at
/// the node that produced it
pub mod evaluator;
