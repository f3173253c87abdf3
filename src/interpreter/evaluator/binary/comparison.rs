use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, Expr},
    error::DiagnosticKind,
    interpreter::{
        evaluator::{binary::core::mismatch, core::EvalResult},
        value::core::Value,
    },
};

/// Orders two character values: a shorter string is lower, strings of equal
/// length compare byte by byte.
///
/// ## Example
/// ```
/// use std::cmp::Ordering;
///
/// use caexpr::interpreter::evaluator::binary::comparison::compare_text;
///
/// assert_eq!(compare_text("Z", "AA"), Ordering::Less);
/// assert_eq!(compare_text("AB", "AC"), Ordering::Less);
/// ```
#[must_use]
pub fn compare_text(left: &str, right: &str) -> Ordering {
    left.len()
        .cmp(&right.len())
        .then_with(|| left.as_bytes().cmp(right.as_bytes()))
}

impl Expr {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Both operands are arithmetic or both are character values; the result
    /// is always binary.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    ///
    /// # Example
    /// ```
    /// use caexpr::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let result = Expr::eval_comparison(BinaryOperator::Less, &Value::Integer(3), &Value::Integer(5));
    /// assert_eq!(result.unwrap(), Value::Boolean(true));
    ///
    /// let result = Expr::eval_comparison(BinaryOperator::Greater, &Value::from("B"), &Value::from("AA"));
    /// assert_eq!(result.unwrap(), Value::Boolean(false));
    /// ```
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        let ordering = match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => compare_text(a, b),
            _ => return Err(mismatch(left, right)),
        };

        let result = match op {
            BinaryOperator::Equal => ordering.is_eq(),
            BinaryOperator::NotEqual => ordering.is_ne(),
            BinaryOperator::Less => ordering.is_lt(),
            BinaryOperator::LessEqual => ordering.is_le(),
            BinaryOperator::Greater => ordering.is_gt(),
            BinaryOperator::GreaterEqual => ordering.is_ge(),
            _ => return Err(DiagnosticKind::InvalidOperator),
        };

        Ok(Value::Boolean(result))
    }
}
