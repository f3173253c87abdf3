use crate::{
    ast::{BinaryOperator, Expr},
    error::DiagnosticKind,
    interpreter::{
        evaluator::{binary::core::mismatch, core::EvalResult},
        value::core::Value,
    },
    util::num::usize_to_i32_saturating,
};

impl Expr {
    /// Evaluates the operators taking two character values.
    ///
    /// - `INDEX`: one-based position of the right string inside the left one,
    ///   `0` if it does not occur or is empty.
    /// - `FIND`: one-based position of the first character of the left string
    ///   that occurs anywhere in the right one, `0` if none does.
    /// - `.`: concatenation.
    ///
    /// # Example
    /// ```
    /// use caexpr::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let index = Expr::eval_string_op(BinaryOperator::Index, &Value::from("ABC"), &Value::from("B"));
    /// assert_eq!(index.unwrap(), Value::Integer(2));
    ///
    /// let find = Expr::eval_string_op(BinaryOperator::Find, &Value::from("XYZB"), &Value::from("AB"));
    /// assert_eq!(find.unwrap(), Value::Integer(4));
    /// ```
    pub fn eval_string_op(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        let (Value::Text(left), Value::Text(right)) = (left, right) else {
            return Err(mismatch(left, right));
        };

        match op {
            BinaryOperator::Index => Ok(Value::Integer(index_of(left, right))),
            BinaryOperator::Find => {
                let position = left.chars()
                                   .position(|c| right.contains(c))
                                   .map_or(0, |p| usize_to_i32_saturating(p + 1));
                Ok(Value::Integer(position))
            },
            BinaryOperator::Concat => Ok(Value::Text(format!("{left}{right}"))),
            _ => Err(DiagnosticKind::InvalidOperator),
        }
    }
}

fn index_of(haystack: &str, needle: &str) -> i32 {
    if needle.is_empty() {
        return 0;
    }
    haystack.find(needle)
            .map_or(0, |byte| usize_to_i32_saturating(haystack[..byte].chars().count() + 1))
}
