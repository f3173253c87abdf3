use crate::{
    ast::{BinaryOperator, Expr},
    error::DiagnosticKind,
    interpreter::{
        evaluator::{binary::core::mismatch, core::EvalResult},
        value::core::Value,
    },
};

impl Expr {
    /// Evaluates `AND`, `OR`, `XOR` and their `NOT` forms.
    ///
    /// On arithmetic values the operators are bitwise, on binary values they
    /// are logical. The `NOT` forms complement the right operand first.
    ///
    /// # Parameters
    /// - `op`: The logical operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// A value of the operands' domain.
    ///
    /// # Example
    /// ```
    /// use caexpr::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let result = Expr::eval_logic(BinaryOperator::AndNot, &Value::Integer(6), &Value::Integer(4));
    /// assert_eq!(result.unwrap(), Value::Integer(2));
    ///
    /// let result = Expr::eval_logic(BinaryOperator::Xor, &Value::Boolean(true), &Value::Boolean(false));
    /// assert_eq!(result.unwrap(), Value::Boolean(true));
    /// ```
    pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{And, AndNot, Or, OrNot, Xor, XorNot};

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                let (a, b) = (*a, *b);
                match op {
                    And => Ok(Value::Integer(a & b)),
                    Or => Ok(Value::Integer(a | b)),
                    Xor => Ok(Value::Integer(a ^ b)),
                    AndNot => Ok(Value::Integer(a & !b)),
                    OrNot => Ok(Value::Integer(a | !b)),
                    XorNot => Ok(Value::Integer(a ^ !b)),
                    _ => Err(DiagnosticKind::InvalidOperator),
                }
            },
            (Value::Boolean(a), Value::Boolean(b)) => {
                let (a, b) = (*a, *b);
                match op {
                    And => Ok(Value::Boolean(a && b)),
                    Or => Ok(Value::Boolean(a || b)),
                    Xor => Ok(Value::Boolean(a ^ b)),
                    AndNot => Ok(Value::Boolean(a && !b)),
                    OrNot => Ok(Value::Boolean(a || !b)),
                    XorNot => Ok(Value::Boolean(a ^ !b)),
                    _ => Err(DiagnosticKind::InvalidOperator),
                }
            },
            _ => Err(mismatch(left, right)),
        }
    }
}
