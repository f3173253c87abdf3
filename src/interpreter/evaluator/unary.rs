use crate::{
    ast::{Expr, UnaryOperator},
    error::DiagnosticKind,
    interpreter::{evaluator::core::EvalResult, value::core::{Domain, Value}},
};

impl Expr {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Plus`, `Minus`: sign of an arithmetic value; negating `i32::MIN`
    ///   overflows.
    /// - `Not`: bitwise complement of an arithmetic value, negation of a
    ///   binary value.
    /// - `Upper`, `Lower`: ASCII case mapping.
    /// - `Double`: doubles every quote and ampersand.
    /// - `Signed`: decimal rendering with a leading `-` for negative values.
    /// - `Byte`: the single character with the given code.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    ///
    /// # Returns
    /// The computed `Value`, or the kind of diagnostic to report.
    ///
    /// # Example
    /// ```
    /// use caexpr::{
    ///     ast::{Expr, UnaryOperator},
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let v = Expr::eval_unary(UnaryOperator::Minus, &Value::Integer(5)).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Expr::eval_unary(UnaryOperator::Not, &Value::Boolean(false)).unwrap();
    /// assert_eq!(v, Value::Boolean(true));
    ///
    /// let v = Expr::eval_unary(UnaryOperator::Double, &Value::from("A'&")).unwrap();
    /// assert_eq!(v, Value::from("A''&&"));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Plus, Value::Integer(n)) => Ok(Value::Integer(*n)),
            (UnaryOperator::Minus, Value::Integer(n)) => {
                n.checked_neg()
                 .map(Value::Integer)
                 .ok_or(DiagnosticKind::ArithmeticOverflow)
            },
            (UnaryOperator::Not, Value::Integer(n)) => Ok(Value::Integer(!n)),
            (UnaryOperator::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (UnaryOperator::Upper, Value::Text(s)) => Ok(Value::Text(s.to_ascii_uppercase())),
            (UnaryOperator::Lower, Value::Text(s)) => Ok(Value::Text(s.to_ascii_lowercase())),
            (UnaryOperator::Double, Value::Text(s)) => Ok(Value::Text(double_specials(s))),
            (UnaryOperator::Signed, Value::Integer(n)) => Ok(Value::Text(n.to_string())),
            (UnaryOperator::Byte, Value::Integer(n)) => {
                let byte = u8::try_from(*n).map_err(|_| DiagnosticKind::InvalidByteValue { value: *n })?;
                Ok(Value::Text(char::from(byte).to_string()))
            },
            (op, value) => {
                let expected = match op {
                    UnaryOperator::Upper | UnaryOperator::Lower | UnaryOperator::Double => {
                        Domain::Character
                    },
                    _ => Domain::Integer,
                };
                Err(DiagnosticKind::TypeMismatch { expected,
                                                   found: value.domain() })
            },
        }
    }
}

/// Doubles every `'` and `&`, the form in which they can appear inside a
/// quoted string.
fn double_specials(text: &str) -> String {
    let mut doubled = String::with_capacity(text.len());
    for c in text.chars() {
        doubled.push(c);
        if matches!(c, '\'' | '&') {
            doubled.push(c);
        }
    }
    doubled
}
