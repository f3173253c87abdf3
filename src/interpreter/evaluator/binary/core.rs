use crate::{
    ast::{BinaryOperator, Expr},
    error::DiagnosticKind,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Domain, Value},
    },
};

impl Expr {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator. Arithmetic and shift operators use `eval_scalar_op`,
    /// the bitwise/logical family uses `eval_logic`, relational operators use
    /// `eval_comparison` and `INDEX`, `FIND` and `.` use `eval_string_op`.
    ///
    /// Both operands have already been checked against the operator's operand
    /// domain, so a mismatch here only arises from hand-built trees.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// The computed `Value`, or the kind of diagnostic to report.
    ///
    /// # Example
    /// ```
    /// use caexpr::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let left = Value::Integer(3);
    /// let right = Value::Integer(4);
    ///
    /// let result = Expr::eval_binary(BinaryOperator::Add, &left, &right);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, AndNot, Concat, Div, Find, Index, Mul, Or, OrNot, Sla, Sll, Sra, Srl, Sub,
            Xor, XorNot,
        };

        tracing::trace!(%op, %left, %right, "evaluating binary operation");

        match op {
            Add | Sub | Mul | Div | Sla | Sll | Sra | Srl => match (left, right) {
                (Value::Integer(a), Value::Integer(b)) => {
                    Self::eval_scalar_op(op, *a, *b).map(Value::Integer)
                },
                _ => Err(mismatch(left, right)),
            },
            And | Or | Xor | AndNot | OrNot | XorNot => Self::eval_logic(op, left, right),
            Index | Find | Concat => Self::eval_string_op(op, left, right),
            _ if op.is_relational() => Self::eval_comparison(op, left, right),
            _ => Err(DiagnosticKind::InvalidOperator),
        }
    }
}

/// Builds the type-mismatch diagnostic for an operand pair the operator
/// does not accept.
pub(in crate::interpreter::evaluator) fn mismatch(left: &Value, right: &Value) -> DiagnosticKind {
    let (expected, found) = if left.domain() == right.domain() {
        (Domain::Integer, left.domain())
    } else {
        (left.domain(), right.domain())
    };
    DiagnosticKind::TypeMismatch { expected, found }
}
