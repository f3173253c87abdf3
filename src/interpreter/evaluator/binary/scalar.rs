use crate::{
    ast::{BinaryOperator, Expr},
    error::DiagnosticKind,
    interpreter::evaluator::core::EvalResult,
};

/// Only the low six bits of a shift amount are significant.
const SHIFT_MASK: i32 = 0x3F;

impl Expr {
    /// Evaluates a scalar arithmetic or shift operation.
    ///
    /// All arithmetic is checked 32-bit signed arithmetic: a result that does
    /// not fit is an overflow. Division truncates toward zero and a zero
    /// divisor yields `0` without a diagnostic.
    ///
    /// Shifts use the low six bits of the right operand:
    /// - `SLL`/`SRL` are logical; amounts of 32 or more yield `0`.
    /// - `SRA` is arithmetic and fills with the sign bit.
    /// - `SLA` is arithmetic; losing a significant bit is an overflow.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Example
    /// ```
    /// use caexpr::ast::{BinaryOperator, Expr};
    ///
    /// assert_eq!(Expr::eval_scalar_op(BinaryOperator::Div, 7, 0), Ok(0));
    /// assert_eq!(Expr::eval_scalar_op(BinaryOperator::Sll, 10, 2), Ok(40));
    /// assert_eq!(Expr::eval_scalar_op(BinaryOperator::Srl, -1, 28), Ok(15));
    /// assert_eq!(Expr::eval_scalar_op(BinaryOperator::Sra, -16, 2), Ok(-4));
    /// assert!(Expr::eval_scalar_op(BinaryOperator::Add, i32::MAX, 1).is_err());
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator, left: i32, right: i32) -> EvalResult<i32> {
        let overflow = DiagnosticKind::ArithmeticOverflow;

        match op {
            BinaryOperator::Add => left.checked_add(right).ok_or(overflow),
            BinaryOperator::Sub => left.checked_sub(right).ok_or(overflow),
            BinaryOperator::Mul => left.checked_mul(right).ok_or(overflow),
            BinaryOperator::Div if right == 0 => Ok(0),
            BinaryOperator::Div => left.checked_div(right).ok_or(overflow),
            BinaryOperator::Sla => {
                let shifted = i128::from(left) << shift_amount(right);
                i32::try_from(shifted).map_err(|_| overflow)
            },
            BinaryOperator::Sll => Ok(left.cast_unsigned()
                                          .checked_shl(shift_amount(right))
                                          .unwrap_or(0)
                                          .cast_signed()),
            BinaryOperator::Srl => Ok(left.cast_unsigned()
                                          .checked_shr(shift_amount(right))
                                          .unwrap_or(0)
                                          .cast_signed()),
            BinaryOperator::Sra => Ok(left >> shift_amount(right).min(31)),
            _ => Err(DiagnosticKind::InvalidOperator),
        }
    }
}

fn shift_amount(amount: i32) -> u32 {
    (amount & SHIFT_MASK).unsigned_abs()
}
