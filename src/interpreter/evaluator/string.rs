use crate::{
    ast::{Range, StringTerm, Substring},
    error::DiagnosticKind,
    interpreter::evaluator::{
        concat::evaluate_chain,
        core::{EvalResult, EvaluationContext, MAX_STRING_LENGTH, report},
    },
    util::num::{i32_to_usize_checked, usize_to_i32_saturating},
};

impl StringTerm {
    /// Evaluates the string: the chain is concatenated, the substring is
    /// taken, and the result is repeated by the duplication factor.
    ///
    /// A result beyond the maximum string length is reported at `range` and
    /// truncated.
    ///
    /// # Errors
    /// - `InvalidSubstring` when the start lies outside the string or the
    ///   count is negative.
    /// - `InvalidDuplicationFactor` when the factor is negative.
    ///
    /// # Example
    /// ```
    /// use caexpr::{
    ///     ast::{Expr, Range, StringTerm},
    ///     interpreter::{evaluator::core::Context, value::core::Domain},
    /// };
    ///
    /// let mut context = Context::new();
    /// let mut factor = Expr::constant(3, Range::columns(1, 2));
    /// factor.resolve(Domain::Integer, &mut context);
    ///
    /// let term = StringTerm::literal("AB").with_duplication(factor);
    /// assert_eq!(term.evaluate(Range::columns(0, 7), &mut context), Ok("ABABAB".to_string()));
    /// ```
    pub fn evaluate(&self, range: Range, ctx: &mut dyn EvaluationContext) -> EvalResult<String> {
        let text = evaluate_chain(&self.value, ctx);
        let text = self.substring.apply(text, ctx)?;

        let Some(factor) = &self.duplication_factor else {
            return Ok(text);
        };
        let factor = factor.evaluate_integer(ctx);
        let repeat = i32_to_usize_checked(factor, DiagnosticKind::InvalidDuplicationFactor { factor })?;

        let length = text.chars().count().saturating_mul(repeat);
        if length <= MAX_STRING_LENGTH {
            return Ok(text.repeat(repeat));
        }

        report(ctx,
               DiagnosticKind::StringTooLong { length,
                                               limit: MAX_STRING_LENGTH },
               range);
        Ok(text.chars().cycle().take(MAX_STRING_LENGTH).collect())
    }
}

impl Substring {
    /// Applies the selection to `text`.
    ///
    /// Positions are one-based. A count running past the end takes what is
    /// there; `to_end` takes the rest of the string. An empty selection is
    /// always valid, wherever it starts.
    fn apply(&self, text: String, ctx: &mut dyn EvaluationContext) -> EvalResult<String> {
        let Some(start) = &self.start else {
            return Ok(text);
        };

        let start = start.evaluate_integer(ctx);
        let length = text.chars().count();
        let count = match &self.count {
            Some(count) if !self.to_end => count.evaluate_integer(ctx),
            _ => usize_to_i32_saturating(length).saturating_sub(start.saturating_sub(1)).max(0),
        };

        let invalid = DiagnosticKind::InvalidSubstring { start, count, length };
        let count = i32_to_usize_checked(count, invalid.clone())?;
        if count == 0 {
            return Ok(String::new());
        }

        let first = i32_to_usize_checked(start, invalid.clone())?;
        if first == 0 || first > length {
            return Err(invalid);
        }

        Ok(text.chars().skip(first - 1).take(count).collect())
    }
}
