use crate::{
    ast::{Expr, Range},
    error::{Diagnostic, DiagnosticKind},
    interpreter::{
        parser::{
            core::{ParseResult, Resolver},
            policy::{OperatorEntry, OperatorKind, Operands},
        },
        value::core::Domain,
    },
};

impl Resolver<'_, '_> {
    /// Resolves the operand starting at `index`.
    ///
    /// A fragment naming a unary operator of the policy applies to the term
    /// that follows it, which is resolved with the operator's own priority;
    /// anything else is taken as a plain operand.
    pub(in crate::interpreter::parser) fn retrieve_operand(&mut self,
                                                           index: usize)
                                                           -> ParseResult<(Expr, usize)> {
        if index >= self.len() {
            return Err(self.missing_operand(index));
        }

        let unary = self.fragments[index].as_ref()
                                         .and_then(Expr::symbol_name)
                                         .and_then(|name| self.policy.unary(name))
                                         .copied();

        if let Some(entry) = unary {
            let operator_range = self.ranges[index];
            let (operand, next) = self.retrieve_term(index + 1, entry.priority)?;
            return Ok((self.build_unary(&entry, operator_range, operand)?, next));
        }

        Ok((self.take(index)?, index + 1))
    }

    fn build_unary(&mut self,
                   entry: &OperatorEntry,
                   operator_range: Range,
                   mut operand: Expr)
                   -> ParseResult<Expr> {
        let OperatorKind::Unary(op) = entry.kind else {
            return Err(Diagnostic::new(DiagnosticKind::InvalidOperator, self.range));
        };
        let operand_domain = match entry.operands {
            Operands::Fixed(domain) => domain,
            Operands::Comparable => Domain::Integer,
        };

        operand.resolve(operand_domain, self.sink);
        let range = operator_range.union(operand.range());

        Ok(Expr::Unary { op,
                         operand: Box::new(operand),
                         range,
                         domain: entry.result,
                         operand_domain })
    }
}
