use crate::{
    ast::{Expr, ListState, Range},
    error::{Diagnostic, DiagnosticKind},
    interpreter::{
        parser::{
            core::{ParseResult, Resolver},
            policy::{ARITHMETIC_POLICY, CHARACTER_POLICY, OperatorEntry, OperatorKind, Operands},
        },
        value::core::Domain,
    },
};

/// Keyword that combines with a preceding two-token operator.
const NOT_KEYWORD: &str = "NOT";

/// A binary operator found in operator position.
#[derive(Debug, Clone, Copy)]
pub(in crate::interpreter::parser) struct OperatorMatch {
    /// The table entry; for a combined operator the entry of the combined
    /// form.
    pub entry: OperatorEntry,
    /// Range of the operator fragment(s).
    pub range: Range,
    /// Index of the fragment after the operator.
    pub next:  usize,
}

impl Resolver<'_, '_> {
    /// Looks up the binary operator at `index`.
    ///
    /// When the entry allows a two-token form and the next fragment is
    /// `NOT`, both fragments are consumed and the combined entry is used,
    /// priority included.
    ///
    /// # Errors
    /// `InvalidOperator` when the fragment is not a binary operator of the
    /// policy.
    pub(in crate::interpreter::parser) fn retrieve_binary_operator(&self,
                                                                   index: usize)
                                                                   -> ParseResult<OperatorMatch> {
        let invalid = || Diagnostic::new(DiagnosticKind::InvalidOperator, self.range);

        let name = self.fragments[index].as_ref()
                                        .and_then(Expr::symbol_name)
                                        .ok_or_else(invalid)?;
        let entry = self.policy.binary(name).ok_or_else(invalid)?;

        if entry.two_token
           && let Some(following) = self.fragments.get(index + 1)
           && following.as_ref().and_then(Expr::symbol_name) == Some(NOT_KEYWORD)
           && let Some(combined) = self.policy.binary(&format!("{name} {NOT_KEYWORD}"))
        {
            return Ok(OperatorMatch { entry: *combined,
                                      range: self.ranges[index].union(self.ranges[index + 1]),
                                      next:  index + 2, });
        }

        Ok(OperatorMatch { entry: *entry,
                           range: self.ranges[index],
                           next:  index + 1, })
    }

    /// Builds the binary node for `operator`, resolving both operands to
    /// the operator's operand domain.
    pub(in crate::interpreter::parser) fn build_binary(&mut self,
                                                       operator: &OperatorMatch,
                                                       mut left: Expr,
                                                       mut right: Expr)
                                                       -> ParseResult<Expr> {
        let OperatorKind::Binary(op) = operator.entry.kind else {
            return Err(Diagnostic::new(DiagnosticKind::InvalidOperator, self.range));
        };
        let operand_domain = match operator.entry.operands {
            Operands::Fixed(domain) => domain,
            Operands::Comparable if is_character_operand(&left) || is_character_operand(&right) => {
                Domain::Character
            },
            Operands::Comparable => Domain::Integer,
        };

        tracing::trace!(operator = operator.entry.name,
                        operands = %operand_domain,
                        "building binary node");

        left.resolve(operand_domain, self.sink);
        right.resolve(operand_domain, self.sink);
        let range = left.range().union(right.range());

        Ok(Expr::Binary { op,
                          left: Box::new(left),
                          right: Box::new(right),
                          range,
                          domain: operator.entry.result,
                          operand_domain })
    }
}

/// Decides whether an operand of a comparison is a character expression.
///
/// Strings, type and opcode attributes, and character-valued operator nodes
/// are. An unresolved list is when it starts with one of those, or with a
/// character-producing unary keyword, unless it also contains an operator
/// that turns character operands into a number (`INDEX`, `FIND`).
///
/// ## Example
/// ```
/// use caexpr::{
///     ast::{Expr, Range, StringTerm},
///     interpreter::parser::binary::is_character_operand,
/// };
///
/// let text = Expr::string(StringTerm::literal("AB"), Range::columns(0, 4));
/// assert!(is_character_operand(&text));
/// assert!(!is_character_operand(&Expr::constant(1, Range::columns(0, 1))));
/// ```
#[must_use]
pub fn is_character_operand(expr: &Expr) -> bool {
    match expr {
        Expr::String { .. } => true,
        Expr::Attribute { attribute, .. } => attribute.domain() == Domain::Character,
        Expr::Unary { domain, .. } | Expr::Binary { domain, .. } => *domain == Domain::Character,
        Expr::List { state: ListState::Resolved { root, .. },
                     .. } => is_character_operand(root),
        Expr::List { state: ListState::Unresolved(fragments),
                     .. } => {
            let yields_number = fragments.iter().filter_map(Expr::symbol_name).any(|name| {
                                    ARITHMETIC_POLICY.binary(name).is_some_and(|entry| {
                                        entry.operands == Operands::Fixed(Domain::Character)
                                        && entry.result == Domain::Integer
                                    })
                                });

            !yields_number
            && fragments.first().is_some_and(|first| {
                                    is_character_operand(first)
                                    || first.symbol_name()
                                            .and_then(|name| CHARACTER_POLICY.unary(name))
                                            .is_some_and(|entry| entry.result == Domain::Character)
                                })
        },
        Expr::Constant { .. } | Expr::Symbol { .. } | Expr::Variable { .. } => false,
    }
}
