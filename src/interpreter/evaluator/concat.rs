use crate::{
    ast::{ConcatFragment, Identifier, VariableName, VariableSymbol},
    error::DiagnosticKind,
    interpreter::{
        evaluator::core::{EvalResult, EvaluationContext, report},
        value::core::Value,
    },
};

/// Evaluates a concatenation chain into a single string.
///
/// Literal text is copied, `.` and `=` fragments contribute their
/// character, sublists contribute their chains back to back, and variable
/// symbols contribute the substituted text of their value: integers without
/// sign, binary values as `1`/`0`, character values verbatim. An undefined
/// variable is reported and contributes nothing.
///
/// # Parameters
/// - `chain`: The fragments to evaluate.
/// - `ctx`: Supplies variable values and receives diagnostics.
///
/// # Example
/// ```
/// use caexpr::{
///     ast::{ConcatFragment, Range, VariableSymbol},
///     interpreter::evaluator::{concat::evaluate_chain, core::Context},
/// };
///
/// let mut context = Context::new();
/// context.set_variable("A2", -10);
///
/// let chain = vec![ConcatFragment::Text("5-10*".to_string()),
///                  ConcatFragment::Variable(VariableSymbol::basic("A2", Range::columns(6, 9)))];
///
/// assert_eq!(evaluate_chain(&chain, &mut context), "5-10*10");
/// ```
pub fn evaluate_chain(chain: &[ConcatFragment], ctx: &mut dyn EvaluationContext) -> String {
    let mut result = String::new();

    for fragment in chain {
        match fragment {
            ConcatFragment::Text(text) => result.push_str(text),
            ConcatFragment::Dot => result.push('.'),
            ConcatFragment::Equals => result.push('='),
            ConcatFragment::Variable(symbol) => match symbol.value(ctx) {
                Ok(value) => result.push_str(&value.into_substituted_text()),
                Err(kind) => report(ctx, kind, symbol.range),
            },
            ConcatFragment::Sublist(chains) => {
                for chain in chains {
                    result.push_str(&evaluate_chain(chain, ctx));
                }
            },
        }
    }

    result
}

impl VariableSymbol {
    /// Returns the name the reference denotes under the current context.
    ///
    /// A created name is the upper-cased result of its chain.
    pub fn evaluate_name(&self, ctx: &mut dyn EvaluationContext) -> Identifier {
        match &self.name {
            VariableName::Basic(name) => name.clone(),
            VariableName::Created(chain) => {
                Identifier::new(evaluate_chain(chain, ctx).to_ascii_uppercase())
            },
        }
    }

    /// Evaluates the subscript expressions.
    pub fn evaluate_subscript(&self, ctx: &mut dyn EvaluationContext) -> Vec<i32> {
        self.subscript
            .iter()
            .map(|expr| expr.evaluate_integer(ctx))
            .collect()
    }

    /// Looks up the current value of the referenced variable.
    ///
    /// # Errors
    /// `UndefinedVariable` when the context has no value for the name and
    /// subscript.
    pub fn value(&self, ctx: &mut dyn EvaluationContext) -> EvalResult<Value> {
        let name = self.evaluate_name(ctx);
        let subscript = self.evaluate_subscript(ctx);

        ctx.variable_value(&name, &subscript)
           .ok_or(DiagnosticKind::UndefinedVariable { name })
    }
}
