use crate::{
    ast::{Attribute, AttributeSubject, Expr, Identifier, VariableSymbol},
    error::DiagnosticKind,
    interpreter::{
        evaluator::core::{EvalResult, EvaluationContext},
        value::core::Value,
    },
    util::num::usize_to_i32_saturating,
};

impl Expr {
    /// Evaluates an attribute reference.
    ///
    /// For an ordinary symbol the attribute comes from the context, or is
    /// the attribute's value for unknown symbols (`U` for `T'` and `O'`, `1`
    /// for `L'`, `0` otherwise). `K'` and `N'` only apply to variable
    /// symbols.
    ///
    /// For a variable symbol `K'` counts the characters of its value and
    /// `N'` gives its number of elements. `T'` is `O` for an empty value and
    /// `N` for a value made of digits. Otherwise the value is taken as the
    /// name of an ordinary symbol whose attribute is returned.
    ///
    /// # Errors
    /// - `AttributeNotAllowed` for `K'`/`N'` of an ordinary symbol.
    /// - `UndefinedVariable` when the variable has no value.
    pub(crate) fn eval_attribute(subject: &AttributeSubject,
                                 attribute: Attribute,
                                 ctx: &mut dyn EvaluationContext)
                                 -> EvalResult<Value> {
        match subject {
            AttributeSubject::Symbol(name) => {
                if !attribute.ordinary_allowed() {
                    return Err(DiagnosticKind::AttributeNotAllowed { attribute: attribute.letter(),
                                                                     name:      name.clone(), });
                }
                Ok(symbol_attribute(name, attribute, ctx))
            },
            AttributeSubject::Variable(symbol) => variable_attribute(symbol, attribute, ctx),
        }
    }
}

fn symbol_attribute(name: &Identifier, attribute: Attribute, ctx: &dyn EvaluationContext) -> Value {
    ctx.symbol_attribute(name, attribute)
       .unwrap_or_else(|| attribute.undefined_value())
}

fn variable_attribute(symbol: &VariableSymbol,
                      attribute: Attribute,
                      ctx: &mut dyn EvaluationContext)
                      -> EvalResult<Value> {
    if attribute == Attribute::Number {
        let name = symbol.evaluate_name(ctx);
        return Ok(Value::Integer(ctx.variable_count(&name).unwrap_or(0)));
    }

    let text = symbol.value(ctx)?.into_substituted_text();
    match attribute {
        Attribute::Count => Ok(Value::Integer(usize_to_i32_saturating(text.chars().count()))),
        Attribute::Type if text.is_empty() => Ok(Value::from("O")),
        Attribute::Type if text.bytes().all(|b| b.is_ascii_digit()) => Ok(Value::from("N")),
        _ => {
            let name = Identifier::new(text.to_ascii_uppercase());
            Ok(symbol_attribute(&name, attribute, ctx))
        },
    }
}
