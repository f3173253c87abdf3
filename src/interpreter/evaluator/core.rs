use std::collections::{BTreeMap, HashMap};

use crate::{
    ast::{Attribute, Expr, Identifier, ListState, Range},
    error::{Diagnostic, DiagnosticKind, DiagnosticSink},
    interpreter::value::core::{Domain, Value},
};

/// Result type used by the evaluator.
///
/// Evaluation functions return either a value of type `T` or the kind of
/// the diagnostic to report; the caller attaches the source range and
/// substitutes the default value of the expected domain.
pub type EvalResult<T> = Result<T, DiagnosticKind>;

/// Maximum number of characters of a character value.
pub const MAX_STRING_LENGTH: usize = 4064;

/// Read access to the symbol tables an expression is evaluated against,
/// plus a place to put diagnostics.
pub trait EvaluationContext: DiagnosticSink {
    /// Current value of a variable symbol.
    ///
    /// `subscript` is empty for a scalar reference. Returns `None` when the
    /// variable, or the addressed element, has no value.
    fn variable_value(&self, name: &Identifier, subscript: &[i32]) -> Option<Value>;

    /// Number of elements of a variable symbol (`N'`), `None` when the
    /// variable is not defined.
    fn variable_count(&self, name: &Identifier) -> Option<i32>;

    /// Absolute value of an ordinary symbol, `None` when it is not defined.
    fn symbol_value(&self, name: &Identifier) -> Option<i32>;

    /// Attribute of an ordinary symbol, `None` when it is not known.
    fn symbol_attribute(&self, name: &Identifier, attribute: Attribute) -> Option<Value>;
}

/// The part of the external dependency solver consulted when collecting
/// undefined attributed symbols.
pub trait DependencySolver {
    /// Returns `true` if `attribute` of the ordinary symbol `name` can be
    /// answered in the current pass.
    fn is_attribute_resolvable(&self, name: &Identifier, attribute: Attribute) -> bool;
}

/// Value stored for a variable symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableValue {
    /// An undimensioned variable.
    Scalar(Value),
    /// A dimensioned variable; keys are the one-based subscripts that were
    /// assigned.
    Array(BTreeMap<i32, Value>),
}

/// An ordinary symbol with its value and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinarySymbol {
    /// Absolute value.
    pub value:   i32,
    /// Type attribute letter.
    pub kind:    char,
    /// Length attribute.
    pub length:  i32,
    /// Scale attribute.
    pub scale:   i32,
    /// Integer attribute.
    pub integer: i32,
}

impl OrdinarySymbol {
    /// Creates an absolute symbol of type `U` and length 1.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self { value,
               kind: 'U',
               length: 1,
               scale: 0,
               integer: 0 }
    }

    #[must_use]
    pub const fn with_type(mut self, kind: char) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn with_length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub const fn with_scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub const fn with_integer(mut self, integer: i32) -> Self {
        self.integer = integer;
        self
    }
}

/// Stores an in-memory evaluation context.
///
/// This struct holds variable symbols, ordinary symbols and every diagnostic
/// reported while resolving and evaluating against it. It implements all
/// three collaborator traits, so a single value can be handed to `resolve`,
/// `evaluate` and `undefined_attributed_symbols`.
///
/// ## Usage
///
/// ```
/// use caexpr::{
///     ast::{Expr, Range, VariableSymbol},
///     interpreter::{evaluator::core::Context, value::core::{Domain, Value}},
/// };
///
/// let mut context = Context::new();
/// context.set_variable("A", 6);
///
/// let mut expr = Expr::variable(VariableSymbol::basic("A", Range::columns(0, 2)));
/// expr.resolve(Domain::Integer, &mut context);
///
/// assert_eq!(expr.evaluate(&mut context), Value::Integer(6));
/// assert!(context.diagnostics.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Variable symbols by name.
    pub variables:   HashMap<Identifier, VariableValue>,
    /// Ordinary symbols by name.
    pub symbols:     HashMap<Identifier, OrdinarySymbol>,
    /// Diagnostics in the order they were reported.
    pub diagnostics: Vec<Diagnostic>,
}

impl Context {
    /// Creates a context with no symbols.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns an undimensioned variable.
    pub fn set_variable(&mut self, name: impl Into<Identifier>, value: impl Into<Value>) {
        self.variables
            .insert(name.into(), VariableValue::Scalar(value.into()));
    }

    /// Assigns one element of a dimensioned variable, turning a scalar of the
    /// same name into an array.
    pub fn set_element(&mut self, name: impl Into<Identifier>, index: i32, value: impl Into<Value>) {
        let entry = self.variables
                        .entry(name.into())
                        .or_insert_with(|| VariableValue::Array(BTreeMap::new()));
        if let VariableValue::Array(elements) = entry {
            elements.insert(index, value.into());
        } else {
            *entry = VariableValue::Array(BTreeMap::from([(index, value.into())]));
        }
    }

    /// Defines an ordinary symbol.
    pub fn define_symbol(&mut self, name: impl Into<Identifier>, symbol: OrdinarySymbol) {
        self.symbols.insert(name.into(), symbol);
    }

    /// Removes and returns the collected diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticSink for Context {
    fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl EvaluationContext for Context {
    fn variable_value(&self, name: &Identifier, subscript: &[i32]) -> Option<Value> {
        match (self.variables.get(name)?, subscript) {
            (VariableValue::Scalar(value), []) => Some(value.clone()),
            (VariableValue::Array(elements), [index]) => elements.get(index).cloned(),
            _ => None,
        }
    }

    fn variable_count(&self, name: &Identifier) -> Option<i32> {
        match self.variables.get(name)? {
            VariableValue::Scalar(_) => Some(0),
            VariableValue::Array(elements) => Some(elements.keys().max().copied().unwrap_or(0)),
        }
    }

    fn symbol_value(&self, name: &Identifier) -> Option<i32> {
        self.symbols.get(name).map(|symbol| symbol.value)
    }

    fn symbol_attribute(&self, name: &Identifier, attribute: Attribute) -> Option<Value> {
        let symbol = self.symbols.get(name)?;
        match attribute {
            Attribute::Type => Some(Value::Text(symbol.kind.to_string())),
            Attribute::Length => Some(Value::Integer(symbol.length)),
            Attribute::Scale => Some(Value::Integer(symbol.scale)),
            Attribute::Integer => Some(Value::Integer(symbol.integer)),
            Attribute::Defined => Some(Value::Integer(1)),
            Attribute::Count | Attribute::Number | Attribute::Opcode => None,
        }
    }
}

impl DependencySolver for Context {
    fn is_attribute_resolvable(&self, name: &Identifier, _attribute: Attribute) -> bool {
        self.symbols.contains_key(name)
    }
}

/// Records a diagnostic raised while evaluating the node at `range`.
pub(crate) fn report(ctx: &mut dyn EvaluationContext, kind: DiagnosticKind, range: Range) {
    tracing::debug!(code = kind.code(), %range, %kind, "evaluation diagnostic");
    ctx.add_diagnostic(Diagnostic::new(kind, range));
}

/// Checks `value` against the `expected` domain.
///
/// An arithmetic `0` or `1` is accepted where a binary value is expected.
/// Any other mismatch is reported and replaced by the domain's default.
fn conform(value: Value, expected: Domain, range: Range, ctx: &mut dyn EvaluationContext) -> Value {
    match (value, expected) {
        (value, expected) if value.domain() == expected => value,
        (Value::Integer(n @ (0 | 1)), Domain::Boolean) => Value::Boolean(n == 1),
        (value, expected) => {
            report(ctx,
                   DiagnosticKind::TypeMismatch { expected,
                                                  found: value.domain() },
                   range);
            expected.default_value()
        },
    }
}

/// Truncates character values to [`MAX_STRING_LENGTH`], reporting the
/// overflow.
pub(crate) fn limit_length(text: String, range: Range, ctx: &mut dyn EvaluationContext) -> String {
    let length = text.chars().count();
    if length <= MAX_STRING_LENGTH {
        return text;
    }
    report(ctx,
           DiagnosticKind::StringTooLong { length,
                                           limit: MAX_STRING_LENGTH },
           range);
    text.chars().take(MAX_STRING_LENGTH).collect()
}

impl Expr {
    /// Evaluates a resolved expression and returns its value.
    ///
    /// Never fails: every problem is reported to `ctx` and replaced by the
    /// default value of the node's domain, so the result always belongs to
    /// the domain the node was resolved to. Evaluating an unresolved list
    /// reports `UnresolvedExpression` and yields `0`.
    ///
    /// # Example
    /// ```
    /// use caexpr::{
    ///     ast::{Expr, Range},
    ///     interpreter::{evaluator::core::Context, value::core::{Domain, Value}},
    /// };
    ///
    /// let mut context = Context::new();
    /// let fragments = vec![Expr::constant(3, Range::columns(0, 1)),
    ///                      Expr::symbol("+", Range::columns(1, 2)),
    ///                      Expr::symbol("-", Range::columns(2, 3)),
    ///                      Expr::constant(4, Range::columns(3, 4))];
    /// let mut expr = Expr::list(fragments, Range::columns(0, 4));
    /// expr.resolve(Domain::Integer, &mut context);
    ///
    /// assert_eq!(expr.evaluate(&mut context), Value::Integer(-1));
    /// ```
    pub fn evaluate(&self, ctx: &mut dyn EvaluationContext) -> Value {
        let range = self.range();
        let Some(domain) = self.domain() else {
            tracing::warn!(%range, "evaluating an unresolved expression");
            report(ctx, DiagnosticKind::UnresolvedExpression, range);
            return Value::Integer(0);
        };

        match self.evaluate_node(domain, ctx) {
            Ok(Value::Text(text)) => {
                let text = limit_length(text, range, ctx);
                conform(Value::Text(text), domain, range, ctx)
            },
            Ok(value) => conform(value, domain, range, ctx),
            Err(kind) => {
                report(ctx, kind, range);
                domain.default_value()
            },
        }
    }

    /// Evaluates the expression where a value of `expected` is required,
    /// checking the result against that domain as well.
    pub fn evaluate_as(&self, expected: Domain, ctx: &mut dyn EvaluationContext) -> Value {
        let value = self.evaluate(ctx);
        conform(value, expected, self.range(), ctx)
    }

    /// Evaluates an arithmetic subexpression to its integer payload.
    pub(crate) fn evaluate_integer(&self, ctx: &mut dyn EvaluationContext) -> i32 {
        self.evaluate_as(Domain::Integer, ctx)
            .as_integer()
            .unwrap_or_default()
    }

    fn evaluate_node(&self, domain: Domain, ctx: &mut dyn EvaluationContext) -> EvalResult<Value> {
        match self {
            Self::Constant { value, .. } => Ok(Value::Integer(*value)),
            Self::Symbol { name, .. } => {
                ctx.symbol_value(name)
                   .map(Value::Integer)
                   .ok_or_else(|| DiagnosticKind::UndefinedSymbol { name: name.clone() })
            },
            Self::Variable { symbol, .. } => symbol.value(ctx),
            Self::Attribute { subject,
                              attribute,
                              .. } => Self::eval_attribute(subject, *attribute, ctx),
            Self::String { term, range, .. } => term.evaluate(*range, ctx).map(Value::Text),
            Self::List { state: ListState::Resolved { recovered: true, .. },
                         .. } => Ok(domain.default_value()),
            Self::List { state: ListState::Resolved { root, .. },
                         .. } => Ok(root.evaluate(ctx)),
            Self::List { state: ListState::Unresolved(_),
                         .. } => Err(DiagnosticKind::UnresolvedExpression),
            Self::Unary { op,
                          operand,
                          operand_domain,
                          .. } => {
                let value = operand.evaluate_as(*operand_domain, ctx);
                Self::eval_unary(*op, &value)
            },
            Self::Binary { op,
                           left,
                           right,
                           operand_domain,
                           .. } => {
                let left = left.evaluate_as(*operand_domain, ctx);
                let right = right.evaluate_as(*operand_domain, ctx);
                Self::eval_binary(*op, &left, &right)
            },
        }
    }
}
