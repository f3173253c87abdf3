use crate::{
    ast::{AttributeSubject, ConcatFragment, Expr, ListState, StringTerm, VariableName, VariableSymbol},
    interpreter::{evaluator::core::DependencySolver, value::undefined::UndefinedSymbols},
};

impl Expr {
    /// Collects the ordinary symbols referenced through an attribute that
    /// needs a defined symbol (`T'`, `L'`, `S'`, `I'`) and that `solver`
    /// cannot resolve yet.
    ///
    /// Every other node contributes the union of its children, including the
    /// pieces of created variable names, subscripts, substring bounds and
    /// duplication factors. Works on unresolved lists as well as resolved
    /// trees.
    ///
    /// # Example
    /// ```
    /// use caexpr::{
    ///     ast::{Attribute, AttributeSubject, Expr, Identifier, Range},
    ///     interpreter::evaluator::core::{Context, OrdinarySymbol},
    /// };
    ///
    /// let expr = Expr::attribute(AttributeSubject::Symbol(Identifier::from("FIELD")),
    ///                            Attribute::Length,
    ///                            Range::columns(0, 7));
    /// let mut context = Context::new();
    ///
    /// let undefined = expr.undefined_attributed_symbols(&context);
    /// assert!(undefined.contains(&Identifier::from("FIELD")));
    ///
    /// context.define_symbol("FIELD", OrdinarySymbol::new(0).with_length(8));
    /// assert!(expr.undefined_attributed_symbols(&context).is_empty());
    /// ```
    #[must_use]
    pub fn undefined_attributed_symbols(&self, solver: &dyn DependencySolver) -> UndefinedSymbols {
        match self {
            Self::Constant { .. } | Self::Symbol { .. } => UndefinedSymbols::new(),
            Self::Variable { symbol, .. } => symbol.undefined_attributed_symbols(solver),
            Self::Attribute { subject: AttributeSubject::Symbol(name),
                              attribute,
                              .. } => {
                let mut undefined = UndefinedSymbols::new();
                if attribute.requires_defined_symbol()
                   && !solver.is_attribute_resolvable(name, *attribute)
                {
                    undefined.insert(name.clone());
                }
                undefined
            },
            Self::Attribute { subject: AttributeSubject::Variable(symbol),
                              .. } => symbol.undefined_attributed_symbols(solver),
            Self::String { term, .. } => term.undefined_attributed_symbols(solver),
            Self::List { state: ListState::Unresolved(fragments),
                         .. } => {
                fragments.iter()
                         .map(|fragment| fragment.undefined_attributed_symbols(solver))
                         .collect()
            },
            Self::List { state: ListState::Resolved { root, .. },
                         .. } => root.undefined_attributed_symbols(solver),
            Self::Unary { operand, .. } => operand.undefined_attributed_symbols(solver),
            Self::Binary { left, right, .. } => {
                let mut undefined = left.undefined_attributed_symbols(solver);
                undefined.merge(right.undefined_attributed_symbols(solver));
                undefined
            },
        }
    }
}

impl VariableSymbol {
    /// Collects undefined attributed symbols from a created name and the
    /// subscripts.
    #[must_use]
    pub fn undefined_attributed_symbols(&self, solver: &dyn DependencySolver) -> UndefinedSymbols {
        let mut undefined = match &self.name {
            VariableName::Basic(_) => UndefinedSymbols::new(),
            VariableName::Created(chain) => chain_undefined(chain, solver),
        };
        undefined.merge(self.subscript
                            .iter()
                            .map(|expr| expr.undefined_attributed_symbols(solver))
                            .collect());
        undefined
    }
}

impl StringTerm {
    #[must_use]
    pub fn undefined_attributed_symbols(&self, solver: &dyn DependencySolver) -> UndefinedSymbols {
        let mut undefined = chain_undefined(&self.value, solver);
        let parts = [&self.duplication_factor, &self.substring.start, &self.substring.count];
        for expr in parts.into_iter().flatten() {
            undefined.merge(expr.undefined_attributed_symbols(solver));
        }
        undefined
    }
}

fn chain_undefined(chain: &[ConcatFragment], solver: &dyn DependencySolver) -> UndefinedSymbols {
    chain.iter()
         .map(|fragment| match fragment {
             ConcatFragment::Variable(symbol) => symbol.undefined_attributed_symbols(solver),
             ConcatFragment::Sublist(chains) => {
                 chains.iter()
                       .map(|chain| chain_undefined(chain, solver))
                       .collect()
             },
             ConcatFragment::Text(_) | ConcatFragment::Dot | ConcatFragment::Equals => {
                 UndefinedSymbols::new()
             },
         })
         .collect()
}
