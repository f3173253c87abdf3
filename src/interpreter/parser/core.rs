use crate::{
    ast::{ConcatChain, ConcatFragment, Expr, ListState, Range, VariableName, VariableSymbol},
    error::{Diagnostic, DiagnosticKind, DiagnosticSink},
    interpreter::{parser::policy::Policy, value::core::Domain},
};

/// Result of one resolution step; the error is the diagnostic that aborts
/// resolution of the current list.
pub type ParseResult<T> = Result<T, Diagnostic>;

/// Calling priority of the outermost term: every operator binds below it.
pub const TOP_LEVEL_PRIORITY: i32 = i32::MAX;

/// State of one precedence-climbing pass over a fragment list.
///
/// Fragments are moved out of `fragments` as they are consumed; `ranges`
/// keeps their source ranges so errors can still be anchored afterwards.
pub(in crate::interpreter::parser) struct Resolver<'p, 's> {
    pub(in crate::interpreter::parser) fragments: Vec<Option<Expr>>,
    pub(in crate::interpreter::parser) ranges:    Vec<Range>,
    /// Range of the whole list; `InvalidOperator` is reported against it.
    pub(in crate::interpreter::parser) range:     Range,
    pub(in crate::interpreter::parser) policy:    &'p Policy<'p>,
    pub(in crate::interpreter::parser) sink:      &'s mut dyn DiagnosticSink,
}

impl<'p, 's> Resolver<'p, 's> {
    fn new(fragments: Vec<Expr>,
           range: Range,
           policy: &'p Policy<'p>,
           sink: &'s mut dyn DiagnosticSink)
           -> Self {
        let ranges = fragments.iter().map(Expr::range).collect();
        Self { fragments: fragments.into_iter().map(Some).collect(),
               ranges,
               range,
               policy,
               sink }
    }

    pub(in crate::interpreter::parser) fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Resolves the term starting at `index` whose operators bind tighter
    /// than `priority`.
    ///
    /// Returns the term and the index of the first fragment it did not
    /// consume. An operator whose priority is not below `priority` ends the
    /// term, leaving it for the enclosing call; operators of equal priority
    /// therefore associate to the left.
    pub(in crate::interpreter::parser) fn retrieve_term(&mut self,
                                                        index: usize,
                                                        priority: i32)
                                                        -> ParseResult<(Expr, usize)> {
        let (mut term, mut next) = self.retrieve_operand(index)?;

        while next < self.len() {
            let operator = self.retrieve_binary_operator(next)?;
            if operator.entry.priority >= priority {
                tracing::trace!(operator = operator.entry.name,
                                priority = operator.entry.priority,
                                calling = priority,
                                "operator left to enclosing term");
                break;
            }

            let (right, after) = self.retrieve_term(operator.next, operator.entry.priority)?;
            term = self.build_binary(&operator, term, right)?;
            next = after;
        }

        Ok((term, next))
    }

    /// Moves the fragment at `index` out of the list.
    pub(in crate::interpreter::parser) fn take(&mut self, index: usize) -> ParseResult<Expr> {
        self.fragments[index].take()
                             .ok_or_else(|| {
                                 Diagnostic::new(DiagnosticKind::MissingOperand, self.ranges[index])
                             })
    }

    /// Builds the "missing operand" diagnostic for a term expected at
    /// `index`, which lies past the end of the list.
    pub(in crate::interpreter::parser) fn missing_operand(&self, index: usize) -> Diagnostic {
        let anchor = index.checked_sub(1)
                          .and_then(|prior| self.ranges.get(prior))
                          .map_or_else(Range::default, |range| range.past_end());
        Diagnostic::new(DiagnosticKind::MissingOperand, anchor)
    }
}

/// Resolves a flat fragment list into a single tree.
///
/// On success the returned state holds the root, already resolved to the
/// policy's domain. On failure exactly one diagnostic describing the first
/// structural error is added to `sink` and the state holds a `0` constant
/// instead, so evaluation can still proceed.
///
/// # Parameters
/// - `fragments`: Operand nodes interleaved with operator-name symbols.
/// - `range`: Source range of the whole list, used for empty lists.
/// - `policy`: Operator table of the target domain.
/// - `sink`: Receiver of diagnostics, including those of nested lists.
///
/// # Example
/// ```
/// use caexpr::{
///     ast::{Expr, ListState, Range},
///     error::Diagnostic,
///     interpreter::{parser::{core::resolve_fragments, policy::Policy}, value::core::Domain},
/// };
///
/// let fragments = vec![Expr::constant(3, Range::columns(0, 1)),
///                      Expr::symbol("+", Range::columns(1, 2)),
///                      Expr::constant(4, Range::columns(2, 3)),
///                      Expr::symbol("*", Range::columns(3, 4)),
///                      Expr::constant(2, Range::columns(4, 5))];
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
///
/// let state = resolve_fragments(fragments,
///                               Range::columns(0, 5),
///                               Policy::for_domain(Domain::Integer),
///                               &mut diagnostics);
///
/// let ListState::Resolved { root, recovered, .. } = state else { panic!("not resolved") };
/// assert!(!recovered);
/// assert_eq!(root.to_string(), "(3 + (4 * 2))");
/// assert!(diagnostics.is_empty());
/// ```
pub fn resolve_fragments(fragments: Vec<Expr>,
                         range: Range,
                         policy: &Policy<'_>,
                         sink: &mut dyn DiagnosticSink)
                         -> ListState {
    tracing::debug!(domain = %policy.domain,
                    fragments = fragments.len(),
                    "resolving expression list");

    if fragments.is_empty() {
        sink.add_diagnostic(Diagnostic::new(DiagnosticKind::MissingOperand, range));
        return fallback(policy.domain, range, sink);
    }

    let mut resolver = Resolver::new(fragments, range, policy, sink);
    let result = resolver.retrieve_term(0, TOP_LEVEL_PRIORITY)
                         .and_then(|(root, next)| {
                             if next < resolver.len() {
                                 Err(Diagnostic::new(DiagnosticKind::InvalidOperator, range))
                             } else {
                                 Ok(root)
                             }
                         });
    let sink = resolver.sink;

    match result {
        Ok(mut root) => {
            root.resolve(policy.domain, sink);
            ListState::Resolved { root:      Box::new(root),
                                  recovered: false,
                                  domain:    policy.domain, }
        },
        Err(diagnostic) => {
            tracing::warn!(%diagnostic, "expression replaced by zero");
            sink.add_diagnostic(diagnostic);
            fallback(policy.domain, range, sink)
        },
    }
}

fn fallback(domain: Domain, range: Range, sink: &mut dyn DiagnosticSink) -> ListState {
    let mut root = Expr::constant(0, range);
    root.resolve(domain, sink);
    ListState::Resolved { root: Box::new(root),
                          recovered: true,
                          domain }
}

impl Expr {
    /// Resolves the node to `domain` using the built-in operator tables.
    ///
    /// Lists are turned into trees in place; terminals are only tagged with
    /// the domain, their nested arithmetic pieces (subscripts, duplication
    /// factors, substring bounds) are resolved as arithmetic expressions.
    /// Operator nodes already resolved their operands when they were built.
    /// Resolving a node a second time does nothing.
    pub fn resolve(&mut self, domain: Domain, sink: &mut dyn DiagnosticSink) {
        self.resolve_with(Policy::for_domain(domain), sink);
    }

    /// Resolves the node using an explicit operator table.
    ///
    /// Only the outermost list uses `policy`; nested lists are resolved with
    /// the built-in table of the domain their operator expects.
    pub fn resolve_with(&mut self, policy: &Policy<'_>, sink: &mut dyn DiagnosticSink) {
        let target = policy.domain;
        match self {
            Self::Constant { domain, .. }
            | Self::Symbol { domain, .. }
            | Self::Attribute { domain, .. } => {
                domain.get_or_insert(target);
            },
            Self::Variable { symbol, domain } => {
                if domain.is_none() {
                    *domain = Some(target);
                    symbol.resolve_parts(sink);
                }
            },
            Self::String { term, domain, .. } => {
                if domain.is_none() {
                    *domain = Some(target);
                    resolve_chain(&mut term.value, sink);
                    let substring = &mut term.substring;
                    for expr in [&mut term.duplication_factor, &mut substring.start, &mut substring.count]
                    {
                        if let Some(expr) = expr {
                            expr.resolve(Domain::Integer, sink);
                        }
                    }
                }
            },
            Self::List { state, range } => {
                if let ListState::Unresolved(fragments) = state {
                    let fragments = std::mem::take(fragments);
                    *state = resolve_fragments(fragments, *range, policy, sink);
                }
            },
            Self::Unary { .. } | Self::Binary { .. } => {},
        }
    }
}

impl VariableSymbol {
    /// Resolves the subscripts and the pieces of a created name.
    pub(crate) fn resolve_parts(&mut self, sink: &mut dyn DiagnosticSink) {
        if let VariableName::Created(chain) = &mut self.name {
            resolve_chain(chain, sink);
        }
        for expr in &mut self.subscript {
            expr.resolve(Domain::Integer, sink);
        }
    }
}

fn resolve_chain(chain: &mut ConcatChain, sink: &mut dyn DiagnosticSink) {
    for fragment in chain {
        match fragment {
            ConcatFragment::Variable(symbol) => symbol.resolve_parts(sink),
            ConcatFragment::Sublist(chains) => {
                for chain in chains {
                    resolve_chain(chain, sink);
                }
            },
            ConcatFragment::Text(_) | ConcatFragment::Dot | ConcatFragment::Equals => {},
        }
    }
}
