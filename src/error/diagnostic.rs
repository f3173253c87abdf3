use thiserror::Error;

use crate::{
    ast::{Identifier, Range},
    interpreter::value::core::Domain,
};

/// The kinds of problems reported while resolving or evaluating an
/// expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// A fragment in operator position is not an operator of the domain.
    #[error("operator expected or invalid operator")]
    InvalidOperator,
    /// The expression is empty or ends where an operand is required.
    #[error("operand expected")]
    MissingOperand,
    /// A value of one domain appeared where another was required.
    #[error("expected {expected} value, found {found} value")]
    TypeMismatch {
        /// Domain the node was resolved to.
        expected: Domain,
        /// Domain of the evaluated value.
        found:    Domain,
    },
    /// A 32-bit arithmetic result does not fit.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    /// A variable symbol has no value in the evaluation context.
    #[error("undefined variable symbol '&{name}'")]
    UndefinedVariable {
        /// Name of the variable.
        name: Identifier,
    },
    /// An ordinary symbol has no value in the evaluation context.
    #[error("undefined ordinary symbol '{name}'")]
    UndefinedSymbol {
        /// Name of the symbol.
        name: Identifier,
    },
    /// Substring start or length lies outside the string.
    #[error("substring ({start},{count}) is outside a string of length {length}")]
    InvalidSubstring {
        /// Requested one-based start.
        start:  i32,
        /// Requested length.
        count:  i32,
        /// Length of the string.
        length: usize,
    },
    /// The duplication factor is negative.
    #[error("invalid duplication factor {factor}")]
    InvalidDuplicationFactor {
        /// The evaluated factor.
        factor: i32,
    },
    /// A `BYTE` operand is not a single byte value.
    #[error("value {value} is outside the byte range 0..=255")]
    InvalidByteValue {
        /// The evaluated operand.
        value: i32,
    },
    /// A character result exceeds the maximum string length.
    #[error("character string of length {length} exceeds {limit} characters")]
    StringTooLong {
        /// Length before truncation.
        length: usize,
        /// The maximum allowed length.
        limit:  usize,
    },
    /// An expression list was evaluated before it was resolved.
    #[error("expression evaluated before resolution")]
    UnresolvedExpression,
    /// The attribute cannot be requested for an ordinary symbol.
    #[error("attribute {attribute}' is not allowed for ordinary symbol '{name}'")]
    AttributeNotAllowed {
        /// Attribute letter.
        attribute: char,
        /// Name of the symbol.
        name:      Identifier,
    },
}

impl DiagnosticKind {
    /// Stable code identifying the kind.
    ///
    /// ## Example
    /// ```
    /// use caexpr::error::DiagnosticKind;
    ///
    /// assert_eq!(DiagnosticKind::MissingOperand.code(), "CE003");
    /// assert_eq!(DiagnosticKind::InvalidOperator.code(), "CE001");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidOperator => "CE001",
            Self::MissingOperand => "CE003",
            Self::TypeMismatch { .. } => "CE004",
            Self::ArithmeticOverflow => "CE005",
            Self::UndefinedVariable { .. } => "CE006",
            Self::UndefinedSymbol { .. } => "CE007",
            Self::InvalidSubstring { .. } => "CE008",
            Self::InvalidDuplicationFactor { .. } => "CE009",
            Self::InvalidByteValue { .. } => "CE010",
            Self::StringTooLong { .. } => "CE011",
            Self::UnresolvedExpression => "CE012",
            Self::AttributeNotAllowed { .. } => "CE013",
        }
    }
}

/// A diagnostic anchored to a source range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} at {range}: {kind}", code = .kind.code())]
pub struct Diagnostic {
    /// What went wrong.
    pub kind:  DiagnosticKind,
    /// Where it went wrong.
    pub range: Range,
}

impl Diagnostic {
    #[must_use]
    pub const fn new(kind: DiagnosticKind, range: Range) -> Self {
        Self { kind, range }
    }

    /// Shorthand for `self.kind.code()`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Receiver of diagnostics produced during resolution and evaluation.
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn add_diagnostic(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
