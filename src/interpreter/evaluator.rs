/// Core evaluation logic and context management.
///
/// Contains the collaborator traits, the in-memory [`core::Context`], the
/// domain check applied to every node and `Expr::evaluate`.
pub mod core;

/// Unary operator evaluation.
///
/// Implements the sign, complement and character operators.
pub mod unary;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, shifts, the bitwise/logical family, comparisons and
/// the character operators.
pub mod binary;

/// Evaluation of concatenation chains and variable symbol references.
pub mod concat;

/// Evaluation of character string terms with substring and duplication.
pub mod string;

/// Evaluation of attribute references.
pub mod attribute;

/// Collection of ordinary symbols whose attributes are not yet resolvable.
///
/// Runs independently of evaluation so an external solver can order
/// multi-pass resolution.
pub mod dependency;
