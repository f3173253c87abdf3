/// Precedence-climbing resolution of fragment lists.
///
/// Holds the resolution entry point, the shared [`core::ParseResult`] type
/// and `Expr::resolve`.
pub mod core;

/// Unary operator handling during resolution.
///
/// Recognizes unary keywords in operand position and wraps the term that
/// follows them.
pub mod unary;

/// Binary operator handling during resolution.
///
/// Looks up operators, merges two-token forms such as `AND NOT` and picks
/// the operand domain of comparisons.
pub mod binary;

/// Operator tables.
///
/// One table per domain lists every operator with its priority, arity and
/// operand and result domains.
pub mod policy;

/// Reading of surface text into fragment lists.
///
/// A small front end used by the command-line driver and the tests.
pub mod fragments;

/// Utility functions for the fragment reader.
///
/// Comma-separated lists, adjacency checks and closing parentheses.
pub mod utils;
