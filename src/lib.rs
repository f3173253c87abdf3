//! # caexpr
//!
//! caexpr is a conditional-assembly expression engine written in Rust.
//! It resolves flat lists of operand and operator fragments into typed
//! expression trees for one of three value domains (arithmetic, binary,
//! character), evaluates them against a symbol table, and reports which
//! ordinary symbols an expression still depends on.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::ParseError,
    interpreter::{
        evaluator::core::Context,
        parser::fragments::read_expression,
        value::core::{Domain, Value},
    },
};

/// Defines the structure of conditional-assembly expressions.
///
/// This module declares the `Expr` enum and related types: terminal nodes
/// built by a front end, unresolved fragment lists, and the operator nodes
/// produced by the resolver. Every node carries its source range.
///
/// # Responsibilities
/// - Defines node types for constants, symbols, variables, attributes,
///   strings, lists and operators.
/// - Attaches source ranges to every node for diagnostics.
/// - Renders trees in a compact, parenthesized form.
pub mod ast;
/// Provides the diagnostic and error types.
///
/// Resolution and evaluation never fail: they report `Diagnostic`s with a
/// stable code and a source range and carry on with a default value. Only
/// the text reader can fail, with a `ParseError`.
///
/// # Responsibilities
/// - Defines the diagnostic kinds and their codes.
/// - Defines the sink diagnostics are reported to.
/// - Defines the reader's error type.
pub mod error;
/// Orchestrates resolution and evaluation.
///
/// This module ties together the operator tables, the resolver, the
/// evaluator, the value model and the text reader.
///
/// # Responsibilities
/// - Provides entry points for resolving and evaluating expressions.
/// - Manages the flow of values and diagnostics between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// This module provides conversions between the `i32` values of arithmetic
/// expressions and `usize` lengths and positions without silent wrap-around.
pub mod util;

/// Reads, resolves and evaluates expression text in one step.
///
/// The text is read into a fragment list, resolved against the operator
/// table of `domain` and evaluated against `context`. Diagnostics are left
/// in `context.diagnostics`; the returned value always belongs to `domain`.
///
/// # Errors
/// Returns a `ParseError` if the text cannot be read into fragments.
///
/// # Examples
/// ```
/// use caexpr::{
///     get_result,
///     interpreter::{evaluator::core::Context, value::core::{Domain, Value}},
/// };
///
/// let mut context = Context::new();
/// assert_eq!(get_result("3+-4", Domain::Integer, &mut context), Ok(Value::Integer(-1)));
/// assert_eq!(get_result("(10 SLL 10 AND 2)", Domain::Integer, &mut context),
///            Ok(Value::Integer(40)));
///
/// // A truncated expression still yields a value, plus a diagnostic.
/// assert_eq!(get_result("3+", Domain::Integer, &mut context), Ok(Value::Integer(0)));
/// assert_eq!(context.diagnostics[0].code(), "CE003");
///
/// // Text that cannot be read is an error.
/// assert!(get_result("(1", Domain::Integer, &mut context).is_err());
/// ```
pub fn get_result(source: &str, domain: Domain, context: &mut Context) -> Result<Value, ParseError> {
    let mut expr = read_expression(source)?;
    expr.resolve(domain, context);
    Ok(expr.evaluate_as(domain, context))
}
