/// The evaluator module computes the value of resolved expression trees.
///
/// The evaluator traverses a resolved tree, reads variable and ordinary
/// symbols from an evaluation context, applies the operators of the three
/// value domains and reports every problem as a diagnostic instead of
/// failing.
///
/// # Responsibilities
/// - Evaluates every node kind against an evaluation context.
/// - Checks each result against the domain the node was resolved to.
/// - Collects undefined attributed symbols for dependency ordering.
pub mod evaluator;
/// The lexer module tokenizes expression text for the fragment reader.
///
/// The lexer reads raw text and produces tokens for numbers, strings,
/// variable symbols, attribute references, names and punctuation. Operator
/// keywords are plain names at this stage.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with byte spans.
/// - Reports unrecognized input.
pub mod lexer;
/// The parser module turns fragment lists into typed expression trees.
///
/// Fragment lists come from an external front end or from the small reader
/// in [`parser::fragments`]. The resolver turns each list into one tree
/// using the operator table of the target domain.
///
/// # Responsibilities
/// - Holds the per-domain operator tables.
/// - Resolves lists by precedence climbing, including unary and two-token
///   operators.
/// - Reports structural errors and substitutes a zero fallback.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the three value domains, the `Value` enum carrying
/// a domain tag, and the set type returned by the dependency query.
///
/// # Responsibilities
/// - Defines `Domain`, `Value` and their defaults.
/// - Implements the substitution of values into character strings.
pub mod value;
