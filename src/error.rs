/// Evaluation and resolution diagnostics.
///
/// Diagnostics never abort processing: the engine substitutes a safe value,
/// records a `Diagnostic` in the active sink and carries on, so a single pass
/// reports every problem it can find.
pub mod diagnostic;
/// Parsing errors.
///
/// Errors raised by the command-line fragment reader when surface text cannot
/// be turned into a fragment list at all.
pub mod parse_error;

pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink};
pub use parse_error::ParseError;
