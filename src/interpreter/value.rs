/// Runtime values and value domains.
///
/// Defines `Value`, the tagged result of every evaluation, and `Domain`, the
/// tag an expression is resolved against.
pub mod core;
/// Ordered sets of symbols whose attributes are not yet resolvable.
///
/// Produced by the dependency query and consumed by whoever orders the
/// multi-pass resolution of ordinary symbols.
pub mod undefined;
