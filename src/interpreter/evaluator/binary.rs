/// Dispatch of binary operations to the specialized handlers.
pub mod core;

/// Checked 32-bit arithmetic and shifts.
pub mod scalar;

/// `AND`, `OR`, `XOR` and their `NOT` forms.
pub mod logic;

/// The relational operators on arithmetic and character values.
pub mod comparison;

/// `INDEX`, `FIND` and concatenation.
pub mod string;
