/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between the `i32`
/// values of arithmetic expressions and the `usize` counts and positions of
/// character strings without risking silent wrap-around.
pub mod num;
