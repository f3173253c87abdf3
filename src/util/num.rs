/// Converts a character count or position to `i32`, saturating at
/// `i32::MAX`.
///
/// Counts never exceed the maximum string length in practice, but attribute
/// values and positions are reported as arithmetic values and must not wrap.
///
/// ## Example
/// ```
/// use caexpr::util::num::usize_to_i32_saturating;
///
/// assert_eq!(usize_to_i32_saturating(42), 42);
/// assert_eq!(usize_to_i32_saturating(usize::MAX), i32::MAX);
/// ```
#[must_use]
pub fn usize_to_i32_saturating(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Safely converts an `i32` to `usize` if and only if it is not negative.
///
/// ## Errors
/// Returns `Err(error)` for negative values.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if the value is negative.
///
/// ## Returns
/// - `Ok(usize)`: The converted value.
/// - `Err(error)`: If the value is negative.
///
/// ## Example
/// ```
/// use caexpr::util::num::i32_to_usize_checked;
///
/// assert_eq!(i32_to_usize_checked(7, "negative"), Ok(7));
/// assert_eq!(i32_to_usize_checked(-1, "negative"), Err("negative"));
/// ```
pub fn i32_to_usize_checked<E>(value: i32, error: E) -> Result<usize, E> {
    usize::try_from(value).map_err(|_| error)
}
