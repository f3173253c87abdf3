use thiserror::Error;

/// Represents all errors that can occur while reading surface text into a
/// fragment list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot start or continue a fragment.
    #[error("Error at column {column}: Unexpected token '{token}'.")]
    UnexpectedToken {
        /// The token encountered.
        token:  String,
        /// The one-based column where the token starts.
        column: usize,
    },
    /// The text contains characters no token matches.
    #[error("Error at column {column}: Unrecognized input '{text}'.")]
    InvalidInput {
        /// The offending text.
        text:   String,
        /// The one-based column where the text starts.
        column: usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error at column {column}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The one-based column just past the input.
        column: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error at column {column}: Expected ')'.")]
    ExpectedClosingParen {
        /// The one-based column where `)` was expected.
        column: usize,
    },
    /// An integer literal does not fit in 32 bits.
    #[error("Error at column {column}: Literal is too large.")]
    LiteralTooLarge {
        /// The one-based column of the literal.
        column: usize,
    },
}

impl ParseError {
    /// Fills in the column of an end-of-input error raised before the input
    /// length was known.
    ///
    /// ## Example
    /// ```
    /// use caexpr::error::ParseError;
    ///
    /// let error = ParseError::UnexpectedEndOfInput { column: 0 }.at_input_end(4);
    /// assert_eq!(error, ParseError::UnexpectedEndOfInput { column: 5 });
    /// ```
    #[must_use]
    pub fn at_input_end(self, length: usize) -> Self {
        match self {
            Self::UnexpectedEndOfInput { column: 0 } => {
                Self::UnexpectedEndOfInput { column: length + 1 }
            },
            Self::ExpectedClosingParen { column: 0 } => {
                Self::ExpectedClosingParen { column: length + 1 }
            },
            other => other,
        }
    }
}
