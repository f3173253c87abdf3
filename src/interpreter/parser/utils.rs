use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::fragments::ReadResult,
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by subscripts and created-name lists. It repeatedly calls
/// `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
///
/// # Returns
/// The parsed items and the span of the closing token.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ReadResult<T>,
    closing: &Token)
    -> ReadResult<(Vec<T>, Span)>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let mut items = Vec::new();
    if let Some((tok, span)) = tokens.peek()
       && tok == closing
    {
        let span = span.clone();
        tokens.next();

        return Ok((items, span));
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, span)) if tok == closing => return Ok((items, span.clone())),
            Some((tok, span)) => {
                return Err(ParseError::UnexpectedToken { token:  format!("Expected ',' or {closing:?}, found {tok:?}"),
                                                         column: span.start + 1, });
            },
            None => return Err(ParseError::ExpectedClosingParen { column: 0 }),
        }
    }
}

/// Consumes the next token if it is `expected` and starts exactly at
/// `position`, i.e. follows the previous token without intervening blanks.
///
/// # Returns
/// The span of the consumed token, or `None` when nothing was consumed.
pub(in crate::interpreter::parser) fn next_if_adjacent<'a, I>(tokens: &mut Peekable<I>,
                                                              expected: &Token,
                                                              position: usize)
                                                              -> Option<Span>
    where I: Iterator<Item = &'a (Token, Span)>
{
    tokens.next_if(|(tok, span)| tok == expected && span.start == position)
          .map(|(_, span)| span.clone())
}

/// Consumes a closing parenthesis.
///
/// # Errors
/// `ExpectedClosingParen` when the next token is anything else.
pub(in crate::interpreter::parser) fn expect_closing_paren<'a, I>(tokens: &mut Peekable<I>)
                                                                  -> ReadResult<Span>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((Token::RParen, span)) => Ok(span.clone()),
        Some((_, span)) => Err(ParseError::ExpectedClosingParen { column: span.start + 1 }),
        None => Err(ParseError::ExpectedClosingParen { column: 0 }),
    }
}
