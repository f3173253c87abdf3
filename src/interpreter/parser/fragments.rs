use std::iter::Peekable;

use crate::{
    ast::{
        AttributeSubject, ConcatChain, ConcatFragment, Expr, Identifier, Range, StringTerm, Substring,
        VariableSymbol,
    },
    error::ParseError,
    interpreter::{
        lexer::{AttributeToken, Span, Token, tokenize},
        parser::utils::{expect_closing_paren, next_if_adjacent, parse_comma_separated},
    },
};

/// Result of reading surface text.
pub type ReadResult<T> = Result<T, ParseError>;

/// Reads expression text into an unresolved fragment list.
///
/// Operands become terminal nodes, operators and keywords become symbol
/// fragments, and every parenthesized group becomes a nested list. Nothing
/// is resolved here: which words are operators is decided later by the
/// operator table of the target domain.
///
/// Recognized forms: decimal terms, `+ - * / .`, ordinary symbols and
/// keywords, `&VAR`, `&VAR(sub,...)`, `&(created.name)`, attribute
/// references (`L'SYM`, `K'&VAR`), quoted strings with variable
/// substitution, a duplication factor (`(3)'AB'`) and a substring
/// (`'ABC'(2,*)`). Subscripts, substrings and duplication factors must
/// follow their term without blanks.
///
/// # Errors
/// Returns a `ParseError` for unknown characters, unbalanced parentheses,
/// misplaced commas and literals beyond 32 bits.
///
/// # Example
/// ```
/// use caexpr::interpreter::parser::fragments::read_expression;
///
/// let expr = read_expression("(10 SLL 10 AND 2)").unwrap();
/// assert_eq!(expr.to_string(), "[[10 SLL 10 AND 2]]");
/// ```
pub fn read_expression(source: &str) -> ReadResult<Expr> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let fragments = read_list(&mut iter).map_err(|error| error.at_input_end(source.len()))?;
    if let Some((token, span)) = iter.next() {
        return Err(ParseError::UnexpectedToken { token:  format!("{token:?}"),
                                                 column: span.start + 1, });
    }

    tracing::debug!(fragments = fragments.len(), "read expression text");
    Ok(Expr::list(fragments, Range::columns(0, source.len())))
}

/// Reads fragments up to a closing parenthesis, a comma or the end.
fn read_list<'a, I>(tokens: &mut Peekable<I>) -> ReadResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let mut fragments = Vec::new();
    while let Some((token, _)) = tokens.peek()
          && !matches!(token, Token::RParen | Token::Comma)
    {
        fragments.push(read_fragment(tokens)?);
    }
    Ok(fragments)
}

fn read_fragment<'a, I>(tokens: &mut Peekable<I>) -> ReadResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let Some((token, span)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { column: 0 });
    };
    let range = Range::columns(span.start, span.end);

    match token {
        Token::Integer(value) => {
            let value = i32::try_from(*value).map_err(|_| {
                                                 ParseError::LiteralTooLarge { column: span.start + 1 }
                                             })?;
            Ok(Expr::constant(value, range))
        },
        Token::Plus => Ok(Expr::symbol("+", range)),
        Token::Minus => Ok(Expr::symbol("-", range)),
        Token::Star => Ok(Expr::symbol("*", range)),
        Token::Slash => Ok(Expr::symbol("/", range)),
        Token::Dot => Ok(Expr::symbol(".", range)),
        Token::Identifier(name) => Ok(Expr::symbol(name.as_str(), range)),
        Token::String(raw) => read_string(tokens, raw, span, None),
        Token::Variable(name) => {
            let symbol = read_subscript(tokens, VariableSymbol::basic(name.as_str(), range))?;
            Ok(Expr::variable(symbol))
        },
        Token::CreatedName => {
            let (chain, close) = read_created_name(tokens)?;
            let symbol = VariableSymbol::created(chain, Range::columns(span.start, close.end));
            Ok(Expr::variable(read_subscript(tokens, symbol)?))
        },
        Token::Attribute(attribute) => read_attribute(tokens, attribute, range),
        Token::LParen => {
            let list = read_parenthesized(tokens, span)?;
            let end = list.range().end.column;
            match tokens.next_if(|(token, span)| matches!(token, Token::String(_)) && span.start == end)
            {
                Some((Token::String(raw), span)) => read_string(tokens, raw, span, Some(list)),
                _ => Ok(list),
            }
        },
        Token::RParen | Token::Comma => {
            Err(ParseError::UnexpectedToken { token:  format!("{token:?}"),
                                              column: span.start + 1, })
        },
    }
}

/// Reads the rest of a parenthesized group whose `(` spans `open`.
fn read_parenthesized<'a, I>(tokens: &mut Peekable<I>, open: &Span) -> ReadResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let fragments = read_list(tokens)?;
    let close = expect_closing_paren(tokens)?;
    Ok(Expr::list(fragments, Range::columns(open.start, close.end)))
}

/// Reads one comma-delimited argument as an unparenthesized list.
fn read_argument<'a, I>(tokens: &mut Peekable<I>) -> ReadResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let position = tokens.peek().map_or(0, |(_, span)| span.start);
    let fragments = read_list(tokens)?;
    let range = match (fragments.first(), fragments.last()) {
        (Some(first), Some(last)) => first.range().union(last.range()),
        _ => Range::columns(position, position + 1),
    };
    Ok(Expr::list(fragments, range))
}

/// Attaches a subscript when `(` follows the symbol directly.
fn read_subscript<'a, I>(tokens: &mut Peekable<I>, symbol: VariableSymbol) -> ReadResult<VariableSymbol>
    where I: Iterator<Item = &'a (Token, Span)>
{
    if next_if_adjacent(tokens, &Token::LParen, symbol.range.end.column).is_none() {
        return Ok(symbol);
    }

    let (subscript, close) = parse_comma_separated(tokens, read_argument, &Token::RParen)?;
    let range = Range::columns(symbol.range.start.column, close.end);
    Ok(VariableSymbol { range, ..symbol }.with_subscript(subscript))
}

/// Reads the pieces of `&(...)` up to and including the closing `)`.
fn read_created_name<'a, I>(tokens: &mut Peekable<I>) -> ReadResult<(ConcatChain, Span)>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let mut chain = ConcatChain::new();
    loop {
        let Some((token, span)) = tokens.next() else {
            return Err(ParseError::ExpectedClosingParen { column: 0 });
        };
        match token {
            Token::RParen => return Ok((chain, span.clone())),
            Token::Identifier(name) => chain.push(ConcatFragment::Text(name.clone())),
            Token::Integer(value) => chain.push(ConcatFragment::Text(value.to_string())),
            Token::Dot => chain.push(ConcatFragment::Dot),
            Token::Variable(name) => {
                let symbol = read_subscript(tokens,
                                            VariableSymbol::basic(name.as_str(),
                                                                  Range::columns(span.start, span.end)))?;
                // A period directly after a variable only ends its name.
                next_if_adjacent(tokens, &Token::Dot, symbol.range.end.column);
                chain.push(ConcatFragment::Variable(symbol));
            },
            other => {
                return Err(ParseError::UnexpectedToken { token:  format!("{other:?}"),
                                                         column: span.start + 1, });
            },
        }
    }
}

fn read_attribute<'a, I>(tokens: &mut Peekable<I>,
                         token: &AttributeToken,
                         range: Range)
                         -> ReadResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    if !token.variable {
        let subject = AttributeSubject::Symbol(Identifier::new(token.name.as_str()));
        return Ok(Expr::attribute(subject, token.attribute, range));
    }

    // The variable part starts after the attribute letter and quote.
    let variable_range = Range::columns(range.start.column + 2, range.end.column);
    let symbol = read_subscript(tokens, VariableSymbol::basic(token.name.as_str(), variable_range))?;
    let range = range.union(symbol.range);
    Ok(Expr::attribute(AttributeSubject::Variable(symbol), token.attribute, range))
}

/// Builds a string term from the quoted text `raw` spanning `span`, with an
/// optional duplication factor and a substring when `(` follows directly.
fn read_string<'a, I>(tokens: &mut Peekable<I>,
                      raw: &str,
                      span: &Span,
                      duplication: Option<Expr>)
                      -> ReadResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let start = duplication.as_ref()
                           .map_or(span.start, |factor| factor.range().start.column);
    let mut end = span.end;
    let mut term = StringTerm::new(string_chain(raw, span.start + 1));

    if let Some(factor) = duplication {
        term = term.with_duplication(factor);
    }
    if next_if_adjacent(tokens, &Token::LParen, span.end).is_some() {
        let (substring, close) = read_substring(tokens)?;
        term = term.with_substring(substring);
        end = close.end;
    }

    Ok(Expr::string(term, Range::columns(start, end)))
}

/// Reads `start,count)` or `start,*)` after the opening parenthesis.
fn read_substring<'a, I>(tokens: &mut Peekable<I>) -> ReadResult<(Substring, Span)>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let start = Some(Box::new(read_argument(tokens)?));

    match tokens.next() {
        Some((Token::Comma, _)) => {},
        Some((token, span)) => {
            return Err(ParseError::UnexpectedToken { token:  format!("Expected ',', found {token:?}"),
                                                     column: span.start + 1, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { column: 0 }),
    }

    if tokens.next_if(|(token, _)| *token == Token::Star).is_some() {
        let close = expect_closing_paren(tokens)?;
        return Ok((Substring { start,
                               count: None,
                               to_end: true },
                   close));
    }

    let count = Some(Box::new(read_argument(tokens)?));
    let close = expect_closing_paren(tokens)?;
    Ok((Substring { start,
                    count,
                    to_end: false },
        close))
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '@' | '#' | '$')
}

const fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

/// Splits the text between the quotes of a string into a concatenation
/// chain; `offset` is the column of the first character.
///
/// `''` stands for one quote and `&&` is kept as is. A period directly
/// after a variable symbol ends its name and is dropped.
fn string_chain(raw: &str, offset: usize) -> ConcatChain {
    let mut chain = ConcatChain::new();
    let mut text = String::new();
    let mut chars = raw.char_indices().peekable();

    let flush = |chain: &mut ConcatChain, text: &mut String| {
        if !text.is_empty() {
            chain.push(ConcatFragment::Text(std::mem::take(text)));
        }
    };

    while let Some((index, c)) = chars.next() {
        match c {
            '\'' => {
                chars.next_if(|&(_, next)| next == '\'');
                text.push('\'');
            },
            '&' if chars.peek().is_some_and(|&(_, next)| next == '&') => {
                chars.next();
                text.push_str("&&");
            },
            '&' if chars.peek().is_some_and(|&(_, next)| is_name_start(next)) => {
                flush(&mut chain, &mut text);
                let mut name = String::new();
                let mut end = index + 1;
                while let Some((at, next)) = chars.next_if(|&(_, next)| is_name_char(next)) {
                    name.push(next.to_ascii_uppercase());
                    end = at + 1;
                }
                chars.next_if(|&(_, next)| next == '.');
                let range = Range::columns(offset + index, offset + end);
                chain.push(ConcatFragment::Variable(VariableSymbol::basic(name, range)));
            },
            '.' => {
                flush(&mut chain, &mut text);
                chain.push(ConcatFragment::Dot);
            },
            '=' => {
                flush(&mut chain, &mut text);
                chain.push(ConcatFragment::Equals);
            },
            other => text.push(other),
        }
    }
    flush(&mut chain, &mut text);

    chain
}
