use logos::Logos;

use crate::{ast::Attribute, error::ParseError};

/// Byte range of a token in the source text.
pub type Span = std::ops::Range<usize>;

/// Represents a lexical token of conditional-assembly expression text.
///
/// Keywords such as `AND` or `EQ` are not separate tokens; they are read as
/// identifiers and recognized later through the operator table of the
/// domain the expression is resolved to.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Self-defining decimal terms such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Quoted character strings such as `'A&C.B'`; holds the text between
    /// the quotes, doubled quotes included.
    #[regex(r"'([^']|'')*'", parse_string)]
    String(String),
    /// Variable symbols such as `&VAR`; holds the upper-cased name.
    #[regex(r"&[A-Za-z_@#$][A-Za-z0-9_@#$]*", parse_variable)]
    Variable(String),
    /// `&(` - start of a created variable name.
    #[token("&(")]
    CreatedName,
    /// Attribute references such as `L'FIELD` or `K'&TEXT`.
    #[regex(r"[TLSIKNDOtlsikndo]'&?[A-Za-z_@#$][A-Za-z0-9_@#$]*", parse_attribute)]
    Attribute(AttributeToken),
    /// Ordinary symbols and operator keywords; holds the upper-cased name.
    #[regex(r"[A-Za-z_@#$][A-Za-z0-9_@#$]*", |lex| lex.slice().to_ascii_uppercase())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `.`
    #[token(".")]
    Dot,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

/// Payload of [`Token::Attribute`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AttributeToken {
    /// The requested attribute.
    pub attribute: Attribute,
    /// `true` when the subject is a variable symbol (`K'&VAR`).
    pub variable:  bool,
    /// Upper-cased subject name without the `&`.
    pub name:      String,
}

/// Splits `source` into tokens with their byte spans.
///
/// # Errors
/// `InvalidInput` for text no token matches.
///
/// ## Example
/// ```
/// use caexpr::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("3+&x").unwrap();
/// assert_eq!(tokens[0], (Token::Integer(3), 0..1));
/// assert_eq!(tokens[2], (Token::Variable("X".to_string()), 2..4));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                return Err(ParseError::InvalidInput { text:   lexer.slice().to_string(),
                                                      column: span.start + 1, });
            },
        }
    }

    Ok(tokens)
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed value.
/// - `None`: If the literal does not fit in 64 bits.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

fn parse_variable(lex: &logos::Lexer<Token>) -> String {
    lex.slice()[1..].to_ascii_uppercase()
}

fn parse_attribute(lex: &logos::Lexer<Token>) -> Option<AttributeToken> {
    let slice = lex.slice();
    let attribute = Attribute::from_letter(slice.chars().next()?)?;
    let subject = &slice[2..];
    let (variable, name) = match subject.strip_prefix('&') {
        Some(name) => (true, name),
        None => (false, subject),
    };

    Some(AttributeToken { attribute,
                          variable,
                          name: name.to_ascii_uppercase() })
}
