use crate::interpreter::value::core::{Domain, Value};

/// A zero-based line/column location in the source text.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based line.
    pub line:   usize,
    /// Zero-based column.
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open source range attached to every expression node for
/// diagnostics.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    /// First position covered by the range.
    pub start: Position,
    /// First position after the range.
    pub end:   Position,
}

impl Range {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a range on line zero spanning `start..end` columns.
    ///
    /// ## Example
    /// ```
    /// use caexpr::ast::Range;
    ///
    /// let r = Range::columns(2, 5);
    /// assert_eq!((r.start.column, r.end.column), (2, 5));
    /// ```
    #[must_use]
    pub const fn columns(start: usize, end: usize) -> Self {
        Self { start: Position::new(0, start),
               end:   Position::new(0, end), }
    }

    /// Returns the one-column range that starts where `self` ends.
    ///
    /// Used to anchor "missing operand" reports just past the last fragment
    /// that was consumed.
    ///
    /// ## Example
    /// ```
    /// use caexpr::ast::Range;
    ///
    /// assert_eq!(Range::columns(3, 4).past_end(), Range::columns(4, 5));
    /// ```
    #[must_use]
    pub const fn past_end(self) -> Self {
        Self { start: self.end,
               end:   Position::new(self.end.line, self.end.column + 1), }
    }

    /// Returns the smallest range covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self { start: self.start.min(other.start),
               end:   self.end.max(other.end), }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "{}:{}-{}:{}",
               self.start.line + 1,
               self.start.column + 1,
               self.end.line + 1,
               self.end.column + 1)
    }
}

/// The name of an ordinary symbol, a variable symbol or an operator keyword.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::borrow::Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A property of a symbol that can be queried with the `X'NAME` notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `T'` - type attribute.
    Type,
    /// `L'` - length attribute.
    Length,
    /// `S'` - scale attribute.
    Scale,
    /// `I'` - integer attribute.
    Integer,
    /// `K'` - count attribute (characters in a variable's value).
    Count,
    /// `N'` - number attribute (elements of a subscripted variable).
    Number,
    /// `D'` - defined attribute.
    Defined,
    /// `O'` - operation code attribute.
    Opcode,
}

impl Attribute {
    /// Maps an attribute letter to its kind.
    ///
    /// ## Example
    /// ```
    /// use caexpr::ast::Attribute;
    ///
    /// assert_eq!(Attribute::from_letter('l'), Some(Attribute::Length));
    /// assert_eq!(Attribute::from_letter('X'), None);
    /// ```
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'T' => Some(Self::Type),
            'L' => Some(Self::Length),
            'S' => Some(Self::Scale),
            'I' => Some(Self::Integer),
            'K' => Some(Self::Count),
            'N' => Some(Self::Number),
            'D' => Some(Self::Defined),
            'O' => Some(Self::Opcode),
            _ => None,
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Type => 'T',
            Self::Length => 'L',
            Self::Scale => 'S',
            Self::Integer => 'I',
            Self::Count => 'K',
            Self::Number => 'N',
            Self::Defined => 'D',
            Self::Opcode => 'O',
        }
    }

    /// Domain of the value the attribute yields.
    #[must_use]
    pub const fn domain(self) -> Domain {
        match self {
            Self::Type | Self::Opcode => Domain::Character,
            _ => Domain::Integer,
        }
    }

    /// Whether the attribute may be requested for an ordinary symbol.
    #[must_use]
    pub const fn ordinary_allowed(self) -> bool {
        !matches!(self, Self::Count | Self::Number)
    }

    /// Whether the answer depends on the ordinary symbol being defined,
    /// which makes it a dependency for multi-pass resolution. `D'` counts
    /// too: it flips from 0 to 1 once the symbol is defined.
    #[must_use]
    pub const fn requires_defined_symbol(self) -> bool {
        self.ordinary_allowed()
    }

    /// Value reported for a symbol the context knows nothing about.
    #[must_use]
    pub fn undefined_value(self) -> Value {
        match self {
            Self::Type | Self::Opcode => Value::from("U"),
            Self::Length => Value::Integer(1),
            _ => Value::Integer(0),
        }
    }
}

/// One piece of a concatenation chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ConcatFragment {
    /// Literal characters.
    Text(String),
    /// Substitution of a variable symbol's current value.
    Variable(VariableSymbol),
    /// The `.` fragment.
    Dot,
    /// The `=` fragment.
    Equals,
    /// A parenthesized sublist of chains, rendered without separators.
    Sublist(Vec<ConcatChain>),
}

/// An ordered sequence of concatenation fragments.
pub type ConcatChain = Vec<ConcatFragment>;

/// How a variable symbol is named.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableName {
    /// A fixed name such as `&VAR`.
    Basic(Identifier),
    /// A name built at evaluation time from a concatenation chain, such as
    /// `&(PREFIX&N)`.
    Created(ConcatChain),
}

/// A reference to a variable (SET) symbol, optionally subscripted.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSymbol {
    /// The name, fixed or created.
    pub name:      VariableName,
    /// Subscript expressions, empty for a scalar reference.
    pub subscript: Vec<Expr>,
    /// Source range of the whole reference.
    pub range:     Range,
}

impl VariableSymbol {
    /// Creates a reference with a fixed name and no subscript.
    #[must_use]
    pub fn basic(name: impl Into<Identifier>, range: Range) -> Self {
        Self { name: VariableName::Basic(name.into()),
               subscript: Vec::new(),
               range }
    }

    /// Creates a reference whose name is built from `chain`.
    #[must_use]
    pub const fn created(chain: ConcatChain, range: Range) -> Self {
        Self { name: VariableName::Created(chain),
               subscript: Vec::new(),
               range }
    }

    /// Attaches subscript expressions.
    #[must_use]
    pub fn with_subscript(mut self, subscript: Vec<Expr>) -> Self {
        self.subscript = subscript;
        self
    }
}

/// The symbol whose attribute is requested.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeSubject {
    /// An ordinary symbol, e.g. `L'FIELD`.
    Symbol(Identifier),
    /// A variable symbol, e.g. `K'&TEXT`.
    Variable(VariableSymbol),
}

/// Substring selection applied to a character string term.
///
/// When `start` is present exactly one of `count` and `to_end` is
/// meaningful.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substring {
    /// One-based start position.
    pub start:  Option<Box<Expr>>,
    /// Number of characters to take.
    pub count:  Option<Box<Expr>>,
    /// Take everything from `start` to the end (`(start,*)`).
    pub to_end: bool,
}

/// A quoted character string with optional duplication factor and
/// substring.
#[derive(Debug, Clone, PartialEq)]
pub struct StringTerm {
    /// The quoted content.
    pub value:              ConcatChain,
    /// Repetition count written before the string, e.g. `(3)'AB'`.
    pub duplication_factor: Option<Box<Expr>>,
    /// Substring written after the string, e.g. `'ABC'(2,1)`.
    pub substring:          Substring,
}

impl StringTerm {
    /// Creates a term without duplication or substring.
    #[must_use]
    pub fn new(value: ConcatChain) -> Self {
        Self { value,
               duplication_factor: None,
               substring: Substring::default() }
    }

    /// Creates a term holding a single literal.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(vec![ConcatFragment::Text(text.into())])
    }

    #[must_use]
    pub fn with_duplication(mut self, factor: Expr) -> Self {
        self.duplication_factor = Some(Box::new(factor));
        self
    }

    #[must_use]
    pub fn with_substring(mut self, substring: Substring) -> Self {
        self.substring = substring;
        self
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Sign (`+`).
    Plus,
    /// Negation (`-`).
    Minus,
    /// Bitwise or logical complement (`NOT`).
    Not,
    /// Upper-casing (`UPPER`).
    Upper,
    /// Lower-casing (`LOWER`).
    Lower,
    /// Doubling of quotes and ampersands (`DOUBLE`).
    Double,
    /// Signed decimal rendering of an integer (`SIGNED`).
    Signed,
    /// Single character with the given code (`BYTE`).
    Byte,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `XOR`
    Xor,
    /// `AND NOT`
    AndNot,
    /// `OR NOT`
    OrNot,
    /// `XOR NOT`
    XorNot,
    /// Shift left arithmetic (`SLA`)
    Sla,
    /// Shift left logical (`SLL`)
    Sll,
    /// Shift right arithmetic (`SRA`)
    Sra,
    /// Shift right logical (`SRL`)
    Srl,
    /// Position of a string inside another (`INDEX`)
    Index,
    /// Position of the first character from a set (`FIND`)
    Find,
    /// `EQ`
    Equal,
    /// `NE`
    NotEqual,
    /// `LT`
    Less,
    /// `LE`
    LessEqual,
    /// `GT`
    Greater,
    /// `GE`
    GreaterEqual,
    /// Concatenation (`.`)
    Concat,
}

impl BinaryOperator {
    /// Returns `true` for the six comparison operators.
    ///
    /// ## Example
    /// ```
    /// use caexpr::ast::BinaryOperator;
    ///
    /// assert!(BinaryOperator::LessEqual.is_relational());
    /// assert!(!BinaryOperator::And.is_relational());
    /// ```
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::LessEqual
                 | Self::Greater
                 | Self::GreaterEqual)
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "NOT",
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
            Self::Double => "DOUBLE",
            Self::Signed => "SIGNED",
            Self::Byte => "BYTE",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::AndNot => "AND NOT",
            Self::OrNot => "OR NOT",
            Self::XorNot => "XOR NOT",
            Self::Sla => "SLA",
            Self::Sll => "SLL",
            Self::Sra => "SRA",
            Self::Srl => "SRL",
            Self::Index => "INDEX",
            Self::Find => "FIND",
            Self::Equal => "EQ",
            Self::NotEqual => "NE",
            Self::Less => "LT",
            Self::LessEqual => "LE",
            Self::Greater => "GT",
            Self::GreaterEqual => "GE",
            Self::Concat => ".",
        };
        write!(f, "{operator}")
    }
}

/// The two states of an expression list.
///
/// A list starts as the flat fragment sequence handed over by the front end
/// and is turned, exactly once, into the root of the resolved tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// Operands interleaved with operator-name fragments.
    Unresolved(Vec<Expr>),
    /// The resolved tree.
    Resolved {
        /// Root of the tree.
        root:      Box<Expr>,
        /// Set when resolution failed and `root` is the zero fallback.
        recovered: bool,
        /// Domain the list was resolved to.
        domain:    Domain,
    },
}

/// An abstract syntax tree node of a conditional-assembly expression.
///
/// Terminals are built by the front end, `Unary` and `Binary` only by the
/// resolver. Terminal `domain` tags are `None` until the node is resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A self-defining integer.
    Constant {
        /// The literal value.
        value:  i32,
        /// Source range.
        range:  Range,
        /// Resolved domain.
        domain: Option<Domain>,
    },
    /// A reference to an ordinary symbol; also the shape of every
    /// operator-name fragment.
    Symbol {
        /// Symbol or operator name.
        name:   Identifier,
        /// Source range.
        range:  Range,
        /// Resolved domain.
        domain: Option<Domain>,
    },
    /// A variable symbol reference.
    Variable {
        /// The referenced variable.
        symbol: VariableSymbol,
        /// Resolved domain.
        domain: Option<Domain>,
    },
    /// A symbol attribute reference such as `L'FIELD`.
    Attribute {
        /// The symbol whose attribute is requested.
        subject:   AttributeSubject,
        /// The requested attribute.
        attribute: Attribute,
        /// Source range.
        range:     Range,
        /// Resolved domain.
        domain:    Option<Domain>,
    },
    /// A character string term.
    String {
        /// The string with its duplication factor and substring.
        term:   StringTerm,
        /// Source range.
        range:  Range,
        /// Resolved domain.
        domain: Option<Domain>,
    },
    /// A list of fragments awaiting, or holding the result of, resolution.
    List {
        /// Unresolved fragments or resolved root.
        state: ListState,
        /// Source range of the whole list.
        range: Range,
    },
    /// A unary operation.
    Unary {
        /// The operator.
        op:             UnaryOperator,
        /// The operand.
        operand:        Box<Self>,
        /// Source range.
        range:          Range,
        /// Domain of the result.
        domain:         Domain,
        /// Domain the operand was resolved to.
        operand_domain: Domain,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op:             BinaryOperator,
        /// Left operand.
        left:           Box<Self>,
        /// Right operand.
        right:          Box<Self>,
        /// Source range.
        range:          Range,
        /// Domain of the result.
        domain:         Domain,
        /// Domain both operands were resolved to.
        operand_domain: Domain,
    },
}

impl Expr {
    #[must_use]
    pub const fn constant(value: i32, range: Range) -> Self {
        Self::Constant { value,
                         range,
                         domain: None }
    }

    /// Creates a symbol fragment; operator names are passed this way too.
    #[must_use]
    pub fn symbol(name: impl Into<Identifier>, range: Range) -> Self {
        Self::Symbol { name: name.into(),
                       range,
                       domain: None }
    }

    #[must_use]
    pub const fn variable(symbol: VariableSymbol) -> Self {
        Self::Variable { symbol,
                         domain: None }
    }

    #[must_use]
    pub const fn attribute(subject: AttributeSubject, attribute: Attribute, range: Range) -> Self {
        Self::Attribute { subject,
                          attribute,
                          range,
                          domain: None }
    }

    #[must_use]
    pub const fn string(term: StringTerm, range: Range) -> Self {
        Self::String { term,
                       range,
                       domain: None }
    }

    /// Creates an unresolved list from front-end fragments.
    #[must_use]
    pub const fn list(fragments: Vec<Self>, range: Range) -> Self {
        Self::List { state: ListState::Unresolved(fragments),
                     range }
    }

    /// Gets the source range from `self`.
    /// ## Example
    /// ```
    /// use caexpr::ast::{Expr, Range};
    ///
    /// let expr = Expr::constant(7, Range::columns(4, 5));
    ///
    /// assert_eq!(expr.range(), Range::columns(4, 5));
    /// ```
    #[must_use]
    pub const fn range(&self) -> Range {
        match self {
            Self::Variable { symbol, .. } => symbol.range,
            Self::Constant { range, .. }
            | Self::Symbol { range, .. }
            | Self::Attribute { range, .. }
            | Self::String { range, .. }
            | Self::List { range, .. }
            | Self::Unary { range, .. }
            | Self::Binary { range, .. } => *range,
        }
    }

    /// Returns the domain the node was resolved to, `None` before
    /// resolution.
    #[must_use]
    pub fn domain(&self) -> Option<Domain> {
        match self {
            Self::Constant { domain, .. }
            | Self::Symbol { domain, .. }
            | Self::Variable { domain, .. }
            | Self::Attribute { domain, .. }
            | Self::String { domain, .. } => *domain,
            Self::Unary { domain, .. } | Self::Binary { domain, .. } => Some(*domain),
            Self::List { state: ListState::Resolved { domain, .. },
                         .. } => Some(*domain),
            Self::List { state: ListState::Unresolved(_),
                         .. } => None,
        }
    }

    /// Returns the name when the node is a bare symbol, which is how operator
    /// keywords reach the resolver.
    #[must_use]
    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Self::Symbol { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns the resolved root of a list, or `self` for every other node.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::List { state: ListState::Resolved { root, .. },
                         .. } => root.root(),
            _ => self,
        }
    }

    /// `true` once the node no longer holds unresolved fragments.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self,
                  Self::List { state: ListState::Unresolved(_),
                               .. })
    }
}

fn fmt_chain(chain: &ConcatChain, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for fragment in chain {
        match fragment {
            ConcatFragment::Text(text) => write!(f, "{text}")?,
            ConcatFragment::Variable(symbol) => write!(f, "{symbol}")?,
            ConcatFragment::Dot => write!(f, ".")?,
            ConcatFragment::Equals => write!(f, "=")?,
            ConcatFragment::Sublist(chains) => {
                write!(f, "(")?;
                for (i, chain) in chains.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    fmt_chain(chain, f)?;
                }
                write!(f, ")")?;
            },
        }
    }
    Ok(())
}

impl std::fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            VariableName::Basic(name) => write!(f, "&{name}")?,
            VariableName::Created(chain) => {
                write!(f, "&(")?;
                fmt_chain(chain, f)?;
                write!(f, ")")?;
            },
        }
        if !self.subscript.is_empty() {
            write!(f, "(")?;
            for (i, expr) in self.subscript.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{expr}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constant { value, .. } => write!(f, "{value}"),
            Self::Symbol { name, .. } => write!(f, "{name}"),
            Self::Variable { symbol, .. } => write!(f, "{symbol}"),
            Self::Attribute { subject,
                              attribute,
                              .. } => match subject {
                AttributeSubject::Symbol(name) => write!(f, "{}'{name}", attribute.letter()),
                AttributeSubject::Variable(symbol) => {
                    write!(f, "{}'{symbol}", attribute.letter())
                },
            },
            Self::String { term, .. } => {
                if let Some(factor) = &term.duplication_factor {
                    write!(f, "({factor})")?;
                }
                write!(f, "'")?;
                fmt_chain(&term.value, f)?;
                write!(f, "'")?;
                if let Some(start) = &term.substring.start {
                    write!(f, "({start},")?;
                    match &term.substring.count {
                        Some(count) if !term.substring.to_end => write!(f, "{count})")?,
                        _ => write!(f, "*)")?,
                    }
                }
                Ok(())
            },
            Self::List { state: ListState::Unresolved(fragments),
                         .. } => {
                write!(f, "[")?;
                for (i, fragment) in fragments.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{fragment}")?;
                }
                write!(f, "]")
            },
            Self::List { state: ListState::Resolved { root, .. },
                         .. } => write!(f, "{root}"),
            Self::Unary { op, operand, .. } => write!(f, "({op} {operand})"),
            Self::Binary { op, left, right, .. } => write!(f, "({left} {op} {right})"),
        }
    }
}
