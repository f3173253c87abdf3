use crate::{
    ast::{BinaryOperator, BinaryOperator as B, UnaryOperator, UnaryOperator as U},
    interpreter::value::core::{
        Domain,
        Domain::{Boolean as BOOL, Character as CHAR, Integer as INT},
    },
};

/// The operation an operator table entry stands for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OperatorKind {
    /// Applies to the operand that follows it.
    Unary(UnaryOperator),
    /// Applies to the operands on both sides.
    Binary(BinaryOperator),
}

/// Which domain the operands of an operator are resolved to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operands {
    /// Operands always belong to this domain.
    Fixed(Domain),
    /// Operands are both arithmetic or both character; the resolver picks
    /// character when either side is a character expression.
    Comparable,
}

/// One row of a domain's operator table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OperatorEntry {
    /// Keyword as it appears in a fragment (case-sensitive).
    pub name:      &'static str,
    /// Binding strength; lower binds tighter.
    pub priority:  i32,
    /// The operation to apply.
    pub kind:      OperatorKind,
    /// `true` when the keyword may be followed by `NOT` to form a combined
    /// operator with its own entry (`AND` + `NOT` -> `AND NOT`).
    pub two_token: bool,
    /// Domain of the operands.
    pub operands:  Operands,
    /// Domain of the result.
    pub result:    Domain,
}

impl OperatorEntry {
    /// Creates a unary entry.
    #[must_use]
    pub const fn unary(name: &'static str,
                       priority: i32,
                       op: UnaryOperator,
                       operand: Domain,
                       result: Domain)
                       -> Self {
        Self { name,
               priority,
               kind: OperatorKind::Unary(op),
               two_token: false,
               operands: Operands::Fixed(operand),
               result }
    }

    /// Creates a binary entry whose operands share one fixed domain.
    #[must_use]
    pub const fn binary(name: &'static str,
                        priority: i32,
                        op: BinaryOperator,
                        operands: Domain,
                        result: Domain)
                        -> Self {
        Self { name,
               priority,
               kind: OperatorKind::Binary(op),
               two_token: false,
               operands: Operands::Fixed(operands),
               result }
    }

    /// Creates a relational entry.
    #[must_use]
    pub const fn relational(name: &'static str, priority: i32, op: BinaryOperator) -> Self {
        Self { name,
               priority,
               kind: OperatorKind::Binary(op),
               two_token: false,
               operands: Operands::Comparable,
               result: Domain::Boolean }
    }

    /// Marks the entry as the first word of a two-token operator.
    #[must_use]
    pub const fn with_not_form(mut self) -> Self {
        self.two_token = true;
        self
    }

    #[must_use]
    pub const fn is_unary(&self) -> bool {
        matches!(self.kind, OperatorKind::Unary(_))
    }
}

/// The operator table used to resolve expressions of one domain.
///
/// The resolver never hard-codes an operator; everything it knows about
/// keywords, priorities and operand domains comes from here. The tables for
/// the three built-in domains are process-wide constants, custom tables can
/// be built from any slice of entries.
#[derive(Debug, Copy, Clone)]
pub struct Policy<'a> {
    /// Domain the table resolves to.
    pub domain:    Domain,
    /// All entries, unary and binary.
    pub operators: &'a [OperatorEntry],
}

impl<'a> Policy<'a> {
    #[must_use]
    pub const fn new(domain: Domain, operators: &'a [OperatorEntry]) -> Self {
        Self { domain, operators }
    }

    /// Returns the built-in table for `domain`.
    ///
    /// ## Example
    /// ```
    /// use caexpr::interpreter::{parser::policy::Policy, value::core::Domain};
    ///
    /// let policy = Policy::for_domain(Domain::Integer);
    /// let mul = policy.binary("*").unwrap();
    /// let add = policy.binary("+").unwrap();
    /// assert!(mul.priority < add.priority);
    /// ```
    #[must_use]
    pub fn for_domain(domain: Domain) -> &'static Policy<'static> {
        match domain {
            Domain::Integer => &ARITHMETIC_POLICY,
            Domain::Boolean => &BINARY_POLICY,
            Domain::Character => &CHARACTER_POLICY,
        }
    }

    /// Looks up `name` as a unary operator.
    #[must_use]
    pub fn unary(&self, name: &str) -> Option<&'a OperatorEntry> {
        self.operators
            .iter()
            .find(|entry| entry.is_unary() && entry.name == name)
    }

    /// Looks up `name` as a binary operator.
    #[must_use]
    pub fn binary(&self, name: &str) -> Option<&'a OperatorEntry> {
        self.operators
            .iter()
            .find(|entry| !entry.is_unary() && entry.name == name)
    }

    /// Returns `true` if `name` is any operator of the table.
    #[must_use]
    pub fn is_operator(&self, name: &str) -> bool {
        self.operators.iter().any(|entry| entry.name == name)
    }
}

static ARITHMETIC_OPERATORS: [OperatorEntry; 19] =
    [OperatorEntry::unary("+", 1, U::Plus, INT, INT),
     OperatorEntry::unary("-", 1, U::Minus, INT, INT),
     OperatorEntry::binary("INDEX", 2, B::Index, CHAR, INT),
     OperatorEntry::binary("FIND", 2, B::Find, CHAR, INT),
     OperatorEntry::binary("*", 3, B::Mul, INT, INT),
     OperatorEntry::binary("/", 3, B::Div, INT, INT),
     OperatorEntry::binary("+", 4, B::Add, INT, INT),
     OperatorEntry::binary("-", 4, B::Sub, INT, INT),
     OperatorEntry::unary("NOT", 5, U::Not, INT, INT),
     OperatorEntry::binary("AND", 6, B::And, INT, INT).with_not_form(),
     OperatorEntry::binary("AND NOT", 6, B::AndNot, INT, INT),
     OperatorEntry::binary("OR", 7, B::Or, INT, INT).with_not_form(),
     OperatorEntry::binary("OR NOT", 7, B::OrNot, INT, INT),
     OperatorEntry::binary("XOR", 8, B::Xor, INT, INT).with_not_form(),
     OperatorEntry::binary("XOR NOT", 8, B::XorNot, INT, INT),
     OperatorEntry::binary("SLA", 9, B::Sla, INT, INT),
     OperatorEntry::binary("SLL", 9, B::Sll, INT, INT),
     OperatorEntry::binary("SRA", 9, B::Sra, INT, INT),
     OperatorEntry::binary("SRL", 9, B::Srl, INT, INT)];

static BINARY_OPERATORS: [OperatorEntry; 22] =
    [OperatorEntry::unary("+", 1, U::Plus, INT, INT),
     OperatorEntry::unary("-", 1, U::Minus, INT, INT),
     OperatorEntry::binary("INDEX", 2, B::Index, CHAR, INT),
     OperatorEntry::binary("FIND", 2, B::Find, CHAR, INT),
     OperatorEntry::binary("*", 3, B::Mul, INT, INT),
     OperatorEntry::binary("/", 3, B::Div, INT, INT),
     OperatorEntry::binary("+", 4, B::Add, INT, INT),
     OperatorEntry::binary("-", 4, B::Sub, INT, INT),
     OperatorEntry::binary(".", 4, B::Concat, CHAR, CHAR),
     OperatorEntry::relational("EQ", 5, B::Equal),
     OperatorEntry::relational("NE", 5, B::NotEqual),
     OperatorEntry::relational("LT", 5, B::Less),
     OperatorEntry::relational("LE", 5, B::LessEqual),
     OperatorEntry::relational("GT", 5, B::Greater),
     OperatorEntry::relational("GE", 5, B::GreaterEqual),
     OperatorEntry::unary("NOT", 6, U::Not, BOOL, BOOL),
     OperatorEntry::binary("AND", 7, B::And, BOOL, BOOL).with_not_form(),
     OperatorEntry::binary("AND NOT", 7, B::AndNot, BOOL, BOOL),
     OperatorEntry::binary("OR", 8, B::Or, BOOL, BOOL).with_not_form(),
     OperatorEntry::binary("OR NOT", 8, B::OrNot, BOOL, BOOL),
     OperatorEntry::binary("XOR", 9, B::Xor, BOOL, BOOL).with_not_form(),
     OperatorEntry::binary("XOR NOT", 9, B::XorNot, BOOL, BOOL)];

static CHARACTER_OPERATORS: [OperatorEntry; 8] =
    [OperatorEntry::unary("+", 1, U::Plus, INT, INT),
     OperatorEntry::unary("-", 1, U::Minus, INT, INT),
     OperatorEntry::unary("UPPER", 1, U::Upper, CHAR, CHAR),
     OperatorEntry::unary("LOWER", 1, U::Lower, CHAR, CHAR),
     OperatorEntry::unary("DOUBLE", 1, U::Double, CHAR, CHAR),
     OperatorEntry::unary("SIGNED", 1, U::Signed, INT, CHAR),
     OperatorEntry::unary("BYTE", 1, U::Byte, INT, CHAR),
     OperatorEntry::binary(".", 2, B::Concat, CHAR, CHAR)];

/// Operators of arithmetic (`SETA`) expressions.
pub static ARITHMETIC_POLICY: Policy<'static> = Policy::new(INT, &ARITHMETIC_OPERATORS);
/// Operators of binary (`SETB`) expressions.
pub static BINARY_POLICY: Policy<'static> = Policy::new(BOOL, &BINARY_OPERATORS);
/// Operators of character (`SETC`) expressions.
pub static CHARACTER_POLICY: Policy<'static> = Policy::new(CHAR, &CHARACTER_OPERATORS);
