/// The three value domains of conditional assembly.
///
/// Every expression is resolved against exactly one domain and every value
/// produced by evaluation carries its domain with it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    /// Signed 32-bit arithmetic values (`SETA`).
    Integer,
    /// Binary truth values (`SETB`).
    Boolean,
    /// Character strings (`SETC`).
    Character,
}

impl Domain {
    /// All domains, in declaration order.
    pub const ALL: [Self; 3] = [Self::Integer, Self::Boolean, Self::Character];

    /// Returns the value substituted whenever an expression of this domain
    /// cannot produce a proper result.
    ///
    /// ## Example
    /// ```
    /// use caexpr::interpreter::value::core::{Domain, Value};
    ///
    /// assert_eq!(Domain::Integer.default_value(), Value::Integer(0));
    /// assert_eq!(Domain::Boolean.default_value(), Value::Boolean(false));
    /// assert_eq!(Domain::Character.default_value(), Value::Text(String::new()));
    /// ```
    #[must_use]
    pub const fn default_value(self) -> Value {
        match self {
            Self::Integer => Value::Integer(0),
            Self::Boolean => Value::Boolean(false),
            Self::Character => Value::Text(String::new()),
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "arithmetic",
            Self::Boolean => "binary",
            Self::Character => "character",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "seta" | "integer" | "arithmetic" => Ok(Self::Integer),
            "b" | "setb" | "boolean" | "binary" => Ok(Self::Boolean),
            "c" | "setc" | "character" | "text" => Ok(Self::Character),
            _ => Err(format!("unknown domain '{s}'")),
        }
    }
}

/// Represents a runtime value of a conditional-assembly expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A signed 32-bit integer.
    Integer(i32),
    /// A truth value.
    Boolean(bool),
    /// A character string.
    Text(String),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl Value {
    /// Returns the domain tag of the value.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Integer(_) => Domain::Integer,
            Self::Boolean(_) => Domain::Boolean,
            Self::Text(_) => Domain::Character,
        }
    }

    /// Returns the integer payload, if the value is an integer.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean payload, if the value is a boolean.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text payload, if the value is a character string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts the value into the text used when it is substituted into a
    /// character string.
    ///
    /// Integers render as the decimal digits of their absolute value; the
    /// sign is never part of the substituted text. Booleans render as `1` or
    /// `0`. Text is returned verbatim.
    ///
    /// ## Example
    /// ```
    /// use caexpr::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(-10).into_substituted_text(), "10");
    /// assert_eq!(Value::Integer(i32::MIN).into_substituted_text(), "2147483648");
    /// assert_eq!(Value::Boolean(true).into_substituted_text(), "1");
    /// assert_eq!(Value::from("ABC").into_substituted_text(), "ABC");
    /// ```
    #[must_use]
    pub fn into_substituted_text(self) -> String {
        match self {
            Self::Integer(n) => n.unsigned_abs().to_string(),
            Self::Boolean(b) => String::from(if b { "1" } else { "0" }),
            Self::Text(s) => s,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{}", u8::from(*b)),
            Self::Text(s) => write!(f, "'{s}'"),
        }
    }
}
