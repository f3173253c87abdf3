use std::collections::BTreeSet;

use crate::ast::Identifier;

/// Ordered, duplicate-free collection of ordinary symbols whose attributes
/// are referenced by an expression but cannot be resolved yet.
///
/// Merging two sets is the only operation the dependency query needs, and
/// the ordering keeps reports deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndefinedSymbols(BTreeSet<Identifier>);

impl UndefinedSymbols {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds one symbol.
    pub fn insert(&mut self, symbol: Identifier) {
        self.0.insert(symbol);
    }

    /// Moves every symbol of `other` into `self`.
    ///
    /// ## Example
    /// ```
    /// use caexpr::{ast::Identifier, interpreter::value::undefined::UndefinedSymbols};
    ///
    /// let mut a = UndefinedSymbols::from_iter([Identifier::from("X")]);
    /// let b = UndefinedSymbols::from_iter([Identifier::from("Y"), Identifier::from("X")]);
    /// a.merge(b);
    /// assert_eq!(a.len(), 2);
    /// ```
    pub fn merge(&mut self, mut other: Self) {
        self.0.append(&mut other.0);
    }

    #[must_use]
    pub fn contains(&self, symbol: &Identifier) -> bool {
        self.0.contains(symbol)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the symbols in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.0.iter()
    }
}

impl FromIterator<Identifier> for UndefinedSymbols {
    fn from_iter<T: IntoIterator<Item = Identifier>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<Self> for UndefinedSymbols {
    fn from_iter<T: IntoIterator<Item = Self>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), |mut all, set| {
                            all.merge(set);
                            all
                        })
    }
}

impl IntoIterator for UndefinedSymbols {
    type IntoIter = std::collections::btree_set::IntoIter<Identifier>;
    type Item = Identifier;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for UndefinedSymbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{symbol}")?;
        }
        write!(f, "}}")
    }
}
