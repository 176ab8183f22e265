//! Predicates, including the built-in system predicates.

use super::operator::LexType;
use crate::error::LexicalError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A predicate symbol.
///
/// Identity is `(index, subscript, arity)`. The optional name is a lookup key
/// only and takes no part in equality, hashing or ordering.
#[derive(Debug, Clone, Serialize)]
pub struct Predicate {
    index: i32,
    subscript: u32,
    arity: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// A lookup key for a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PredicateRef {
    /// `(index, subscript)`
    Coords(i32, u32),
    /// `(index, subscript, arity)`
    Spec(i32, u32, usize),
    /// The full sort tuple, as returned by [`Predicate::sort_tuple`].
    Ident([i64; 4]),
    Name(String),
}

impl fmt::Display for PredicateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateRef::Coords(i, s) => write!(f, "({}, {})", i, s),
            PredicateRef::Spec(i, s, a) => write!(f, "({}, {}, {})", i, s, a),
            PredicateRef::Ident(ident) => write!(f, "{:?}", ident),
            PredicateRef::Name(name) => write!(f, "{:?}", name),
        }
    }
}

impl Predicate {
    pub const MAX_INDEX: i32 = 3;

    const EXISTENCE_INDEX: i32 = -2;
    const IDENTITY_INDEX: i32 = -1;

    /// A user predicate. Negative indexes are reserved for system predicates.
    pub fn new(index: i32, subscript: u32, arity: usize) -> Result<Self, LexicalError> {
        if index < 0 {
            return Err(LexicalError::ReservedIndex(index));
        }
        if index > Self::MAX_INDEX {
            return Err(LexicalError::IndexOutOfRange {
                lex_type: LexType::Predicate,
                index,
                max: Self::MAX_INDEX,
            });
        }
        if arity == 0 {
            return Err(LexicalError::ZeroArity(arity));
        }
        Ok(Predicate {
            index,
            subscript,
            arity,
            name: None,
        })
    }

    /// Rebuilds a predicate from its spec, accepting the system coordinates.
    pub fn from_spec(index: i32, subscript: u32, arity: usize) -> Result<Self, LexicalError> {
        if index >= 0 {
            return Predicate::new(index, subscript, arity);
        }
        Predicate::system()
            .into_iter()
            .find(|p| p.spec() == (index, subscript, arity))
            .ok_or(LexicalError::ReservedIndex(index))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn identity() -> Self {
        Predicate {
            index: Self::IDENTITY_INDEX,
            subscript: 0,
            arity: 2,
            name: Some("Identity".into()),
        }
    }

    pub fn existence() -> Self {
        Predicate {
            index: Self::EXISTENCE_INDEX,
            subscript: 0,
            arity: 1,
            name: Some("Existence".into()),
        }
    }

    /// The system predicates in canonical order.
    pub fn system() -> [Predicate; 2] {
        [Predicate::existence(), Predicate::identity()]
    }

    pub fn is_system(&self) -> bool {
        self.index < 0
    }

    pub fn first() -> Self {
        Predicate {
            index: 0,
            subscript: 0,
            arity: 1,
            name: None,
        }
    }

    /// The canonical successor with the same arity. System predicates have none.
    pub fn next(&self) -> Result<Self, LexicalError> {
        if self.is_system() {
            return Err(LexicalError::DomainEdge(LexType::Predicate));
        }
        let (index, subscript) = if self.index < Self::MAX_INDEX {
            (self.index + 1, self.subscript)
        } else {
            let subscript = self
                .subscript
                .checked_add(1)
                .ok_or(LexicalError::DomainEdge(LexType::Predicate))?;
            (0, subscript)
        };
        Predicate::new(index, subscript, self.arity)
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn subscript(&self) -> u32 {
        self.subscript
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn spec(&self) -> (i32, u32, usize) {
        (self.index, self.subscript, self.arity)
    }

    /// Every key this predicate can be looked up by.
    pub fn refs(&self) -> Vec<PredicateRef> {
        let mut refs = vec![
            PredicateRef::Coords(self.index, self.subscript),
            PredicateRef::Spec(self.index, self.subscript, self.arity),
            PredicateRef::Ident(self.sort_tuple()),
        ];
        if let Some(name) = &self.name {
            refs.push(PredicateRef::Name(name.clone()));
        }
        refs
    }

    pub fn sort_tuple(&self) -> [i64; 4] {
        [
            LexType::Predicate.rank() as i64,
            self.subscript as i64,
            self.index as i64,
            self.arity as i64,
        ]
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.spec() == other.spec()
    }
}

impl Eq for Predicate {}

impl Hash for Predicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.spec().hash(state);
    }
}

impl Ord for Predicate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_tuple().cmp(&other.sort_tuple())
    }
}

impl PartialOrd for Predicate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Self::IDENTITY_INDEX => return write!(f, "I"),
            Self::EXISTENCE_INDEX => return write!(f, "J"),
            _ => {}
        }
        let symbol = ['F', 'G', 'H', 'O'][self.index as usize];
        write!(f, "{}", symbol)?;
        if self.subscript > 0 {
            write!(f, "{}", self.subscript)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_coordinates() {
        assert!(Predicate::new(0, 0, 1).is_ok());
        assert_eq!(Predicate::new(-1, 0, 2), Err(LexicalError::ReservedIndex(-1)));
        assert_eq!(Predicate::new(0, 0, 0), Err(LexicalError::ZeroArity(0)));
        assert!(matches!(
            Predicate::new(4, 0, 1),
            Err(LexicalError::IndexOutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn test_name_is_not_identity() {
        let plain = Predicate::new(1, 0, 2).unwrap();
        let named = plain.clone().with_name("Loves");
        assert_eq!(plain, named);
        assert_eq!(named.refs().len(), 4);
        assert_eq!(plain.refs().len(), 3);
        assert!(plain.refs().contains(&PredicateRef::Ident(plain.sort_tuple())));
    }

    #[test]
    fn test_system_predicates() {
        assert_eq!(Predicate::from_spec(-1, 0, 2).unwrap(), Predicate::identity());
        assert!(Predicate::from_spec(-1, 0, 3).is_err());
        assert!(Predicate::existence() < Predicate::identity());
        assert!(Predicate::identity() < Predicate::first());
        assert!(Predicate::identity().next().is_err());
        assert_eq!(Predicate::identity().to_string(), "I");
    }

    #[test]
    fn test_next_keeps_arity() {
        let p = Predicate::new(3, 0, 2).unwrap();
        let q = p.next().unwrap();
        assert_eq!(q.spec(), (0, 1, 2));
        assert!(q > p);
        assert_eq!(q.to_string(), "F1");
    }
}
