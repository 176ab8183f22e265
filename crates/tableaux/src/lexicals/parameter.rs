//! Coordinate items: constants, variables and the shared `(index, subscript)` pair.

use super::operator::LexType;
use crate::error::LexicalError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// `(index, subscript)` coordinates shared by every coordinate-named item.
///
/// Coordinates order by subscript first, so that successor generation
/// (`index + 1`, wrapping to the next subscript) always moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coords {
    pub index: u8,
    pub subscript: u32,
}

impl Coords {
    pub(crate) fn checked(
        lex_type: LexType,
        index: u8,
        subscript: u32,
        max: u8,
    ) -> Result<Self, LexicalError> {
        if index > max {
            return Err(LexicalError::IndexOutOfRange {
                lex_type,
                index: index as i32,
                max: max as i32,
            });
        }
        Ok(Coords { index, subscript })
    }

    pub(crate) fn next(self, lex_type: LexType, max: u8) -> Result<Self, LexicalError> {
        if self.index < max {
            return Ok(Coords {
                index: self.index + 1,
                subscript: self.subscript,
            });
        }
        let subscript = self
            .subscript
            .checked_add(1)
            .ok_or(LexicalError::DomainEdge(lex_type))?;
        Ok(Coords { index: 0, subscript })
    }

    pub(crate) fn sort_key(self) -> (u32, u8) {
        (self.subscript, self.index)
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn write_coords(f: &mut fmt::Formatter<'_>, chars: &[char], coords: Coords) -> fmt::Result {
    write!(f, "{}", chars[coords.index as usize])?;
    if coords.subscript > 0 {
        write!(f, "{}", coords.subscript)?;
    }
    Ok(())
}

/// A constant, e.g. the `m` in `Fm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Constant(Coords);

impl Constant {
    pub const MAX_INDEX: u8 = 3;

    pub fn new(index: u8, subscript: u32) -> Result<Self, LexicalError> {
        Coords::checked(LexType::Constant, index, subscript, Self::MAX_INDEX).map(Constant)
    }

    pub fn first() -> Self {
        Constant(Coords { index: 0, subscript: 0 })
    }

    pub fn next(&self) -> Result<Self, LexicalError> {
        self.0.next(LexType::Constant, Self::MAX_INDEX).map(Constant)
    }

    /// The first `n` constants in canonical order.
    pub fn gen(n: usize) -> impl Iterator<Item = Constant> {
        std::iter::successors(Some(Constant::first()), |c| c.next().ok()).take(n)
    }

    pub fn coords(&self) -> Coords {
        self.0
    }

    pub fn index(&self) -> u8 {
        self.0.index
    }

    pub fn subscript(&self) -> u32 {
        self.0.subscript
    }

    /// `(index, subscript)`, the arguments of [`Constant::new`].
    pub fn spec(&self) -> (u8, u32) {
        (self.0.index, self.0.subscript)
    }

    pub fn sort_tuple(&self) -> [i64; 3] {
        [
            LexType::Constant.rank() as i64,
            self.0.subscript as i64,
            self.0.index as i64,
        ]
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_coords(f, &['m', 'n', 'o', 's'], self.0)
    }
}

/// A variable, bound by a quantifier in a well-formed sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Variable(Coords);

impl Variable {
    pub const MAX_INDEX: u8 = 3;

    pub fn new(index: u8, subscript: u32) -> Result<Self, LexicalError> {
        Coords::checked(LexType::Variable, index, subscript, Self::MAX_INDEX).map(Variable)
    }

    pub fn first() -> Self {
        Variable(Coords { index: 0, subscript: 0 })
    }

    pub fn next(&self) -> Result<Self, LexicalError> {
        self.0.next(LexType::Variable, Self::MAX_INDEX).map(Variable)
    }

    pub fn gen(n: usize) -> impl Iterator<Item = Variable> {
        std::iter::successors(Some(Variable::first()), |v| v.next().ok()).take(n)
    }

    pub fn coords(&self) -> Coords {
        self.0
    }

    pub fn index(&self) -> u8 {
        self.0.index
    }

    pub fn subscript(&self) -> u32 {
        self.0.subscript
    }

    /// `(index, subscript)`, the arguments of [`Variable::new`].
    pub fn spec(&self) -> (u8, u32) {
        (self.0.index, self.0.subscript)
    }

    pub fn sort_tuple(&self) -> [i64; 3] {
        [
            LexType::Variable.rank() as i64,
            self.0.subscript as i64,
            self.0.index as i64,
        ]
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_coords(f, &['x', 'y', 'z', 'v'], self.0)
    }
}

/// A predicate argument: a constant or a variable.
///
/// Constants order before variables, matching their lexical ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Parameter {
    Constant(Constant),
    Variable(Variable),
}

impl Parameter {
    pub fn lex_type(&self) -> LexType {
        match self {
            Parameter::Constant(_) => LexType::Constant,
            Parameter::Variable(_) => LexType::Variable,
        }
    }

    pub fn sort_tuple(&self) -> [i64; 3] {
        match self {
            Parameter::Constant(c) => c.sort_tuple(),
            Parameter::Variable(v) => v.sort_tuple(),
        }
    }

    pub fn as_constant(&self) -> Option<Constant> {
        match self {
            Parameter::Constant(c) => Some(*c),
            Parameter::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<Variable> {
        match self {
            Parameter::Variable(v) => Some(*v),
            Parameter::Constant(_) => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Parameter::Constant(_))
    }
}

impl From<Constant> for Parameter {
    fn from(c: Constant) -> Self {
        Parameter::Constant(c)
    }
}

impl From<Variable> for Parameter {
    fn from(v: Variable) -> Self {
        Parameter::Variable(v)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Constant(c) => write!(f, "{}", c),
            Parameter::Variable(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_rejects_large_index() {
        assert!(Constant::new(3, 0).is_ok());
        assert_eq!(
            Constant::new(4, 0),
            Err(LexicalError::IndexOutOfRange {
                lex_type: LexType::Constant,
                index: 4,
                max: 3
            })
        );
    }

    #[test]
    fn test_next_wraps_to_subscript() {
        let last = Constant::new(3, 0).unwrap();
        let next = last.next().unwrap();
        assert_eq!((next.index(), next.subscript()), (0, 1));
        assert!(next > last);
    }

    #[test]
    fn test_next_at_domain_edge() {
        let edge = Variable::new(3, u32::MAX).unwrap();
        assert_eq!(edge.next(), Err(LexicalError::DomainEdge(LexType::Variable)));
    }

    #[test]
    fn test_gen_is_strictly_increasing() {
        let constants: Vec<Constant> = Constant::gen(10).collect();
        assert_eq!(constants.len(), 10);
        assert!(constants.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(constants[0], Constant::first());
    }

    #[test]
    fn test_constants_order_before_variables() {
        let c: Parameter = Constant::new(3, 9).unwrap().into();
        let v: Parameter = Variable::first().into();
        assert!(c < v);
        assert!(c.sort_tuple() < v.sort_tuple());
    }

    #[test]
    fn test_display() {
        assert_eq!(Constant::first().to_string(), "m");
        assert_eq!(Constant::new(1, 2).unwrap().to_string(), "n2");
        assert_eq!(Variable::new(3, 0).unwrap().to_string(), "v");
    }
}
