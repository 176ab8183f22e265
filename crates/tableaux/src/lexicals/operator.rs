//! Fixed lexical enumerations: lexical types, operators and quantifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a lexical item.
///
/// The rank is the first element of every sort tuple, so items of different
/// kinds never compare equal and always order by kind first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LexType {
    Predicate,
    Constant,
    Variable,
    Quantifier,
    Operator,
    Atomic,
    Predicated,
    Quantified,
    Operated,
}

impl LexType {
    pub const ALL: [LexType; 9] = [
        LexType::Predicate,
        LexType::Constant,
        LexType::Variable,
        LexType::Quantifier,
        LexType::Operator,
        LexType::Atomic,
        LexType::Predicated,
        LexType::Quantified,
        LexType::Operated,
    ];

    pub fn rank(self) -> i32 {
        match self {
            LexType::Predicate => 10,
            LexType::Constant => 20,
            LexType::Variable => 30,
            LexType::Quantifier => 40,
            LexType::Operator => 50,
            LexType::Atomic => 60,
            LexType::Predicated => 70,
            LexType::Quantified => 80,
            LexType::Operated => 90,
        }
    }

    pub fn from_rank(rank: i32) -> Option<Self> {
        LexType::ALL.iter().copied().find(|t| t.rank() == rank)
    }

    /// Whether items of this type are sentences.
    pub fn is_sentence(self) -> bool {
        matches!(
            self,
            LexType::Atomic | LexType::Predicated | LexType::Quantified | LexType::Operated
        )
    }
}

/// Sentential operators, in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    Assertion,
    Negation,
    Conjunction,
    Disjunction,
    MaterialConditional,
    MaterialBiconditional,
    Conditional,
    Biconditional,
    Possibility,
    Necessity,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Assertion,
        Operator::Negation,
        Operator::Conjunction,
        Operator::Disjunction,
        Operator::MaterialConditional,
        Operator::MaterialBiconditional,
        Operator::Conditional,
        Operator::Biconditional,
        Operator::Possibility,
        Operator::Necessity,
    ];

    pub fn arity(self) -> usize {
        match self {
            Operator::Assertion
            | Operator::Negation
            | Operator::Possibility
            | Operator::Necessity => 1,
            Operator::Conjunction
            | Operator::Disjunction
            | Operator::MaterialConditional
            | Operator::MaterialBiconditional
            | Operator::Conditional
            | Operator::Biconditional => 2,
        }
    }

    pub fn rank(self) -> i32 {
        (self as i32 + 1) * 10
    }

    pub fn from_rank(rank: i32) -> Option<Self> {
        Operator::ALL.iter().copied().find(|o| o.rank() == rank)
    }

    pub fn is_modal(self) -> bool {
        matches!(self, Operator::Possibility | Operator::Necessity)
    }

    pub fn first() -> Self {
        Operator::Assertion
    }

    /// The next operator in rank order, `None` after the last one.
    pub fn next(self) -> Option<Self> {
        Operator::ALL.get(self as usize + 1).copied()
    }

    /// Like [`Operator::next`], but wraps around to the first operator.
    pub fn next_loop(self) -> Self {
        self.next().unwrap_or_else(Operator::first)
    }

    pub fn sort_tuple(self) -> [i64; 2] {
        [LexType::Operator.rank() as i64, self.rank() as i64]
    }

    pub(crate) fn polish(self) -> char {
        match self {
            Operator::Assertion => 'T',
            Operator::Negation => 'N',
            Operator::Conjunction => 'K',
            Operator::Disjunction => 'A',
            Operator::MaterialConditional => 'C',
            Operator::MaterialBiconditional => 'E',
            Operator::Conditional => 'U',
            Operator::Biconditional => 'B',
            Operator::Possibility => 'M',
            Operator::Necessity => 'L',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Quantifiers, in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quantifier {
    Existential,
    Universal,
}

impl Quantifier {
    pub const ALL: [Quantifier; 2] = [Quantifier::Existential, Quantifier::Universal];

    pub fn rank(self) -> i32 {
        (self as i32 + 1) * 10
    }

    pub fn from_rank(rank: i32) -> Option<Self> {
        Quantifier::ALL.iter().copied().find(|q| q.rank() == rank)
    }

    pub fn first() -> Self {
        Quantifier::Existential
    }

    pub fn next(self) -> Option<Self> {
        Quantifier::ALL.get(self as usize + 1).copied()
    }

    pub fn next_loop(self) -> Self {
        self.next().unwrap_or_else(Quantifier::first)
    }

    /// The dual quantifier, used by the negated-quantifier conversions.
    pub fn dual(self) -> Self {
        match self {
            Quantifier::Existential => Quantifier::Universal,
            Quantifier::Universal => Quantifier::Existential,
        }
    }

    pub fn sort_tuple(self) -> [i64; 2] {
        [LexType::Quantifier.rank() as i64, self.rank() as i64]
    }

    pub(crate) fn polish(self) -> char {
        match self {
            Quantifier::Existential => 'S',
            Quantifier::Universal => 'V',
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
