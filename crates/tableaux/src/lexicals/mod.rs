//! Term algebra: immutable, totally ordered lexical items
//!
//! Every item carries a numeric sort tuple whose first element is its
//! [`LexType`] rank. Sentences are shared handles with memoized derived sets.

pub mod cache;
pub mod operator;
pub mod parameter;
pub mod predicate;
pub mod sentence;


pub use cache::SentenceCache;
pub use operator::{LexType, Operator, Quantifier};
pub use parameter::{Constant, Coords, Parameter, Variable};
pub use predicate::{Predicate, PredicateRef};
pub use sentence::{Atomic, Operated, Predicated, Quantified, Sentence, SentenceKind};
