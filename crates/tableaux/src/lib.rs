//! Tableaux: analytic tableau proof search
//!
//! This library builds proof tableaux for arguments in many-valued,
//! classical first-order and normal modal logics. The engine is generic
//! over a logic's rule catalog; the catalogs supplied here are built from
//! shared rule building blocks.
//!
//! ```no_run
//! use tableaux::{logics, Argument, Sentence, Tableau, TableauConfig};
//!
//! let a = Sentence::atomic(0, 0)?;
//! let b = Sentence::atomic(1, 0)?;
//! let argument = Argument::new(a.clone(), [a.conjoin(&b)]);
//! let logic = logics::get("FDE").expect("known logic");
//! let mut tableau = Tableau::new(logic, Some(argument), TableauConfig::default());
//! tableau.build()?;
//! assert_eq!(tableau.valid(), Some(true));
//! # Ok::<(), tableaux::TableauError>(())
//! ```

pub mod argument;
pub mod config;
pub mod error;
pub mod lexicals;
pub mod logics;
pub mod predicates;
pub mod rules;
pub mod tableau;

pub use argument::Argument;
pub use config::TableauConfig;
pub use error::{LexicalError, Result, TableauError};
pub use lexicals::{
    Atomic, Constant, LexType, Operator, Parameter, Predicate, PredicateRef, Quantifier,
    Sentence, SentenceCache, Variable,
};
pub use logics::{Logic, Meta};
pub use predicates::Predicates;
pub use tableau::{
    Branch, BranchId, ModelBuilder, Node, NodeId, Outcome, Props, Tableau, TableauStats, Target,
    TreeNode,
};
