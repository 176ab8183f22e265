//! Error types for the tableau engine

use crate::lexicals::{LexType, Predicate};
use crate::tableau::{BranchId, NodeId};
use std::time::Duration;
use thiserror::Error;

/// Failures while constructing lexical items.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    #[error("{lex_type:?} index {index} out of range (max {max})")]
    IndexOutOfRange {
        lex_type: LexType,
        index: i32,
        max: i32,
    },

    #[error("negative index {0} is reserved for system predicates")]
    ReservedIndex(i32),

    #[error("predicate arity must be at least 1, got {0}")]
    ZeroArity(usize),

    #[error("{predicate} expects {expected} parameter(s), got {found}")]
    ArityMismatch {
        predicate: String,
        expected: usize,
        found: usize,
    },

    #[error("{operator:?} takes {expected} operand(s), got {found}")]
    OperandCount {
        operator: crate::lexicals::Operator,
        expected: usize,
        found: usize,
    },

    #[error("no successor for {0:?} at the edge of its domain")]
    DomainEdge(LexType),

    #[error("malformed ident tuple at position {position}: {reason}")]
    MalformedIdent { position: usize, reason: String },
}

/// Top-level error for store, engine and configuration failures.
#[derive(Error, Debug)]
pub enum TableauError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),

    #[error("predicate conflict on key {key}: {incoming:?} clashes with {existing:?}")]
    PredicateConflict {
        key: String,
        existing: Predicate,
        incoming: Predicate,
    },

    #[error("trunk already built")]
    TrunkAlreadyBuilt,

    #[error("trunk not built")]
    TrunkNotBuilt,

    #[error("no argument to build a trunk from")]
    NoArgument,

    #[error("branch {0} is closed")]
    BranchClosed(BranchId),

    #[error("unknown branch {0}")]
    UnknownBranch(BranchId),

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("build timed out after {elapsed:?} (limit {limit:?})")]
    Timeout { elapsed: Duration, limit: Duration },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TableauError>;
