//! Targets: proposed mutations of a branch.

use super::node::{BranchId, NodeId, Props, World};
use crate::lexicals::Constant;
use serde::Serialize;

/// A rule's proposal for one branch.
///
/// `adds` holds one group of nodes per resulting branch. More than one group
/// forks the branch: the first group continues the original branch and every
/// other group goes to a fresh copy of it.
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub rule: &'static str,
    pub branch: BranchId,
    /// The node the rule consumes, ticked after application by ticking rules.
    pub node: Option<NodeId>,
    pub adds: Vec<Vec<Props>>,
    /// Constant introduced or instantiated, if any.
    pub constant: Option<Constant>,
    /// World introduced or targeted, if any.
    pub world: Option<World>,
    /// Whether this target only raises a quit flag.
    pub flag: bool,
}

impl Target {
    pub fn new(rule: &'static str, branch: BranchId, adds: Vec<Vec<Props>>) -> Self {
        Target {
            rule,
            branch,
            node: None,
            adds,
            constant: None,
            world: None,
            flag: false,
        }
    }

    /// A target that only adds a quit flag naming `rule`.
    pub fn quit(rule: &'static str, branch: BranchId) -> Self {
        Target {
            flag: true,
            ..Target::new(rule, branch, vec![vec![Props::quit_flag(rule)]])
        }
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn with_constant(mut self, constant: Constant) -> Self {
        self.constant = Some(constant);
        self
    }

    pub fn with_world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Number of branches the target leaves behind (1 when it does not fork).
    pub fn branch_count(&self) -> usize {
        self.adds.len().max(1)
    }
}
