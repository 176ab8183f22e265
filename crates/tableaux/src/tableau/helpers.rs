//! Per-rule bookkeeping driven by lifecycle callbacks.
//!
//! Every helper keeps its state per branch. When a branch forks, the child
//! starts from a copy of the parent's state, mirroring how the branch itself
//! is copied.

use super::branch::Branch;
use super::node::{BranchId, Node, NodeId, Props, World};
use super::target::Target;
use crate::lexicals::{Constant, Operator};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Per-branch state that forks along with its branch.
#[derive(Debug, Clone)]
pub struct BranchMap<T> {
    inner: HashMap<BranchId, T>,
}

impl<T> Default for BranchMap<T> {
    fn default() -> Self {
        BranchMap {
            inner: HashMap::new(),
        }
    }
}

impl<T: Clone + Default> BranchMap<T> {
    /// Start the branch's state: a copy of the parent's, or the default.
    pub fn branch_added(&mut self, branch: &Branch) {
        let state = branch
            .parent()
            .and_then(|p| self.inner.get(&p).cloned())
            .unwrap_or_default();
        self.inner.insert(branch.id(), state);
    }

    pub fn get(&self, branch: BranchId) -> Option<&T> {
        self.inner.get(&branch)
    }

    pub fn entry(&mut self, branch: BranchId) -> &mut T {
        self.inner.entry(branch).or_default()
    }
}

fn world_key(world: Option<World>) -> World {
    world.unwrap_or(0)
}

/// Upper bound on distinct constants per world, fixed once the trunk is built.
///
/// The bound is `max(1, constants) * max(1, quantifiers) + 1` over the trunk.
/// A rule is over budget on a branch once a world holds more constants than
/// that.
#[derive(Debug, Clone, Default)]
pub struct MaxConsts {
    max: usize,
    constants: BranchMap<BTreeMap<World, BTreeSet<Constant>>>,
}

impl MaxConsts {
    pub fn after_trunk_build(&mut self, trunk: &Branch) {
        let quantifiers: usize = trunk
            .nodes()
            .iter()
            .filter_map(|n| n.sentence())
            .map(|s| s.quantifiers().len())
            .sum();
        self.max = trunk.constants().len().max(1) * quantifiers.max(1) + 1;
    }

    pub fn after_branch_add(&mut self, branch: &Branch) {
        self.constants.branch_added(branch);
    }

    pub fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        if let Some(sentence) = node.sentence() {
            self.constants
                .entry(branch.id())
                .entry(world_key(node.world()))
                .or_default()
                .extend(sentence.constants().iter().copied());
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn count(&self, branch: BranchId, world: Option<World>) -> usize {
        self.constants
            .get(branch)
            .and_then(|m| m.get(&world_key(world)))
            .map_or(0, BTreeSet::len)
    }

    pub fn exceeded(&self, branch: BranchId, world: Option<World>) -> bool {
        self.count(branch, world) > self.max
    }
}

/// Upper bound on worlds per branch: trunk worlds plus trunk modal
/// operators plus one.
#[derive(Debug, Clone, Default)]
pub struct MaxWorlds {
    max: usize,
}

impl MaxWorlds {
    pub fn after_trunk_build(&mut self, trunk: &Branch) {
        let modals = trunk
            .nodes()
            .iter()
            .filter_map(|n| n.sentence())
            .flat_map(|s| s.operators().iter())
            .filter(|o| o.is_modal())
            .count();
        self.max = trunk.worlds().len() + modals + 1;
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn exceeded(&self, branch: &Branch) -> bool {
        branch.worlds().len() > self.max
    }
}

/// Tracks branches on which a rule has raised its quit flag. Descendants
/// inherit the flag.
#[derive(Debug, Clone)]
pub struct QuitFlag {
    rule: &'static str,
    flagged: BranchMap<bool>,
}

impl QuitFlag {
    pub fn new(rule: &'static str) -> Self {
        QuitFlag {
            rule,
            flagged: BranchMap::default(),
        }
    }

    pub fn after_branch_add(&mut self, branch: &Branch) {
        self.flagged.branch_added(branch);
    }

    pub fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        if let Props::Flag { info, .. } = node.props() {
            if node.props().is_quit_flag() && info == self.rule {
                *self.flagged.entry(branch.id()) = true;
            }
        }
    }

    pub fn is_flagged(&self, branch: BranchId) -> bool {
        self.flagged.get(branch).copied().unwrap_or(false)
    }
}

/// Constants already used to instantiate each node, per branch.
#[derive(Debug, Clone, Default)]
pub struct NodeConsts {
    applied: BranchMap<HashMap<NodeId, BTreeSet<Constant>>>,
}

impl NodeConsts {
    pub fn after_branch_add(&mut self, branch: &Branch) {
        self.applied.branch_added(branch);
    }

    /// Record the target's constant against its node. Call only with the
    /// owning rule's targets.
    pub fn after_apply(&mut self, target: &Target) {
        if let (Some(node), Some(constant)) = (target.node, target.constant) {
            self.applied
                .entry(target.branch)
                .entry(node)
                .or_default()
                .insert(constant);
        }
    }

    pub fn is_applied(&self, branch: BranchId, node: NodeId, constant: &Constant) -> bool {
        self.applied
            .get(branch)
            .and_then(|m| m.get(&node))
            .is_some_and(|set| set.contains(constant))
    }

    /// Branch constants not yet used for `node`, in canonical order.
    pub fn unapplied<'a>(&'a self, branch: &'a Branch, node: NodeId) -> impl Iterator<Item = Constant> + 'a {
        branch
            .constants()
            .iter()
            .copied()
            .filter(move |c| !self.is_applied(branch.id(), node, c))
    }
}

/// Number of times each node has been applied, per branch.
#[derive(Debug, Clone, Default)]
pub struct NodeCount {
    counts: BranchMap<HashMap<NodeId, usize>>,
}

impl NodeCount {
    pub fn after_branch_add(&mut self, branch: &Branch) {
        self.counts.branch_added(branch);
    }

    /// Count the target against its node. Call only with the owning rule's
    /// targets.
    pub fn after_apply(&mut self, target: &Target) {
        if let Some(node) = target.node {
            *self.counts.entry(target.branch).entry(node).or_default() += 1;
        }
    }

    pub fn count(&self, branch: BranchId, node: NodeId) -> usize {
        self.counts
            .get(branch)
            .and_then(|m| m.get(&node))
            .copied()
            .unwrap_or(0)
    }
}

/// The accessibility relation of each branch as an adjacency map.
#[derive(Debug, Clone, Default)]
pub struct VisibleWorlds {
    edges: BranchMap<BTreeMap<World, BTreeSet<World>>>,
}

impl VisibleWorlds {
    pub fn after_branch_add(&mut self, branch: &Branch) {
        self.edges.branch_added(branch);
    }

    pub fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        if let Some((w1, w2)) = node.props().access_pair() {
            self.edges
                .entry(branch.id())
                .entry(w1)
                .or_default()
                .insert(w2);
        }
    }

    /// Worlds visible from `world`, in ascending order.
    pub fn visible(&self, branch: BranchId, world: World) -> impl Iterator<Item = World> + '_ {
        self.edges
            .get(branch)
            .and_then(|m| m.get(&world))
            .into_iter()
            .flatten()
            .copied()
    }

    /// Every `(world1, world2)` edge, ordered.
    pub fn edges(&self, branch: BranchId) -> impl Iterator<Item = (World, World)> + '_ {
        self.edges
            .get(branch)
            .into_iter()
            .flatten()
            .flat_map(|(w1, targets)| targets.iter().map(move |w2| (*w1, *w2)))
    }
}

/// Whether any sentence on the branch at `world` has `operator` as main operator.
pub fn has_operator_at(branch: &Branch, world: World, operator: Operator) -> bool {
    branch
        .nodes()
        .iter()
        .filter(|n| n.world() == Some(world))
        .filter_map(|n| n.sentence())
        .any(|s| s.operator() == Some(operator))
}
