//! Rule traits and lifecycle notifications.
//!
//! The tableau notifies every rule of branch and node events through the
//! [`Listener`] callbacks. Rules keep their auxiliary state (candidate
//! indices, bounds, flags) in helpers they own and update from these
//! callbacks, then read it when asked for [`Rule::targets`].
//!
//! Closure rules are stateless: the tableau asks them about each node as it
//! is added and about pending node groups when scoring targets.

use super::branch::{Branch, Lookahead, NodeLookup};
use super::node::{Node, Props};
use super::target::Target;

/// Lifecycle callbacks, all no-ops by default.
pub trait Listener {
    /// Called once after every trunk node is on the trunk branch.
    fn after_trunk_build(&mut self, _trunk: &Branch) {}

    /// Called when a branch is created, before any node is added to it.
    /// A forked branch already holds a copy of its parent's nodes.
    fn after_branch_add(&mut self, _branch: &Branch) {}

    fn after_node_add(&mut self, _node: &Node, _branch: &Branch) {}

    fn after_node_tick(&mut self, _node: &Node, _branch: &Branch) {}

    /// Called after a target has been fully applied.
    fn after_apply(&mut self, _target: &Target) {}
}

/// An inference rule that proposes targets for a branch.
pub trait Rule: Listener {
    fn name(&self) -> &'static str;

    /// Whether the consumed node is ticked after application.
    fn ticking(&self) -> bool {
        true
    }

    /// How many extra branches one application creates.
    fn branching(&self) -> usize {
        0
    }

    /// Every target the rule could apply to `branch` now.
    fn targets(&self, branch: &Branch) -> Vec<Target>;

    /// A minimal trunk on which the rule applies.
    fn example_nodes(&self) -> Vec<Props>;
}

/// A rule that closes a branch.
pub trait ClosureRule {
    fn name(&self) -> &'static str;

    /// Whether a node with `props` closes a branch that `lookup` describes.
    fn closes(&self, props: &Props, lookup: &dyn NodeLookup) -> bool;

    /// A minimal trunk that this rule closes.
    fn example_nodes(&self) -> Vec<Props>;

    fn node_will_close_branch(&self, node: &Node, branch: &Branch) -> bool {
        self.closes(node.props(), branch)
    }

    /// Whether adding `group` to `branch` would close it.
    fn nodes_will_close_branch(&self, group: &[Props], branch: &Branch) -> bool {
        let lookahead = Lookahead::new(branch, group);
        group.iter().any(|props| self.closes(props, &lookahead))
    }
}

/// A logic's rules: closure rules plus ordered groups of inference rules.
#[derive(Default)]
pub struct RuleSet {
    pub closure: Vec<Box<dyn ClosureRule>>,
    pub groups: Vec<Vec<Box<dyn Rule>>>,
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet::default()
    }

    pub fn with_closure(mut self, rule: impl ClosureRule + 'static) -> Self {
        self.closure.push(Box::new(rule));
        self
    }

    pub fn with_group(mut self, group: Vec<Box<dyn Rule>>) -> Self {
        self.groups.push(group);
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.groups.iter().flatten().map(|r| &**r)
    }

    pub fn rule(&self, name: &str) -> Option<&dyn Rule> {
        self.rules().find(|r| r.name() == name)
    }

    pub fn closure_rule(&self, name: &str) -> Option<&dyn ClosureRule> {
        self.closure
            .iter()
            .map(|r| &**r)
            .find(|r| r.name() == name)
    }

    /// Rule and closure rule names in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.closure
            .iter()
            .map(|r| r.name())
            .chain(self.rules().map(|r| r.name()))
            .collect()
    }

    fn listeners(&mut self) -> impl Iterator<Item = &mut Box<dyn Rule>> {
        self.groups.iter_mut().flatten()
    }

    pub(crate) fn trunk_built(&mut self, trunk: &Branch) {
        self.listeners().for_each(|r| r.after_trunk_build(trunk));
    }

    pub(crate) fn branch_added(&mut self, branch: &Branch) {
        self.listeners().for_each(|r| r.after_branch_add(branch));
    }

    pub(crate) fn node_added(&mut self, node: &Node, branch: &Branch) {
        self.listeners().for_each(|r| r.after_node_add(node, branch));
    }

    pub(crate) fn node_ticked(&mut self, node: &Node, branch: &Branch) {
        self.listeners().for_each(|r| r.after_node_tick(node, branch));
    }

    pub(crate) fn applied(&mut self, target: &Target) {
        self.listeners().for_each(|r| r.after_apply(target));
    }
}
