//! Possible-world rules: the modal operators and the frame conditions on
//! the access relation.

use super::filters::{FilterHelper, NodeFilter};
use crate::lexicals::{Atomic, Operator, Sentence};
use crate::tableau::helpers::{has_operator_at, MaxWorlds, QuitFlag, VisibleWorlds};
use crate::tableau::{Branch, Listener, Node, NodeLookup, Props, Rule, Target, World};

/// `◇A` at `w` gives a new world `w'`, `wRw'`, and `A` at `w'`.
pub struct PossibilityRule {
    helper: FilterHelper,
    max_worlds: MaxWorlds,
    quit: QuitFlag,
}

impl PossibilityRule {
    pub const NAME: &'static str = "Possibility";

    pub fn new() -> Self {
        PossibilityRule {
            helper: FilterHelper::new(NodeFilter::operator(Operator::Possibility).modal()),
            max_worlds: MaxWorlds::default(),
            quit: QuitFlag::new(Self::NAME),
        }
    }
}

impl Default for PossibilityRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for PossibilityRule {
    fn after_trunk_build(&mut self, trunk: &Branch) {
        self.max_worlds.after_trunk_build(trunk);
    }

    fn after_branch_add(&mut self, branch: &Branch) {
        self.helper.after_branch_add(branch);
        self.quit.after_branch_add(branch);
    }

    fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        self.helper.after_node_add(node, branch);
        self.quit.after_node_add(node, branch);
    }

    fn after_node_tick(&mut self, node: &Node, branch: &Branch) {
        self.helper.after_node_tick(node, branch);
    }
}

impl Rule for PossibilityRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn targets(&self, branch: &Branch) -> Vec<Target> {
        if self.quit.is_flagged(branch.id()) {
            return Vec::new();
        }
        let world2 = branch.new_world();
        let targets: Vec<Target> = self
            .helper
            .candidates(branch)
            .filter_map(|(node, sentence)| {
                let world1 = node.world()?;
                let operand = sentence.operands().first()?;
                let adds = vec![vec![
                    Props::access(world1, world2),
                    node.props().at_world(operand.clone(), world2),
                ]];
                Some(
                    Target::new(Self::NAME, branch.id(), adds)
                        .with_node(node.id())
                        .with_world(world2),
                )
            })
            .collect();
        if !targets.is_empty() && self.max_worlds.exceeded(branch) {
            return vec![Target::quit(Self::NAME, branch.id())];
        }
        targets
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![self.helper.filter().example()]
    }
}

/// `□A` at `w` gives `A` at every world `w` sees. Never ticks.
pub struct NecessityRule {
    helper: FilterHelper,
    visible: VisibleWorlds,
}

impl NecessityRule {
    pub const NAME: &'static str = "Necessity";

    pub fn new() -> Self {
        NecessityRule {
            helper: FilterHelper::new(NodeFilter::operator(Operator::Necessity).modal()),
            visible: VisibleWorlds::default(),
        }
    }
}

impl Default for NecessityRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for NecessityRule {
    fn after_branch_add(&mut self, branch: &Branch) {
        self.helper.after_branch_add(branch);
        self.visible.after_branch_add(branch);
    }

    fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        self.helper.after_node_add(node, branch);
        self.visible.after_node_add(node, branch);
    }

    fn after_node_tick(&mut self, node: &Node, branch: &Branch) {
        self.helper.after_node_tick(node, branch);
    }
}

impl Rule for NecessityRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn ticking(&self) -> bool {
        false
    }

    fn targets(&self, branch: &Branch) -> Vec<Target> {
        let mut targets = Vec::new();
        for (node, sentence) in self.helper.candidates(branch) {
            let (Some(world1), Some(operand)) = (node.world(), sentence.operands().first()) else {
                continue;
            };
            for world2 in self.visible.visible(branch.id(), world1) {
                let add = node.props().at_world(operand.clone(), world2);
                if branch.has(&add) {
                    continue;
                }
                targets.push(
                    Target::new(Self::NAME, branch.id(), vec![vec![add]])
                        .with_node(node.id())
                        .with_world(world2),
                );
            }
        }
        targets
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![self.helper.filter().example(), Props::access(0, 1)]
    }
}

fn atomic_at(world: World) -> Props {
    Props::swnode(Atomic::first().into(), Some(world))
}

fn access_target(rule: &'static str, branch: &Branch, world1: World, world2: World) -> Target {
    Target::new(rule, branch.id(), vec![vec![Props::access(world1, world2)]]).with_world(world2)
}

/// Every world on the branch sees itself.
#[derive(Default)]
pub struct ReflexiveRule;

impl ReflexiveRule {
    pub const NAME: &'static str = "Reflexive";
}

impl Listener for ReflexiveRule {}

impl Rule for ReflexiveRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn ticking(&self) -> bool {
        false
    }

    fn targets(&self, branch: &Branch) -> Vec<Target> {
        branch
            .worlds()
            .iter()
            .filter(|w| !branch.has_access(**w, **w))
            .map(|w| access_target(Self::NAME, branch, *w, *w))
            .collect()
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![atomic_at(0)]
    }
}

/// `wRv` gives `vRw`.
#[derive(Default)]
pub struct SymmetricRule {
    visible: VisibleWorlds,
}

impl SymmetricRule {
    pub const NAME: &'static str = "Symmetric";
}

impl Listener for SymmetricRule {
    fn after_branch_add(&mut self, branch: &Branch) {
        self.visible.after_branch_add(branch);
    }

    fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        self.visible.after_node_add(node, branch);
    }
}

impl Rule for SymmetricRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn ticking(&self) -> bool {
        false
    }

    fn targets(&self, branch: &Branch) -> Vec<Target> {
        self.visible
            .edges(branch.id())
            .filter(|(w1, w2)| !branch.has_access(*w2, *w1))
            .map(|(w1, w2)| access_target(Self::NAME, branch, w2, w1))
            .collect()
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![Props::access(0, 1)]
    }
}

/// `wRv` and `vRu` give `wRu`.
#[derive(Default)]
pub struct TransitiveRule {
    visible: VisibleWorlds,
}

impl TransitiveRule {
    pub const NAME: &'static str = "Transitive";
}

impl Listener for TransitiveRule {
    fn after_branch_add(&mut self, branch: &Branch) {
        self.visible.after_branch_add(branch);
    }

    fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        self.visible.after_node_add(node, branch);
    }
}

impl Rule for TransitiveRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn ticking(&self) -> bool {
        false
    }

    fn targets(&self, branch: &Branch) -> Vec<Target> {
        let mut targets = Vec::new();
        for (w1, w2) in self.visible.edges(branch.id()) {
            for w3 in self.visible.visible(branch.id(), w2) {
                if !branch.has_access(w1, w3) {
                    targets.push(access_target(Self::NAME, branch, w1, w3));
                }
            }
        }
        targets
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![Props::access(0, 1), Props::access(1, 2)]
    }
}

/// A world with a necessity sentence and no access gets a new world to see.
pub struct SerialRule {
    visible: VisibleWorlds,
    max_worlds: MaxWorlds,
    quit: QuitFlag,
}

impl SerialRule {
    pub const NAME: &'static str = "Serial";

    pub fn new() -> Self {
        SerialRule {
            visible: VisibleWorlds::default(),
            max_worlds: MaxWorlds::default(),
            quit: QuitFlag::new(Self::NAME),
        }
    }
}

impl Default for SerialRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for SerialRule {
    fn after_trunk_build(&mut self, trunk: &Branch) {
        self.max_worlds.after_trunk_build(trunk);
    }

    fn after_branch_add(&mut self, branch: &Branch) {
        self.visible.after_branch_add(branch);
        self.quit.after_branch_add(branch);
    }

    fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        self.visible.after_node_add(node, branch);
        self.quit.after_node_add(node, branch);
    }
}

impl Rule for SerialRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn targets(&self, branch: &Branch) -> Vec<Target> {
        if self.quit.is_flagged(branch.id()) {
            return Vec::new();
        }
        let world2 = branch.new_world();
        let targets: Vec<Target> = branch
            .worlds()
            .iter()
            .copied()
            .filter(|w| self.visible.visible(branch.id(), *w).next().is_none())
            .filter(|w| has_operator_at(branch, *w, Operator::Necessity))
            .map(|w| access_target(Self::NAME, branch, w, world2))
            .collect();
        if !targets.is_empty() && self.max_worlds.exceeded(branch) {
            return vec![Target::quit(Self::NAME, branch.id())];
        }
        targets
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![Props::swnode(
            Sentence::from(Atomic::first()).necessarily(),
            Some(0),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tableau::{BranchId, NodeId};
    use std::sync::Arc;

    fn branch_with(rule: &mut dyn Rule, nodes: Vec<Props>) -> Branch {
        let mut branch = Branch::new(BranchId(0), None);
        rule.after_branch_add(&branch);
        for (i, props) in nodes.into_iter().enumerate() {
            let node = Arc::new(Node::new(NodeId(i), props));
            branch.push(node.clone()).unwrap();
            rule.after_node_add(&node, &branch);
        }
        rule.after_trunk_build(&branch);
        branch
    }

    #[test]
    fn test_possibility_opens_new_world() {
        let mut rule = PossibilityRule::new();
        let a: Sentence = Atomic::first().into();
        let branch = branch_with(&mut rule, vec![Props::swnode(a.possibly(), Some(0))]);
        let targets = rule.targets(&branch);
        assert_eq!(targets.len(), 1);
        assert_eq!(
            targets[0].adds,
            vec![vec![Props::access(0, 1), Props::swnode(a, Some(1))]]
        );
    }

    #[test]
    fn test_necessity_reaches_visible_worlds_once() {
        let mut rule = NecessityRule::new();
        let a: Sentence = Atomic::first().into();
        let branch = branch_with(
            &mut rule,
            vec![
                Props::swnode(a.necessarily(), Some(0)),
                Props::access(0, 1),
                Props::access(0, 2),
                Props::swnode(a.clone(), Some(2)),
            ],
        );
        let targets = rule.targets(&branch);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].world, Some(1));
    }

    #[test]
    fn test_frame_rules() {
        let mut transitive = TransitiveRule::default();
        let nodes = transitive.example_nodes();
        let branch = branch_with(&mut transitive, nodes);
        let targets = transitive.targets(&branch);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].adds[0][0], Props::access(0, 2));

        let mut symmetric = SymmetricRule::default();
        let branch = branch_with(&mut symmetric, vec![Props::access(0, 1), Props::access(1, 0)]);
        assert!(symmetric.targets(&branch).is_empty());

        let reflexive = ReflexiveRule;
        let branch = branch_with(&mut ReflexiveRule, vec![atomic_at(0), atomic_at(3)]);
        assert_eq!(reflexive.targets(&branch).len(), 2);
    }

    #[test]
    fn test_serial_only_for_dead_ends_with_necessity() {
        let mut rule = SerialRule::new();
        let a: Sentence = Atomic::first().into();
        let branch = branch_with(
            &mut rule,
            vec![
                Props::swnode(a.necessarily(), Some(0)),
                Props::swnode(a.necessarily(), Some(1)),
                Props::access(1, 1),
            ],
        );
        let targets = rule.targets(&branch);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].adds[0][0], Props::access(0, 2));
    }
}
