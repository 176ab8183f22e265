//! Quantifier instantiation rules.
//!
//! A narrow rule instantiates its node once with a constant new to the
//! branch and ticks it. An extended rule never ticks: it instantiates its
//! node with every branch constant it has not used yet, or with a fresh one
//! when the branch has none, and re-fires as new constants appear.

use super::filters::{FilterHelper, NodeFilter};
use crate::lexicals::{Constant, Quantifier};
use crate::tableau::helpers::{MaxConsts, NodeConsts, NodeCount, QuitFlag};
use crate::tableau::{Branch, Listener, Node, Props, Rule, Target};
use tracing::warn;

pub struct NarrowQuantifierRule {
    name: &'static str,
    helper: FilterHelper,
}

impl NarrowQuantifierRule {
    pub fn new(name: &'static str, filter: NodeFilter) -> Self {
        NarrowQuantifierRule {
            name,
            helper: FilterHelper::new(filter),
        }
    }

    pub fn existential(name: &'static str) -> Self {
        Self::new(name, NodeFilter::quantifier(Quantifier::Existential))
    }

    pub fn universal(name: &'static str) -> Self {
        Self::new(name, NodeFilter::quantifier(Quantifier::Universal))
    }
}

impl Listener for NarrowQuantifierRule {
    fn after_branch_add(&mut self, branch: &Branch) {
        self.helper.after_branch_add(branch);
    }

    fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        self.helper.after_node_add(node, branch);
    }

    fn after_node_tick(&mut self, node: &Node, branch: &Branch) {
        self.helper.after_node_tick(node, branch);
    }
}

impl Rule for NarrowQuantifierRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn targets(&self, branch: &Branch) -> Vec<Target> {
        let constant = match branch.new_constant() {
            Ok(c) => c,
            Err(e) => {
                warn!("{} has no new constant on {}: {}", self.name, branch.id(), e);
                return Vec::new();
            }
        };
        self.helper
            .candidates(branch)
            .filter_map(|(node, sentence)| {
                let q = sentence.as_quantified()?;
                let add = node.props().with_sentence(q.unquantify(constant));
                Some(
                    Target::new(self.name, branch.id(), vec![vec![add]])
                        .with_node(node.id())
                        .with_constant(constant),
                )
            })
            .collect()
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![self.helper.filter().example()]
    }
}

pub struct ExtendedQuantifierRule {
    name: &'static str,
    helper: FilterHelper,
    max_consts: MaxConsts,
    node_consts: NodeConsts,
    node_count: NodeCount,
    quit: QuitFlag,
}

impl ExtendedQuantifierRule {
    pub fn new(name: &'static str, filter: NodeFilter) -> Self {
        ExtendedQuantifierRule {
            name,
            helper: FilterHelper::new(filter),
            max_consts: MaxConsts::default(),
            node_consts: NodeConsts::default(),
            node_count: NodeCount::default(),
            quit: QuitFlag::new(name),
        }
    }

    pub fn existential(name: &'static str) -> Self {
        Self::new(name, NodeFilter::quantifier(Quantifier::Existential))
    }

    pub fn universal(name: &'static str) -> Self {
        Self::new(name, NodeFilter::quantifier(Quantifier::Universal))
    }

    pub fn max_consts(&self) -> &MaxConsts {
        &self.max_consts
    }
}

impl Listener for ExtendedQuantifierRule {
    fn after_trunk_build(&mut self, trunk: &Branch) {
        self.max_consts.after_trunk_build(trunk);
    }

    fn after_branch_add(&mut self, branch: &Branch) {
        self.helper.after_branch_add(branch);
        self.max_consts.after_branch_add(branch);
        self.node_consts.after_branch_add(branch);
        self.node_count.after_branch_add(branch);
        self.quit.after_branch_add(branch);
    }

    fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        self.helper.after_node_add(node, branch);
        self.max_consts.after_node_add(node, branch);
        self.quit.after_node_add(node, branch);
    }

    fn after_node_tick(&mut self, node: &Node, branch: &Branch) {
        self.helper.after_node_tick(node, branch);
    }

    fn after_apply(&mut self, target: &Target) {
        if target.rule == self.name && !target.flag {
            self.node_consts.after_apply(target);
            self.node_count.after_apply(target);
        }
    }
}

impl Rule for ExtendedQuantifierRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn ticking(&self) -> bool {
        false
    }

    /// Least-applied nodes first. Once the branch holds more constants at
    /// a candidate's world than the trunk bound allows, the only target is
    /// a quit flag.
    fn targets(&self, branch: &Branch) -> Vec<Target> {
        if self.quit.is_flagged(branch.id()) {
            return Vec::new();
        }
        let mut candidates: Vec<_> = self.helper.candidates(branch).collect();
        candidates.sort_by_key(|(node, _)| self.node_count.count(branch.id(), node.id()));

        let mut targets = Vec::new();
        for (node, sentence) in candidates {
            let Some(q) = sentence.as_quantified() else {
                continue;
            };
            let constants: Vec<Constant> = if branch.constants().is_empty() {
                branch.new_constant().ok().into_iter().collect()
            } else {
                self.node_consts.unapplied(branch, node.id()).collect()
            };
            let mut found = false;
            for constant in constants {
                let add = node.props().with_sentence(q.unquantify(constant));
                if branch.has(&add) {
                    continue;
                }
                found = true;
                targets.push(
                    Target::new(self.name, branch.id(), vec![vec![add]])
                        .with_node(node.id())
                        .with_constant(constant),
                );
            }
            if found && self.max_consts.exceeded(branch.id(), node.world()) {
                return vec![Target::quit(self.name, branch.id())];
            }
        }
        targets
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![self.helper.filter().example()]
    }
}
