//! Indiscernability of identicals.

use super::filters::{FilterHelper, NodeFilter};
use crate::lexicals::{Constant, Parameter, Predicate, Sentence};
use crate::tableau::{Branch, Listener, Node, Props, Rule, Target};

/// From `a = b` and a (possibly negated) predicated sentence mentioning `a`
/// at the same world, add the sentence with `b` for `a`, and the other way
/// round. Never ticks.
pub struct IdentityRule {
    helper: FilterHelper,
}

impl IdentityRule {
    pub const NAME: &'static str = "IdentityIndiscernability";

    pub fn new() -> Self {
        IdentityRule {
            helper: FilterHelper::new(NodeFilter::predicate(Predicate::identity())),
        }
    }
}

impl Default for IdentityRule {
    fn default() -> Self {
        Self::new()
    }
}

fn constant_pair(sentence: &Sentence) -> Option<(Constant, Constant)> {
    match sentence.as_predicated()?.params() {
        [Parameter::Constant(a), Parameter::Constant(b)] if a != b => Some((*a, *b)),
        _ => None,
    }
}

fn is_literal(sentence: &Sentence) -> bool {
    let base = if sentence.is_negated() {
        sentence.operands().first()
    } else {
        Some(sentence)
    };
    base.is_some_and(|s| s.as_predicated().is_some())
}

impl Listener for IdentityRule {
    fn after_branch_add(&mut self, branch: &Branch) {
        self.helper.after_branch_add(branch);
    }

    fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        self.helper.after_node_add(node, branch);
    }
}

impl Rule for IdentityRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn ticking(&self) -> bool {
        false
    }

    fn targets(&self, branch: &Branch) -> Vec<Target> {
        let mut targets = Vec::new();
        for (identity, sentence) in self.helper.candidates(branch) {
            let Some((a, b)) = constant_pair(sentence) else {
                continue;
            };
            for node in branch.nodes() {
                if node.id() == identity.id()
                    || node.world() != identity.world()
                    || node.designated() != identity.designated()
                {
                    continue;
                }
                let Some(s) = node.sentence().filter(|s| is_literal(s)) else {
                    continue;
                };
                for (new, old) in [(b, a), (a, b)] {
                    if !s.constants().contains(&old) {
                        continue;
                    }
                    let add = node.props().with_sentence(s.substitute(new, old));
                    if branch.has(&add) {
                        continue;
                    }
                    targets.push(
                        Target::new(Self::NAME, branch.id(), vec![vec![add]])
                            .with_node(node.id())
                            .with_constant(new),
                    );
                }
            }
        }
        targets
    }

    fn example_nodes(&self) -> Vec<Props> {
        let mut constants = Constant::gen(2);
        let m = constants.next().unwrap_or_else(Constant::first);
        let n = constants.next().unwrap_or(m);
        vec![
            Props::sentence(Sentence::identity(m, n)),
            Props::sentence(Sentence::monadic(m)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tableau::{BranchId, NodeId};
    use std::sync::Arc;

    #[test]
    fn test_substitutes_both_ways_and_skips_present() {
        let mut rule = IdentityRule::new();
        let mut branch = Branch::new(BranchId(0), None);
        rule.after_branch_add(&branch);
        let m = Constant::first();
        let n = Constant::new(1, 0).unwrap();
        let nodes = [
            Props::sentence(Sentence::identity(m, n)),
            Props::sentence(Sentence::monadic(m)),
            Props::sentence(Sentence::monadic(n).negate()),
            Props::sentence(Sentence::monadic(n)),
        ];
        for (i, props) in nodes.into_iter().enumerate() {
            let node = Arc::new(Node::new(NodeId(i), props));
            branch.push(node.clone()).unwrap();
            rule.after_node_add(&node, &branch);
        }
        let adds: Vec<Props> = rule
            .targets(&branch)
            .into_iter()
            .map(|t| t.adds[0][0].clone())
            .collect();
        // Fm gives Fn (present), ¬Fn gives ¬Fm, Fn gives Fm (present).
        assert_eq!(adds, vec![Props::sentence(Sentence::monadic(m).negate())]);
    }

    #[test]
    fn test_self_identity_is_inert() {
        let m = Constant::first();
        assert!(constant_pair(&Sentence::identity(m, m)).is_none());
    }
}
