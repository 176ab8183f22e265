//! Node filters and per-branch candidate indices.

use crate::lexicals::{
    Atomic, Constant, Operator, Parameter, Predicate, Quantifier, Sentence, Variable,
};
use crate::tableau::helpers::BranchMap;
use crate::tableau::{Branch, Node, NodeId, Props};
use indexmap::IndexSet;
use std::sync::Arc;

/// Shape a sentence node must have for a rule to consider it.
///
/// With `negated` set, the node's sentence must be a negation and every
/// other test applies to the negated operand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeFilter {
    pub negated: bool,
    pub operator: Option<Operator>,
    pub quantifier: Option<Quantifier>,
    pub predicate: Option<Predicate>,
    /// `None` accepts any designation.
    pub designated: Option<bool>,
    /// Require a world.
    pub modal: bool,
}

impl NodeFilter {
    pub fn operator(operator: Operator) -> Self {
        NodeFilter {
            operator: Some(operator),
            ..NodeFilter::default()
        }
    }

    pub fn quantifier(quantifier: Quantifier) -> Self {
        NodeFilter {
            quantifier: Some(quantifier),
            ..NodeFilter::default()
        }
    }

    pub fn predicate(predicate: Predicate) -> Self {
        NodeFilter {
            predicate: Some(predicate),
            ..NodeFilter::default()
        }
    }

    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    pub fn designated(mut self, designated: bool) -> Self {
        self.designated = Some(designated);
        self
    }

    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }

    /// The sentence the rule works on, if `props` passes.
    pub fn matches<'a>(&self, props: &'a Props) -> Option<&'a Sentence> {
        let Props::Sentence {
            sentence,
            designated,
            world,
        } = props
        else {
            return None;
        };
        if self.designated.is_some() && *designated != self.designated {
            return None;
        }
        if self.modal && world.is_none() {
            return None;
        }
        let inner = if self.negated {
            match sentence.operands() {
                [operand] if sentence.is_negated() => operand,
                _ => return None,
            }
        } else {
            sentence
        };
        if self.operator.is_some() && inner.operator() != self.operator {
            return None;
        }
        if self.quantifier.is_some() && inner.quantifier() != self.quantifier {
            return None;
        }
        if let Some(predicate) = &self.predicate {
            if inner.predicate() != Some(predicate) {
                return None;
            }
        }
        Some(inner)
    }

    /// A node that passes this filter.
    pub fn example(&self) -> Props {
        let inner = if let Some(operator) = self.operator {
            example_operated(operator)
        } else if let Some(quantifier) = self.quantifier {
            let x = Variable::first();
            Sentence::monadic(x).quantify(quantifier, x)
        } else if let Some(predicate) = &self.predicate {
            example_predicated(predicate)
        } else {
            Atomic::first().into()
        };
        let sentence = if self.negated { inner.negate() } else { inner };
        Props::Sentence {
            sentence,
            designated: self.designated,
            world: self.modal.then_some(0),
        }
    }
}

/// The operator applied to the first atomics.
pub fn example_operated(operator: Operator) -> Sentence {
    let a: Sentence = Atomic::first().into();
    let b: Sentence = Atomic::gen(2).last().map_or_else(|| a.clone(), Sentence::from);
    match operator {
        Operator::Assertion => a.asserted(),
        Operator::Negation => a.negate(),
        Operator::Conjunction => a.conjoin(&b),
        Operator::Disjunction => a.disjoin(&b),
        Operator::MaterialConditional => a.material_conditional(&b),
        Operator::MaterialBiconditional => a.material_biconditional(&b),
        Operator::Conditional => a.conditional(&b),
        Operator::Biconditional => a.biconditional(&b),
        Operator::Possibility => a.possibly(),
        Operator::Necessity => a.necessarily(),
    }
}

fn example_predicated(predicate: &Predicate) -> Sentence {
    let m = Constant::first();
    if *predicate == Predicate::identity() {
        let n = Constant::gen(2).last().unwrap_or(m);
        Sentence::identity(m, n)
    } else if *predicate == Predicate::existence() {
        Sentence::existence(m)
    } else {
        let params: Vec<Parameter> = vec![m.into(); predicate.arity()];
        Sentence::predicated(predicate.clone(), params).unwrap_or_else(|_| Sentence::monadic(m))
    }
}

/// Candidate nodes for one filter, per branch, in the order they were added.
///
/// Ticked nodes are evicted as soon as they are ticked.
#[derive(Debug, Clone)]
pub struct FilterHelper {
    filter: NodeFilter,
    candidates: BranchMap<IndexSet<NodeId>>,
}

impl FilterHelper {
    pub fn new(filter: NodeFilter) -> Self {
        FilterHelper {
            filter,
            candidates: BranchMap::default(),
        }
    }

    pub fn filter(&self) -> &NodeFilter {
        &self.filter
    }

    pub fn after_branch_add(&mut self, branch: &Branch) {
        self.candidates.branch_added(branch);
    }

    pub fn after_node_add(&mut self, node: &Node, branch: &Branch) {
        if self.filter.matches(node.props()).is_some() {
            self.candidates.entry(branch.id()).insert(node.id());
        }
    }

    pub fn after_node_tick(&mut self, node: &Node, branch: &Branch) {
        self.candidates.entry(branch.id()).shift_remove(&node.id());
    }

    /// Unticked candidates with the sentence the filter selected.
    pub fn candidates<'a>(
        &'a self,
        branch: &'a Branch,
    ) -> impl Iterator<Item = (&'a Arc<Node>, &'a Sentence)> + 'a {
        self.candidates
            .get(branch.id())
            .into_iter()
            .flatten()
            .filter(move |id| !branch.is_ticked(**id))
            .filter_map(move |id| branch.node(*id))
            .filter_map(move |node| self.filter.matches(node.props()).map(|s| (node, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tableau::BranchId;

    #[test]
    fn test_negated_filter_strips_one_negation() {
        let filter = NodeFilter::operator(Operator::Conjunction).negated().designated(true);
        let example = filter.example();
        let inner = filter.matches(&example).unwrap();
        assert_eq!(inner.operator(), Some(Operator::Conjunction));

        let a: Sentence = Atomic::first().into();
        assert!(filter.matches(&Props::sdnode(a.conjoin(&a), true)).is_none());
        assert!(filter
            .matches(&Props::sdnode(a.conjoin(&a).negate(), false))
            .is_none());
    }

    #[test]
    fn test_modal_filter_requires_world() {
        let filter = NodeFilter::operator(Operator::Necessity).modal();
        let s = example_operated(Operator::Necessity);
        assert!(filter.matches(&Props::sentence(s.clone())).is_none());
        assert!(filter.matches(&Props::swnode(s, Some(2))).is_some());
        assert_eq!(filter.example().world(), Some(0));
    }

    #[test]
    fn test_predicate_filter() {
        let filter = NodeFilter::predicate(Predicate::identity());
        let example = filter.example();
        assert!(filter.matches(&example).is_some());
        let fm = Sentence::monadic(Constant::first());
        assert!(filter.matches(&Props::sentence(fm)).is_none());
    }

    #[test]
    fn test_helper_evicts_ticked_nodes() {
        let filter = NodeFilter::operator(Operator::Conjunction);
        let mut helper = FilterHelper::new(filter.clone());
        let mut branch = Branch::new(BranchId(0), None);
        helper.after_branch_add(&branch);
        let node = Arc::new(Node::new(NodeId(0), filter.example()));
        branch.push(node.clone()).unwrap();
        helper.after_node_add(&node, &branch);
        assert_eq!(helper.candidates(&branch).count(), 1);

        let child = branch.fork(BranchId(1));
        helper.after_branch_add(&child);
        branch.tick(NodeId(0)).unwrap();
        helper.after_node_tick(&node, &branch);
        assert_eq!(helper.candidates(&branch).count(), 0);
        assert_eq!(helper.candidates(&child).count(), 1);
    }
}
