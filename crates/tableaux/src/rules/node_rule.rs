//! Operator rules: one filtered node in, node groups out.
//!
//! Each rule pairs a [`NodeFilter`] with an expansion function. The
//! expansion maps the filtered sentence to one group of sentences per
//! resulting branch, and every new node keeps the designation and world of
//! the node it came from.

use super::filters::{FilterHelper, NodeFilter};
use crate::lexicals::{Operator, Sentence};
use crate::tableau::{Branch, Listener, Node, Props, Rule, Target};

/// Maps the filtered sentence to one group of sentences per branch.
pub type Expand = fn(&Sentence) -> Vec<Vec<Sentence>>;

pub struct NodeRule {
    name: &'static str,
    expand: Expand,
    branching: usize,
    helper: FilterHelper,
}

impl NodeRule {
    pub fn new(name: &'static str, filter: NodeFilter, expand: Expand) -> Self {
        let example = filter.example();
        let branching = filter
            .matches(&example)
            .map_or(0, |s| expand(s).len().saturating_sub(1));
        NodeRule {
            name,
            expand,
            branching,
            helper: FilterHelper::new(filter),
        }
    }

    pub fn filter(&self) -> &NodeFilter {
        self.helper.filter()
    }
}

impl Listener for NodeRule {
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

impl Rule for NodeRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn branching(&self) -> usize {
        self.branching
    }

    fn targets(&self, branch: &Branch) -> Vec<Target> {
        self.helper
            .candidates(branch)
            .map(|(node, sentence)| {
                let adds = (self.expand)(sentence)
                    .into_iter()
                    .map(|group| {
                        group
                            .into_iter()
                            .map(|s| node.props().with_sentence(s))
                            .collect()
                    })
                    .collect();
                Target::new(self.name, branch.id(), adds).with_node(node.id())
            })
            .collect()
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![self.filter().example()]
    }
}

fn negate_all(groups: Vec<Vec<Sentence>>) -> Vec<Vec<Sentence>> {
    groups
        .into_iter()
        .map(|g| g.iter().map(Sentence::negate).collect())
        .collect()
}

/// Every operand on one branch. For a double negation the filtered
/// sentence is the inner negation, so this strips it.
pub fn operands(s: &Sentence) -> Vec<Vec<Sentence>> {
    vec![s.operands().to_vec()]
}

/// One operand per branch.
pub fn operands_split(s: &Sentence) -> Vec<Vec<Sentence>> {
    s.operands().iter().map(|o| vec![o.clone()]).collect()
}

pub fn negated_operands(s: &Sentence) -> Vec<Vec<Sentence>> {
    negate_all(operands(s))
}

pub fn negated_operands_split(s: &Sentence) -> Vec<Vec<Sentence>> {
    negate_all(operands_split(s))
}

fn rewrite(s: &Sentence, f: fn(&Sentence, &Sentence) -> Sentence) -> Vec<Vec<Sentence>> {
    match s.operands() {
        [lhs, rhs] => vec![vec![f(lhs, rhs)]],
        _ => Vec::new(),
    }
}

/// `A ⊃ B` as `¬A ∨ B`.
pub fn material_conditional_as_disjunction(s: &Sentence) -> Vec<Vec<Sentence>> {
    rewrite(s, |a, b| a.negate().disjoin(b))
}

pub fn negated_material_conditional_as_disjunction(s: &Sentence) -> Vec<Vec<Sentence>> {
    negate_all(material_conditional_as_disjunction(s))
}

/// `A ≡ B` as `(A ⊃ B) ∧ (B ⊃ A)`.
pub fn material_biconditional_as_conjunction(s: &Sentence) -> Vec<Vec<Sentence>> {
    rewrite(s, |a, b| {
        a.material_conditional(b)
            .conjoin(&b.material_conditional(a))
    })
}

pub fn negated_material_biconditional_as_conjunction(s: &Sentence) -> Vec<Vec<Sentence>> {
    negate_all(material_biconditional_as_conjunction(s))
}

/// `A → B` as `A ⊃ B`.
pub fn conditional_as_material(s: &Sentence) -> Vec<Vec<Sentence>> {
    rewrite(s, Sentence::material_conditional)
}

pub fn negated_conditional_as_material(s: &Sentence) -> Vec<Vec<Sentence>> {
    negate_all(conditional_as_material(s))
}

/// `A ↔ B` as `A ≡ B`.
pub fn biconditional_as_material(s: &Sentence) -> Vec<Vec<Sentence>> {
    rewrite(s, Sentence::material_biconditional)
}

pub fn negated_biconditional_as_material(s: &Sentence) -> Vec<Vec<Sentence>> {
    negate_all(biconditional_as_material(s))
}

/// The dual of a negated quantification: `¬∀xA` gives `∃x¬A`.
pub fn dual_quantifier(s: &Sentence) -> Vec<Vec<Sentence>> {
    match s.as_quantified() {
        Some(q) => vec![vec![q
            .sentence()
            .negate()
            .quantify(q.quantifier().dual(), q.variable())]],
        None => Vec::new(),
    }
}

/// The dual of a negated modality: `¬□A` gives `◇¬A`.
pub fn dual_modal(s: &Sentence) -> Vec<Vec<Sentence>> {
    let dual: fn(&Sentence) -> Sentence = match s.operator() {
        Some(Operator::Possibility) => Sentence::necessarily,
        Some(Operator::Necessity) => Sentence::possibly,
        _ => return Vec::new(),
    };
    s.operands()
        .iter()
        .map(|o| vec![dual(&o.negate())])
        .collect()
}
