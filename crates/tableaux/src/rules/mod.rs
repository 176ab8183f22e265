//! Rule building blocks shared by the logics.
//!
//! - [`closure`]: closure rules
//! - [`node_rule`]: operator rules driven by a filter and an expansion
//! - [`quantifier`]: narrow and extended quantifier instantiation
//! - [`modal`]: possibility, necessity and frame rules
//! - [`identity`]: substitution of identicals
//!
//! A logic composes these into a [`RuleSet`](crate::tableau::RuleSet).

pub mod closure;
pub mod filters;
pub mod identity;
pub mod modal;
pub mod node_rule;
pub mod quantifier;

pub use closure::{
    ContradictionClosure, DesignationClosure, GapClosure, GlutClosure, NonExistenceClosure,
    SelfIdentityClosure,
};
pub use filters::{FilterHelper, NodeFilter};
pub use identity::IdentityRule;
pub use modal::{
    NecessityRule, PossibilityRule, ReflexiveRule, SerialRule, SymmetricRule, TransitiveRule,
};
pub use node_rule::{Expand, NodeRule};
pub use quantifier::{ExtendedQuantifierRule, NarrowQuantifierRule};

use crate::lexicals::{Operator, Quantifier};
use crate::tableau::Rule;
use node_rule::*;

pub fn node(name: &'static str, filter: NodeFilter, expand: Expand) -> Box<dyn Rule> {
    Box::new(NodeRule::new(name, filter, expand))
}

/// Non-branching rewrites that hold under any designation: assertion,
/// double negation, the defined operators, and the quantifier duals.
pub fn conversions() -> Vec<Box<dyn Rule>> {
    use Operator::*;
    let op = NodeFilter::operator;
    vec![
        node("Assertion", op(Assertion), operands),
        node("AssertionNegated", op(Assertion).negated(), negated_operands),
        node("DoubleNegation", op(Negation).negated(), operands),
        node(
            "MaterialConditional",
            op(MaterialConditional),
            material_conditional_as_disjunction,
        ),
        node(
            "MaterialConditionalNegated",
            op(MaterialConditional).negated(),
            negated_material_conditional_as_disjunction,
        ),
        node(
            "MaterialBiconditional",
            op(MaterialBiconditional),
            material_biconditional_as_conjunction,
        ),
        node(
            "MaterialBiconditionalNegated",
            op(MaterialBiconditional).negated(),
            negated_material_biconditional_as_conjunction,
        ),
        node("Conditional", op(Conditional), conditional_as_material),
        node(
            "ConditionalNegated",
            op(Conditional).negated(),
            negated_conditional_as_material,
        ),
        node("Biconditional", op(Biconditional), biconditional_as_material),
        node(
            "BiconditionalNegated",
            op(Biconditional).negated(),
            negated_biconditional_as_material,
        ),
        node(
            "ExistentialNegated",
            NodeFilter::quantifier(Quantifier::Existential).negated(),
            dual_quantifier,
        ),
        node(
            "UniversalNegated",
            NodeFilter::quantifier(Quantifier::Universal).negated(),
            dual_quantifier,
        ),
    ]
}

/// `¬◇A` as `□¬A` and `¬□A` as `◇¬A`.
pub fn modal_conversions() -> Vec<Box<dyn Rule>> {
    vec![
        node(
            "PossibilityNegated",
            NodeFilter::operator(Operator::Possibility).negated(),
            dual_modal,
        ),
        node(
            "NecessityNegated",
            NodeFilter::operator(Operator::Necessity).negated(),
            dual_modal,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_conversions_do_not_branch() {
        let rules = conversions();
        assert!(rules.iter().all(|r| r.branching() == 0));
        let names: HashSet<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn test_conversion_examples_have_targets() {
        use crate::tableau::{Branch, BranchId, Node, NodeId};
        use std::sync::Arc;

        for mut rule in conversions().into_iter().chain(modal_conversions()) {
            let mut branch = Branch::new(BranchId(0), None);
            rule.after_branch_add(&branch);
            for (i, props) in rule.example_nodes().into_iter().enumerate() {
                let node = Arc::new(Node::new(NodeId(i), props));
                branch.push(node.clone()).unwrap();
                rule.after_node_add(&node, &branch);
            }
            assert_eq!(rule.targets(&branch).len(), 1, "{}", rule.name());
        }
    }
}
