//! CFOL: classical first-order logic with identity and existence.

use super::{Logic, Meta};
use crate::argument::Argument;
use crate::lexicals::Operator;
use crate::rules::node_rule::{negated_operands, negated_operands_split, operands, operands_split};
use crate::rules::{
    conversions, node, ContradictionClosure, ExtendedQuantifierRule, IdentityRule,
    NarrowQuantifierRule, NodeFilter, NonExistenceClosure, SelfIdentityClosure,
};
use crate::tableau::{Props, Rule, RuleSet, World};

pub struct Cfol;

pub(crate) const OPERATORS: [Operator; 7] = [
    Operator::Negation,
    Operator::Conjunction,
    Operator::Disjunction,
    Operator::MaterialConditional,
    Operator::MaterialBiconditional,
    Operator::Conditional,
    Operator::Biconditional,
];

/// Conversions plus the non-branching classical operator rules.
pub(crate) fn plain_rules() -> Vec<Box<dyn Rule>> {
    let mut rules = conversions();
    rules.extend([
        node(
            "Conjunction",
            NodeFilter::operator(Operator::Conjunction),
            operands,
        ),
        node(
            "DisjunctionNegated",
            NodeFilter::operator(Operator::Disjunction).negated(),
            negated_operands,
        ),
    ]);
    rules
}

pub(crate) fn branching_rules() -> Vec<Box<dyn Rule>> {
    vec![
        node(
            "Disjunction",
            NodeFilter::operator(Operator::Disjunction),
            operands_split,
        ),
        node(
            "ConjunctionNegated",
            NodeFilter::operator(Operator::Conjunction).negated(),
            negated_operands_split,
        ),
    ]
}

/// Premises plus the negated conclusion, all at `world`.
pub(crate) fn negation_trunk(argument: &Argument, world: Option<World>) -> Vec<Props> {
    argument
        .premises()
        .iter()
        .cloned()
        .chain(std::iter::once(argument.conclusion().negate()))
        .map(|s| Props::swnode(s, world))
        .collect()
}

impl Logic for Cfol {
    fn meta(&self) -> Meta {
        Meta {
            name: "CFOL",
            title: "Classical First Order Logic",
            values: &["F", "T"],
            designated_values: &["T"],
            native_operators: &OPERATORS,
            modal: false,
            quantified: true,
        }
    }

    fn rules(&self) -> RuleSet {
        RuleSet::new()
            .with_closure(ContradictionClosure)
            .with_closure(SelfIdentityClosure)
            .with_closure(NonExistenceClosure)
            .with_group(plain_rules())
            .with_group(branching_rules())
            .with_group(vec![Box::new(NarrowQuantifierRule::existential(
                "Existential",
            ))])
            .with_group(vec![
                Box::new(ExtendedQuantifierRule::universal("Universal")),
                Box::new(IdentityRule::new()),
            ])
    }

    fn build_trunk(&self, argument: &Argument) -> Vec<Props> {
        negation_trunk(argument, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicals::{Atomic, Sentence};

    #[test]
    fn test_trunk_negates_conclusion() {
        let mut atoms = Atomic::gen(2).map(Sentence::from);
        let (a, b) = (atoms.next().unwrap(), atoms.next().unwrap());
        let trunk = Cfol.build_trunk(&Argument::new(b.clone(), [a.clone()]));
        assert_eq!(trunk, vec![Props::sentence(a), Props::sentence(b.negate())]);
    }
}
