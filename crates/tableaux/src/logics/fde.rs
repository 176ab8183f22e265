//! FDE: first-degree entailment, four values, designation closure.

use super::{designation_trunk, Logic, Meta};
use crate::argument::Argument;
use crate::lexicals::{Operator, Quantifier};
use crate::rules::node_rule::{negated_operands, negated_operands_split, operands, operands_split};
use crate::rules::{
    conversions, node, DesignationClosure, ExtendedQuantifierRule, NarrowQuantifierRule,
    NodeFilter,
};
use crate::tableau::{Props, RuleSet};

pub struct Fde;

pub(crate) const OPERATORS: [Operator; 8] = [
    Operator::Assertion,
    Operator::Negation,
    Operator::Conjunction,
    Operator::Disjunction,
    Operator::MaterialConditional,
    Operator::MaterialBiconditional,
    Operator::Conditional,
    Operator::Biconditional,
];

fn designated(operator: Operator, d: bool) -> NodeFilter {
    NodeFilter::operator(operator).designated(d)
}

fn quantified(quantifier: Quantifier, d: bool) -> NodeFilter {
    NodeFilter::quantifier(quantifier).designated(d)
}

/// The four rule groups every designation logic shares. Closure rules are
/// left to the caller.
pub(crate) fn rule_groups() -> RuleSet {
    use Operator::{Conjunction, Disjunction};
    use Quantifier::{Existential, Universal};

    let mut plain = conversions();
    plain.extend([
        node("ConjunctionDesignated", designated(Conjunction, true), operands),
        node("DisjunctionUndesignated", designated(Disjunction, false), operands),
        node(
            "ConjunctionNegatedUndesignated",
            designated(Conjunction, false).negated(),
            negated_operands,
        ),
        node(
            "DisjunctionNegatedDesignated",
            designated(Disjunction, true).negated(),
            negated_operands,
        ),
    ]);
    let branching = vec![
        node("ConjunctionUndesignated", designated(Conjunction, false), operands_split),
        node("DisjunctionDesignated", designated(Disjunction, true), operands_split),
        node(
            "ConjunctionNegatedDesignated",
            designated(Conjunction, true).negated(),
            negated_operands_split,
        ),
        node(
            "DisjunctionNegatedUndesignated",
            designated(Disjunction, false).negated(),
            negated_operands_split,
        ),
    ];
    RuleSet::new()
        .with_group(plain)
        .with_group(branching)
        .with_group(vec![
            Box::new(NarrowQuantifierRule::new(
                "ExistentialDesignated",
                quantified(Existential, true),
            )),
            Box::new(NarrowQuantifierRule::new(
                "UniversalUndesignated",
                quantified(Universal, false),
            )),
        ])
        .with_group(vec![
            Box::new(ExtendedQuantifierRule::new(
                "ExistentialUndesignated",
                quantified(Existential, false),
            )),
            Box::new(ExtendedQuantifierRule::new(
                "UniversalDesignated",
                quantified(Universal, true),
            )),
        ])
}

impl Logic for Fde {
    fn meta(&self) -> Meta {
        Meta {
            name: "FDE",
            title: "First Degree Entailment",
            values: &["F", "N", "B", "T"],
            designated_values: &["B", "T"],
            native_operators: &OPERATORS,
            modal: false,
            quantified: true,
        }
    }

    fn rules(&self) -> RuleSet {
        rule_groups().with_closure(DesignationClosure)
    }

    fn build_trunk(&self, argument: &Argument) -> Vec<Props> {
        designation_trunk(argument)
    }
}
