//! LP: logic of paradox. FDE without gaps.

use super::fde::{rule_groups, OPERATORS};
use super::{designation_trunk, Logic, Meta};
use crate::argument::Argument;
use crate::rules::{DesignationClosure, GapClosure};
use crate::tableau::{Props, RuleSet};

pub struct Lp;

impl Logic for Lp {
    fn meta(&self) -> Meta {
        Meta {
            name: "LP",
            title: "Logic of Paradox",
            values: &["F", "B", "T"],
            designated_values: &["B", "T"],
            native_operators: &OPERATORS,
            modal: false,
            quantified: true,
        }
    }

    fn rules(&self) -> RuleSet {
        rule_groups()
            .with_closure(GapClosure)
            .with_closure(DesignationClosure)
    }

    fn build_trunk(&self, argument: &Argument) -> Vec<Props> {
        designation_trunk(argument)
    }
}
