//! K3: strong Kleene logic. FDE without gluts.

use super::fde::{rule_groups, OPERATORS};
use super::{designation_trunk, Logic, Meta};
use crate::argument::Argument;
use crate::rules::{DesignationClosure, GlutClosure};
use crate::tableau::{Props, RuleSet};

pub struct K3;

impl Logic for K3 {
    fn meta(&self) -> Meta {
        Meta {
            name: "K3",
            title: "Strong Kleene Logic",
            values: &["F", "N", "T"],
            designated_values: &["T"],
            native_operators: &OPERATORS,
            modal: false,
            quantified: true,
        }
    }

    fn rules(&self) -> RuleSet {
        rule_groups()
            .with_closure(GlutClosure)
            .with_closure(DesignationClosure)
    }

    fn build_trunk(&self, argument: &Argument) -> Vec<Props> {
        designation_trunk(argument)
    }
}
