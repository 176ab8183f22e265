//! Logics: named rule catalogs over the generic engine.
//!
//! A logic describes itself with [`Meta`], supplies a fresh [`RuleSet`] for
//! every tableau, and turns an [`Argument`] into trunk nodes.

pub mod cfol;
pub mod fde;
pub mod k3;
pub mod lp;
pub mod modal;

pub use cfol::Cfol;
pub use fde::Fde;
pub use k3::K3;
pub use lp::Lp;
pub use modal::{Frame, ModalLogic};

use crate::argument::Argument;
use crate::lexicals::{Operator, Sentence};
use crate::tableau::{Props, RuleSet};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub name: &'static str,
    pub title: &'static str,
    pub values: &'static [&'static str],
    pub designated_values: &'static [&'static str],
    pub native_operators: &'static [Operator],
    pub modal: bool,
    pub quantified: bool,
}

pub trait Logic {
    fn meta(&self) -> Meta;

    /// A fresh set of rules. Rules carry per-tableau state, so every
    /// tableau needs its own.
    fn rules(&self) -> RuleSet;

    fn build_trunk(&self, argument: &Argument) -> Vec<Props>;

    /// How much applying rules to `sentence` is expected to branch. Used
    /// to rank targets.
    fn branching_complexity(&self, sentence: &Sentence) -> usize {
        sentence
            .operators()
            .iter()
            .filter(|o| o.arity() == 2 && **o != Operator::Conjunction)
            .count()
    }
}

impl Logic for Box<dyn Logic> {
    fn meta(&self) -> Meta {
        (**self).meta()
    }

    fn rules(&self) -> RuleSet {
        (**self).rules()
    }

    fn build_trunk(&self, argument: &Argument) -> Vec<Props> {
        (**self).build_trunk(argument)
    }

    fn branching_complexity(&self, sentence: &Sentence) -> usize {
        (**self).branching_complexity(sentence)
    }
}

/// Names accepted by [`get`].
pub const NAMES: [&str; 9] = ["FDE", "K3", "LP", "CFOL", "K", "D", "T", "S4", "S5"];

/// Look up a logic by case-insensitive name.
pub fn get(name: &str) -> Option<Box<dyn Logic>> {
    let logic: Box<dyn Logic> = match name.to_ascii_uppercase().as_str() {
        "FDE" => Box::new(Fde),
        "K3" => Box::new(K3),
        "LP" => Box::new(Lp),
        "CFOL" => Box::new(Cfol),
        "K" => Box::new(ModalLogic::new(Frame::K)),
        "D" => Box::new(ModalLogic::new(Frame::D)),
        "T" => Box::new(ModalLogic::new(Frame::T)),
        "S4" => Box::new(ModalLogic::new(Frame::S4)),
        "S5" => Box::new(ModalLogic::new(Frame::S5)),
        _ => return None,
    };
    Some(logic)
}

pub fn all() -> Vec<Box<dyn Logic>> {
    NAMES.iter().filter_map(|n| get(n)).collect()
}

/// Premises designated, conclusion undesignated.
pub(crate) fn designation_trunk(argument: &Argument) -> Vec<Props> {
    argument
        .premises()
        .iter()
        .map(|p| Props::sdnode(p.clone(), true))
        .chain(std::iter::once(Props::sdnode(
            argument.conclusion().clone(),
            false,
        )))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_case_insensitive() {
        assert_eq!(get("s4").map(|l| l.meta().name), Some("S4"));
        assert_eq!(get("Fde").map(|l| l.meta().name), Some("FDE"));
        assert!(get("nope").is_none());
    }

    #[test]
    fn test_all_names_resolve() {
        let names: Vec<_> = all().iter().map(|l| l.meta().name).collect();
        assert_eq!(names, NAMES.to_vec());
    }

    #[test]
    fn test_rule_names_unique_per_logic() {
        for logic in all() {
            let names = logic.rules().names();
            let unique: std::collections::HashSet<_> = names.iter().collect();
            assert_eq!(unique.len(), names.len(), "{}", logic.meta().name);
        }
    }
}
